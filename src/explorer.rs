use crate::errors::ExplorerError;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};

/// Readable, seekable handle to a chosen file.
pub trait ImageSource: BufRead + Seek + Send {}
impl<T: BufRead + Seek + Send> ImageSource for T {}

/// File picker capability. Both calls block until the user answers the dialog.
pub trait Explorer: Send + Sync + 'static {
    fn choose_file(&self, extensions: &[&str]) -> Result<Box<dyn ImageSource>, ExplorerError>;

    fn create_file(&self, name: &str) -> Result<Box<dyn Write + Send>, ExplorerError>;
}

/// Native dialogs through `rfd`.
#[derive(Debug, Default)]
pub struct NativeExplorer;

impl Explorer for NativeExplorer {
    fn choose_file(&self, extensions: &[&str]) -> Result<Box<dyn ImageSource>, ExplorerError> {
        let path = rfd::FileDialog::new()
            .add_filter("Images", extensions)
            .pick_file()
            .ok_or(ExplorerError::Cancelled)?;
        log::debug!("Opening {}", path.display());
        let file = File::open(&path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn create_file(&self, name: &str) -> Result<Box<dyn Write + Send>, ExplorerError> {
        let path = rfd::FileDialog::new()
            .set_file_name(name)
            .save_file()
            .ok_or(ExplorerError::Cancelled)?;
        log::debug!("Creating {}", path.display());
        let file = File::create(&path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
