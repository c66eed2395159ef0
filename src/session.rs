use crate::errors::{Result, ShellError};
use image::DynamicImage;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: Arc<DynamicImage>,
    /// Format detected when decoding, e.g. "png" or "jpeg".
    pub format: String,
}

/// Outcome of one open attempt: an image or the error that prevented it, never both.
#[derive(Debug)]
pub enum ImageResult {
    Loaded(LoadedImage),
    Failed(ShellError),
}

/// Everything the window shows. Only the dispatcher mutates it.
#[derive(Debug, Default)]
pub struct Session {
    image: Option<ImageResult>,
    save_error: Option<ShellError>,
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(&self) -> Option<&LoadedImage> {
        match &self.image {
            Some(ImageResult::Loaded(loaded)) => Some(loaded),
            _ => None,
        }
    }

    pub fn open_error(&self) -> Option<&ShellError> {
        match &self.image {
            Some(ImageResult::Failed(err)) => Some(err),
            _ => None,
        }
    }

    pub fn save_error(&self) -> Option<&ShellError> {
        self.save_error.as_ref()
    }

    pub fn can_save(&self) -> bool {
        self.loaded().is_some()
    }

    /// Bumped every time the image result is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn apply_open(&mut self, result: ImageResult) {
        self.image = Some(result);
        self.revision += 1;
    }

    pub fn apply_save(&mut self, result: Result<()>) {
        self.save_error = result.err();
    }
}
