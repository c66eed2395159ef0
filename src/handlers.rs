use crate::codec::{self, SaveFormat};
use crate::config::OPEN_EXTENSIONS;
use crate::errors::{Result, ShellError};
use crate::explorer::Explorer;
use crate::session::{ImageResult, LoadedImage};
use std::io::Write;
use std::sync::Arc;

/// Asks the user for an image and decodes it. Always yields a result, never panics on bad input.
pub fn open_image(explorer: &dyn Explorer) -> ImageResult {
    let source = match explorer.choose_file(OPEN_EXTENSIONS) {
        Ok(source) => source,
        Err(source) => return ImageResult::Failed(ShellError::OpenFailed { source }),
    };

    match codec::decode(source) {
        Ok((image, format)) => {
            log::info!(
                "Opened {} image, {}x{}",
                format,
                image.width(),
                image.height()
            );
            ImageResult::Loaded(LoadedImage {
                image: Arc::new(image),
                format: format.to_string(),
            })
        }
        Err(source) => ImageResult::Failed(ShellError::DecodeFailed { source }),
    }
}

/// Writes `current` to a location the user picks. Without an image nothing is asked.
pub fn save_image(current: Option<&LoadedImage>, explorer: &dyn Explorer) -> Result<()> {
    let loaded = current.ok_or(ShellError::NoImageLoaded)?;
    let format = SaveFormat::for_source(&loaded.format);

    let mut file = explorer
        .create_file(&format.file_name())
        .map_err(|source| ShellError::ExportFailed { source })?;

    format
        .encode(&loaded.image, &mut file)
        .map_err(|source| ShellError::EncodeFailed { source })?;
    file.flush().map_err(|e| ShellError::EncodeFailed {
        source: image::ImageError::IoError(e),
    })?;

    log::info!("Saved image as {}", format.file_name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::testing::ScriptedExplorer;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 3, Rgba([10, 200, 30, 255])))
    }

    fn png_bytes() -> Vec<u8> {
        let mut out = Vec::new();
        SaveFormat::Png.encode(&sample(), &mut out).unwrap();
        out
    }

    fn loaded(format: &str) -> LoadedImage {
        LoadedImage {
            image: Arc::new(sample()),
            format: format.to_string(),
        }
    }

    #[test]
    fn opening_png_yields_image_and_format() {
        let explorer = ScriptedExplorer::opening(png_bytes());
        match open_image(&explorer) {
            ImageResult::Loaded(loaded) => {
                assert_eq!(loaded.format, "png");
                assert_eq!((loaded.image.width(), loaded.image.height()), (4, 3));
            }
            ImageResult::Failed(err) => panic!("unexpected error: {err}"),
        }
        assert_eq!(
            *explorer.requested_extensions.lock().unwrap(),
            vec![vec!["png".to_string(), "jpeg".to_string(), "jpg".to_string()]]
        );
    }

    #[test]
    fn opening_corrupt_data_reports_decode_stage() {
        let explorer = ScriptedExplorer::opening(b"\x89PNG but not really".to_vec());
        match open_image(&explorer) {
            ImageResult::Failed(err) => {
                assert!(err.to_string().contains("failed decoding image data"));
            }
            ImageResult::Loaded(_) => panic!("corrupt data decoded"),
        }
    }

    #[test]
    fn cancelling_open_reports_open_stage() {
        let explorer = ScriptedExplorer::cancelling();
        match open_image(&explorer) {
            ImageResult::Failed(err) => {
                assert!(err.to_string().contains("failed opening image file"));
                assert!(err.is_cancellation());
            }
            ImageResult::Loaded(_) => panic!("cancelled dialog produced an image"),
        }
    }

    #[test]
    fn saving_without_image_never_prompts() {
        let explorer = ScriptedExplorer::cancelling();
        let err = save_image(None, &explorer).unwrap_err();
        assert_eq!(err.to_string(), "no image loaded, cannot save");
        assert!(explorer.created_names().is_empty());
    }

    #[test]
    fn png_source_is_saved_as_png() {
        let explorer = ScriptedExplorer::default();
        save_image(Some(&loaded("png")), &explorer).unwrap();
        assert_eq!(explorer.created_names(), vec!["file.png"]);
        assert_eq!(&explorer.written_bytes()[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn other_sources_are_saved_as_jpeg() {
        for format in ["jpeg", "gif"] {
            let explorer = ScriptedExplorer::default();
            save_image(Some(&loaded(format)), &explorer).unwrap();
            assert_eq!(explorer.created_names(), vec!["file.jpg"]);
            assert_eq!(&explorer.written_bytes()[..2], &[0xFF, 0xD8]);
        }
    }

    #[test]
    fn refused_save_dialog_reports_export_stage() {
        let explorer = ScriptedExplorer {
            refuse_save: true,
            ..ScriptedExplorer::default()
        };
        let err = save_image(Some(&loaded("png")), &explorer).unwrap_err();
        assert!(err.to_string().starts_with("failed exporting image file"));
        assert!(explorer.written_bytes().is_empty());
    }

    #[test]
    fn saved_file_reopens_with_same_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let explorer = ScriptedExplorer {
            save_dir: Some(dir.path().to_path_buf()),
            ..ScriptedExplorer::default()
        };
        save_image(Some(&loaded("jpeg")), &explorer).unwrap();

        let reopened = image::open(dir.path().join("file.jpg")).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (4, 3));
    }
}
