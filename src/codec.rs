use crate::config::SAVE_BASE_NAME;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::{BufRead, Seek, Write};

/// Decodes an image, detecting the format from the data rather than the file name.
/// Returns the image together with its format name ("png", "jpeg", ...).
pub fn decode<R: BufRead + Seek>(reader: R) -> Result<(DynamicImage, &'static str), ImageError> {
    let reader = ImageReader::new(reader).with_guessed_format()?;
    let format = reader.format();
    let image = reader.decode()?;
    Ok((image, format.map(format_name).unwrap_or("unknown")))
}

pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpeg",
        other => other.extensions_str().first().copied().unwrap_or("unknown"),
    }
}

/// Codec used when writing an image back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
}

impl SaveFormat {
    /// Only PNG sources stay PNG; every other source is re-encoded as JPEG.
    pub fn for_source(format: &str) -> Self {
        match format {
            "png" => SaveFormat::Png,
            _ => SaveFormat::Jpeg,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
        }
    }

    /// Name suggested to the save dialog, e.g. `file.png`.
    pub fn file_name(self) -> String {
        format!("{}.{}", SAVE_BASE_NAME, self.extension())
    }

    /// Encodes with library defaults (JPEG quality included).
    pub fn encode<W: Write>(self, image: &DynamicImage, writer: W) -> Result<(), ImageError> {
        match self {
            SaveFormat::Png => image.write_with_encoder(PngEncoder::new(writer)),
            SaveFormat::Jpeg => jpeg_compatible(image).write_with_encoder(JpegEncoder::new(writer)),
        }
    }
}

// JPEG has no alpha channel and no 16-bit mode; flatten to 8-bit RGB.
fn jpeg_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
        other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}
