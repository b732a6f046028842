//! PNG encoder for rendered pixel buffers.

use std::path::Path;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::render::Image;

/// Encode the rendered RGB buffer as a PNG file.
pub fn save_png(img: &Image, path: impl AsRef<Path>) -> Result<()> {
    let buffer = image::RgbImage::from_raw(
        img.width as u32,
        img.height as u32,
        img.data.clone(),
    )
    .ok_or_else(|| {
        Error::Config(format!(
            "pixel buffer length {} does not match {}x{}",
            img.data.len(),
            img.width,
            img.height
        ))
    })?;
    buffer.save(path.as_ref())?;
    Ok(())
}
