//! Plain-text PPM (`P3`) output.

use crate::error::RenderResult;
use crate::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `image` as PPM text: a three line header followed by one
/// `r g b` line per pixel, rows top to bottom.
pub fn write_ppm<W: Write>(image: &PixelBuffer, writer: W) -> RenderResult<()> {
    let mut writer = BufWriter::new(writer);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.encoded() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `image` to a PPM file at `path`.
pub fn save_ppm(image: &PixelBuffer, path: impl AsRef<Path>) -> RenderResult<()> {
    let file = File::create(path.as_ref())?;
    write_ppm(image, file)?;
    log::info!("Saved {}x{} image to {}", image.width(), image.height(), path.as_ref().display());
    Ok(())
}
