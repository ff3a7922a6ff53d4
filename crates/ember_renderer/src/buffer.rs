//! Accumulated pixel storage produced by a render.

use crate::encode::encode_pixel;
use crate::Color;

/// Per-pixel sums of every sample's color, not yet divided by the sample
/// count. Row-major, row 0 at the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Assemble a buffer from complete scanlines.
    ///
    /// Panics if any row's length differs from `width`.
    pub fn from_rows(width: u32, rows: Vec<Vec<Color>>, samples_per_pixel: u32) -> Self {
        let height = rows.len() as u32;
        let mut pixels = Vec::with_capacity(width as usize * rows.len());
        for (j, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), width as usize, "row {} has the wrong width", j);
            pixels.extend(row);
        }

        Self {
            width,
            height,
            samples_per_pixel,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Accumulated sum at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// One scanline of accumulated sums.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// All accumulated sums, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Averaged linear color at (x, y).
    pub fn average(&self, x: u32, y: u32) -> Color {
        self.get(x, y) / self.samples_per_pixel.max(1) as f32
    }

    /// Gamma-encoded 8-bit triples in output order.
    pub fn encoded(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels
            .iter()
            .map(move |&sum| encode_pixel(sum, self.samples_per_pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_is_row_major() {
        let image = PixelBuffer::from_rows(
            3,
            vec![
                vec![Color::splat(0.0), Color::splat(1.0), Color::splat(2.0)],
                vec![Color::splat(3.0), Color::splat(4.0), Color::splat(5.0)],
            ],
            4,
        );

        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.get(1, 0), Color::splat(1.0));
        assert_eq!(image.get(0, 1), Color::splat(3.0));
        assert_eq!(image.row(1)[2], Color::splat(5.0));
        assert_eq!(image.average(2, 1), Color::splat(1.25));
        assert_eq!(image.encoded().count(), 6);
    }

    #[test]
    fn test_indexing_past_u32_range() {
        // 65536 * 65536 overflows u32; the index must be computed in usize
        let image = PixelBuffer {
            width: 65_536,
            height: 2,
            samples_per_pixel: 1,
            pixels: Vec::new(),
        };
        let result = std::panic::catch_unwind(|| image.get(0, 65_536));
        // Out of bounds on the empty store, not an arithmetic overflow
        let message = result
            .err()
            .and_then(|e| e.downcast_ref::<String>().cloned())
            .unwrap_or_default();
        assert!(message.contains("index out of bounds"), "{}", message);
    }

    #[test]
    #[should_panic(expected = "wrong width")]
    fn test_from_rows_rejects_ragged_rows() {
        PixelBuffer::from_rows(2, vec![vec![Color::ZERO; 2], vec![Color::ZERO; 3]], 1);
    }
}
