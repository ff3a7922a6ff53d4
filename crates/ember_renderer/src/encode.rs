//! Pixel encoding: sample averaging, gamma correction and quantization.

use crate::Color;
use ember_math::Interval;

/// Range a gamma-encoded channel is clamped to before scaling by 256.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply gamma correction (gamma = 2.0).
///
/// Negative and NaN inputs encode as 0.
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize one gamma-encoded channel to 0-255.
#[inline]
pub fn quantize(gamma: f32) -> u8 {
    (256.0 * INTENSITY.clamp(gamma)) as u8
}

/// Convert an accumulated sample sum into an 8-bit RGB triple.
pub fn encode_pixel(sum: Color, samples_per_pixel: u32) -> [u8; 3] {
    let scale = 1.0 / samples_per_pixel.max(1) as f32;
    let averaged = sum * scale;
    [
        quantize(linear_to_gamma(averaged.x)),
        quantize(linear_to_gamma(averaged.y)),
        quantize(linear_to_gamma(averaged.z)),
    ]
}
