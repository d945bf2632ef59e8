// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the premultiplied RGBA color carried by every quad, and its
//! packed vertex encodings.

use super::saturate;
use half::f16;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A premultiplied RGBA color with `f32` channels.
///
/// Channels are not clamped; values outside `[0.0, 1.0]` are legal and force the
/// wider half-float vertex encoding when they reach the tessellator.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct PmColor4f {
    /// Red channel, already multiplied by alpha.
    pub r: f32,
    /// Green channel, already multiplied by alpha.
    pub g: f32,
    /// Blue channel, already multiplied by alpha.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl PmColor4f {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from channels that are already premultiplied.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from unpremultiplied channels.
    #[inline]
    pub fn from_unpremul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r * a, g * a, b * a, a)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns `true` if every channel lies in `[0.0, 1.0]` and can be stored
    /// in 8 bits without clamping.
    #[inline]
    pub fn fits_in_bytes(&self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Packs the color as four unsigned normalized bytes, `round(c * 255)`.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 4] {
        self.to_array()
            .map(|c| (saturate(c) * 255.0).round() as u8)
    }

    /// Packs the color as four IEEE 754 binary16 values, rounded to nearest even.
    #[inline]
    pub fn to_half_bits(&self) -> [u16; 4] {
        self.to_array().map(|c| f16::from_f32(c).to_bits())
    }
}

impl fmt::Display for PmColor4f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.2}, {:.2})",
            self.r, self.g, self.b, self.a
        )
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_unpremul_multiplies_alpha() {
        let c = PmColor4f::from_unpremul(1.0, 0.5, 0.0, 0.5);
        assert_relative_eq!(c.r, 0.5);
        assert_relative_eq!(c.g, 0.25);
        assert_relative_eq!(c.b, 0.0);
        assert_relative_eq!(c.a, 0.5);
    }

    #[test]
    fn test_fits_in_bytes() {
        assert!(PmColor4f::RED.fits_in_bytes());
        assert!(PmColor4f::TRANSPARENT.fits_in_bytes());
        assert!(!PmColor4f::new(1.5, 0.0, 0.0, 1.0).fits_in_bytes());
        assert!(!PmColor4f::new(-0.1, 0.0, 0.0, 1.0).fits_in_bytes());
    }

    #[test]
    fn test_to_bytes_rounds() {
        assert_eq!(PmColor4f::RED.to_bytes(), [255, 0, 0, 255]);
        assert_eq!(PmColor4f::new(0.5, 0.2, 1.0, 1.0).to_bytes(), [128, 51, 255, 255]);
    }

    #[test]
    fn test_half_bits_known_values() {
        assert_eq!(
            PmColor4f::new(0.0, 1.0, 0.5, 1.5).to_half_bits(),
            [0x0000, 0x3c00, 0x3800, 0x3e00]
        );
        assert_eq!(
            PmColor4f::new(-0.0, 2.0, -2.0, 65504.0).to_half_bits(),
            [0x8000, 0x4000, 0xc000, 0x7bff]
        );
    }

    #[test]
    fn test_half_bits_out_of_range() {
        let bits = PmColor4f::new(1.0e6, f32::NEG_INFINITY, 1.0e-10, 1.0).to_half_bits();
        assert_eq!(bits, [0x7c00, 0xfc00, 0x0000, 0x3c00]);
    }
}
