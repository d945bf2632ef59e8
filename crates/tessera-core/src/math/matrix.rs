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

//! Provides a column-major 3x3 matrix for projective 2D transforms.

use super::{Vec2, Vec3};
use std::ops::Mul;

/// A 3x3 column-major matrix.
///
/// Used as a projective 2D transform: a point `(x, y)` is lifted to `(x, y, 1)`
/// and multiplied, producing a homogeneous `(x', y', w')`. The bottom row holds
/// the perspective terms; when it is `(0, 0, 1)` the transform is affine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec3; 3],
}

impl Mat3 {
    /// The 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// Creates a new matrix from three column vectors.
    #[inline]
    pub fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Creates a 2D translation matrix.
    #[inline]
    pub fn from_translation(t: Vec2) -> Self {
        Self::from_cols(Vec3::X, Vec3::Y, Vec3::new(t.x, t.y, 1.0))
    }

    /// Creates a non-uniform 2D scale matrix.
    #[inline]
    pub fn from_scale(scale: Vec2) -> Self {
        Self::from_cols(
            Vec3::new(scale.x, 0.0, 0.0),
            Vec3::new(0.0, scale.y, 0.0),
            Vec3::Z,
        )
    }

    /// Creates a pure perspective matrix whose bottom row is `(px, py, 1)`.
    #[inline]
    pub fn from_perspective(px: f32, py: f32) -> Self {
        Self::from_cols(Vec3::new(1.0, 0.0, px), Vec3::new(0.0, 1.0, py), Vec3::Z)
    }

    /// Returns `true` if the bottom row differs from `(0, 0, 1)`.
    #[inline]
    pub fn has_perspective(&self) -> bool {
        self.cols[0].z != 0.0 || self.cols[1].z != 0.0 || self.cols[2].z != 1.0
    }

    /// Maps a 2D point through the matrix, returning homogeneous `(x, y, w)`
    /// packed as `Vec3 { x, y, z: w }`.
    #[inline]
    pub fn map_point(&self, p: Vec2) -> Vec3 {
        self.cols[0] * p.x + self.cols[1] * p.y + self.cols[2]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let col = |v: Vec3| self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z;
        Self::from_cols(col(rhs.cols[0]), col(rhs.cols[1]), col(rhs.cols[2]))
    }
}
