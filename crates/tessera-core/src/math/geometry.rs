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

//! Provides an axis-aligned 2D rectangle used for device-space bounds.

use super::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle defined by its minimum and maximum corners.
///
/// Bounds only ever grow by union, so the type mirrors that usage: [`Rect::EMPTY`]
/// is an inverted rectangle that acts as the identity for [`Rect::union`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// The top-left corner (smallest x and y).
    pub min: Vec2,
    /// The bottom-right corner (largest x and y).
    pub max: Vec2,
}

impl Rect {
    /// An inverted rectangle. Joining any valid `Rect` with `EMPTY` yields that `Rect`.
    pub const EMPTY: Self = Self {
        min: Vec2::new(f32::INFINITY, f32::INFINITY),
        max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Creates a rectangle from its left, top, right and bottom edges.
    #[inline]
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left.min(right), top.min(bottom)),
            max: Vec2::new(left.max(right), top.max(bottom)),
        }
    }

    /// Computes the tightest rectangle containing every point, or [`Rect::EMPTY`]
    /// if the iterator yields nothing.
    pub fn from_points<I: IntoIterator<Item = Vec2>>(points: I) -> Self {
        points
            .into_iter()
            .fold(Self::EMPTY, |rect, p| rect.joined_with_point(p))
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// The horizontal extent, or `0.0` for an empty rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// The vertical extent, or `0.0` for an empty rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Returns `true` if the rectangle holds no point at all.
    ///
    /// A zero-area rectangle (a single point or a line) is not empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Rect) -> Self {
        Self {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Returns a rectangle grown to include `point`.
    #[inline]
    pub fn joined_with_point(&self, point: Vec2) -> Self {
        Self {
            min: Vec2::new(self.min.x.min(point.x), self.min.y.min(point.y)),
            max: Vec2::new(self.max.x.max(point.x), self.max.y.max(point.y)),
        }
    }

    /// Checks if `other` lies entirely within `self`.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.min.x >= self.min.x
                && other.min.y >= self.min.y
                && other.max.x <= self.max.x
                && other.max.y <= self.max.y)
    }
}

impl Default for Rect {
    /// Returns [`Rect::EMPTY`].
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}
