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

//! The quad model: a homogeneous device quad with optional local coordinates,
//! per-edge anti-aliasing flags and a fill color.

use super::clipper;
use tessera_core::math::{Mat3, PmColor4f, Rect, Vec2, Vec3};
use tessera_core::renderer::{AntiAliasTier, ColorPrecision, EdgeAaFlags};

/// A quadrilateral fill request.
///
/// Corners are stored in strip order `[top-left, bottom-left, top-right,
/// bottom-right]`. Each device corner is homogeneous, packed as
/// `Vec3 { x, y, z: w }`; a corner with `w <= 0` lies behind the view plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Device-space corners `(x, y, w)`.
    pub device: [Vec3; 4],
    /// Local-space corners, parallel to `device`.
    pub local: Option<[Vec2; 4]>,
    /// Which edges are anti-aliased.
    pub edge_flags: EdgeAaFlags,
    /// The premultiplied fill color.
    pub color: PmColor4f,
}

impl Quad {
    /// Creates a quad from homogeneous device corners in strip order.
    pub fn new(device: [Vec3; 4], edge_flags: EdgeAaFlags, color: PmColor4f) -> Self {
        Self {
            device,
            local: None,
            edge_flags,
            color,
        }
    }

    /// Maps `rect` through `view` to produce the device quad.
    pub fn from_rect(rect: Rect, view: &Mat3, edge_flags: EdgeAaFlags, color: PmColor4f) -> Self {
        Self::new(rect_corners(rect).map(|p| view.map_point(p)), edge_flags, color)
    }

    /// Attaches local coordinates.
    pub fn with_local(mut self, local: [Vec2; 4]) -> Self {
        self.local = Some(local);
        self
    }

    /// Attaches local coordinates obtained by mapping `rect` through `transform`.
    ///
    /// A perspective local transform is projected per corner.
    pub fn with_local_rect(self, rect: Rect, transform: &Mat3) -> Self {
        self.with_local(rect_corners(rect).map(|p| project(transform.map_point(p))))
    }

    /// Returns `true` if any corner has `w != 1`.
    pub fn is_perspective(&self) -> bool {
        self.device.iter().any(|p| p.z != 1.0)
    }

    /// Returns `true` if at least one corner lies on or behind the view plane.
    pub fn has_corner_behind(&self) -> bool {
        self.device.iter().any(|p| p.z <= 0.0)
    }

    /// Returns `true` if every corner lies on or behind the view plane.
    pub fn is_fully_behind(&self) -> bool {
        self.device.iter().all(|p| p.z <= 0.0)
    }

    /// Device corners divided by `w`. Corners with `w <= 0` keep their raw `(x, y)`.
    pub fn projected_device(&self) -> [Vec2; 4] {
        self.device.map(project)
    }

    /// The device-space bounds of the visible part of the quad.
    ///
    /// Only geometry in front of the view plane contributes, so a quad that
    /// straddles the plane still gets finite bounds and a fully hidden one gets
    /// [`Rect::EMPTY`].
    pub fn bounds(&self) -> Rect {
        if !self.is_perspective() {
            return Rect::from_points(self.device.iter().map(|p| p.truncate()));
        }
        if !self.has_corner_behind() {
            return Rect::from_points(self.projected_device());
        }
        Rect::from_points(clipper::clip_outline(self).into_iter().map(project))
    }

    /// The metadata stored alongside this quad's geometry.
    pub fn metadata(&self) -> QuadMetadata {
        QuadMetadata {
            color: self.color,
            edge_flags: self.edge_flags,
        }
    }
}

/// The per-quad data a batch keeps next to the geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadMetadata {
    /// The fill color. Finalize may overwrite it with a constant override.
    pub color: PmColor4f,
    /// Which edges are anti-aliased.
    pub edge_flags: EdgeAaFlags,
}

/// Returns the corners of `rect` in strip order.
pub fn rect_corners(rect: Rect) -> [Vec2; 4] {
    [
        Vec2::new(rect.left(), rect.top()),
        Vec2::new(rect.left(), rect.bottom()),
        Vec2::new(rect.right(), rect.top()),
        Vec2::new(rect.right(), rect.bottom()),
    ]
}

/// The cheapest vertex color encoding able to carry `color` unclamped.
pub fn min_color_precision(color: &PmColor4f) -> ColorPrecision {
    if color.fits_in_bytes() {
        ColorPrecision::Byte
    } else {
        ColorPrecision::Half
    }
}

/// Reconciles a requested anti-alias tier with a quad's edge flags.
///
/// A `None` tier clears every flag, and a `Coverage` request with no flagged
/// edge is downgraded to `None`. `Msaa` keeps its flags.
pub fn resolve_aa(tier: AntiAliasTier, flags: EdgeAaFlags) -> (AntiAliasTier, EdgeAaFlags) {
    match tier {
        AntiAliasTier::None => (AntiAliasTier::None, EdgeAaFlags::NONE),
        AntiAliasTier::Coverage if flags.is_empty() => (AntiAliasTier::None, EdgeAaFlags::NONE),
        AntiAliasTier::Coverage | AntiAliasTier::Msaa => (tier, flags),
    }
}

#[inline]
pub(crate) fn project(p: Vec3) -> Vec2 {
    if p.z > 0.0 {
        Vec2::new(p.x / p.z, p.y / p.z)
    } else {
        p.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_rect() -> Rect {
        Rect::from_ltrb(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_from_rect_uses_strip_order() {
        let q = Quad::from_rect(unit_rect(), &Mat3::IDENTITY, EdgeAaFlags::NONE, PmColor4f::RED);
        assert_eq!(q.device[0], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(q.device[1], Vec3::new(0.0, 10.0, 1.0));
        assert_eq!(q.device[2], Vec3::new(10.0, 0.0, 1.0));
        assert_eq!(q.device[3], Vec3::new(10.0, 10.0, 1.0));
        assert!(!q.is_perspective());
        assert_eq!(q.bounds(), unit_rect());
    }

    #[test]
    fn test_resolve_aa() {
        assert_eq!(
            resolve_aa(AntiAliasTier::None, EdgeAaFlags::ALL),
            (AntiAliasTier::None, EdgeAaFlags::NONE)
        );
        assert_eq!(
            resolve_aa(AntiAliasTier::Coverage, EdgeAaFlags::NONE),
            (AntiAliasTier::None, EdgeAaFlags::NONE)
        );
        assert_eq!(
            resolve_aa(AntiAliasTier::Coverage, EdgeAaFlags::LEFT),
            (AntiAliasTier::Coverage, EdgeAaFlags::LEFT)
        );
        assert_eq!(
            resolve_aa(AntiAliasTier::Msaa, EdgeAaFlags::NONE),
            (AntiAliasTier::Msaa, EdgeAaFlags::NONE)
        );
    }

    #[test]
    fn test_perspective_bounds_are_projected() {
        let q = Quad::new(
            [
                Vec3::new(0.0, 0.0, 2.0),
                Vec3::new(0.0, 8.0, 2.0),
                Vec3::new(8.0, 0.0, 2.0),
                Vec3::new(8.0, 8.0, 2.0),
            ],
            EdgeAaFlags::NONE,
            PmColor4f::WHITE,
        );
        let b = q.bounds();
        assert_relative_eq!(b.right(), 4.0);
        assert_relative_eq!(b.bottom(), 4.0);
    }

    #[test]
    fn test_bounds_ignore_geometry_behind_plane() {
        let q = Quad::new(
            [
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 10.0, 1.0),
                Vec3::new(10.0, 0.0, 1.0),
                Vec3::new(1000.0, 1000.0, -1.0),
            ],
            EdgeAaFlags::NONE,
            PmColor4f::WHITE,
        );
        let b = q.bounds();
        assert!(!b.is_empty());
        assert!(b.right().is_finite() && b.bottom().is_finite());
        assert!(b.left() <= 0.0 && b.top() <= 0.0);

        let hidden = Quad::new([Vec3::new(1.0, 1.0, -1.0); 4], EdgeAaFlags::NONE, PmColor4f::WHITE);
        assert!(hidden.bounds().is_empty());
    }

    #[test]
    fn test_local_rect_mapping() {
        let q = Quad::from_rect(unit_rect(), &Mat3::IDENTITY, EdgeAaFlags::NONE, PmColor4f::RED)
            .with_local_rect(
                Rect::from_ltrb(0.0, 0.0, 1.0, 1.0),
                &Mat3::from_scale(Vec2::new(2.0, 4.0)),
            );
        let local = q.local.unwrap();
        assert_eq!(local[3], Vec2::new(2.0, 4.0));
        assert_eq!(local[1], Vec2::new(0.0, 4.0));
    }

    #[test]
    fn test_min_color_precision() {
        assert_eq!(min_color_precision(&PmColor4f::RED), ColorPrecision::Byte);
        assert_eq!(
            min_color_precision(&PmColor4f::new(2.0, 0.0, 0.0, 1.0)),
            ColorPrecision::Half
        );
    }
}
