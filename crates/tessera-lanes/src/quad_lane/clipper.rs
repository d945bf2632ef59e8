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

//! Clips quads that cross the homogeneous view plane.
//!
//! Anti-aliased edges are computed from perspective-correct edge directions,
//! which are undefined for corners with `w <= 0`. Such quads are clipped against
//! the plane `w = W0_PLANE_DISTANCE` and rebuilt as one or two quads whose
//! corners all lie in front of it.

use super::quad::Quad;
use tessera_core::math::{Vec2, Vec3};
use tessera_core::renderer::EdgeAaFlags;

/// The `w` value of the plane quads are clipped against.
pub const W0_PLANE_DISTANCE: f32 = 0.05;

/// The outcome of clipping one quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClippedQuads {
    /// The quad lies entirely behind the view plane and contributes nothing.
    Culled,
    /// A single quad, either the input unchanged or its clipped remainder.
    One(Quad),
    /// The clipped remainder needed two quads.
    Two(Quad, Quad),
}

impl ClippedQuads {
    /// The number of quads produced.
    pub fn len(&self) -> usize {
        match self {
            ClippedQuads::Culled => 0,
            ClippedQuads::One(_) => 1,
            ClippedQuads::Two(..) => 2,
        }
    }

    /// Returns `true` if the quad was culled.
    pub fn is_empty(&self) -> bool {
        matches!(self, ClippedQuads::Culled)
    }
}

impl IntoIterator for ClippedQuads {
    type Item = Quad;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<Quad>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        let pair = match self {
            ClippedQuads::Culled => [None, None],
            ClippedQuads::One(a) => [Some(a), None],
            ClippedQuads::Two(a, b) => [Some(a), Some(b)],
        };
        pair.into_iter().flatten()
    }
}

/// Clips `quad` against the view plane.
///
/// - Every corner on or behind the plane: [`ClippedQuads::Culled`].
/// - No anti-aliased edge, or every corner in front: the quad unchanged.
/// - Otherwise the visible polygon, rebuilt as one or two quads. Edges created
///   by the cut, and the split between two output quads, are not anti-aliased.
///   Local coordinates are interpolated with the same parameter as position.
pub fn clip_to_w0(quad: &Quad) -> ClippedQuads {
    if quad.is_fully_behind() {
        log::trace!("Culling quad fully behind the view plane");
        return ClippedQuads::Culled;
    }
    if quad.edge_flags.is_empty() || !quad.has_corner_behind() {
        return ClippedQuads::One(*quad);
    }

    let polygon = clip_polygon(&to_polygon(quad));
    let result = polygon_to_quads(&polygon, quad);
    log::trace!(
        "Clipped quad to a {}-gon, emitted {} quad(s)",
        polygon.len(),
        result.len()
    );
    result
}

/// The device positions of the part of `quad` in front of the view plane, in
/// outline order. Used for perspective-safe bounds.
pub(crate) fn clip_outline(quad: &Quad) -> Vec<Vec3> {
    clip_polygon(&to_polygon(quad))
        .into_iter()
        .map(|v| v.pos)
        .collect()
}

// --- Polygon clipping ---

#[derive(Debug, Clone, Copy)]
struct ClipVertex {
    pos: Vec3,
    local: Vec2,
    /// Anti-aliasing of the edge leaving this vertex.
    edge_aa: bool,
}

/// Walks the quad's outline `[c0, c1, c3, c2]`, so that the edge leaving each
/// vertex is left, bottom, right and top in turn.
fn to_polygon(quad: &Quad) -> [ClipVertex; 4] {
    let local = quad.local.unwrap_or([Vec2::ZERO; 4]);
    let edges = quad.edge_flags.to_edge_array();
    let order = [0, 1, 3, 2];
    std::array::from_fn(|i| ClipVertex {
        pos: quad.device[order[i]],
        local: local[order[i]],
        edge_aa: edges[i],
    })
}

fn is_inside(v: &ClipVertex) -> bool {
    v.pos.z >= W0_PLANE_DISTANCE
}

fn intersect(p: &ClipVertex, q: &ClipVertex) -> (Vec3, Vec2) {
    let t = (p.pos.z - W0_PLANE_DISTANCE) / (p.pos.z - q.pos.z);
    let pos = p.pos + (q.pos - p.pos) * t;
    let local = Vec2::lerp(p.local, q.local, t);
    // Pin w exactly onto the plane.
    (Vec3::new(pos.x, pos.y, W0_PLANE_DISTANCE), local)
}

/// Sutherland-Hodgman against the single plane `w = W0_PLANE_DISTANCE`.
fn clip_polygon(input: &[ClipVertex]) -> Vec<ClipVertex> {
    let mut output = Vec::with_capacity(input.len() + 2);
    for (i, p) in input.iter().enumerate() {
        let q = &input[(i + 1) % input.len()];
        match (is_inside(p), is_inside(q)) {
            (true, true) => output.push(*p),
            (true, false) => {
                output.push(*p);
                let (pos, local) = intersect(p, q);
                output.push(ClipVertex {
                    pos,
                    local,
                    edge_aa: false,
                });
            }
            (false, true) => {
                let (pos, local) = intersect(p, q);
                output.push(ClipVertex {
                    pos,
                    local,
                    edge_aa: p.edge_aa,
                });
            }
            (false, false) => {}
        }
    }
    output
}

/// Rebuilds a quad from outline vertices `[a, b, c, d]` and the AA flags of the
/// edges a-b, b-c, c-d and d-a.
fn outline_to_quad(
    polygon: &[ClipVertex],
    outline: [usize; 4],
    edges: [bool; 4],
    template: &Quad,
) -> Quad {
    let [a, b, c, d] = outline;
    let strip = [a, b, d, c];
    let device = strip.map(|i| polygon[i].pos);
    let local = template.local.map(|_| strip.map(|i| polygon[i].local));
    Quad {
        device,
        local,
        edge_flags: EdgeAaFlags::from_edge_array(edges),
        color: template.color,
    }
}

fn polygon_to_quads(polygon: &[ClipVertex], template: &Quad) -> ClippedQuads {
    let e = |i: usize| polygon[i].edge_aa;
    match polygon.len() {
        0..=2 => ClippedQuads::Culled,
        3 => ClippedQuads::One(outline_to_quad(
            polygon,
            [0, 1, 2, 2],
            [e(0), e(1), false, e(2)],
            template,
        )),
        4 => ClippedQuads::One(outline_to_quad(
            polygon,
            [0, 1, 2, 3],
            [e(0), e(1), e(2), e(3)],
            template,
        )),
        5 => ClippedQuads::Two(
            outline_to_quad(polygon, [0, 1, 2, 3], [e(0), e(1), e(2), false], template),
            outline_to_quad(polygon, [0, 3, 4, 4], [false, e(3), false, e(4)], template),
        ),
        // A non-planar w can cut two opposite corners, leaving at most six vertices.
        _ => ClippedQuads::Two(
            outline_to_quad(polygon, [0, 1, 2, 3], [e(0), e(1), e(2), false], template),
            outline_to_quad(polygon, [0, 3, 4, 5], [false, e(3), e(4), e(5)], template),
        ),
    }
}
