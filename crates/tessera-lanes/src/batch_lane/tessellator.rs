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

//! Turns a finalized batch's quads into interleaved vertex bytes.
//!
//! Each quad yields one vertex record per corner, laid out as:
//!
//! | attribute | format | present when |
//! |---|---|---|
//! | position | `Float32x2` or `Float32x3` (x, y, w) | always; 3 components if any quad is perspective |
//! | local coords | `Float32x2` | the shading reads local coordinates |
//! | color | `Unorm8x4` or `Float16x4` | color precision is `Byte` or `Half` |
//! | coverage | `Float32` | the tier is `Coverage` |
//!
//! Records are written in insertion order. With the shared index strategy a
//! quad emits its 4 corners in strip order; without an index buffer it emits
//! the 6 corners `0, 1, 2, 2, 1, 3` of its two triangles.

use crate::quad_lane::quad::project;
use crate::quad_lane::{QuadBuffer, QuadMetadata};
use bytemuck::Pod;
use tessera_core::renderer::{
    ColorPrecision, EdgeAaFlags, IndexStrategy, VertexAttribute, VertexFormat, VertexSemantic,
};

/// The largest vertex record any spec can produce, in bytes.
pub const MAX_VERTEX_SIZE: usize = 32;

const SHARED_CORNER_ORDER: [usize; 4] = [0, 1, 2, 3];
const UNINDEXED_CORNER_ORDER: [usize; 6] = [0, 1, 2, 2, 1, 3];

/// Describes the vertex layout and triangulation of one prepared batch.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSpec {
    perspective: bool,
    local_coords: bool,
    color: ColorPrecision,
    coverage: bool,
    index_strategy: IndexStrategy,
    attributes: Vec<VertexAttribute>,
    vertex_size: usize,
}

impl VertexSpec {
    /// Derives the layout from what the batch needs.
    pub fn new(
        perspective: bool,
        local_coords: bool,
        color: ColorPrecision,
        coverage: bool,
        index_strategy: IndexStrategy,
    ) -> Self {
        let mut attributes = Vec::with_capacity(4);
        let mut offset = 0;
        let mut push = |semantic, format: VertexFormat| {
            attributes.push(VertexAttribute {
                semantic,
                format,
                offset,
            });
            offset += format.size();
        };

        let position = if perspective {
            VertexFormat::Float32x3
        } else {
            VertexFormat::Float32x2
        };
        push(VertexSemantic::Position, position);
        if local_coords {
            push(VertexSemantic::LocalCoord, VertexFormat::Float32x2);
        }
        match color {
            ColorPrecision::None => {}
            ColorPrecision::Byte => push(VertexSemantic::Color, VertexFormat::Unorm8x4),
            ColorPrecision::Half => push(VertexSemantic::Color, VertexFormat::Float16x4),
        }
        if coverage {
            push(VertexSemantic::Coverage, VertexFormat::Float32);
        }

        Self {
            perspective,
            local_coords,
            color,
            coverage,
            index_strategy,
            attributes,
            vertex_size: offset,
        }
    }

    /// The size in bytes of one vertex record.
    #[inline]
    pub fn vertex_size(&self) -> usize {
        self.vertex_size
    }

    /// The number of vertex records emitted per quad.
    #[inline]
    pub fn vertices_per_quad(&self) -> usize {
        self.index_strategy.vertices_per_quad()
    }

    /// Returns `true` if the draw needs the shared index buffer.
    #[inline]
    pub fn needs_index_buffer(&self) -> bool {
        self.index_strategy.needs_index_buffer()
    }

    /// The vertex attributes in record order.
    #[inline]
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// The index strategy the draw uses.
    #[inline]
    pub fn index_strategy(&self) -> IndexStrategy {
        self.index_strategy
    }

    /// The color encoding, `None` if the vertices carry no color.
    #[inline]
    pub fn color_precision(&self) -> ColorPrecision {
        self.color
    }

    /// Returns `true` if positions carry `w`.
    #[inline]
    pub fn is_perspective(&self) -> bool {
        self.perspective
    }

    /// Returns `true` if vertices carry local coordinates.
    #[inline]
    pub fn has_local_coords(&self) -> bool {
        self.local_coords
    }

    /// Returns `true` if vertices carry a coverage weight.
    #[inline]
    pub fn has_coverage(&self) -> bool {
        self.coverage
    }

    /// The number of vertex records for `quad_count` quads.
    #[inline]
    pub fn vertex_count(&self, quad_count: usize) -> usize {
        quad_count * self.vertices_per_quad()
    }

    /// The number of bytes needed for `quad_count` quads.
    #[inline]
    pub fn buffer_size(&self, quad_count: usize) -> usize {
        self.vertex_count(quad_count) * self.vertex_size
    }
}

/// Per-corner coverage weights for the given edge flags, in strip order.
///
/// Each corner is attenuated by half for every anti-aliased edge meeting at it.
pub fn coverage_weights(flags: EdgeAaFlags) -> [f32; 4] {
    let edge = |e: EdgeAaFlags| if flags.contains(e) { 0.5 } else { 1.0 };
    let (left, top, right, bottom) = (
        edge(EdgeAaFlags::LEFT),
        edge(EdgeAaFlags::TOP),
        edge(EdgeAaFlags::RIGHT),
        edge(EdgeAaFlags::BOTTOM),
    );
    [left * top, left * bottom, right * top, right * bottom]
}

struct RecordWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl RecordWriter<'_> {
    fn put<T: Pod>(&mut self, value: &T) {
        let bytes = bytemuck::bytes_of(value);
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}

/// Writes the vertex records of every quad in `quads` into `out`.
///
/// Returns the number of bytes written, always `spec.buffer_size(quads.count())`.
///
/// # Panics
///
/// Panics if `out` is shorter than `spec.buffer_size(quads.count())`.
pub fn tessellate(spec: &VertexSpec, quads: &QuadBuffer<QuadMetadata>, out: &mut [u8]) -> usize {
    let total = spec.buffer_size(quads.count());
    assert!(
        out.len() >= total,
        "vertex output holds {} bytes, {} needed",
        out.len(),
        total
    );

    let stride = spec.vertex_size;
    let order: &[usize] = match spec.index_strategy {
        IndexStrategy::SharedQuads => &SHARED_CORNER_ORDER,
        IndexStrategy::Unindexed => &UNINDEXED_CORNER_ORDER,
    };

    let mut records = [[0u8; MAX_VERTEX_SIZE]; 4];
    let mut cursor = 0;
    for entry in quads.iter() {
        let weights = coverage_weights(entry.metadata.edge_flags);
        let color = entry.metadata.color;

        for (corner, record) in records.iter_mut().enumerate() {
            let mut writer = RecordWriter {
                buf: &mut record[..stride],
                pos: 0,
            };
            let p = entry.device[corner];
            if spec.perspective {
                writer.put(&[p.x, p.y, p.z]);
            } else {
                writer.put(&[p.x, p.y]);
            }
            if spec.local_coords {
                let local = entry
                    .local
                    .map_or_else(|| project(p), |local| local[corner]);
                writer.put(&local);
            }
            match spec.color {
                ColorPrecision::None => {}
                ColorPrecision::Byte => writer.put(&color.to_bytes()),
                ColorPrecision::Half => writer.put(&color.to_half_bits()),
            }
            if spec.coverage {
                writer.put(&weights[corner]);
            }
        }

        for &corner in order {
            out[cursor..cursor + stride].copy_from_slice(&records[corner][..stride]);
            cursor += stride;
        }
    }
    cursor
}
