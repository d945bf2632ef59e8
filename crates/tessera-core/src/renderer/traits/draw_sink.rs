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

use crate::math::{PmColor4f, Rect};
use crate::renderer::api::{AntiAliasTier, IndexStrategy, VertexAttribute};

/// A prepared draw, borrowed from the batch and its vertex arena for the
/// duration of one [`DrawSink::draw_mesh`] call.
#[derive(Debug, Clone, Copy)]
pub struct MeshDraw<'a> {
    /// Interleaved vertex records, `vertex_count * vertex_stride` bytes.
    pub vertices: &'a [u8],
    /// The size in bytes of one vertex record.
    pub vertex_stride: usize,
    /// The number of vertex records.
    pub vertex_count: u32,
    /// The number of quads the vertices describe.
    pub quad_count: u32,
    /// How the vertices are assembled into triangles.
    pub index_strategy: IndexStrategy,
    /// The layout of one vertex record.
    pub attributes: &'a [VertexAttribute],
    /// The anti-aliasing the pipeline must be configured for.
    pub tier: AntiAliasTier,
    /// The color applied to every quad when the vertices carry none.
    pub uniform_color: Option<PmColor4f>,
    /// The device-space bounds of the draw.
    pub bounds: Rect,
}

impl MeshDraw<'_> {
    /// The number of indices to draw, counting the implicit ones of an
    /// unindexed triangle list.
    pub fn index_count(&self) -> u32 {
        self.quad_count * self.index_strategy.indices_per_quad() as u32
    }
}

/// The submission endpoint for prepared draws.
pub trait DrawSink {
    /// Executes one draw. Called exactly once per executed batch.
    fn draw_mesh(&mut self, draw: &MeshDraw<'_>);
}
