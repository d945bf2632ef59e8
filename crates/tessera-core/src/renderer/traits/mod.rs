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

//! Defines the contracts of the collaborators around the batching core.
//!
//! - [`ShadingState`]: The opaque shading/stencil configuration a batch is drawn with.
//! - [`ColorAnalyzer`]: The oracle that folds per-quad colors at finalize time.
//! - [`VertexAllocator`]: Frame-scoped memory for vertex bytes.
//! - [`DrawSink`]: The submission endpoint that executes a prepared draw.

mod color_analyzer;
mod draw_sink;
mod shading;
mod vertex_allocator;

pub use self::color_analyzer::{ColorAnalysis, ColorAnalyzer};
pub use self::draw_sink::{DrawSink, MeshDraw};
pub use self::shading::{ShadingDescriptor, ShadingState};
pub use self::vertex_allocator::VertexAllocator;
