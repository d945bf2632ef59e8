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

//! Batch lane - merging, finalizing and tessellating quad fills.
//!
//! - [`batch`]: The batch state machine and its merge negotiation.
//! - [`policy`]: Index strategy selection and capacity ceilings.
//! - [`tessellator`]: Vertex layout and byte generation.
//! - [`quad_set`]: Packing many rects into the fewest batches.
//! - [`draw_list`]: Frame recording and the deferred/just-in-time flush.
//! - [`color`]: The default color analysis oracle.
//! - [`dump`]: Debug dumps of a batch.

pub mod batch;
pub mod color;
pub mod draw_list;
pub mod dump;
pub mod policy;
pub mod quad_set;
pub mod tessellator;

pub use batch::{AddOutcome, Batch, MergeOutcome, PreparePath, RejectReason};
pub use color::UniformColorAnalyzer;
pub use draw_list::{DrawList, FrameStats};
pub use dump::BatchDump;
pub use policy::{
    calc_index_strategy, check_capacity, max_quads_for_tier, quad_limit, shared_quad_indices,
};
pub use quad_set::{build_batches, QuadSetEntry};
pub use tessellator::{coverage_weights, tessellate, VertexSpec, MAX_VERTEX_SIZE};
