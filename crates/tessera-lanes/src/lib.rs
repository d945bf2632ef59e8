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

//! # Tessera Lanes
//!
//! The hot path of quad-fill batching. Independent quad fills are collected
//! into batches that merge whenever their shading, anti-aliasing tier and
//! index capacity allow, then finalized, tessellated into frame-scoped vertex
//! memory and submitted as one draw each.
//!
//! - [`quad_lane`]: quads, view-plane clipping and the quad buffer.
//! - [`batch_lane`]: batches, the capacity policy, tessellation and frame flushing.

#![warn(missing_docs)]

pub mod batch_lane;
pub mod quad_lane;

pub use batch_lane::*;
pub use quad_lane::{clip_to_w0, resolve_aa, ClippedQuads, Quad, QuadBuffer, QuadMetadata};
