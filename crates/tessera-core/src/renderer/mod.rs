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

//! Provides the vocabulary shared by every stage of the quad pipeline.
//!
//! This module defines the "common language" used to describe quad fills: the
//! anti-alias tiers and edge flags, the color precision and index strategy a
//! batch settles on, the vertex attribute formats it emits, and the contracts
//! of the collaborators that sit on either side of the batching core.
//!
//! The batching itself lives in `tessera-lanes`; the collaborators (color
//! analysis, vertex memory, draw submission, shading comparison) are reached
//! only through the traits in [`traits`].

pub mod api;
pub mod error;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::error::{AllocError, BatchError};
pub use self::traits::{
    ColorAnalysis, ColorAnalyzer, DrawSink, MeshDraw, ShadingDescriptor, ShadingState,
    VertexAllocator,
};
