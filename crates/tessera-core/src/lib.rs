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

//! # Tessera Core
//!
//! Foundational crate containing the math primitives, vertex formats, settings
//! and interface contracts used by the quad batching pipeline.
//!
//! Nothing in this crate talks to a GPU. The collaborators a batch needs at
//! runtime (color analysis, per-frame vertex memory, mesh submission and
//! shading compatibility) are expressed as traits in [`renderer::traits`] so
//! that `tessera-lanes` can be driven by any backend.

#![warn(missing_docs)]

pub mod math;
pub mod memory;
pub mod renderer;
pub mod settings;

pub use memory::{ArenaRange, FrameArena};
pub use settings::BatchSettings;
