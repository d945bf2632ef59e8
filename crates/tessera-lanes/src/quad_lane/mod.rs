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

//! Quad lane - the geometric representation of fill requests.
//!
//! - [`quad`]: The quad model, AA resolution and perspective-safe bounds.
//! - [`clipper`]: Clipping of anti-aliased quads that cross the view plane.
//! - [`quad_buffer`]: The ordered quad store a batch owns.

pub mod clipper;
pub mod quad;
pub mod quad_buffer;

pub use clipper::{clip_to_w0, ClippedQuads, W0_PLANE_DISTANCE};
pub use quad::{min_color_precision, rect_corners, resolve_aa, Quad, QuadMetadata};
pub use quad_buffer::{QuadBuffer, QuadEntry};
