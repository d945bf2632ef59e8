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

use std::fmt::Debug;

/// The shading and stencil configuration a batch is drawn with.
///
/// The batching core never looks inside it. It only asks whether two
/// configurations may share a draw and which vertex inputs the configuration
/// consumes.
pub trait ShadingState: Debug {
    /// Returns `true` if quads drawn with `self` and `other` may share one draw.
    fn is_compatible_with(&self, other: &Self) -> bool;

    /// Returns `true` if the shading reads local coordinates.
    fn uses_local_coords(&self) -> bool;

    /// Returns `true` if the shading reads a per-vertex color input at all.
    ///
    /// When `false`, a batch never emits per-vertex color.
    fn has_color_input(&self) -> bool;
}

/// A plain shading configuration compared by value.
///
/// Two descriptors are compatible when they are equal. Suitable for callers
/// that identify their pipelines by a numeric key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShadingDescriptor {
    /// An identifier of the pipeline and stencil state.
    pub pipeline_key: u64,
    /// Whether the fragment stage reads local coordinates.
    pub uses_local_coords: bool,
    /// Whether the fragment stage reads the per-vertex color.
    pub has_color_input: bool,
}

impl ShadingDescriptor {
    /// A solid-color configuration: reads color, no local coordinates.
    pub const fn solid(pipeline_key: u64) -> Self {
        Self {
            pipeline_key,
            uses_local_coords: false,
            has_color_input: true,
        }
    }

    /// A textured configuration: reads both color and local coordinates.
    pub const fn textured(pipeline_key: u64) -> Self {
        Self {
            pipeline_key,
            uses_local_coords: true,
            has_color_input: true,
        }
    }
}

impl Default for ShadingDescriptor {
    fn default() -> Self {
        Self::solid(0)
    }
}

impl ShadingState for ShadingDescriptor {
    fn is_compatible_with(&self, other: &Self) -> bool {
        self == other
    }

    fn uses_local_coords(&self) -> bool {
        self.uses_local_coords
    }

    fn has_color_input(&self) -> bool {
        self.has_color_input
    }
}
