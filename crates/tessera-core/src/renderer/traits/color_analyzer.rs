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

use super::ShadingState;
use crate::math::PmColor4f;

/// The result of folding a batch's quad colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorAnalysis {
    /// Every quad can be drawn with this single color.
    Constant(PmColor4f),
    /// Colors differ per quad and must travel with the vertices.
    Varying,
}

/// The oracle consulted once per batch, at finalize time, to decide whether a
/// single color covers every quad.
pub trait ColorAnalyzer<S: ShadingState> {
    /// Folds `colors`, in insertion order, under the given shading configuration.
    fn analyze(&self, shading: &S, colors: &mut dyn Iterator<Item = PmColor4f>) -> ColorAnalysis;
}
