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

//! Enums describing how a batch of quads is anti-aliased, colored and indexed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The anti-aliasing technique applied to a batch of quads.
///
/// The tiers form a small lattice: `None < Coverage`, while `Msaa` is
/// incomparable with both and only ever combines with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AntiAliasTier {
    /// No anti-aliasing. Edge flags are ignored.
    #[default]
    None,
    /// Analytic per-edge coverage computed in the vertex data.
    Coverage,
    /// Multisampling. Edges are smoothed by the render target.
    Msaa,
}

impl AntiAliasTier {
    /// Returns the tier a batch takes when combined with `other`, or `None`
    /// if the two tiers cannot share a batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::renderer::AntiAliasTier;
    /// assert_eq!(
    ///     AntiAliasTier::None.combined_with(AntiAliasTier::Coverage),
    ///     Some(AntiAliasTier::Coverage)
    /// );
    /// assert_eq!(AntiAliasTier::Msaa.combined_with(AntiAliasTier::None), None);
    /// ```
    pub fn combined_with(self, other: Self) -> Option<Self> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (AntiAliasTier::None, AntiAliasTier::Coverage)
            | (AntiAliasTier::Coverage, AntiAliasTier::None) => Some(AntiAliasTier::Coverage),
            _ => None,
        }
    }
}

/// The encoding used for per-vertex color.
///
/// Ordered from cheapest to widest, so the precision a set of quads needs is
/// the maximum of their individual requirements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ColorPrecision {
    /// No per-vertex color. A single uniform color is used for the whole draw.
    #[default]
    None,
    /// Four unsigned normalized bytes.
    Byte,
    /// Four IEEE 754 half floats.
    Half,
}

/// The scheme used to turn quad vertices into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexStrategy {
    /// Four vertices per quad, triangulated by a shared 16-bit index pattern
    /// `[0, 1, 2, 2, 1, 3] + 4 * i` supplied by the sink.
    SharedQuads,
    /// Six vertices per quad, drawn as a plain triangle list with no index buffer.
    Unindexed,
}

impl IndexStrategy {
    /// The largest quad count a 16-bit shared pattern can address (65536 / 4).
    pub const MAX_SHARED_QUADS: usize = 16_384;
    /// The largest quad count a single unindexed draw is allowed to carry.
    pub const MAX_UNINDEXED_QUADS: usize = 65_536;

    /// The maximum number of quads one draw may hold under this strategy.
    pub const fn quad_limit(self) -> usize {
        match self {
            IndexStrategy::SharedQuads => Self::MAX_SHARED_QUADS,
            IndexStrategy::Unindexed => Self::MAX_UNINDEXED_QUADS,
        }
    }

    /// The number of vertex records emitted per quad.
    pub const fn vertices_per_quad(self) -> usize {
        match self {
            IndexStrategy::SharedQuads => 4,
            IndexStrategy::Unindexed => 6,
        }
    }

    /// The number of indices drawn per quad, whether or not an index buffer is bound.
    pub const fn indices_per_quad(self) -> usize {
        6
    }

    /// Returns `true` if the draw relies on an externally supplied index buffer.
    pub const fn needs_index_buffer(self) -> bool {
        matches!(self, IndexStrategy::SharedQuads)
    }
}

/// The lifecycle of a batch within one frame.
///
/// Transitions only move forward: `Building -> Finalized -> Prepared -> Executed`,
/// and any state may end in `Disposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchState {
    /// Accepting quads and merges.
    Building,
    /// Color precision is fixed. No more quads may be added.
    Finalized,
    /// Vertex bytes were produced (or their allocation failed and the draw will be skipped).
    Prepared,
    /// The draw was submitted.
    Executed,
    /// The batch was absorbed by another or released. Its buffer is empty.
    Disposed,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Building => "Building",
            BatchState::Finalized => "Finalized",
            BatchState::Prepared => "Prepared",
            BatchState::Executed => "Executed",
            BatchState::Disposed => "Disposed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_lattice() {
        use AntiAliasTier::*;
        assert_eq!(None.combined_with(None), Some(None));
        assert_eq!(Coverage.combined_with(None), Some(Coverage));
        assert_eq!(Msaa.combined_with(Msaa), Some(Msaa));
        assert_eq!(Msaa.combined_with(Coverage), Option::None);
        assert_eq!(Coverage.combined_with(Msaa), Option::None);
        assert_eq!(None.combined_with(Msaa), Option::None);
    }

    #[test]
    fn test_precision_ordering() {
        assert!(ColorPrecision::None < ColorPrecision::Byte);
        assert!(ColorPrecision::Byte < ColorPrecision::Half);
        assert_eq!(
            ColorPrecision::Byte.max(ColorPrecision::Half),
            ColorPrecision::Half
        );
    }

    #[test]
    fn test_index_strategy_limits() {
        assert_eq!(IndexStrategy::SharedQuads.quad_limit() * 4, 65_536);
        assert_eq!(IndexStrategy::SharedQuads.vertices_per_quad(), 4);
        assert_eq!(IndexStrategy::Unindexed.vertices_per_quad(), 6);
        assert!(IndexStrategy::SharedQuads.needs_index_buffer());
        assert!(!IndexStrategy::Unindexed.needs_index_buffer());
    }
}
