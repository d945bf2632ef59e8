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

//! Flags selecting which edges of a quad are anti-aliased.

use std::fmt;

/// Flags selecting which of a quad's four edges receive anti-aliasing.
///
/// Edges are named for an axis-aligned quad in strip order
/// `[top-left, bottom-left, top-right, bottom-right]`: left joins corners 0-1,
/// bottom 1-3, right 3-2 and top 2-0. Under a general transform the names are
/// only labels for those corner pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeAaFlags {
    bits: u8,
}

impl EdgeAaFlags {
    /// No anti-aliased edges.
    pub const NONE: Self = Self { bits: 0 };
    /// The edge between corners 0 and 1.
    pub const LEFT: Self = Self { bits: 1 << 0 };
    /// The edge between corners 2 and 0.
    pub const TOP: Self = Self { bits: 1 << 1 };
    /// The edge between corners 3 and 2.
    pub const RIGHT: Self = Self { bits: 1 << 2 };
    /// The edge between corners 1 and 3.
    pub const BOTTOM: Self = Self { bits: 1 << 3 };
    /// All four edges.
    pub const ALL: Self = Self {
        bits: Self::LEFT.bits | Self::TOP.bits | Self::RIGHT.bits | Self::BOTTOM.bits,
    };

    /// Creates flags from raw bits. Bits above the four edges are discarded.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            bits: bits & Self::ALL.bits,
        }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns `self` with the edges in `other` cleared.
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Checks if every edge in `other` is also set in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no edge is anti-aliased.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the flags in polygon edge order `[left, bottom, right, top]`,
    /// the order in which the quad's outline visits its corners.
    pub const fn to_edge_array(self) -> [bool; 4] {
        [
            self.contains(Self::LEFT),
            self.contains(Self::BOTTOM),
            self.contains(Self::RIGHT),
            self.contains(Self::TOP),
        ]
    }

    /// Builds flags from polygon edge order `[left, bottom, right, top]`.
    pub const fn from_edge_array(edges: [bool; 4]) -> Self {
        let mut bits = 0;
        if edges[0] {
            bits |= Self::LEFT.bits;
        }
        if edges[1] {
            bits |= Self::BOTTOM.bits;
        }
        if edges[2] {
            bits |= Self::RIGHT.bits;
        }
        if edges[3] {
            bits |= Self::TOP.bits;
        }
        Self { bits }
    }
}

impl std::ops::BitOr for EdgeAaFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for EdgeAaFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for EdgeAaFlags {
    /// Formats as `l#_t#_r#_b#`, one digit per edge.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "l{}_t{}_r{}_b{}",
            self.contains(Self::LEFT) as u8,
            self.contains(Self::TOP) as u8,
            self.contains(Self::RIGHT) as u8,
            self.contains(Self::BOTTOM) as u8
        )
    }
}
