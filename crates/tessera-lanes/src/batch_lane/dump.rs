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

//! A human-readable dump of a batch, for debugging.

use super::batch::Batch;
use std::fmt;
use tessera_core::math::Vec2;
use tessera_core::renderer::ShadingState;

/// Formats a batch's state and every stored quad. Created by [`Batch::dump`].
///
/// ```text
/// # draws: 1
/// Device quad type: standard, local quad type: none
/// Tier: None, color precision: None, state: Building
/// 0: Color: (1.00, 0.00, 0.00, 1.00), Edge AA: l0_t0_r0_b0,
///   device quad: [(0.00, 0.00, 1.00), (0.00, 10.00, 1.00), (10.00, 0.00, 1.00), (10.00, 10.00, 1.00)],
///   local quad: [(0.00, 0.00), (0.00, 0.00), (0.00, 0.00), (0.00, 0.00)]
/// ```
#[derive(Debug)]
pub struct BatchDump<'a, S> {
    batch: &'a Batch<S>,
}

impl<S: ShadingState> Batch<S> {
    /// Returns a [`Display`](fmt::Display) adapter listing the batch's quads.
    pub fn dump(&self) -> BatchDump<'_, S> {
        BatchDump { batch: self }
    }
}

impl<S: ShadingState> fmt::Display for BatchDump<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quads = self.batch.quads();
        writeln!(f, "# draws: {}", quads.count())?;
        writeln!(
            f,
            "Device quad type: {}, local quad type: {}",
            if quads.is_perspective() { "perspective" } else { "standard" },
            if quads.has_local_coords() { "standard" } else { "none" }
        )?;
        writeln!(
            f,
            "Tier: {:?}, color precision: {:?}, state: {}",
            self.batch.tier(),
            self.batch.color_precision(),
            self.batch.state()
        )?;

        for (i, entry) in quads.iter().enumerate() {
            writeln!(
                f,
                "{}: Color: {}, Edge AA: {},",
                i, entry.metadata.color, entry.metadata.edge_flags
            )?;
            let device = entry
                .device
                .iter()
                .map(|p| format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "  device quad: [{device}],")?;
            let local = entry
                .local
                .copied()
                .unwrap_or([Vec2::ZERO; 4])
                .iter()
                .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "  local quad: [{local}]")?;
        }
        Ok(())
    }
}
