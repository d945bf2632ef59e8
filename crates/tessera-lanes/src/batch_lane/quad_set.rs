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

//! Batching of quad sets: many rects drawn with one shading configuration.

use super::batch::{AddOutcome, Batch, RejectReason};
use crate::quad_lane::Quad;
use tessera_core::math::{Mat3, PmColor4f, Rect};
use tessera_core::renderer::{AntiAliasTier, EdgeAaFlags, ShadingState};
use tessera_core::BatchSettings;

/// One rect of a quad set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSetEntry {
    /// The rect, in the space `view` maps from. Also used as local coordinates.
    pub rect: Rect,
    /// Maps the rect to device space.
    pub view: Mat3,
    /// Maps the rect to local coordinates. The rect itself is used when absent.
    pub local_transform: Option<Mat3>,
    /// The premultiplied fill color.
    pub color: PmColor4f,
    /// Which edges are anti-aliased.
    pub edge_flags: EdgeAaFlags,
}

impl QuadSetEntry {
    /// An entry with no local transform.
    pub fn new(rect: Rect, view: Mat3, color: PmColor4f, edge_flags: EdgeAaFlags) -> Self {
        Self {
            rect,
            view,
            local_transform: None,
            color,
            edge_flags,
        }
    }

    /// Builds the quad this entry draws.
    pub fn to_quad(&self) -> Quad {
        let local_transform = self.local_transform.unwrap_or(Mat3::IDENTITY);
        Quad::from_rect(self.rect, &self.view, self.edge_flags, self.color)
            .with_local_rect(self.rect, &local_transform)
    }
}

/// Packs `entries` into as few batches as the capacity policy allows.
///
/// Entries are consumed in order: each is appended to the open batch until it
/// rejects, at which point a new batch is opened with that entry. Entries
/// entirely behind the view plane contribute nothing, and an entry that cannot
/// open a batch within the capacity limit is dropped with a warning.
pub fn build_batches<S>(
    entries: &[QuadSetEntry],
    tier: AntiAliasTier,
    shading: &S,
    settings: &BatchSettings,
) -> Vec<Batch<S>>
where
    S: ShadingState + Clone,
{
    let mut batches = Vec::new();
    let mut current: Option<Batch<S>> = None;

    for entry in entries {
        let quad = entry.to_quad();
        if let Some(batch) = current.as_mut() {
            match batch.add_quad(quad, tier) {
                AddOutcome::Accepted { .. } => continue,
                AddOutcome::Rejected(reason) => {
                    log::debug!(
                        "Quad set batch closed at {} quads: {reason}",
                        batch.quad_count()
                    );
                    batches.extend(current.take());
                }
            }
        }
        current = match Batch::new(shading.clone(), quad, tier, settings) {
            Ok(batch) => Some(batch),
            Err(RejectReason::BehindViewPlane) => None,
            Err(reason) => {
                log::warn!("Dropping quad that cannot open a batch: {reason}");
                None
            }
        };
    }

    batches.extend(current);
    log::debug!(
        "Built {} batch(es) from a set of {} quads",
        batches.len(),
        entries.len()
    );
    batches
}
