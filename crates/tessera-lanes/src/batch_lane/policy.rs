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

//! Maps an anti-alias tier and a quad count to an index strategy, and bounds
//! batch growth by that strategy's ceiling.

use super::batch::RejectReason;
use tessera_core::renderer::{AntiAliasTier, IndexStrategy};
use tessera_core::BatchSettings;

/// Picks the index strategy for `quad_count` quads drawn at `tier`.
///
/// Coverage batches always use the shared pattern. The other tiers use it
/// while it can address every quad and fall back to unindexed triangles
/// beyond that.
pub fn calc_index_strategy(tier: AntiAliasTier, quad_count: usize) -> IndexStrategy {
    match tier {
        AntiAliasTier::Coverage => IndexStrategy::SharedQuads,
        AntiAliasTier::None | AntiAliasTier::Msaa => {
            if quad_count <= IndexStrategy::MAX_SHARED_QUADS {
                IndexStrategy::SharedQuads
            } else {
                IndexStrategy::Unindexed
            }
        }
    }
}

/// The maximum number of quads one draw may hold under `strategy`.
#[inline]
pub fn quad_limit(strategy: IndexStrategy) -> usize {
    strategy.quad_limit()
}

/// The largest quad count a batch at `tier` may ever reach, after `settings`
/// caps it.
pub fn max_quads_for_tier(tier: AntiAliasTier, settings: &BatchSettings) -> usize {
    let ceiling = match tier {
        AntiAliasTier::Coverage => IndexStrategy::MAX_SHARED_QUADS,
        AntiAliasTier::None | AntiAliasTier::Msaa => IndexStrategy::MAX_UNINDEXED_QUADS,
    };
    settings.effective_limit(ceiling)
}

/// Checks that `quad_count` quads at `tier` fit in one draw.
///
/// Returns the strategy the draw would use, or the reason it cannot grow that far.
pub fn check_capacity(
    tier: AntiAliasTier,
    quad_count: usize,
    settings: &BatchSettings,
) -> Result<IndexStrategy, RejectReason> {
    let strategy = calc_index_strategy(tier, quad_count);
    let limit = settings.effective_limit(quad_limit(strategy));
    if quad_count > limit {
        return Err(RejectReason::CapacityExceeded {
            requested: quad_count,
            limit,
        });
    }
    Ok(strategy)
}

/// Builds the shared 16-bit index pattern `[0, 1, 2, 2, 1, 3] + 4 * i` for
/// `quad_count` quads.
///
/// The count is clamped to [`IndexStrategy::MAX_SHARED_QUADS`], the most the
/// pattern can address.
pub fn shared_quad_indices(quad_count: usize) -> Vec<u16> {
    let quad_count = quad_count.min(IndexStrategy::MAX_SHARED_QUADS);
    let mut indices = Vec::with_capacity(quad_count * 6);
    for i in 0..quad_count {
        let base = (i * 4) as u16;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_always_shares_indices() {
        assert_eq!(
            calc_index_strategy(AntiAliasTier::Coverage, 1),
            IndexStrategy::SharedQuads
        );
        assert_eq!(
            calc_index_strategy(AntiAliasTier::Coverage, 50_000),
            IndexStrategy::SharedQuads
        );
    }

    #[test]
    fn test_non_coverage_falls_back_to_unindexed() {
        for tier in [AntiAliasTier::None, AntiAliasTier::Msaa] {
            assert_eq!(calc_index_strategy(tier, 16_384), IndexStrategy::SharedQuads);
            assert_eq!(calc_index_strategy(tier, 16_385), IndexStrategy::Unindexed);
        }
    }

    #[test]
    fn test_capacity_ceilings() {
        let settings = BatchSettings::default();
        assert!(check_capacity(AntiAliasTier::None, 65_536, &settings).is_ok());
        assert_eq!(
            check_capacity(AntiAliasTier::None, 65_537, &settings),
            Err(RejectReason::CapacityExceeded {
                requested: 65_537,
                limit: 65_536
            })
        );
        assert!(check_capacity(AntiAliasTier::Coverage, 16_384, &settings).is_ok());
        assert!(check_capacity(AntiAliasTier::Coverage, 16_385, &settings).is_err());
        assert_eq!(max_quads_for_tier(AntiAliasTier::Msaa, &settings), 65_536);
    }

    #[test]
    fn test_settings_cap_applies_below_ceiling() {
        let settings = BatchSettings {
            max_quads_per_batch: Some(3),
            ..Default::default()
        };
        assert!(check_capacity(AntiAliasTier::None, 3, &settings).is_ok());
        assert_eq!(
            check_capacity(AntiAliasTier::None, 4, &settings),
            Err(RejectReason::CapacityExceeded {
                requested: 4,
                limit: 3
            })
        );
    }

    #[test]
    fn test_shared_quad_indices() {
        assert_eq!(
            shared_quad_indices(2),
            vec![0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]
        );
        let full = shared_quad_indices(usize::MAX);
        assert_eq!(full.len(), IndexStrategy::MAX_SHARED_QUADS * 6);
        assert_eq!(full.last(), Some(&65_535));
    }
}
