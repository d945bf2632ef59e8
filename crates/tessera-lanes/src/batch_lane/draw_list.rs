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

//! Records a frame's batches and drives them through finalize, prepare and
//! execute.

use super::batch::{Batch, MergeOutcome};
use super::quad_set::{build_batches, QuadSetEntry};
use tessera_core::renderer::{
    AntiAliasTier, BatchError, ColorAnalyzer, DrawSink, ShadingState, VertexAllocator,
};
use tessera_core::BatchSettings;

/// Counters describing one flushed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Batches that reached execution.
    pub batches: usize,
    /// Quads across those batches.
    pub quads: usize,
    /// Draws submitted to the sink.
    pub draws: usize,
    /// Batches whose draw was skipped because vertex memory ran out.
    pub skipped: usize,
}

/// The ordered list of batches recorded for one frame.
///
/// Each recorded batch is offered to the most recently recorded one first, so
/// consecutive compatible fills collapse into a single draw while the
/// submission order of incompatible ones is kept.
#[derive(Debug)]
pub struct DrawList<S> {
    batches: Vec<Batch<S>>,
    settings: BatchSettings,
}

impl<S: ShadingState> DrawList<S> {
    /// Creates an empty draw list.
    pub fn new(settings: BatchSettings) -> Self {
        Self {
            batches: Vec::new(),
            settings,
        }
    }

    /// The settings batches are recorded and flushed with.
    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// The recorded batches, in submission order.
    pub fn batches(&self) -> &[Batch<S>] {
        &self.batches
    }

    /// The number of recorded batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Records a batch, merging it into the previous one when possible.
    ///
    /// Returns `true` if the batch was merged.
    pub fn record(&mut self, mut batch: Batch<S>) -> bool {
        if let Some(last) = self.batches.last_mut() {
            if let MergeOutcome::Merged = last.try_merge(&mut batch) {
                return true;
            }
        }
        self.batches.push(batch);
        false
    }

    /// Records a quad set drawn with one shading configuration.
    pub fn record_quad_set(&mut self, entries: &[QuadSetEntry], tier: AntiAliasTier, shading: &S)
    where
        S: Clone,
    {
        for batch in build_batches(entries, tier, shading, &self.settings) {
            self.record(batch);
        }
    }

    /// Finalizes, prepares and executes every recorded batch, then empties
    /// the list.
    ///
    /// With `deferred_prepass` set, every batch is prepared before the first
    /// one executes; otherwise each batch is prepared right before its own
    /// execution. A batch whose allocation fails is skipped and the rest of the
    /// frame proceeds.
    pub fn flush<C, A, D>(&mut self, analyzer: &C, arena: &mut A, sink: &mut D) -> FrameStats
    where
        C: ColorAnalyzer<S> + ?Sized,
        A: VertexAllocator + ?Sized,
        D: DrawSink + ?Sized,
    {
        let mut stats = FrameStats::default();

        for batch in &mut self.batches {
            if let Err(err) = batch.finalize(analyzer) {
                log::warn!("Failed to finalize batch: {err}");
            }
        }

        if self.settings.deferred_prepass {
            for batch in &mut self.batches {
                warn_on_prepare_error(batch.pre_prepare(&mut *arena));
            }
        }

        if self.settings.dump_batches {
            for (i, batch) in self.batches.iter().enumerate() {
                log::debug!("Batch {i}:\n{}", batch.dump());
            }
        }

        for mut batch in self.batches.drain(..) {
            warn_on_prepare_error(batch.prepare(&mut *arena));
            let had_mesh = batch.has_mesh();
            if let Err(err) = batch.execute(&*arena, &mut *sink) {
                log::warn!("Failed to execute batch: {err}");
                continue;
            }
            stats.batches += 1;
            stats.quads += batch.quad_count();
            if had_mesh {
                stats.draws += 1;
            } else {
                stats.skipped += 1;
            }
            batch.dispose();
        }

        log::debug!(
            "Flushed frame: {} batches, {} quads, {} draws, {} skipped",
            stats.batches,
            stats.quads,
            stats.draws,
            stats.skipped
        );
        stats
    }
}

// Allocation failures are logged by the batch and surface as skipped draws.
fn warn_on_prepare_error(result: Result<(), BatchError>) {
    match result {
        Ok(()) | Err(BatchError::Allocation(_)) => {}
        Err(err) => log::warn!("Failed to prepare batch: {err}"),
    }
}
