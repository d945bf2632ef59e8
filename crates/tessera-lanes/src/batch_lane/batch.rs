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

//! The batch: merge negotiation, color finalization, and the
//! prepare/execute lifecycle of one draw.

use super::policy::{calc_index_strategy, check_capacity};
use super::tessellator::{tessellate, VertexSpec};
use crate::quad_lane::{
    clip_to_w0, min_color_precision, resolve_aa, ClippedQuads, Quad, QuadBuffer, QuadMetadata,
};
use tessera_core::math::{PmColor4f, Rect};
use tessera_core::renderer::{
    AntiAliasTier, BatchError, BatchState, ColorAnalysis, ColorAnalyzer, ColorPrecision,
    DrawSink, MeshDraw, ShadingState, VertexAllocator,
};
use tessera_core::{ArenaRange, BatchSettings};
use thiserror::Error;

/// Why a merge or an append was refused. The refused batch is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The shading configurations may not share a draw.
    #[error("incompatible shading configuration")]
    IncompatibleShading,
    /// The anti-alias tiers cannot be combined.
    #[error("incompatible anti-alias tier")]
    IncompatibleTier,
    /// The combined quad count would exceed the index strategy's ceiling.
    #[error("{requested} quads exceed the limit of {limit}")]
    CapacityExceeded {
        /// The quad count the operation would have produced.
        requested: usize,
        /// The ceiling that applies at that count.
        limit: usize,
    },
    /// One of the batches no longer accepts quads.
    #[error("batch is no longer building")]
    NotBuilding,
    /// The opening quad lies entirely behind the view plane.
    #[error("quad lies entirely behind the view plane")]
    BehindViewPlane,
}

/// The result of [`Batch::try_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other batch was absorbed and is now disposed.
    Merged,
    /// Both batches are unchanged.
    Rejected(RejectReason),
}

impl MergeOutcome {
    /// Returns `true` if the merge happened.
    pub fn is_merged(&self) -> bool {
        matches!(self, MergeOutcome::Merged)
    }
}

/// The result of [`Batch::add_quad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The quad was taken. `added` is the number of stored sub-quads, `0` when
    /// the quad lay entirely behind the view plane.
    Accepted {
        /// Sub-quads appended to the buffer.
        added: usize,
    },
    /// The batch is unchanged.
    Rejected(RejectReason),
}

impl AddOutcome {
    /// Returns `true` if the quad was taken.
    pub fn is_accepted(&self) -> bool {
        matches!(self, AddOutcome::Accepted { .. })
    }
}

/// Which of the two preparation paths produced a batch's vertex bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreparePath {
    /// The deferred pre-pass that runs ahead of submission.
    Deferred,
    /// The standard prepare invoked right before execution.
    JustInTime,
}

#[derive(Debug)]
struct PreparedMesh {
    range: ArenaRange,
    spec: VertexSpec,
    vertex_count: usize,
}

/// A unit of merged quad-fill work, submitted as one draw.
///
/// A batch owns its quads exclusively and moves through
/// `Building -> Finalized -> Prepared -> Executed`. Only a building batch
/// accepts quads or merges. Calls that are illegal in the current state
/// return [`BatchError::InvalidState`].
#[derive(Debug)]
pub struct Batch<S> {
    shading: S,
    tier: AntiAliasTier,
    quads: QuadBuffer<QuadMetadata>,
    bounds: Rect,
    pending_precision: ColorPrecision,
    color_precision: ColorPrecision,
    uniform_color: Option<PmColor4f>,
    state: BatchState,
    settings: BatchSettings,
    mesh: Option<PreparedMesh>,
    prepared_by: Option<PreparePath>,
}

impl<S: ShadingState> Batch<S> {
    /// Opens a batch with its first quad.
    ///
    /// The requested tier is first reconciled with the quad's edge flags.
    /// Fails if the quad lies entirely behind the view plane, or if its clipped
    /// sub-quads alone exceed the capacity limit.
    pub fn new(
        shading: S,
        quad: Quad,
        tier: AntiAliasTier,
        settings: &BatchSettings,
    ) -> Result<Self, RejectReason> {
        let (tier, edge_flags) = resolve_aa(tier, quad.edge_flags);
        let quad = Quad { edge_flags, ..quad };
        let clipped = clip_to_w0(&quad);
        if clipped.is_empty() {
            log::trace!("Dropping first quad of a batch: fully behind the view plane");
            return Err(RejectReason::BehindViewPlane);
        }
        check_capacity(tier, clipped.len(), settings)?;

        let has_local = shading.uses_local_coords();
        let mut batch = Self {
            shading,
            tier,
            quads: QuadBuffer::with_capacity(clipped.len(), has_local),
            bounds: quad.bounds(),
            pending_precision: ColorPrecision::None,
            color_precision: ColorPrecision::None,
            uniform_color: None,
            state: BatchState::Building,
            settings: settings.clone(),
            mesh: None,
            prepared_by: None,
        };
        batch.append_clipped(clipped);
        Ok(batch)
    }

    // --- Accessors ---

    /// The current lifecycle state.
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// The anti-alias tier.
    pub fn tier(&self) -> AntiAliasTier {
        self.tier
    }

    /// The shading configuration the batch was opened with.
    pub fn shading(&self) -> &S {
        &self.shading
    }

    /// The union of the device bounds of every quad taken so far.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The number of stored quads, counting clipped sub-quads separately.
    pub fn quad_count(&self) -> usize {
        self.quads.count()
    }

    /// The stored quads, in draw order.
    pub fn quads(&self) -> &QuadBuffer<QuadMetadata> {
        &self.quads
    }

    /// The widest color encoding any stored quad needs, before color analysis.
    pub fn pending_precision(&self) -> ColorPrecision {
        self.pending_precision
    }

    /// The color precision fixed by [`Batch::finalize`]. `None` until then.
    pub fn color_precision(&self) -> ColorPrecision {
        self.color_precision
    }

    /// The constant color found by color analysis, if any.
    pub fn uniform_color(&self) -> Option<PmColor4f> {
        self.uniform_color
    }

    /// The preparation path that ran, if any.
    pub fn prepared_by(&self) -> Option<PreparePath> {
        self.prepared_by
    }

    /// Returns `true` if vertex bytes are ready to be drawn.
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// The vertex layout the batch prepares, once its color precision is fixed.
    pub fn vertex_spec(&self) -> Option<VertexSpec> {
        match self.state {
            BatchState::Building | BatchState::Disposed => None,
            _ => Some(VertexSpec::new(
                self.quads.is_perspective(),
                self.quads.has_local_coords(),
                self.color_precision,
                self.tier == AntiAliasTier::Coverage,
                calc_index_strategy(self.tier, self.quads.count()),
            )),
        }
    }

    // --- Building ---

    /// Absorbs `other` into `self`.
    ///
    /// On success `other`'s quads follow `self`'s in their original order,
    /// the bounds are joined, a `None`/`Coverage` pair is lifted to `Coverage`,
    /// and `other` is disposed. On rejection neither batch changes.
    pub fn try_merge(&mut self, other: &mut Batch<S>) -> MergeOutcome {
        let outcome = self.check_merge(other);
        match outcome {
            Ok(tier) => {
                log::debug!(
                    "Merged batch of {} quads into batch of {} quads ({:?} -> {:?})",
                    other.quad_count(),
                    self.quad_count(),
                    self.tier,
                    tier
                );
                self.quads.concat(&mut other.quads);
                self.bounds = self.bounds.union(&other.bounds);
                self.tier = tier;
                self.pending_precision = self.pending_precision.max(other.pending_precision);
                other.dispose();
                MergeOutcome::Merged
            }
            Err(reason) => {
                log::debug!("Rejected batch merge: {reason}");
                MergeOutcome::Rejected(reason)
            }
        }
    }

    fn check_merge(&self, other: &Batch<S>) -> Result<AntiAliasTier, RejectReason> {
        if self.state != BatchState::Building || other.state != BatchState::Building {
            return Err(RejectReason::NotBuilding);
        }
        if !self.shading.is_compatible_with(&other.shading)
            || self.quads.has_local_coords() != other.quads.has_local_coords()
        {
            return Err(RejectReason::IncompatibleShading);
        }
        let tier = self
            .tier
            .combined_with(other.tier)
            .ok_or(RejectReason::IncompatibleTier)?;
        check_capacity(tier, self.quad_count() + other.quad_count(), &self.settings)?;
        Ok(tier)
    }

    /// Appends one quad drawn with this batch's shading configuration.
    ///
    /// The requested tier is reconciled with the quad's edge flags, then the
    /// quad is clipped. A quad entirely behind the view plane is accepted and
    /// stores nothing. A `None` batch is lifted to `Coverage` when needed;
    /// tiers that cannot combine, or a count past the ceiling, reject without
    /// touching the batch.
    pub fn add_quad(&mut self, quad: Quad, tier: AntiAliasTier) -> AddOutcome {
        if self.state != BatchState::Building {
            return AddOutcome::Rejected(RejectReason::NotBuilding);
        }

        let (tier, edge_flags) = resolve_aa(tier, quad.edge_flags);
        let quad = Quad { edge_flags, ..quad };
        let clipped = clip_to_w0(&quad);
        if clipped.is_empty() {
            log::trace!("Skipping quad fully behind the view plane");
            return AddOutcome::Accepted { added: 0 };
        }

        let Some(new_tier) = self.tier.combined_with(tier) else {
            return AddOutcome::Rejected(RejectReason::IncompatibleTier);
        };
        let added = clipped.len();
        if let Err(reason) = check_capacity(new_tier, self.quad_count() + added, &self.settings) {
            return AddOutcome::Rejected(reason);
        }

        self.bounds = self.bounds.union(&quad.bounds());
        self.tier = new_tier;
        self.append_clipped(clipped);
        AddOutcome::Accepted { added }
    }

    fn append_clipped(&mut self, clipped: ClippedQuads) {
        let has_local = self.quads.has_local_coords();
        for quad in clipped {
            let local = has_local.then(|| quad.local.unwrap_or_else(|| quad.projected_device()));
            self.pending_precision = self.pending_precision.max(min_color_precision(&quad.color));
            self.quads.append(quad.device, local, quad.metadata());
        }
    }

    // --- Lifecycle ---

    /// Fixes the color precision. Runs once; later calls are no-ops.
    ///
    /// The analyzer sees every quad color in order. A constant result is
    /// written back to every quad and drawn as a uniform color with no
    /// per-vertex color. Otherwise the precision is the widest any quad needs,
    /// or `None` if the shading reads no color input.
    pub fn finalize<C>(&mut self, analyzer: &C) -> Result<(), BatchError>
    where
        C: ColorAnalyzer<S> + ?Sized,
    {
        match self.state {
            BatchState::Building => {}
            BatchState::Finalized | BatchState::Prepared | BatchState::Executed => return Ok(()),
            BatchState::Disposed => {
                return Err(BatchError::InvalidState {
                    op: "finalize",
                    state: self.state,
                })
            }
        }

        let mut colors = self.quads.metadata().map(|m| m.color);
        let analysis = analyzer.analyze(&self.shading, &mut colors);
        match analysis {
            ColorAnalysis::Constant(color) => {
                for metadata in self.quads.metadata_mut() {
                    metadata.color = color;
                }
                self.color_precision = ColorPrecision::None;
                self.uniform_color = Some(color);
            }
            ColorAnalysis::Varying => {
                self.color_precision = if self.shading.has_color_input() {
                    self.quads
                        .metadata()
                        .map(|m| min_color_precision(&m.color))
                        .max()
                        .unwrap_or(ColorPrecision::Byte)
                } else {
                    ColorPrecision::None
                };
                self.uniform_color = None;
            }
        }

        log::debug!(
            "Finalized batch of {} quads: tier {:?}, color precision {:?}, constant color: {}",
            self.quad_count(),
            self.tier,
            self.color_precision,
            self.uniform_color.is_some()
        );
        self.state = BatchState::Finalized;
        Ok(())
    }

    /// Produces the vertex bytes ahead of submission, from the deferred pre-pass.
    ///
    /// A no-op if the batch is already prepared.
    pub fn pre_prepare<A>(&mut self, arena: &mut A) -> Result<(), BatchError>
    where
        A: VertexAllocator + ?Sized,
    {
        self.materialize(arena, PreparePath::Deferred)
    }

    /// Produces the vertex bytes right before execution.
    ///
    /// A no-op if the deferred pre-pass already ran.
    pub fn prepare<A>(&mut self, arena: &mut A) -> Result<(), BatchError>
    where
        A: VertexAllocator + ?Sized,
    {
        self.materialize(arena, PreparePath::JustInTime)
    }

    fn materialize<A>(&mut self, arena: &mut A, path: PreparePath) -> Result<(), BatchError>
    where
        A: VertexAllocator + ?Sized,
    {
        match self.state {
            BatchState::Finalized => {}
            BatchState::Prepared => {
                log::trace!("Batch already prepared by {:?}, skipping {:?}", self.prepared_by, path);
                return Ok(());
            }
            state => return Err(BatchError::InvalidState { op: "prepare", state }),
        }

        let spec = self.vertex_spec().ok_or(BatchError::InvalidState {
            op: "prepare",
            state: self.state,
        })?;
        let size = spec.buffer_size(self.quad_count());
        self.state = BatchState::Prepared;
        self.prepared_by = Some(path);

        let range = match arena
            .allocate(size)
            .and_then(|range| arena.bytes_mut(range).map(|bytes| (range, bytes)))
        {
            Ok((range, bytes)) => {
                tessellate(&spec, &self.quads, bytes);
                range
            }
            Err(err) => {
                log::warn!(
                    "Skipping draw of {} quads: could not allocate {} vertex bytes: {}",
                    self.quad_count(),
                    size,
                    err
                );
                return Err(err.into());
            }
        };

        let vertex_count = spec.vertex_count(self.quad_count());
        log::debug!(
            "Prepared batch ({:?}): {:?}, {} vertices, {} bytes",
            path,
            spec.index_strategy(),
            vertex_count,
            size
        );
        self.mesh = Some(PreparedMesh {
            range,
            spec,
            vertex_count,
        });
        Ok(())
    }

    /// Submits the prepared draw to `sink`. Runs exactly once.
    ///
    /// If preparation failed to allocate, the draw is skipped with a warning
    /// and the batch still becomes `Executed`.
    pub fn execute<A, D>(&mut self, arena: &A, sink: &mut D) -> Result<(), BatchError>
    where
        A: VertexAllocator + ?Sized,
        D: DrawSink + ?Sized,
    {
        if self.state != BatchState::Prepared {
            return Err(BatchError::InvalidState {
                op: "execute",
                state: self.state,
            });
        }
        self.state = BatchState::Executed;

        let Some(mesh) = &self.mesh else {
            log::warn!("Executing batch of {} quads without vertex data, draw skipped", self.quad_count());
            return Ok(());
        };
        let vertices = arena.bytes(mesh.range)?;
        sink.draw_mesh(&MeshDraw {
            vertices,
            vertex_stride: mesh.spec.vertex_size(),
            vertex_count: mesh.vertex_count as u32,
            quad_count: self.quads.count() as u32,
            index_strategy: mesh.spec.index_strategy(),
            attributes: mesh.spec.attributes(),
            tier: self.tier,
            uniform_color: self.uniform_color,
            bounds: self.bounds,
        });
        Ok(())
    }

    /// Releases the quads and any prepared mesh. The batch becomes `Disposed`.
    pub fn dispose(&mut self) {
        self.quads.clear();
        self.mesh = None;
        self.state = BatchState::Disposed;
    }
}
