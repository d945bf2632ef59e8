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

//! Integration tests for the batch lifecycle and frame flushing.
//!
//! These tests drive batches through finalize, both prepare paths, execute and
//! dispose against test collaborators: a recording draw sink, an allocator that
//! always fails, and analyzers that return a fixed answer.

use approx::assert_relative_eq;
use tessera_core::math::{Mat3, PmColor4f, Rect, Vec3};
use tessera_core::memory::ArenaRange;
use tessera_core::renderer::{
    AllocError, AntiAliasTier, BatchError, BatchState, ColorAnalysis, ColorAnalyzer,
    ColorPrecision, DrawSink, EdgeAaFlags, IndexStrategy, MeshDraw, ShadingDescriptor,
    VertexAllocator, VertexFormat, VertexSemantic,
};
use tessera_core::{BatchSettings, FrameArena};
use tessera_lanes::{
    Batch, DrawList, FrameStats, PreparePath, Quad, QuadSetEntry, UniformColorAnalyzer,
};

/// An owned copy of one submitted draw.
#[derive(Debug, Clone)]
struct RecordedDraw {
    vertices: Vec<u8>,
    stride: usize,
    vertex_count: u32,
    quad_count: u32,
    index_strategy: IndexStrategy,
    formats: Vec<(VertexSemantic, VertexFormat)>,
    tier: AntiAliasTier,
    uniform_color: Option<PmColor4f>,
    bounds: Rect,
}

#[derive(Default)]
struct RecordingSink {
    draws: Vec<RecordedDraw>,
}

impl DrawSink for RecordingSink {
    fn draw_mesh(&mut self, draw: &MeshDraw<'_>) {
        self.draws.push(RecordedDraw {
            vertices: draw.vertices.to_vec(),
            stride: draw.vertex_stride,
            vertex_count: draw.vertex_count,
            quad_count: draw.quad_count,
            index_strategy: draw.index_strategy,
            formats: draw.attributes.iter().map(|a| (a.semantic, a.format)).collect(),
            tier: draw.tier,
            uniform_color: draw.uniform_color,
            bounds: draw.bounds,
        });
    }
}

/// An allocator with nothing left to give.
struct ExhaustedAllocator;

impl VertexAllocator for ExhaustedAllocator {
    fn allocate(&mut self, size: usize) -> Result<ArenaRange, AllocError> {
        Err(AllocError::OutOfMemory {
            requested: size,
            available: 0,
        })
    }

    fn bytes_mut(&mut self, _range: ArenaRange) -> Result<&mut [u8], AllocError> {
        Err(AllocError::StaleRange)
    }

    fn bytes(&self, _range: ArenaRange) -> Result<&[u8], AllocError> {
        Err(AllocError::StaleRange)
    }
}

/// Answers every analysis with the same result.
struct FixedAnalyzer(ColorAnalysis);

impl ColorAnalyzer<ShadingDescriptor> for FixedAnalyzer {
    fn analyze(
        &self,
        _shading: &ShadingDescriptor,
        _colors: &mut dyn Iterator<Item = PmColor4f>,
    ) -> ColorAnalysis {
        self.0
    }
}

/// Helper: an axis-aligned quad.
fn rect_quad(l: f32, t: f32, r: f32, b: f32, color: PmColor4f, flags: EdgeAaFlags) -> Quad {
    Quad::from_rect(Rect::from_ltrb(l, t, r, b), &Mat3::IDENTITY, flags, color)
}

fn solid_batch(quad: Quad, tier: AntiAliasTier) -> Batch<ShadingDescriptor> {
    Batch::new(ShadingDescriptor::solid(3), quad, tier, &BatchSettings::default())
        .expect("quad in front of the view plane")
}

fn read_f32s(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(bytemuck::pod_read_unaligned::<f32>)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Single batch end to end
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_scenario_single_red_quad() {
    let mut batch = solid_batch(
        rect_quad(0.0, 0.0, 10.0, 10.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
    );
    let mut arena = FrameArena::new(1024);
    let mut sink = RecordingSink::default();

    batch.finalize(&UniformColorAnalyzer).unwrap();
    assert_eq!(batch.tier(), AntiAliasTier::None);
    assert_eq!(batch.color_precision(), ColorPrecision::None);
    assert_eq!(batch.uniform_color(), Some(PmColor4f::RED));

    batch.prepare(&mut arena).unwrap();
    batch.execute(&arena, &mut sink).unwrap();
    assert_eq!(batch.state(), BatchState::Executed);

    assert_eq!(sink.draws.len(), 1);
    let draw = &sink.draws[0];
    assert_eq!(draw.vertex_count, 4);
    assert_eq!(draw.quad_count, 1);
    assert_eq!(draw.index_strategy, IndexStrategy::SharedQuads);
    assert_eq!(draw.uniform_color, Some(PmColor4f::RED));
    assert_eq!(draw.bounds, Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
    assert_eq!(
        draw.formats,
        vec![(VertexSemantic::Position, VertexFormat::Float32x2)]
    );
    assert_eq!(draw.stride, 8);
    assert_eq!(
        read_f32s(&draw.vertices),
        vec![0.0, 0.0, 0.0, 10.0, 10.0, 0.0, 10.0, 10.0]
    );
}

#[test]
fn test_varying_colors_use_widest_precision() {
    let hdr = PmColor4f::new(2.0, 0.5, 0.0, 1.0);
    let mut batch = solid_batch(
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::ALL),
        AntiAliasTier::Coverage,
    );
    assert!(batch
        .add_quad(
            rect_quad(1.0, 0.0, 2.0, 1.0, hdr, EdgeAaFlags::ALL),
            AntiAliasTier::Coverage
        )
        .is_accepted());

    batch.finalize(&UniformColorAnalyzer).unwrap();
    assert_eq!(batch.color_precision(), ColorPrecision::Half);
    assert_eq!(batch.uniform_color(), None);

    let mut arena = FrameArena::new(4096);
    let mut sink = RecordingSink::default();
    batch.prepare(&mut arena).unwrap();
    batch.execute(&arena, &mut sink).unwrap();

    let draw = &sink.draws[0];
    assert_eq!(
        draw.formats,
        vec![
            (VertexSemantic::Position, VertexFormat::Float32x2),
            (VertexSemantic::Color, VertexFormat::Float16x4),
            (VertexSemantic::Coverage, VertexFormat::Float32),
        ]
    );
    assert_eq!(draw.stride, 8 + 8 + 4);
    assert_eq!(draw.vertex_count, 8);
    assert_eq!(draw.vertices.len(), 8 * 20);
    for record in draw.vertices.chunks_exact(20) {
        let coverage = bytemuck::pod_read_unaligned::<f32>(&record[16..20]);
        assert_relative_eq!(coverage, 0.25);
    }
}

#[test]
fn test_constant_analysis_overrides_quad_colors() {
    let mut batch = solid_batch(
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
    );
    batch.add_quad(
        rect_quad(1.0, 0.0, 2.0, 1.0, PmColor4f::BLUE, EdgeAaFlags::NONE),
        AntiAliasTier::None,
    );

    batch
        .finalize(&FixedAnalyzer(ColorAnalysis::Constant(PmColor4f::GREEN)))
        .unwrap();
    assert_eq!(batch.uniform_color(), Some(PmColor4f::GREEN));
    assert_eq!(batch.color_precision(), ColorPrecision::None);
    assert!(batch.quads().metadata().all(|m| m.color == PmColor4f::GREEN));
}

#[test]
fn test_shading_without_color_input_drops_vertex_color() {
    let shading = ShadingDescriptor {
        has_color_input: false,
        ..ShadingDescriptor::solid(9)
    };
    let mut batch = Batch::new(
        shading,
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
        &BatchSettings::default(),
    )
    .unwrap();

    batch.finalize(&FixedAnalyzer(ColorAnalysis::Varying)).unwrap();
    assert_eq!(batch.color_precision(), ColorPrecision::None);
    assert_eq!(batch.uniform_color(), None);
}

#[test]
fn test_textured_batch_carries_local_coords() {
    let mut batch = Batch::new(
        ShadingDescriptor::textured(4),
        rect_quad(0.0, 0.0, 4.0, 4.0, PmColor4f::WHITE, EdgeAaFlags::NONE)
            .with_local_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0), &Mat3::IDENTITY),
        AntiAliasTier::None,
        &BatchSettings::default(),
    )
    .unwrap();
    batch.finalize(&UniformColorAnalyzer).unwrap();

    let mut arena = FrameArena::new(1024);
    let mut sink = RecordingSink::default();
    batch.prepare(&mut arena).unwrap();
    batch.execute(&arena, &mut sink).unwrap();

    let draw = &sink.draws[0];
    assert_eq!(draw.stride, 16);
    let floats = read_f32s(&draw.vertices);
    // Bottom-right corner: device (4, 4), local (1, 1).
    assert_eq!(&floats[12..16], &[4.0, 4.0, 1.0, 1.0]);
}

#[test]
fn test_clipped_quad_coverage_follows_relabelled_edges() {
    let straddling = Quad::new(
        [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 10.0, 1.0),
            Vec3::new(10.0, 0.0, 1.0),
            Vec3::new(10.0, 10.0, -0.2),
        ],
        EdgeAaFlags::ALL,
        PmColor4f::RED,
    );
    let mut batch = solid_batch(straddling, AntiAliasTier::Coverage);
    assert_eq!(batch.quad_count(), 2);
    batch.finalize(&UniformColorAnalyzer).unwrap();

    let mut arena = FrameArena::new(1024);
    let mut sink = RecordingSink::default();
    batch.prepare(&mut arena).unwrap();
    batch.execute(&arena, &mut sink).unwrap();

    let draw = &sink.draws[0];
    assert_eq!(
        draw.formats,
        vec![
            (VertexSemantic::Position, VertexFormat::Float32x3),
            (VertexSemantic::Coverage, VertexFormat::Float32),
        ]
    );
    assert_eq!(draw.stride, 16);
    let coverage: Vec<f32> = draw
        .vertices
        .chunks_exact(draw.stride)
        .map(|record| bytemuck::pod_read_unaligned::<f32>(&record[12..16]))
        .collect();
    // First sub-quad is AA on its left and bottom edges, the second on its top
    // and bottom edges.
    let expected = [0.5, 0.25, 1.0, 0.5, 0.5, 0.5, 0.5, 0.5];
    assert_eq!(coverage.len(), expected.len());
    for (got, want) in coverage.iter().zip(expected) {
        assert_relative_eq!(*got, want);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Prepare paths
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_deferred_prepare_is_not_repeated() {
    let mut batch = solid_batch(
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
    );
    let mut arena = FrameArena::new(1024);
    batch.finalize(&UniformColorAnalyzer).unwrap();

    batch.pre_prepare(&mut arena).unwrap();
    batch.prepare(&mut arena).unwrap();

    assert_eq!(batch.prepared_by(), Some(PreparePath::Deferred));
    assert_eq!(arena.allocation_count(), 1);
    assert!(batch.has_mesh());
}

#[test]
fn test_just_in_time_prepare() {
    let mut batch = solid_batch(
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
    );
    let mut arena = FrameArena::new(1024);
    batch.finalize(&UniformColorAnalyzer).unwrap();
    batch.prepare(&mut arena).unwrap();

    assert_eq!(batch.state(), BatchState::Prepared);
    assert_eq!(batch.prepared_by(), Some(PreparePath::JustInTime));
}

#[test]
fn test_allocation_failure_skips_draw() {
    let mut batch = solid_batch(
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
    );
    let mut allocator = ExhaustedAllocator;
    let mut sink = RecordingSink::default();
    batch.finalize(&UniformColorAnalyzer).unwrap();

    let err = batch.prepare(&mut allocator).unwrap_err();
    assert!(matches!(
        err,
        BatchError::Allocation(AllocError::OutOfMemory { requested: 32, .. })
    ));
    assert_eq!(batch.state(), BatchState::Prepared);
    assert!(!batch.has_mesh());

    batch.execute(&allocator, &mut sink).unwrap();
    assert_eq!(batch.state(), BatchState::Executed);
    assert!(sink.draws.is_empty());
}

#[test]
fn test_lifecycle_order_is_enforced() {
    let mut batch = solid_batch(
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
    );
    let mut arena = FrameArena::new(1024);
    let mut sink = RecordingSink::default();

    assert!(matches!(
        batch.prepare(&mut arena),
        Err(BatchError::InvalidState { state: BatchState::Building, .. })
    ));
    assert!(matches!(
        batch.execute(&arena, &mut sink),
        Err(BatchError::InvalidState { state: BatchState::Building, .. })
    ));

    batch.finalize(&UniformColorAnalyzer).unwrap();
    batch.prepare(&mut arena).unwrap();
    batch.execute(&arena, &mut sink).unwrap();
    assert!(matches!(
        batch.execute(&arena, &mut sink),
        Err(BatchError::InvalidState { state: BatchState::Executed, .. })
    ));
    assert_eq!(sink.draws.len(), 1);

    batch.dispose();
    assert_eq!(batch.state(), BatchState::Disposed);
    assert!(batch.finalize(&UniformColorAnalyzer).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// DrawList::flush() tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_flush_merges_and_draws_frame() {
    let mut list = DrawList::new(BatchSettings::default());
    let shading = ShadingDescriptor::solid(1);
    let entries: Vec<_> = (0..4)
        .map(|i| {
            let x = i as f32 * 2.0;
            QuadSetEntry::new(
                Rect::from_ltrb(x, 0.0, x + 1.0, 1.0),
                Mat3::IDENTITY,
                PmColor4f::WHITE,
                EdgeAaFlags::ALL,
            )
        })
        .collect();

    list.record_quad_set(&entries[..2], AntiAliasTier::None, &shading);
    list.record_quad_set(&entries[2..], AntiAliasTier::Coverage, &shading);
    list.record_quad_set(&entries[..1], AntiAliasTier::Msaa, &shading);
    assert_eq!(list.len(), 2);

    let mut arena = FrameArena::new(64 * 1024);
    let mut sink = RecordingSink::default();
    let stats = list.flush(&UniformColorAnalyzer, &mut arena, &mut sink);

    assert_eq!(
        stats,
        FrameStats {
            batches: 2,
            quads: 5,
            draws: 2,
            skipped: 0
        }
    );
    assert!(list.is_empty());
    assert_eq!(sink.draws[0].tier, AntiAliasTier::Coverage);
    assert_eq!(sink.draws[0].quad_count, 4);
    assert_eq!(sink.draws[0].bounds, Rect::from_ltrb(0.0, 0.0, 7.0, 1.0));
    assert_eq!(sink.draws[1].tier, AntiAliasTier::Msaa);
    assert_eq!(sink.draws[1].uniform_color, Some(PmColor4f::WHITE));
}

#[test]
fn test_flush_with_exhausted_allocator_skips_every_draw() {
    let mut list = DrawList::new(BatchSettings::default());
    list.record(solid_batch(
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
    ));
    list.record(Batch::new(
        ShadingDescriptor::solid(99),
        rect_quad(0.0, 0.0, 1.0, 1.0, PmColor4f::RED, EdgeAaFlags::NONE),
        AntiAliasTier::None,
        &BatchSettings::default(),
    )
    .unwrap());

    let mut sink = RecordingSink::default();
    let stats = list.flush(&UniformColorAnalyzer, &mut ExhaustedAllocator, &mut sink);

    assert_eq!(stats.batches, 2);
    assert_eq!(stats.draws, 0);
    assert_eq!(stats.skipped, 2);
    assert!(sink.draws.is_empty());
}
