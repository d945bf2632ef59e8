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

// Tessera Sandbox
// Records a small frame of quads and flushes it to a logging sink.

use anyhow::{Context, Result};
use tessera_core::math::{Mat3, PmColor4f, Rect, Vec2};
use tessera_core::renderer::{AntiAliasTier, DrawSink, EdgeAaFlags, MeshDraw, ShadingDescriptor};
use tessera_core::{BatchSettings, FrameArena};
use tessera_lanes::{DrawList, QuadSetEntry, UniformColorAnalyzer};

const SETTINGS: &str = r#"(
    deferred_prepass: true,
    arena_capacity_bytes: 1048576,
    dump_batches: false,
)"#;

/// Logs every draw it receives instead of talking to a GPU.
#[derive(Default)]
struct LoggingSink {
    draws: usize,
    vertex_bytes: usize,
}

impl DrawSink for LoggingSink {
    fn draw_mesh(&mut self, draw: &MeshDraw<'_>) {
        log::info!(
            "Draw #{}: {} quads, {} vertices ({} B stride, {:?}), tier {:?}, uniform color {}",
            self.draws,
            draw.quad_count,
            draw.vertex_count,
            draw.vertex_stride,
            draw.index_strategy,
            draw.tier,
            draw
                .uniform_color
                .map_or_else(|| "none".to_string(), |c| c.to_string())
        );
        self.draws += 1;
        self.vertex_bytes += draw.vertices.len();
    }
}

/// A `cols` x `rows` grid of unit cells with a gradient fill.
fn grid(cols: usize, rows: usize, view: Mat3, flags: EdgeAaFlags) -> Vec<QuadSetEntry> {
    let mut entries = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let (x, y) = (col as f32 * 12.0, row as f32 * 12.0);
            let color = PmColor4f::from_unpremul(
                col as f32 / cols as f32,
                row as f32 / rows as f32,
                0.5,
                1.0,
            );
            entries.push(QuadSetEntry::new(
                Rect::from_ltrb(x, y, x + 10.0, y + 10.0),
                view,
                color,
                flags,
            ));
        }
    }
    entries
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings =
        BatchSettings::from_ron_str(SETTINGS).context("Failed to parse batch settings")?;
    let mut arena = FrameArena::new(settings.arena_capacity_bytes);
    let mut list = DrawList::new(settings);
    let solid = ShadingDescriptor::solid(1);
    let textured = ShadingDescriptor::textured(2);

    // Background in one flat color.
    list.record_quad_set(
        &[QuadSetEntry::new(
            Rect::from_ltrb(0.0, 0.0, 800.0, 600.0),
            Mat3::IDENTITY,
            PmColor4f::from_unpremul(0.1, 0.1, 0.12, 1.0),
            EdgeAaFlags::NONE,
        )],
        AntiAliasTier::None,
        &solid,
    );
    // Anti-aliased tiles merge into the background batch.
    list.record_quad_set(
        &grid(32, 24, Mat3::IDENTITY, EdgeAaFlags::ALL),
        AntiAliasTier::Coverage,
        &solid,
    );
    // A tilted textured floor, partly behind the view plane.
    let floor = Mat3::from_perspective(0.0, -0.004) * Mat3::from_translation(Vec2::new(0.0, -40.0));
    list.record_quad_set(
        &grid(16, 32, floor, EdgeAaFlags::ALL),
        AntiAliasTier::Coverage,
        &textured,
    );

    log::info!("Recorded {} batch(es)", list.len());
    let mut sink = LoggingSink::default();
    let stats = list.flush(&UniformColorAnalyzer, &mut arena, &mut sink);
    log::info!(
        "Frame done: {} batches, {} quads, {} draws, {} skipped, {} vertex bytes (arena peak {} B)",
        stats.batches,
        stats.quads,
        stats.draws,
        stats.skipped,
        sink.vertex_bytes,
        arena.peak_used()
    );
    arena.reset();
    Ok(())
}
