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

//! Tunable knobs of the batching pipeline.

use serde::{Deserialize, Serialize};

/// The default capacity of the per-frame vertex arena, 4 MiB.
pub const DEFAULT_ARENA_CAPACITY_BYTES: usize = 4 * 1024 * 1024;

/// A collection of settings that affect how quads are batched and prepared.
///
/// Fields missing from a RON document keep their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// An optional cap on quads per batch. It can only lower the index
    /// strategy's own ceiling, never raise it.
    pub max_quads_per_batch: Option<usize>,
    /// If `true`, the frame driver prepares every batch in a pre-pass ahead of
    /// execution instead of just in time.
    pub deferred_prepass: bool,
    /// The capacity of the default per-frame vertex arena.
    pub arena_capacity_bytes: usize,
    /// If `true`, a dump of every batch is logged at `debug` level before execution.
    pub dump_batches: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_quads_per_batch: None,
            deferred_prepass: true,
            arena_capacity_bytes: DEFAULT_ARENA_CAPACITY_BYTES,
            dump_batches: false,
        }
    }
}

impl BatchSettings {
    /// Parses settings from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::de::from_str(text)
    }

    /// Serializes the settings to pretty-printed RON text.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty_config)
    }

    /// Applies the optional cap to a strategy ceiling.
    #[inline]
    pub fn effective_limit(&self, ceiling: usize) -> usize {
        self.max_quads_per_batch
            .map_or(ceiling, |cap| cap.min(ceiling))
    }
}
