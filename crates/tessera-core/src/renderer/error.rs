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

//! Defines the recoverable failures of the batching pipeline.
//!
//! Merge and append rejections are ordinary outcomes and are not errors; only
//! misuse of the batch lifecycle and vertex memory exhaustion are reported here.

use super::api::BatchState;
use thiserror::Error;

/// A failure reported by a [`VertexAllocator`](super::traits::VertexAllocator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The arena cannot satisfy the request.
    #[error("Vertex arena exhausted: requested {requested} bytes, {available} available")]
    OutOfMemory {
        /// The number of bytes requested.
        requested: usize,
        /// The number of bytes left in the arena.
        available: usize,
    },
    /// The range was handed out before the arena was last reset.
    #[error("Arena range belongs to a previous frame")]
    StaleRange,
}

/// An error raised while driving a batch through its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The operation is not legal in the batch's current state.
    #[error("Cannot {op} a batch in state {state}")]
    InvalidState {
        /// The operation that was attempted.
        op: &'static str,
        /// The state the batch was in.
        state: BatchState,
    },
    /// Vertex memory could not be allocated. The batch's draw will be skipped.
    #[error("Vertex allocation failed: {0}")]
    Allocation(#[from] AllocError),
}
