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

use crate::memory::ArenaRange;
use crate::renderer::error::AllocError;

/// Supplies frame-scoped byte ranges for vertex data.
///
/// Ranges are only valid until the allocator is reset for the next frame;
/// implementations should reject stale ranges with [`AllocError::StaleRange`].
pub trait VertexAllocator {
    /// Reserves `size` bytes, or fails if the allocator is exhausted.
    fn allocate(&mut self, size: usize) -> Result<ArenaRange, AllocError>;

    /// Returns the bytes of a previously allocated range for writing.
    fn bytes_mut(&mut self, range: ArenaRange) -> Result<&mut [u8], AllocError>;

    /// Returns the bytes of a previously allocated range.
    fn bytes(&self, range: ArenaRange) -> Result<&[u8], AllocError>;
}
