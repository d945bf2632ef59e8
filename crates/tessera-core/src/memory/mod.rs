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

//! Provides the frame-scoped bump arena that backs prepared vertex data.
//!
//! Every batch of a frame draws its vertex bytes from one [`FrameArena`]. The
//! arena is never freed piecemeal: the frame driver calls [`FrameArena::reset`]
//! once the frame's draws have executed, which invalidates every range handed
//! out before it. Ranges carry the epoch they were allocated in so that use
//! after a reset is detected instead of reading another frame's bytes.

use crate::renderer::{AllocError, VertexAllocator};

/// The alignment, in bytes, of every range handed out by a [`FrameArena`].
pub const ARENA_ALIGNMENT: usize = 4;

/// A handle to a byte range inside a [`FrameArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaRange {
    offset: usize,
    len: usize,
    epoch: u64,
}

impl ArenaRange {
    /// The byte offset of the range from the start of the arena.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The length of the range in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the range holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The frame epoch the range was allocated in.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// A fixed-capacity bump allocator scoped to one frame.
#[derive(Debug)]
pub struct FrameArena {
    storage: Vec<u8>,
    cursor: usize,
    epoch: u64,
    allocations: u64,
    peak_used: usize,
}

impl FrameArena {
    /// Creates an arena able to hold `capacity` bytes per frame.
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            cursor: 0,
            epoch: 0,
            allocations: 0,
            peak_used: 0,
        }
    }

    /// The total number of bytes the arena can hand out per frame.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// The number of bytes handed out (including alignment padding) this frame.
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// The number of bytes still available this frame.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor
    }

    /// The current frame epoch.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The number of allocations served this frame.
    #[inline]
    pub fn allocation_count(&self) -> u64 {
        self.allocations
    }

    /// The highest `used()` value observed across all frames.
    #[inline]
    pub fn peak_used(&self) -> usize {
        self.peak_used
    }

    /// Releases every range of the current frame and advances the epoch.
    pub fn reset(&mut self) {
        log::trace!(
            "Resetting frame arena (epoch {}): {} bytes in {} allocations",
            self.epoch,
            self.cursor,
            self.allocations
        );
        self.cursor = 0;
        self.allocations = 0;
        self.epoch += 1;
    }

    fn check(&self, range: ArenaRange) -> Result<std::ops::Range<usize>, AllocError> {
        if range.epoch != self.epoch || range.offset + range.len > self.cursor {
            return Err(AllocError::StaleRange);
        }
        Ok(range.offset..range.offset + range.len)
    }
}

impl VertexAllocator for FrameArena {
    fn allocate(&mut self, size: usize) -> Result<ArenaRange, AllocError> {
        let offset = (self.cursor + ARENA_ALIGNMENT - 1) & !(ARENA_ALIGNMENT - 1);
        let end = offset.checked_add(size).filter(|end| *end <= self.capacity());
        let Some(end) = end else {
            return Err(AllocError::OutOfMemory {
                requested: size,
                available: self.capacity().saturating_sub(offset),
            });
        };

        self.cursor = end;
        self.allocations += 1;
        self.peak_used = self.peak_used.max(end);
        Ok(ArenaRange {
            offset,
            len: size,
            epoch: self.epoch,
        })
    }

    fn bytes_mut(&mut self, range: ArenaRange) -> Result<&mut [u8], AllocError> {
        let span = self.check(range)?;
        Ok(&mut self.storage[span])
    }

    fn bytes(&self, range: ArenaRange) -> Result<&[u8], AllocError> {
        let span = self.check(range)?;
        Ok(&self.storage[span])
    }
}
