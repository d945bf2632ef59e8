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

//! An append-only, order-preserving store of quads and their metadata.

use tessera_core::math::{Vec2, Vec3};

/// One stored quad, borrowed from a [`QuadBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct QuadEntry<'a, T> {
    /// Device corners `(x, y, w)` in strip order.
    pub device: &'a [Vec3; 4],
    /// Local corners, present exactly when the buffer stores local coordinates.
    pub local: Option<&'a [Vec2; 4]>,
    /// The metadata appended with the quad.
    pub metadata: &'a T,
}

/// Stores quads in insertion order, with geometry and metadata side by side.
///
/// Whether local coordinates are stored is fixed when the buffer is created
/// and checked on every append. The buffer also tracks whether any stored
/// device quad is perspective, which decides the tessellated position width.
#[derive(Debug, Clone)]
pub struct QuadBuffer<T> {
    device: Vec<[Vec3; 4]>,
    local: Vec<[Vec2; 4]>,
    metadata: Vec<T>,
    has_local: bool,
    perspective: bool,
}

impl<T> QuadBuffer<T> {
    /// Creates an empty buffer.
    pub fn new(has_local: bool) -> Self {
        Self::with_capacity(0, has_local)
    }

    /// Creates an empty buffer with room for `capacity` quads.
    pub fn with_capacity(capacity: usize, has_local: bool) -> Self {
        Self {
            device: Vec::with_capacity(capacity),
            local: Vec::with_capacity(if has_local { capacity } else { 0 }),
            metadata: Vec::with_capacity(capacity),
            has_local,
            perspective: false,
        }
    }

    /// Appends a quad.
    ///
    /// # Panics
    ///
    /// Panics if the presence of `local` does not match the buffer's local
    /// coordinate flag.
    pub fn append(&mut self, device: [Vec3; 4], local: Option<[Vec2; 4]>, metadata: T) {
        assert_eq!(
            local.is_some(),
            self.has_local,
            "local coordinates must be present on every quad or on none"
        );
        self.perspective |= device.iter().any(|p| p.z != 1.0);
        self.device.push(device);
        if let Some(local) = local {
            self.local.push(local);
        }
        self.metadata.push(metadata);
    }

    /// Moves every quad of `other` to the end of `self`, leaving `other` empty.
    ///
    /// # Panics
    ///
    /// Panics if the two buffers disagree on storing local coordinates.
    pub fn concat(&mut self, other: &mut QuadBuffer<T>) {
        assert_eq!(
            self.has_local, other.has_local,
            "cannot concatenate quad buffers with differing local coordinates"
        );
        self.perspective |= other.perspective;
        self.device.append(&mut other.device);
        self.local.append(&mut other.local);
        self.metadata.append(&mut other.metadata);
        other.perspective = false;
    }

    /// The number of stored quads.
    #[inline]
    pub fn count(&self) -> usize {
        self.device.len()
    }

    /// Returns `true` if no quad is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.device.is_empty()
    }

    /// Returns `true` if the buffer stores local coordinates.
    #[inline]
    pub fn has_local_coords(&self) -> bool {
        self.has_local
    }

    /// Returns `true` if any stored device quad has a corner with `w != 1`.
    #[inline]
    pub fn is_perspective(&self) -> bool {
        self.perspective
    }

    /// Iterates the stored quads in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            index: 0,
        }
    }

    /// Iterates the metadata in insertion order.
    pub fn metadata(&self) -> std::slice::Iter<'_, T> {
        self.metadata.iter()
    }

    /// Iterates the metadata mutably in insertion order.
    pub fn metadata_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.metadata.iter_mut()
    }

    /// Removes every quad and releases the storage.
    pub fn clear(&mut self) {
        self.device = Vec::new();
        self.local = Vec::new();
        self.metadata = Vec::new();
        self.perspective = false;
    }
}

/// An iterator over the entries of a [`QuadBuffer`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    buffer: &'a QuadBuffer<T>,
    index: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = QuadEntry<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.index;
        let device = self.buffer.device.get(i)?;
        self.index += 1;
        Some(QuadEntry {
            device,
            local: self.buffer.local.get(i),
            metadata: &self.buffer.metadata[i],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.count() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a QuadBuffer<T> {
    type Item = QuadEntry<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset: f32, w: f32) -> [Vec3; 4] {
        [
            Vec3::new(offset, offset, w),
            Vec3::new(offset, offset + 1.0, w),
            Vec3::new(offset + 1.0, offset, w),
            Vec3::new(offset + 1.0, offset + 1.0, w),
        ]
    }

    #[test]
    fn test_append_preserves_order() {
        let mut buffer = QuadBuffer::new(false);
        for i in 0..5 {
            buffer.append(square(i as f32, 1.0), None, i);
        }
        assert_eq!(buffer.count(), 5);
        let ids: Vec<i32> = buffer.iter().map(|e| *e.metadata).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert!(buffer.iter().all(|e| e.local.is_none()));
        assert!(!buffer.is_perspective());
    }

    #[test]
    fn test_concat_appends_and_drains() {
        let mut a = QuadBuffer::new(true);
        let mut b = QuadBuffer::new(true);
        a.append(square(0.0, 1.0), Some([Vec2::ZERO; 4]), "a0");
        b.append(square(1.0, 2.0), Some([Vec2::ONE; 4]), "b0");
        b.append(square(2.0, 1.0), Some([Vec2::ONE; 4]), "b1");

        a.concat(&mut b);
        assert!(b.is_empty());
        assert!(!b.is_perspective());
        assert!(a.is_perspective());

        let entries: Vec<_> = a.iter().map(|e| (*e.metadata, e.local.copied())).collect();
        assert_eq!(
            entries,
            vec![
                ("a0", Some([Vec2::ZERO; 4])),
                ("b0", Some([Vec2::ONE; 4])),
                ("b1", Some([Vec2::ONE; 4])),
            ]
        );
        assert_eq!(a.iter().len(), 3);
    }

    #[test]
    #[should_panic(expected = "local coordinates")]
    fn test_append_rejects_mismatched_local() {
        let mut buffer = QuadBuffer::new(true);
        buffer.append(square(0.0, 1.0), None, ());
    }

    #[test]
    #[should_panic(expected = "differing local coordinates")]
    fn test_concat_rejects_mismatched_local() {
        let mut a: QuadBuffer<()> = QuadBuffer::new(true);
        let mut b: QuadBuffer<()> = QuadBuffer::new(false);
        a.concat(&mut b);
    }

    #[test]
    fn test_metadata_mut_rewrites_in_place() {
        let mut buffer = QuadBuffer::new(false);
        buffer.append(square(0.0, 1.0), None, 1);
        buffer.append(square(1.0, 1.0), None, 2);
        for m in buffer.metadata_mut() {
            *m *= 10;
        }
        assert_eq!(buffer.metadata().copied().collect::<Vec<_>>(), vec![10, 20]);
    }
}
