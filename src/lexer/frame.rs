use alloc::vec::Vec;
use tracing::{debug, warn};

use crate::{DecodeError, DecodeErrorKind, DecodeResult, vlq};

/// An armed chunk end: the offset it fires at and the mode depth to go back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkEnd {
    /// Offset one past the last byte of the chunk
    pub offset: usize,
    /// Depth of the mode stack before the chunk opened
    pub restore_depth: usize,
}

/// What [`FrameTracker::check_and_fire`] found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fired {
    /// The number of byte-count frames that expired, one mode pop each
    pub pops: usize,
    /// Set when the chunk end was reached
    pub chunk_end: Option<ChunkEnd>,
}

#[doc = r#"
Tracks the offsets at which modes must be popped.

Two kinds of frames exist:

- the chunk end, armed from the 32-bit length of a chunk header. Chunks never
  nest, so a single slot suffices.
- byte-count frames, armed for argument runs and data runs whose length is known.
  They are kept in a LIFO.

When a byte-count frame and the chunk end expire on the same token, the
byte-count frame fires first; frames still pending when the chunk closes are
dropped.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameTracker {
    chunk_end: Option<ChunkEnd>,
    pops: Vec<usize>,
}

impl FrameTracker {
    /// Creates a tracker with nothing armed
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the chunk end `length` bytes after `at_offset`.
    pub fn arm_chunk_end(
        &mut self,
        length: u32,
        at_offset: usize,
        restore_depth: usize,
    ) -> DecodeResult<()> {
        let offset = checked_offset(at_offset, length)?;
        if let Some(previous) = self.chunk_end {
            warn!(
                "chunk opened at {at_offset} while the previous one was armed to end at {}",
                previous.offset
            );
        }
        debug!("Chunk-length: {length} will end at position {offset}");
        self.chunk_end = Some(ChunkEnd {
            offset,
            restore_depth,
        });
        Ok(())
    }

    /// Arms a pop `n` bytes after `at_offset`.
    pub fn arm_after_bytes(&mut self, n: u32, at_offset: usize) -> DecodeResult<()> {
        let offset = checked_offset(at_offset, n)?;
        debug!("Popping mode after {n} bytes which will be at {offset}");
        self.pops.push(offset);
        Ok(())
    }

    /// Arms a pop after the number of bytes announced by the quantity in `vlq_bytes`.
    pub fn arm_after_vlq(&mut self, vlq_bytes: &[u8], at_offset: usize) -> DecodeResult<()> {
        let n = vlq::decode(vlq_bytes)
            .ok_or(DecodeError::new(at_offset, DecodeErrorKind::FrameOverflow))?;
        self.arm_after_bytes(n, at_offset)
    }

    /// True while a chunk is open
    pub fn in_chunk(&self) -> bool {
        self.chunk_end.is_some()
    }

    /// The armed chunk end, if any
    pub fn chunk_end(&self) -> Option<ChunkEnd> {
        self.chunk_end
    }

    /// Disarms every frame, returning the chunk end that was armed
    pub fn clear(&mut self) -> Option<ChunkEnd> {
        self.pops.clear();
        self.chunk_end.take()
    }

    /// Fires every frame that expired at or before `offset`.
    pub fn check_and_fire(&mut self, offset: usize) -> Fired {
        let mut fired = Fired::default();
        while let Some(&pop_at) = self.pops.last() {
            if pop_at > offset {
                break;
            }
            self.pops.truncate(self.pops.len() - 1);
            fired.pops += 1;
        }

        if let Some(end) = self.chunk_end.filter(|end| end.offset <= offset) {
            if end.offset < offset {
                warn!(
                    "token ending at {offset} crossed the chunk end at {}",
                    end.offset
                );
            }
            if !self.pops.is_empty() {
                warn!(
                    "dropping {} pending frame(s) at the chunk end {}",
                    self.pops.len(),
                    end.offset
                );
                self.pops.clear();
            }
            self.chunk_end = None;
            fired.chunk_end = Some(end);
        }
        fired
    }
}

fn checked_offset(at_offset: usize, n: u32) -> DecodeResult<usize> {
    usize::try_from(n)
        .ok()
        .and_then(|n| at_offset.checked_add(n))
        .ok_or(DecodeError::new(at_offset, DecodeErrorKind::FrameOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chunk_end_fires_once() {
        let mut frames = FrameTracker::new();
        frames.arm_chunk_end(6, 8, 1).unwrap();
        assert_eq!(frames.check_and_fire(13), Fired::default());
        let fired = frames.check_and_fire(14);
        assert_eq!(
            fired.chunk_end,
            Some(ChunkEnd {
                offset: 14,
                restore_depth: 1
            })
        );
        assert!(!frames.in_chunk());
        assert_eq!(frames.check_and_fire(15), Fired::default());
    }

    #[test]
    fn byte_frames_fire_lifo() {
        let mut frames = FrameTracker::new();
        frames.arm_after_bytes(4, 10).unwrap();
        frames.arm_after_bytes(1, 11).unwrap();
        assert_eq!(frames.check_and_fire(11).pops, 0);
        assert_eq!(frames.check_and_fire(12).pops, 1);
        assert_eq!(frames.check_and_fire(14).pops, 1);
    }

    #[test]
    fn zero_length_frame_fires_immediately() {
        let mut frames = FrameTracker::new();
        frames.arm_after_vlq(&[0x00], 20).unwrap();
        assert_eq!(frames.check_and_fire(20).pops, 1);
    }

    #[test]
    fn coinciding_frames_fire_inner_first_and_stale_frames_drop() {
        let mut frames = FrameTracker::new();
        frames.arm_chunk_end(4, 22, 1).unwrap();
        frames.arm_after_bytes(2, 24).unwrap();
        frames.arm_after_bytes(9, 25).unwrap();
        let fired = frames.check_and_fire(26);
        assert_eq!(fired.pops, 0);
        assert_eq!(fired.chunk_end.map(|end| end.offset), Some(26));
        // the frame at 26 was shadowed by the later one and dropped with it
        assert_eq!(frames.check_and_fire(40), Fired::default());
    }

    #[test]
    fn vlq_frame_length() {
        let mut frames = FrameTracker::new();
        frames.arm_after_vlq(&[0x81, 0x00], 100).unwrap();
        assert_eq!(frames.check_and_fire(227).pops, 0);
        assert_eq!(frames.check_and_fire(228).pops, 1);
    }

    #[test]
    fn overflow_is_reported() {
        let mut frames = FrameTracker::new();
        let err = frames.arm_after_bytes(1, usize::MAX).unwrap_err();
        assert_eq!(err.error_kind(), &DecodeErrorKind::FrameOverflow);
        let err = frames.arm_after_vlq(&[0xFF; 5], 3).unwrap_err();
        assert_eq!(err.error_kind(), &DecodeErrorKind::FrameOverflow);
        assert_eq!(err.offset(), 3);
    }
}
