mod smpte;
pub use smpte::*;

/// The meaning of a delta-time tick.
///
/// Read from the last 16-bit field of the header chunk. When the high bit is clear
/// the remaining 15 bits are ticks per quarter note, otherwise the field holds an
/// SMPTE frame rate and a tick count per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeDivision {
    /// Musical time: ticks per quarter note, 1 to 32767
    TicksPerQuarterNote(u16),
    /// Absolute time in SMPTE frames
    SmpteFormat(SmpteDivision),
}

impl TimeDivision {
    /// Decodes the division field.
    ///
    /// Every value decodes. An SMPTE rate other than 24, 25, 29 or 30 is kept as read.
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        if bytes[0] & 0x80 == 0 {
            return Self::TicksPerQuarterNote(u16::from_be_bytes(bytes) & 0x7FFF);
        }
        // the top byte is the negated frame rate in two's complement
        let frames_per_second = (bytes[0] as i8).unsigned_abs();
        Self::SmpteFormat(SmpteDivision::new(frames_per_second, bytes[1]))
    }

    /// Returns Some if the division counts ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            Self::SmpteFormat(_) => None,
        }
    }

    /// Returns Some if the division counts SMPTE frames
    pub const fn smpte(&self) -> Option<SmpteDivision> {
        match self {
            Self::TicksPerQuarterNote(_) => None,
            Self::SmpteFormat(s) => Some(*s),
        }
    }
}

/// A frame rate and a tick resolution within each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteDivision {
    frames_per_second: u8,
    ticks_per_frame: u8,
}

impl SmpteDivision {
    /// Create a division from its parts
    pub const fn new(frames_per_second: u8, ticks_per_frame: u8) -> Self {
        Self {
            frames_per_second,
            ticks_per_frame,
        }
    }

    /// The frame rate as written in the header, `29` standing for 29.97
    pub const fn frames_per_second(&self) -> u8 {
        self.frames_per_second
    }

    /// Returns the rate if it is one of the four SMPTE rates
    pub const fn fps(&self) -> Option<SmpteFps> {
        SmpteFps::from_frames_per_second(self.frames_per_second)
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }

    /// The duration of one tick in microseconds.
    ///
    /// Rates outside the four SMPTE rates count whole frames.
    pub const fn tick_micros(&self) -> f64 {
        let fps = match self.fps() {
            Some(fps) => fps.as_f64(),
            None => self.frames_per_second as f64,
        };
        1_000_000. / (fps * self.ticks_per_frame as f64)
    }
}
