use num_enum::TryFromPrimitive;

#[doc = r#"
How the tracks of a MIDI file relate to each other

The format is the first 16-bit field of the header chunk:

- `0`: the file holds a single track carrying every channel
- `1`: the tracks are played simultaneously
- `2`: every track is an independent sequence
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum MidiFileTrackFormat {
    /// Format 0
    SingleMultiChannelTrack = 0,
    /// Format 1
    SimultaneousTracks = 1,
    /// Format 2
    IndependentTracks = 2,
}

impl MidiFileTrackFormat {
    /// The value of the format field
    pub const fn as_u16(&self) -> u16 {
        *self as u16
    }
}
