use alloc::{string::String, vec::Vec};
use num_enum::{FromPrimitive, IntoPrimitive};

use super::Channel;
use crate::{DecodeErrorKind, file::SmpteOffset};

#[doc = r#"
The type byte of a meta event (`FF <type> <length> <data>`)

Unassigned type bytes are kept as [`MetaKind::Other`].
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaKind {
    /// `FF 00 02 ssss`
    SequenceNumber = 0x00,
    /// `FF 01 len text`
    Text = 0x01,
    /// `FF 02 len text`
    CopyrightNotice = 0x02,
    /// `FF 03 len text`
    SequenceOrTrackName = 0x03,
    /// `FF 04 len text`
    InstrumentName = 0x04,
    /// `FF 05 len text`
    Lyric = 0x05,
    /// `FF 06 len text`
    Marker = 0x06,
    /// `FF 07 len text`
    CuePoint = 0x07,
    /// `FF 20 01 cc`
    ChannelPrefix = 0x20,
    /// `FF 2F 00`
    EndOfTrack = 0x2F,
    /// `FF 51 03 tttttt`
    Tempo = 0x51,
    /// `FF 54 05 hr mn se fr ff`
    SmpteOffset = 0x54,
    /// `FF 58 04 nn dd cc bb`
    TimeSignature = 0x58,
    /// `FF 59 02 sf mi`
    KeySignature = 0x59,
    /// `FF 7F len data`
    SequencerSpecific = 0x7F,
    /// Any other type byte
    #[num_enum(catch_all)]
    Other(u8),
}

impl MetaKind {
    /// The payload length the standard fixes for this kind, if any.
    pub const fn fixed_length(&self) -> Option<u8> {
        match self {
            Self::SequenceNumber => Some(2),
            Self::ChannelPrefix => Some(1),
            Self::EndOfTrack => Some(0),
            Self::Tempo => Some(3),
            Self::SmpteOffset => Some(5),
            Self::TimeSignature => Some(4),
            Self::KeySignature => Some(2),
            _ => None,
        }
    }

    /// True for the seven kinds that carry text
    pub const fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::CopyrightNotice
                | Self::SequenceOrTrackName
                | Self::InstrumentName
                | Self::Lyric
                | Self::Marker
                | Self::CuePoint
        )
    }
}

/// The text of a text-like meta event.
///
/// MIDI files carry no encoding information, so the bytes are kept as they are.
/// [`TextEvent::text`] reads them as Latin-1, which maps every byte to one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextEvent {
    kind: MetaKind,
    bytes: Vec<u8>,
}

impl TextEvent {
    /// Which of the text kinds this is
    pub const fn kind(&self) -> MetaKind {
        self.kind
    }
    /// The raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
    /// The bytes read as Latin-1
    pub fn text(&self) -> String {
        self.bytes.iter().map(|&b| b as char).collect()
    }
}

/// `FF 58 04 nn dd cc bb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// The denominator as a power of two (`2` means quarter notes)
    pub denominator_power: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Notated 32nd notes per MIDI quarter note (24 MIDI clocks)
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// The denominator as written in a score, if it fits in a `u32`
    pub const fn denominator(&self) -> Option<u32> {
        1u32.checked_shl(self.denominator_power as u32)
    }
}

/// `FF 59 02 sf mi`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Negative for flats, positive for sharps, -7 to 7
    pub sharps_flats: i8,
    /// True for a minor key
    pub minor: bool,
}

/// A meta event found in a track chunk
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaEvent {
    /// Identifies the sequence
    SequenceNumber(u16),
    /// One of the seven text kinds
    Text(TextEvent),
    /// Channel that following meta and sysex events refer to
    ChannelPrefix(Channel),
    /// Last event of every track
    EndOfTrack,
    /// Microseconds per quarter note
    Tempo(u32),
    /// Absolute start time of the track
    SmpteOffset(SmpteOffset),
    /// Time signature
    TimeSignature(TimeSignature),
    /// Key signature
    KeySignature(KeySignature),
    /// Data for a particular sequencer
    SequencerSpecific(Vec<u8>),
    /// An unassigned meta type
    Unknown {
        /// The type byte
        kind: u8,
        /// The payload
        data: Vec<u8>,
    },
}

impl MetaEvent {
    /// Interprets the payload of a meta event of the given kind.
    pub fn from_payload(kind: MetaKind, data: Vec<u8>) -> Result<Self, DecodeErrorKind> {
        use MetaKind as K;
        match kind {
            _ if kind.is_text() => return Ok(Self::Text(TextEvent { kind, bytes: data })),
            K::SequencerSpecific => return Ok(Self::SequencerSpecific(data)),
            K::Other(kind) => return Ok(Self::Unknown { kind, data }),
            _ => {}
        }
        let event = match (kind, data.as_slice()) {
            (K::SequenceNumber, &[msb, lsb]) => Self::SequenceNumber(u16::from_be_bytes([msb, lsb])),
            (K::ChannelPrefix, &[channel]) => Self::ChannelPrefix(
                Channel::try_from(channel)
                    .map_err(|_| DecodeErrorKind::MalformedEvent("channel prefix above 15"))?,
            ),
            (K::EndOfTrack, &[]) => Self::EndOfTrack,
            (K::Tempo, &[a, b, c]) => Self::Tempo(u32::from_be_bytes([0, a, b, c])),
            (K::SmpteOffset, bytes) => Self::SmpteOffset(SmpteOffset::parse(bytes)?),
            (K::TimeSignature, &[numerator, denominator_power, clocks, thirty_seconds]) => {
                Self::TimeSignature(TimeSignature {
                    numerator,
                    denominator_power,
                    clocks_per_click: clocks,
                    thirty_seconds_per_quarter: thirty_seconds,
                })
            }
            (K::KeySignature, &[sf, mi]) => {
                let sharps_flats = sf as i8;
                if !(-7..=7).contains(&sharps_flats) || mi > 1 {
                    return Err(DecodeErrorKind::MalformedEvent("key signature out of range"));
                }
                Self::KeySignature(KeySignature {
                    sharps_flats,
                    minor: mi == 1,
                })
            }
            _ => {
                return Err(DecodeErrorKind::MalformedEvent(
                    "meta payload length does not match its type",
                ));
            }
        };
        Ok(event)
    }
}
