use num_enum::TryFromPrimitive;

use super::Channel;

#[doc = r#"
The family of a channel-voice status byte, identified by its high nibble.

```text
0x8n  Note Off                 2 data bytes
0x9n  Note On                  2 data bytes
0xAn  Polyphonic Key Pressure  2 data bytes
0xBn  Control Change           2 data bytes
0xCn  Program Change           1 data byte
0xDn  Channel Pressure         1 data byte
0xEn  Pitch Bend               2 data bytes
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VoiceCommand {
    /// `0x8n`
    NoteOff = 0x8,
    /// `0x9n`
    NoteOn = 0x9,
    /// `0xAn`
    PolyphonicKeyPressure = 0xA,
    /// `0xBn`
    ControlChange = 0xB,
    /// `0xCn`
    ProgramChange = 0xC,
    /// `0xDn`
    ChannelPressure = 0xD,
    /// `0xEn`
    PitchBend = 0xE,
}

impl VoiceCommand {
    /// Returns the command family of a status byte, if it is a channel-voice status.
    pub fn from_status(status: u8) -> Option<Self> {
        Self::try_from_primitive(status >> 4).ok()
    }

    /// The number of data bytes that follow the status byte.
    pub const fn arity(&self) -> u8 {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

/// A channel-voice message without its channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceMessage {
    /// Release a key
    NoteOff {
        /// Key number, 0-127
        key: u8,
        /// Release velocity
        velocity: u8,
    },
    /// Press a key. A velocity of 0 is commonly used as a note off.
    NoteOn {
        /// Key number, 0-127
        key: u8,
        /// Attack velocity
        velocity: u8,
    },
    /// Aftertouch for a single key
    PolyphonicKeyPressure {
        /// Key number, 0-127
        key: u8,
        /// Pressure value
        pressure: u8,
    },
    /// Controller change
    ControlChange {
        /// Controller number
        controller: u8,
        /// New controller value
        value: u8,
    },
    /// Select a program (patch)
    ProgramChange {
        /// Program number
        program: u8,
    },
    /// Aftertouch for the whole channel
    ChannelPressure {
        /// Pressure value
        pressure: u8,
    },
    /// Pitch wheel change. `0x2000` is the center.
    PitchBend {
        /// 14-bit value built from the LSB and MSB data bytes
        value: u16,
    },
}

impl VoiceMessage {
    /// Builds a message from its command family and data bytes.
    ///
    /// Returns `None` if `data` does not hold exactly [`VoiceCommand::arity`] bytes.
    pub fn from_data(command: VoiceCommand, data: &[u8]) -> Option<Self> {
        use VoiceCommand as C;
        let message = match (command, data) {
            (C::NoteOff, &[key, velocity]) => Self::NoteOff { key, velocity },
            (C::NoteOn, &[key, velocity]) => Self::NoteOn { key, velocity },
            (C::PolyphonicKeyPressure, &[key, pressure]) => {
                Self::PolyphonicKeyPressure { key, pressure }
            }
            (C::ControlChange, &[controller, value]) => Self::ControlChange { controller, value },
            (C::ProgramChange, &[program]) => Self::ProgramChange { program },
            (C::ChannelPressure, &[pressure]) => Self::ChannelPressure { pressure },
            (C::PitchBend, &[lsb, msb]) => Self::PitchBend {
                value: ((msb as u16 & 0x7F) << 7) | (lsb as u16 & 0x7F),
            },
            _ => return None,
        };
        Some(message)
    }

    /// The command family of this message
    pub const fn command(&self) -> VoiceCommand {
        match self {
            Self::NoteOff { .. } => VoiceCommand::NoteOff,
            Self::NoteOn { .. } => VoiceCommand::NoteOn,
            Self::PolyphonicKeyPressure { .. } => VoiceCommand::PolyphonicKeyPressure,
            Self::ControlChange { .. } => VoiceCommand::ControlChange,
            Self::ProgramChange { .. } => VoiceCommand::ProgramChange,
            Self::ChannelPressure { .. } => VoiceCommand::ChannelPressure,
            Self::PitchBend { .. } => VoiceCommand::PitchBend,
        }
    }
}

/// A channel-voice message addressed to a [`Channel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    channel: Channel,
    message: VoiceMessage,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message
    pub const fn new(channel: Channel, message: VoiceMessage) -> Self {
        Self { channel, message }
    }
    /// The channel the message is addressed to
    pub const fn channel(&self) -> Channel {
        self.channel
    }
    /// The message itself
    pub const fn message(&self) -> &VoiceMessage {
        &self.message
    }
}
