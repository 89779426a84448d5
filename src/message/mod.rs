#![doc = r#"
Events found in the body of a track chunk

# Hierarchy
```text
                 |------------|
                 | Midi Event |
                 |------------|
               /       |        \
|---------------|  |------|  |-------|
| Channel Voice |  | Meta |  | SysEx |
|---------------|  |------|  |-------|
```
"#]
mod channel;
pub use channel::*;

mod voice;
pub use voice::*;

mod meta;
pub use meta::*;

use alloc::vec::Vec;

/// One event of a track
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MidiEvent {
    /// A channel voice message, with or without its status byte on the wire
    ChannelVoice(ChannelVoiceMessage),
    /// A meta event (`FF`)
    Meta(MetaEvent),
    /// A system exclusive packet (`F0`), without the leading `F0`
    SysEx(Vec<u8>),
    /// An escape packet (`F7`) carrying arbitrary bytes
    SysExEscape(Vec<u8>),
}

impl From<ChannelVoiceMessage> for MidiEvent {
    fn from(value: ChannelVoiceMessage) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<MetaEvent> for MidiEvent {
    fn from(value: MetaEvent) -> Self {
        Self::Meta(value)
    }
}
