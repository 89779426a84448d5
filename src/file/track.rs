use alloc::vec::Vec;
use tracing::{debug, warn};

use crate::{
    DecodeError, DecodeErrorKind, DecodeResult,
    lexer::{Token, TokenKind},
    message::{
        Channel, ChannelVoiceMessage, MetaEvent, MetaKind, MidiEvent, VoiceCommand, VoiceMessage,
    },
    vlq,
};

/// An event and the number of ticks since the previous event of its track
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    delta_time: u32,
    event: MidiEvent,
}

impl TrackEvent {
    /// Create a track event
    pub const fn new(delta_time: u32, event: MidiEvent) -> Self {
        Self { delta_time, event }
    }
    /// Ticks since the previous event
    pub const fn delta_time(&self) -> u32 {
        self.delta_time
    }
    /// The event
    pub const fn event(&self) -> &MidiEvent {
        &self.event
    }
}

/// The events of one `MTrk` chunk, in file order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFileTrack {
    events: Vec<TrackEvent>,
}

impl MidiFileTrack {
    /// Create a track from its events
    pub const fn new(events: Vec<TrackEvent>) -> Self {
        Self { events }
    }
    /// The events of the track
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }
    /// True if the last event is an end-of-track meta event
    pub fn is_terminated(&self) -> bool {
        matches!(
            self.events.last().map(TrackEvent::event),
            Some(MidiEvent::Meta(MetaEvent::EndOfTrack))
        )
    }
    /// The sum of every delta-time, in ticks
    pub fn duration(&self) -> u64 {
        self.events.iter().map(|e| u64::from(e.delta_time)).sum()
    }
}

/// Decodes the tokens of one track chunk.
///
/// The tokens run from the [`TokenKind::BeginTrackChunk`] to the
/// [`TokenKind::EndOfChunk`]. Running status must resolve within the chunk;
/// use a [`TrackDecoder`] to carry it across chunks.
pub fn decode_track(tokens: &[Token<'_>]) -> DecodeResult<MidiFileTrack> {
    TrackDecoder::new().decode(tokens)
}

#[doc = r#"
Decodes track chunks, remembering the last channel-voice command so that
running status can be resolved.

```rust
# use smflex::prelude::*;
let bytes = b"MTrk\x00\x00\x00\x08\x00\x90\x3C\x40\x60\x3C\x00\x00";
let tokens = Tokenizer::new(bytes).collect::<Result<Vec<_>, _>>().unwrap();
let track = TrackDecoder::new().decode(&tokens).unwrap();

let MidiEvent::ChannelVoice(off) = track.events()[1].event() else {
    panic!("expected a voice message");
};
assert_eq!(off.message(), &VoiceMessage::NoteOn { key: 0x3C, velocity: 0 });
assert_eq!(track.events()[1].delta_time(), 0x60);
```
"#]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackDecoder {
    last_command: Option<VoiceCommand>,
}

impl TrackDecoder {
    /// A decoder with no running status
    pub const fn new() -> Self {
        Self { last_command: None }
    }

    /// Forget the last command
    pub fn reset(&mut self) {
        self.last_command = None;
    }

    /// Decodes one track chunk, see [`decode_track`].
    pub fn decode(&mut self, tokens: &[Token<'_>]) -> DecodeResult<MidiFileTrack> {
        let mut cursor = Cursor::new(tokens);
        cursor.expect("track chunk", |kind| kind == TokenKind::BeginTrackChunk)?;

        let mut events = Vec::new();
        loop {
            let token = cursor.expect("delta-time or end of chunk", |kind| {
                matches!(kind, TokenKind::DeltaTime | TokenKind::EndOfChunk)
            })?;
            if token.kind() == TokenKind::EndOfChunk {
                break;
            }
            let delta_time = vlq::decode(token.text())
                .ok_or(DecodeError::malformed_event(token.start(), "delta-time"))?;
            if cursor.peek_kind() == Some(TokenKind::EndOfChunk) {
                warn!("delta-time at {} is not followed by an event", token.start());
                continue;
            }
            let event = self.event(&mut cursor)?;
            events.push(TrackEvent { delta_time, event });
        }
        if let Some(extra) = cursor.next() {
            return Err(DecodeError::malformed_event(
                extra.start(),
                "token after the end of the track chunk",
            ));
        }

        let track = MidiFileTrack { events };
        if !track.is_terminated() {
            warn!("track ending at {} has no end-of-track event", cursor.offset());
        }
        debug!("decoded track with {} events", track.events.len());
        Ok(track)
    }

    fn event(&mut self, cursor: &mut Cursor<'_, '_>) -> DecodeResult<MidiEvent> {
        let token = cursor.expect("event", |_| true)?;
        let event = match token.kind() {
            TokenKind::Command(command) => {
                let channel = channel(cursor)?;
                let data = cursor.arguments(command.arity())?;
                self.last_command = Some(command);
                voice(command, channel, &data, token.start())?
            }
            TokenKind::RunningStatus => {
                let command = self.last_command.ok_or(DecodeError::new(
                    token.start(),
                    DecodeErrorKind::UnexpectedRunningStatus,
                ))?;
                let channel = channel(cursor)?;
                let data = cursor.arguments(command.arity())?;
                voice(command, channel, &data, token.start())?
            }
            TokenKind::Meta(kind) => {
                let data = if token.text().len() == 3 {
                    let len = kind.fixed_length().unwrap_or_default();
                    cursor.arguments(len)?
                } else {
                    cursor.data_run()?
                };
                meta(kind, data, token.start())?
            }
            TokenKind::SysEx => MidiEvent::SysEx(cursor.data_run()?),
            TokenKind::SysExEscape => MidiEvent::SysExEscape(cursor.data_run()?),
            kind => {
                return Err(DecodeError::new(
                    token.start(),
                    DecodeErrorKind::MalformedEvent(unexpected(kind)),
                ));
            }
        };
        Ok(event)
    }
}

fn unexpected(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::ArgByte7 | TokenKind::ArgByteUpper => "argument byte without an event",
        TokenKind::TextByte | TokenKind::DataLength => "data run without an event",
        _ => "unexpected token in place of an event",
    }
}

fn channel(cursor: &mut Cursor<'_, '_>) -> DecodeResult<Channel> {
    let token = cursor.expect("channel", |kind| kind == TokenKind::Channel)?;
    token
        .channel()
        .ok_or(DecodeError::malformed_event(token.start(), "channel token without a channel"))
}

fn voice(
    command: VoiceCommand,
    channel: Channel,
    data: &[u8],
    offset: usize,
) -> DecodeResult<MidiEvent> {
    if data.iter().any(|byte| byte & 0x80 != 0) {
        return Err(DecodeError::malformed_event(
            offset,
            "voice data byte with the high bit set",
        ));
    }
    let message = VoiceMessage::from_data(command, data)
        .ok_or(DecodeError::malformed_event(offset, "voice message arguments"))?;
    Ok(ChannelVoiceMessage::new(channel, message).into())
}

fn meta(kind: MetaKind, data: Vec<u8>, offset: usize) -> DecodeResult<MidiEvent> {
    MetaEvent::from_payload(kind, data)
        .map(MidiEvent::Meta)
        .map_err(|kind| DecodeError::new(offset, kind))
}

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn next(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(Token::kind)
    }

    /// End of the last consumed token
    fn offset(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|last| self.tokens.get(last))
            .map_or(0, Token::stop)
    }

    fn expect(
        &mut self,
        expected: &'static str,
        accept: impl Fn(TokenKind) -> bool,
    ) -> DecodeResult<&'t Token<'a>> {
        let offset = self.offset();
        match self.next() {
            Some(token) if accept(token.kind()) => Ok(token),
            Some(token) => Err(DecodeError::malformed_event(token.start(), expected)),
            None => Err(DecodeError::malformed_event(offset, expected)),
        }
    }

    /// Exactly `n` argument tokens
    fn arguments(&mut self, n: u8) -> DecodeResult<Vec<u8>> {
        (0..n)
            .map(|_| {
                let token = self.expect("argument byte", |kind| kind.is_argument())?;
                token
                    .byte()
                    .ok_or(DecodeError::malformed_event(token.start(), "argument byte"))
            })
            .collect()
    }

    /// A data length followed by its text bytes
    fn data_run(&mut self) -> DecodeResult<Vec<u8>> {
        let length = self.expect("data length", |kind| kind == TokenKind::DataLength)?;
        let announced = vlq::decode(length.text())
            .ok_or(DecodeError::malformed_event(length.start(), "data length"))?;
        let mut data = Vec::new();
        while self.peek_kind() == Some(TokenKind::TextByte) {
            if let Some(byte) = self.next().and_then(Token::byte) {
                data.push(byte);
            }
        }
        if usize::try_from(announced).ok() != Some(data.len()) {
            warn!(
                "data run at {} announced {announced} bytes, found {}",
                length.start(),
                data.len()
            );
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Tokenizer;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn tokens(bytes: &[u8]) -> Vec<Token<'_>> {
        Tokenizer::new(bytes)
            .collect::<DecodeResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn meta_and_sysex_payloads() {
        let bytes = b"MTrk\x00\x00\x00\x16\
            \x00\xFF\x51\x03\x07\xA1\x20\
            \x00\xFF\x03\x02Hi\
            \x00\xF0\x02\x7E\xF7\
            \x00\xFF\x2F\x00";
        let track = decode_track(&tokens(bytes)).unwrap();
        let events: Vec<_> = track.events().iter().map(TrackEvent::event).collect();
        assert_eq!(events[0], &MidiEvent::Meta(MetaEvent::Tempo(500_000)));
        let MidiEvent::Meta(MetaEvent::Text(name)) = events[1] else {
            panic!("expected a text event, got {:?}", events[1]);
        };
        assert_eq!(name.kind(), MetaKind::SequenceOrTrackName);
        assert_eq!(name.text(), "Hi");
        assert_eq!(events[2], &MidiEvent::SysEx(vec![0x7E, 0xF7]));
        assert!(track.is_terminated());
    }

    #[test]
    fn running_status_resolves_across_chunks_with_a_shared_decoder() {
        let first = b"MTrk\x00\x00\x00\x04\x00\xB0\x07\x64";
        let second = b"MTrk\x00\x00\x00\x03\x10\x0A\x40";
        let mut decoder = TrackDecoder::new();
        decoder.decode(&tokens(first)).unwrap();

        let config = crate::lexer::TokenizerConfig::new().reset_running_status_per_chunk(false);
        let mut all = Vec::from(&first[..]);
        all.extend_from_slice(second);
        let tokens = Tokenizer::with_config(&all, config)
            .collect::<DecodeResult<Vec<_>>>()
            .unwrap();
        let split = tokens
            .iter()
            .position(|t| t.kind() == TokenKind::EndOfChunk)
            .unwrap();
        let track = decoder.decode(&tokens[split + 1..]).unwrap();
        assert_eq!(
            track.events()[0].event(),
            &MidiEvent::ChannelVoice(ChannelVoiceMessage::new(
                Channel::One,
                VoiceMessage::ControlChange {
                    controller: 0x0A,
                    value: 0x40
                }
            ))
        );
        assert!(decode_track(&tokens[split + 1..]).is_err());
    }
}
