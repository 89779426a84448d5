use alloc::{borrow::Cow, vec};
use core::{fmt, ops::Range};

use crate::message::{Channel, MetaKind, VoiceCommand};

/// The closed set of token kinds the [`Tokenizer`](super::Tokenizer) emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `MThd` and the four length bytes
    BeginHeaderChunk,
    /// `MTrk` and the four length bytes
    BeginTrackChunk,
    /// Any other chunk tag and the four length bytes
    BeginForeignChunk,
    /// Synthesized when the announced chunk length has been consumed
    EndOfChunk,
    /// The delta-time quantity in front of every track event
    DeltaTime,
    /// A data byte, `0x00` to `0x7F`
    ArgByte7,
    /// A byte with its high bit set inside an argument run
    ArgByteUpper,
    /// A channel-voice status byte
    Command(VoiceCommand),
    /// A data byte where a status byte was expected.
    ///
    /// Its text is emptied; the byte itself is re-emitted as [`TokenKind::ArgByte7`].
    RunningStatus,
    /// Synthesized after every command, carries the channel nibble
    Channel,
    /// A meta event prefix, `FF <type>` and for fixed-size kinds the length byte
    Meta(MetaKind),
    /// `F0`
    SysEx,
    /// `F7`
    SysExEscape,
    /// The length quantity in front of a data run
    DataLength,
    /// A byte inside a data run
    TextByte,
}

impl TokenKind {
    /// True for the three chunk-opening kinds
    pub const fn is_chunk_opener(&self) -> bool {
        matches!(
            self,
            Self::BeginHeaderChunk | Self::BeginTrackChunk | Self::BeginForeignChunk
        )
    }

    /// True for the two numeric argument kinds
    pub const fn is_argument(&self) -> bool {
        matches!(self, Self::ArgByte7 | Self::ArgByteUpper)
    }
}

#[doc = r#"
One token of a MIDI file

`start..stop` is the half-open byte range the token covers. Synthesized tokens
share the range of the token that triggered them, except [`TokenKind::EndOfChunk`],
which is empty and sits at the chunk's end offset.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    kind: TokenKind,
    text: Cow<'a, [u8]>,
    start: usize,
    stop: usize,
    channel: Option<Channel>,
}

impl<'a> Token<'a> {
    /// Create a token over a slice of the input
    pub const fn new(kind: TokenKind, text: &'a [u8], start: usize) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(text),
            start,
            stop: start + text.len(),
            channel: None,
        }
    }

    pub(crate) fn end_of_chunk(offset: usize) -> Self {
        Self {
            kind: TokenKind::EndOfChunk,
            text: Cow::Borrowed(&[]),
            start: offset,
            stop: offset,
            channel: None,
        }
    }

    pub(crate) fn channel_of(channel: Channel, span: Range<usize>) -> Self {
        Self {
            kind: TokenKind::Channel,
            text: Cow::Owned(vec![channel.nibble()]),
            start: span.start,
            stop: span.end,
            channel: Some(channel),
        }
    }

    pub(crate) fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Re-tags the token, keeping its text and range.
    pub(crate) fn retag(&self, kind: TokenKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Empties the text, keeping the range.
    pub(crate) fn absorb(&mut self) {
        self.text = Cow::Borrowed(&[]);
    }

    /// The kind of token
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }
    /// The bytes of the token
    pub fn text(&self) -> &[u8] {
        &self.text
    }
    /// Offset of the first byte
    pub const fn start(&self) -> usize {
        self.start
    }
    /// Offset one past the last byte
    pub const fn stop(&self) -> usize {
        self.stop
    }
    /// The byte range of the token
    pub const fn span(&self) -> Range<usize> {
        self.start..self.stop
    }
    /// The channel of commands and [`TokenKind::Channel`] tokens
    pub const fn channel(&self) -> Option<Channel> {
        self.channel
    }
    /// The single byte of one-byte tokens
    pub fn byte(&self) -> Option<u8> {
        match self.text() {
            &[b] => Some(b),
            _ => None,
        }
    }
    /// Detach the token from the input buffer
    pub fn into_owned(self) -> Token<'static> {
        Token {
            kind: self.kind,
            text: Cow::Owned(self.text.into_owned()),
            start: self.start,
            stop: self.stop,
            channel: self.channel,
        }
    }
}

/// Space separated upper case hex, used for diagnostics.
pub struct HexBytes<'b>(pub &'b [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, HexBytes(&self.text))?;
        if let Some(channel) = self.channel {
            write!(f, " on {channel}")?;
        }
        write!(f, " at {}..{}", self.start, self.stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_dumps_hex_and_range() {
        let bytes = [0x92];
        let token = Token::new(TokenKind::Command(VoiceCommand::NoteOn), &bytes, 35)
            .with_channel(Channel::Three);
        assert_eq!(
            token.to_string(),
            "Command(NoteOn)(92) on Channel 3 at 35..36"
        );
        assert_eq!(
            Token::end_of_chunk(22).to_string(),
            "EndOfChunk() at 22..22"
        );
    }

    #[test]
    fn absorbed_token_keeps_its_range() {
        let bytes = [0x3C];
        let mut token = Token::new(TokenKind::RunningStatus, &bytes, 10);
        let arg = token.retag(TokenKind::ArgByte7);
        token.absorb();
        assert_eq!(token.text(), &[] as &[u8]);
        assert_eq!(token.span(), 10..11);
        assert_eq!(arg.byte(), Some(0x3C));
        assert_eq!(arg.span(), 10..11);
    }

    #[test]
    fn owned_token_outlives_its_input() {
        let owned = {
            let bytes = alloc::vec![0x91];
            Token::new(TokenKind::Command(VoiceCommand::NoteOn), &bytes, 4)
                .with_channel(Channel::Two)
                .into_owned()
        };
        assert_eq!(owned.text(), &[0x91]);
        assert_eq!(owned.span(), 4..5);
        assert_eq!(owned.channel(), Some(Channel::Two));
    }
}
