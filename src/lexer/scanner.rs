#![doc = r#"
The primitive byte-pattern recognizer

A [`BaseScanner`] looks at the input at a given offset and, knowing only the
active [`Mode`], classifies the next run of bytes as a [`RawToken`]. It keeps no
state between calls; everything context dependent lives in the
[`Tokenizer`](super::Tokenizer).

[`ByteScanner`] implements the Standard MIDI File grammar:

```text
mode              input                         token              action
Root              "MThd" len32                  BeginHeaderChunk   push NumericArguments
Root              "MTrk" len32                  BeginTrackChunk    push Track
Root              tag len32                     BeginForeignChunk  push Text
NumericArguments  00-7F | 80-FF                 ArgByte7 | Upper   -
Track             vlq                           DeltaTime          push Event
Event             80-EF                         Command            switch NumericArguments for arity bytes
Event             00-7F                         RunningStatus      pop
Event             FF 2F 00                      Meta(EndOfTrack)   pop
Event             FF type len (fixed length)    Meta(type)         switch NumericArguments for len bytes
Event             FF type                       Meta(type)         switch DataLength
Event             F0 | F7                       SysEx | Escape     switch DataLength
DataLength        vlq                           DataLength         switch Text for vlq bytes
Text              00-FF                         TextByte           -
```
"#]
use super::{Mode, TokenKind};
use crate::{
    DecodeError, DecodeErrorKind, DecodeResult,
    message::{MetaKind, VoiceCommand},
    vlq,
};

/// How a raw token changes the mode stack once it is recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    /// Leave the mode stack alone
    None,
    /// Enter a mode; something else pops it
    Push(Mode),
    /// Leave the active mode
    Pop,
    /// Replace the active mode
    Switch(Mode),
    /// Replace the active mode and pop the replacement after the given number of bytes
    SwitchForBytes(Mode, u32),
    /// Replace the active mode and pop the replacement after the number of bytes
    /// announced by the token's own quantity
    SwitchForVlq(Mode),
}

/// A raw token candidate: a classified run of bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    /// The candidate kind
    pub kind: TokenKind,
    /// Offset of the first byte
    pub start: usize,
    /// Number of bytes
    pub len: usize,
    /// The grammar action attached to the token
    pub action: ModeAction,
}

impl RawToken {
    /// Create a raw token
    pub const fn new(kind: TokenKind, start: usize, len: usize, action: ModeAction) -> Self {
        Self {
            kind,
            start,
            len,
            action,
        }
    }

    /// Offset one past the last byte
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Classifies raw bytes under the active mode.
pub trait BaseScanner {
    /// Classifies the bytes of `input` starting at `offset`.
    ///
    /// Returns `Ok(None)` when `offset` is at the end of the input.
    fn scan(&mut self, input: &[u8], offset: usize, mode: Mode) -> DecodeResult<Option<RawToken>>;
}

/// The Standard MIDI File grammar, see the [module documentation](self).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteScanner;

impl BaseScanner for ByteScanner {
    fn scan(&mut self, input: &[u8], offset: usize, mode: Mode) -> DecodeResult<Option<RawToken>> {
        let Some(&first) = input.get(offset) else {
            return Ok(None);
        };
        let token = match mode {
            Mode::Root => chunk_header(input, offset)?,
            Mode::NumericArguments => {
                let kind = if first < 0x80 {
                    TokenKind::ArgByte7
                } else {
                    TokenKind::ArgByteUpper
                };
                RawToken::new(kind, offset, 1, ModeAction::None)
            }
            Mode::Track => {
                let len = quantity_len(input, offset, mode)?;
                RawToken::new(TokenKind::DeltaTime, offset, len, ModeAction::Push(Mode::Event))
            }
            Mode::Event => event(input, offset, first)?,
            Mode::DataLength => {
                let len = quantity_len(input, offset, mode)?;
                RawToken::new(
                    TokenKind::DataLength,
                    offset,
                    len,
                    ModeAction::SwitchForVlq(Mode::Text),
                )
            }
            Mode::Text => RawToken::new(TokenKind::TextByte, offset, 1, ModeAction::None),
        };
        Ok(Some(token))
    }
}

fn chunk_header(input: &[u8], offset: usize) -> DecodeResult<RawToken> {
    let Some(header) = input.get(offset..offset + 8) else {
        return Err(DecodeError::new(offset, DecodeErrorKind::UnexpectedEof));
    };
    let (kind, mode) = match &header[..4] {
        b"MThd" => (TokenKind::BeginHeaderChunk, Mode::NumericArguments),
        b"MTrk" => (TokenKind::BeginTrackChunk, Mode::Track),
        tag if tag.iter().all(|b| b.is_ascii_graphic() || *b == b' ') => {
            (TokenKind::BeginForeignChunk, Mode::Text)
        }
        tag => {
            return Err(DecodeError::new(
                offset,
                DecodeErrorKind::UnrecognizedInput {
                    mode: Mode::Root,
                    byte: tag[0],
                },
            ));
        }
    };
    Ok(RawToken::new(kind, offset, 8, ModeAction::Push(mode)))
}

fn event(input: &[u8], offset: usize, status: u8) -> DecodeResult<RawToken> {
    let token = match status {
        0x00..=0x7F => RawToken::new(TokenKind::RunningStatus, offset, 1, ModeAction::Pop),
        0xF0 => RawToken::new(
            TokenKind::SysEx,
            offset,
            1,
            ModeAction::Switch(Mode::DataLength),
        ),
        0xF7 => RawToken::new(
            TokenKind::SysExEscape,
            offset,
            1,
            ModeAction::Switch(Mode::DataLength),
        ),
        0xFF => meta(input, offset)?,
        _ => match VoiceCommand::from_status(status) {
            Some(command) => RawToken::new(
                TokenKind::Command(command),
                offset,
                1,
                ModeAction::SwitchForBytes(Mode::NumericArguments, command.arity() as u32),
            ),
            None => {
                return Err(DecodeError::new(
                    offset,
                    DecodeErrorKind::UnrecognizedInput {
                        mode: Mode::Event,
                        byte: status,
                    },
                ));
            }
        },
    };
    Ok(token)
}

fn meta(input: &[u8], offset: usize) -> DecodeResult<RawToken> {
    let Some(&kind) = input.get(offset + 1) else {
        return Err(DecodeError::new(offset, DecodeErrorKind::UnexpectedEof));
    };
    let kind = MetaKind::from(kind);
    let announced = input.get(offset + 2).copied();
    let token = match kind.fixed_length() {
        Some(0) if announced == Some(0) => {
            RawToken::new(TokenKind::Meta(kind), offset, 3, ModeAction::Pop)
        }
        Some(len) if announced == Some(len) => RawToken::new(
            TokenKind::Meta(kind),
            offset,
            3,
            ModeAction::SwitchForBytes(Mode::NumericArguments, len as u32),
        ),
        _ => RawToken::new(
            TokenKind::Meta(kind),
            offset,
            2,
            ModeAction::Switch(Mode::DataLength),
        ),
    };
    Ok(token)
}

/// Delimits a quantity: bytes with the high bit set continue it.
fn quantity_len(input: &[u8], offset: usize, mode: Mode) -> DecodeResult<usize> {
    for i in 0..vlq::MAX_LEN {
        let Some(byte) = input.get(offset + i) else {
            return Err(DecodeError::new(offset, DecodeErrorKind::UnexpectedEof));
        };
        if byte & 0x80 == 0 {
            return Ok(i + 1);
        }
    }
    Err(DecodeError::new(
        offset,
        DecodeErrorKind::UnrecognizedInput {
            mode,
            byte: input[offset],
        },
    ))
}
