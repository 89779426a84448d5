use alloc::vec::Vec;

use crate::{
    DecodeError, DecodeErrorKind, DecodeResult,
    file::{MidiFileTrackFormat, TimeDivision},
    lexer::{Token, TokenKind, Tokenizer},
};

#[doc = r#"
The contents of the `MThd` chunk

```text
MThd  00 00 00 06  ff ff  nn nn  dd dd
                   |      |      division
                   |      track count
                   format
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFileHeader {
    format: MidiFileTrackFormat,
    track_count: u16,
    division: TimeDivision,
}

impl MidiFileHeader {
    /// Create a new header
    pub const fn new(format: MidiFileTrackFormat, track_count: u16, division: TimeDivision) -> Self {
        Self {
            format,
            track_count,
            division,
        }
    }

    /// Tokenizes `bytes` up to the end of the first chunk and decodes it as a header.
    pub fn read(bytes: &[u8]) -> DecodeResult<Self> {
        let mut tokens = Vec::new();
        for token in Tokenizer::new(bytes) {
            let token = token?;
            let closed = token.kind() == TokenKind::EndOfChunk;
            tokens.push(token);
            if closed {
                break;
            }
        }
        decode_header(&tokens)
    }

    /// The track format
    pub const fn format(&self) -> MidiFileTrackFormat {
        self.format
    }
    /// The number of track chunks the header announces
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }
    /// The meaning of a delta-time tick
    pub const fn division(&self) -> TimeDivision {
        self.division
    }
}

/// Decodes the tokens of one header chunk.
///
/// The tokens must be a [`TokenKind::BeginHeaderChunk`], six argument tokens and
/// the [`TokenKind::EndOfChunk`], nothing else.
pub fn decode_header(tokens: &[Token<'_>]) -> DecodeResult<MidiFileHeader> {
    let mut tokens = tokens.iter();
    let opener = expect(tokens.next(), 0, "header chunk", |kind| {
        kind == TokenKind::BeginHeaderChunk
    })?;

    let mut fields = [0u8; 6];
    let mut starts = [0usize; 6];
    let mut offset = opener.stop();
    for (field, start) in fields.iter_mut().zip(starts.iter_mut()) {
        let token = expect(tokens.next(), offset, "header argument", |kind| {
            kind.is_argument()
        })?;
        *field = token
            .byte()
            .ok_or(DecodeError::malformed_header(
                token.start(),
                "header argument",
                Some(token.kind()),
            ))?;
        *start = token.start();
        offset = token.stop();
    }
    expect(tokens.next(), offset, "end of header chunk", |kind| {
        kind == TokenKind::EndOfChunk
    })?;
    if let Some(extra) = tokens.next() {
        return Err(DecodeError::malformed_header(
            extra.start(),
            "nothing after the header chunk",
            Some(extra.kind()),
        ));
    }

    let format = u16::from_be_bytes([fields[0], fields[1]]);
    let format = MidiFileTrackFormat::try_from(format)
        .map_err(|_| DecodeError::new(starts[0], DecodeErrorKind::UnsupportedFormat(format)))?;
    let track_count = u16::from_be_bytes([fields[2], fields[3]]);
    let division = TimeDivision::from_be_bytes([fields[4], fields[5]]);

    Ok(MidiFileHeader {
        format,
        track_count,
        division,
    })
}

fn expect<'t, 'a>(
    token: Option<&'t Token<'a>>,
    offset: usize,
    expected: &'static str,
    accept: impl Fn(TokenKind) -> bool,
) -> DecodeResult<&'t Token<'a>> {
    match token {
        Some(token) if accept(token.kind()) => Ok(token),
        Some(token) => Err(DecodeError::malformed_header(
            token.start(),
            expected,
            Some(token.kind()),
        )),
        None => Err(DecodeError::malformed_header(offset, expected, None)),
    }
}
