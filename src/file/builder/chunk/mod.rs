#![doc = r#"
The chunks of a MIDI file, decoded

A MIDI file is a sequence of chunks, each a four byte ASCII tag, a 32-bit
big-endian length and that many bytes of body:

```text
[MThd] header, first in the file
[MTrk] track 1
...
[MTrk] track N
[????] any other tag, kept as a ForeignChunk
```
"#]

use alloc::vec::Vec;

use crate::{
    DecodeError, DecodeResult,
    file::{MidiFileHeader, MidiFileTrack, TrackDecoder, decode_header},
    lexer::{Token, TokenKind},
};

/// Reported for tokens that do not follow a chunk opener
pub(crate) const OUTSIDE_OF_A_CHUNK: &str = "token outside of a chunk";

/// One decoded chunk
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    /// `MThd`
    Header(MidiFileHeader),
    /// `MTrk`
    Track(MidiFileTrack),
    /// Any other tag
    Foreign(ForeignChunk),
}

impl Chunk {
    /// Decodes the tokens of one chunk, dispatching on its opener.
    ///
    /// Tracks go through `decoder` so running status may carry over.
    pub fn decode(tokens: &[Token<'_>], decoder: &mut TrackDecoder) -> DecodeResult<Self> {
        let chunk = match tokens.first().map(Token::kind) {
            Some(TokenKind::BeginHeaderChunk) => Self::Header(decode_header(tokens)?),
            Some(TokenKind::BeginTrackChunk) => Self::Track(decoder.decode(tokens)?),
            Some(TokenKind::BeginForeignChunk) => Self::Foreign(ForeignChunk::decode(tokens)?),
            _ => {
                let offset = tokens.first().map_or(0, Token::start);
                return Err(DecodeError::malformed_event(offset, OUTSIDE_OF_A_CHUNK));
            }
        };
        Ok(chunk)
    }
}

/// A chunk with an unknown tag. Its body is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignChunk {
    tag: [u8; 4],
    data: Vec<u8>,
}

impl ForeignChunk {
    /// Create a foreign chunk
    pub const fn new(tag: [u8; 4], data: Vec<u8>) -> Self {
        Self { tag, data }
    }

    fn decode(tokens: &[Token<'_>]) -> DecodeResult<Self> {
        let (opener, body) = tokens
            .split_first()
            .ok_or(DecodeError::malformed_event(0, "foreign chunk"))?;
        let tag = opener
            .text()
            .get(..4)
            .and_then(|tag| <[u8; 4]>::try_from(tag).ok())
            .ok_or(DecodeError::malformed_event(opener.start(), "chunk tag"))?;
        let data = body
            .iter()
            .filter(|token| token.kind() == TokenKind::TextByte)
            .filter_map(Token::byte)
            .collect();
        Ok(Self { tag, data })
    }

    /// The four tag bytes
    pub const fn tag(&self) -> [u8; 4] {
        self.tag
    }
    /// The body
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
