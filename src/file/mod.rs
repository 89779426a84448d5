#![doc = r#"
Rusty representation of a [`MidiFile`]

The decoders in this module consume the token stream of a
[`Tokenizer`](crate::lexer::Tokenizer):

- [`decode_header`] for the `MThd` chunk
- [`decode_track`] (or a [`TrackDecoder`]) for `MTrk` chunks
- [`MidiFile::parse`] for a whole file
"#]

/// Contains the [`MidiFileBuilder`] and the decoded chunk types
pub mod builder;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod meta;
pub use meta::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

use crate::{
    DecodeError, DecodeResult,
    file::builder::{
        MidiFileBuilder,
        chunk::{Chunk, ForeignChunk},
    },
    lexer::{TokenKind, Tokenizer, TokenizerConfig},
};
use alloc::vec::Vec;
use tracing::debug;

#[doc = r#"
A decoded Standard MIDI File

```rust
# use smflex::prelude::*;
let mut bytes = Vec::from(&b"MThd\x00\x00\x00\x06\x00\x00\x00\x01\x00\x60"[..]);
bytes.extend_from_slice(b"MTrk\x00\x00\x00\x04\x00\xFF\x2F\x00");

let file = MidiFile::parse(&bytes).unwrap();
assert_eq!(file.format(), MidiFileTrackFormat::SingleMultiChannelTrack);
assert_eq!(file.tracks().len(), 1);
assert!(file.tracks()[0].is_terminated());
```
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    header: MidiFileHeader,
    tracks: Vec<MidiFileTrack>,
    foreign_chunks: Vec<ForeignChunk>,
}

impl MidiFile {
    /// Parse a set of bytes into a file struct
    pub fn parse(bytes: &[u8]) -> DecodeResult<Self> {
        Self::parse_with(bytes, TokenizerConfig::new())
    }

    /// Parse a set of bytes with the given tokenizer configuration.
    ///
    /// When running status is not reset per chunk, it also carries over from one
    /// track to the next while decoding.
    pub fn parse_with(bytes: &[u8], config: TokenizerConfig) -> DecodeResult<Self> {
        let mut builder = MidiFileBuilder::default();
        let mut decoder = TrackDecoder::new();
        let mut chunk = Vec::new();

        for token in Tokenizer::with_config(bytes, config) {
            let token = token?;
            let closed = token.kind() == TokenKind::EndOfChunk;
            chunk.push(token);
            if !closed {
                continue;
            }
            let start = chunk.first().map_or(0, |token| token.start());
            if config.resets_running_status() {
                decoder.reset();
            }
            let decoded = Chunk::decode(&chunk, &mut decoder)?;
            debug!("decoded chunk at {start}");
            builder
                .handle_chunk(decoded)
                .map_err(|e| DecodeError::new(start, e.into()))?;
            chunk.clear();
        }

        builder
            .build()
            .map_err(|e| DecodeError::new(bytes.len(), e.into()))
    }

    /// Returns header info
    pub const fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// The track format announced by the header
    pub const fn format(&self) -> MidiFileTrackFormat {
        self.header.format()
    }

    /// The meaning of a delta-time tick
    pub const fn division(&self) -> TimeDivision {
        self.header.division()
    }

    /// Returns the tracks in file order
    pub fn tracks(&self) -> &[MidiFileTrack] {
        &self.tracks
    }

    /// Chunks with tags other than `MThd` and `MTrk`
    pub fn foreign_chunks(&self) -> &[ForeignChunk] {
        &self.foreign_chunks
    }

    /// Takes the tracks out of the file
    pub fn into_tracks(self) -> Vec<MidiFileTrack> {
        self.tracks
    }
}
