#![doc = r#"
A tokenizer and decoder for Standard MIDI Files (SMF)

# Overview

The wire format of a MIDI file is context sensitive. Chunk bodies are framed by a
32-bit length, delta-times and data runs are framed by variable-length quantities,
and channel-voice messages may leave out their status byte when it repeats the
previous one ("running status"). A context-free scanner cannot segment such a stream.

`smflex` splits the work in two layers:

1. The [`Tokenizer`](crate::lexer::Tokenizer) drives a mode-aware
   [`BaseScanner`](crate::lexer::BaseScanner) and corrects its output: it closes chunks
   when their announced length is consumed, pops modes after VLQ-framed runs, extracts
   the channel nibble of every channel-voice command and expands running status.
2. Decoders turn the resulting [`Token`](crate::lexer::Token) stream into domain
   records: [`decode_header`](crate::file::decode_header) for the `MThd` chunk,
   [`decode_track`](crate::file::decode_track) for `MTrk` chunks and
   [`MidiFile::parse`](crate::file::MidiFile::parse) for complete files.

# Example
```rust
use smflex::prelude::*;

let bytes = [
    0x4D, 0x54, 0x68, 0x64, // MThd
    0x00, 0x00, 0x00, 0x06, // chunk length
    0x00, 0x00,             // format 0
    0x00, 0x01,             // one track
    0x00, 0x90,             // 144 ticks per quarter note
];

let header = MidiFileHeader::read(&bytes).unwrap();
assert_eq!(header.format(), MidiFileTrackFormat::SingleMultiChannelTrack);
assert_eq!(header.track_count(), 1);
assert_eq!(header.division(), TimeDivision::TicksPerQuarterNote(0x90));
```
"#]
#![warn(missing_docs)]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

pub mod file;
pub mod lexer;
pub mod message;
pub mod vlq;

#[doc = r#"
Common re-exports when working with `smflex`
"#]
pub mod prelude {
    pub use crate::{
        DecodeError, DecodeErrorKind, DecodeResult, FileError, SmpteError,
        file::*,
        lexer::{
            BaseScanner, ByteScanner, Mode, ModeAction, ModeStack, RawToken, Token, TokenKind,
            Tokenizer, TokenizerConfig,
        },
        message::*,
    };
}
