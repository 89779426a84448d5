use crate::lexer::{Mode, TokenKind};
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while tokenizing or decoding a MIDI file.

Every error carries the byte offset in the input where it was detected.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Decoding at offset {offset}, {kind}")]
pub struct DecodeError {
    offset: usize,
    pub(crate) kind: DecodeErrorKind,
}

/// A kind of error that the tokenizer or one of the decoders can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// A mode was popped while only the root mode remained.
    ///
    /// This indicates a framing bug and aborts the decode.
    #[error("Mode stack underflow")]
    StackUnderflow,
    /// A data byte appeared where a status byte was expected, but no
    /// channel-voice command has been seen yet.
    #[error("Running status without a preceding channel voice command")]
    UnexpectedRunningStatus,
    /// The header announced a track format other than 0, 1 or 2.
    #[error("Unsupported track format {0}")]
    UnsupportedFormat(u16),
    /// The header chunk does not consist of its six fixed argument bytes.
    #[error("Malformed header chunk: expected {expected}, found {found:?}")]
    MalformedHeader {
        /// What the decoder was looking for
        expected: &'static str,
        /// The kind of token it found instead, if any
        found: Option<TokenKind>,
    },
    /// A length field or a variable-length quantity does not fit the offset range.
    #[error("Frame length overflow")]
    FrameOverflow,
    /// The scanner could not classify the input under the active mode.
    #[error("Unrecognized byte 0x{byte:02X} in {mode:?} mode")]
    UnrecognizedInput {
        /// The active mode
        mode: Mode,
        /// The first byte that could not be classified
        byte: u8,
    },
    /// The input ended in the middle of a token.
    #[error("Unexpected end of input")]
    UnexpectedEof,
    /// The input ended before the announced end of a chunk.
    #[error("Chunk announced to end at offset {expected_end}")]
    TruncatedChunk {
        /// The offset the chunk length announced
        expected_end: usize,
    },
    /// A track event did not have the expected shape.
    #[error("Malformed event: {0}")]
    MalformedEvent(&'static str),
    /// A SMPTE offset meta event could not be read
    #[error("SMPTE offset: {0}")]
    Smpte(#[from] SmpteError),
    /// The chunks do not form a valid file
    #[error("File: {0}")]
    File(#[from] FileError),
}

impl DecodeError {
    /// Create a decode error from an offset and kind
    pub const fn new(offset: usize, kind: DecodeErrorKind) -> Self {
        Self { offset, kind }
    }
    /// Returns the error kind.
    pub fn error_kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
    /// Returns the byte offset where the error occurred.
    pub fn offset(&self) -> usize {
        self.offset
    }
    /// True if the input ended too early
    pub const fn is_eof(&self) -> bool {
        matches!(
            self.kind,
            DecodeErrorKind::UnexpectedEof | DecodeErrorKind::TruncatedChunk { .. }
        )
    }

    pub(crate) const fn malformed_header(
        offset: usize,
        expected: &'static str,
        found: Option<TokenKind>,
    ) -> Self {
        Self::new(offset, DecodeErrorKind::MalformedHeader { expected, found })
    }

    pub(crate) const fn malformed_event(offset: usize, reason: &'static str) -> Self {
        Self::new(offset, DecodeErrorKind::MalformedEvent(reason))
    }
}

/// The Decode Result type (see [`DecodeError`])
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while reading a SMPTE offset meta event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SmpteError {
    /// The payload is not five bytes long
    #[error("Expected 5 bytes, got {0}")]
    Length(usize),
    /// Bits 5-6 of the first byte name no known frame rate
    #[error("Invalid frame type {0}")]
    TrackFrame(u8),
    /// Hours above 23
    #[error("Invalid hour offset {0}")]
    HourOffset(u8),
    /// Minutes above 59
    #[error("Invalid minute offset {0}")]
    MinuteOffset(u8),
    /// Seconds above 59
    #[error("Invalid second offset {0}")]
    SecondOffset(u8),
    /// Subframes above 99
    #[error("Invalid subframe {0}")]
    Subframe(u8),
}

/// Errors that occur when chunks are assembled into a [`MidiFile`](crate::file::MidiFile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FileError {
    /// A second `MThd` chunk was found
    #[error("Duplicate header chunk")]
    DuplicateHeader,
    /// No `MThd` chunk was found
    #[error("No header chunk")]
    NoHeader,
    /// A format 0 file contained more than one track
    #[error("Format 0 file with more than one track")]
    MultipleTracksForSingleMultiChannel,
}
