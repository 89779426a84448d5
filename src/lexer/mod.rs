#![doc = r#"
The context-sensitive layer of the decoder

A [`Tokenizer`] pulls [`RawToken`]s from a [`BaseScanner`] and turns them into the
[`Token`] stream the decoders consume. For every raw token it

1. applies the grammar's [`ModeAction`] to the [`ModeStack`],
2. arms the chunk end when the token opens a chunk,
3. fires expired frames, closing chunks with a synthesized [`TokenKind::EndOfChunk`],
4. extracts the channel of commands and expands running status.

```rust
use smflex::prelude::*;

let bytes = [
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0B, // MTrk, 11 bytes
    0x00, 0x91, 0x3C, 0x40, // note on, channel 2
    0x10, 0x3E, 0x40,       // running status
    0x00, 0xFF, 0x2F, 0x00, // end of track
];
let kinds = Tokenizer::new(&bytes)
    .map(|token| token.map(|token| token.kind()))
    .collect::<Result<Vec<_>, _>>()
    .unwrap();

assert_eq!(&kinds[6..10], &[
    TokenKind::DeltaTime,
    TokenKind::RunningStatus,
    TokenKind::Channel,
    TokenKind::ArgByte7,
]);
assert_eq!(kinds.last(), Some(&TokenKind::EndOfChunk));
```
"#]

mod config;
pub use config::*;

mod frame;
pub use frame::*;

mod mode;
pub use mode::*;

mod running_status;
pub use running_status::*;

mod scanner;
pub use scanner::*;

mod token;
pub use token::*;

use alloc::collections::VecDeque;
use core::iter::FusedIterator;
use tracing::{trace, warn};

use crate::{DecodeError, DecodeErrorKind, DecodeResult, message::Channel};

#[doc = r#"
A lazy, forward-only iterator of [`Token`]s over a byte buffer.

Each tokenizer owns its whole session state: the mode stack, the frame tracker,
the running-status memory and a FIFO of synthesized tokens. After the first error
the iterator is fused.
"#]
#[derive(Debug, Clone)]
pub struct Tokenizer<'a, S = ByteScanner> {
    input: &'a [u8],
    scanner: S,
    offset: usize,
    modes: ModeStack,
    frames: FrameTracker,
    running_status: RunningStatus,
    pending: VecDeque<Token<'a>>,
    config: TokenizerConfig,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `input` with the default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, TokenizerConfig::new())
    }

    /// Tokenize `input` with the given configuration
    pub fn with_config(input: &'a [u8], config: TokenizerConfig) -> Self {
        Self::with_scanner(input, ByteScanner, config)
    }
}

impl<'a, S: BaseScanner> Tokenizer<'a, S> {
    /// Tokenize `input` with a custom scanner
    pub fn with_scanner(input: &'a [u8], scanner: S, config: TokenizerConfig) -> Self {
        Self {
            input,
            scanner,
            offset: 0,
            modes: ModeStack::new(),
            frames: FrameTracker::new(),
            running_status: RunningStatus::default(),
            pending: VecDeque::new(),
            config,
            finished: false,
        }
    }

    /// The active lexical mode
    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    /// The depth of the mode stack, root included
    pub fn depth(&self) -> usize {
        self.modes.depth()
    }

    /// The offset of the next raw token
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The configuration of this tokenizer
    pub fn config(&self) -> TokenizerConfig {
        self.config
    }

    /// Scans one raw token and queues it with everything it triggers.
    ///
    /// Returns `false` once the input is exhausted.
    fn step(&mut self) -> DecodeResult<bool> {
        let input = self.input;
        let mode = self.modes.current();
        let Some(raw) = self.scanner.scan(input, self.offset, mode)? else {
            self.close_at_end()?;
            return Ok(false);
        };
        let end = raw.end();
        let text = match input.get(raw.start..end) {
            Some(text) if !text.is_empty() => text,
            _ => {
                let byte = input.get(raw.start).copied().unwrap_or_default();
                return Err(DecodeError::new(
                    raw.start,
                    DecodeErrorKind::UnrecognizedInput { mode, byte },
                ));
            }
        };
        let mut token = Token::new(raw.kind, text, raw.start);
        trace!("{token} in {mode:?}");

        let depth_before = self.modes.depth();
        self.apply(&raw, text)?;

        if raw.kind.is_chunk_opener() {
            if self.config.resets_running_status() {
                self.running_status.reset();
            }
            let length = chunk_length(text, raw.start)?;
            self.frames.arm_chunk_end(length, end, depth_before)?;
        }

        let fired = self.frames.check_and_fire(end);
        for _ in 0..fired.pops {
            self.modes.pop(raw.start)?;
        }
        let end_of_chunk = match fired.chunk_end {
            Some(chunk_end) => {
                self.modes.restore(chunk_end.restore_depth, raw.start)?;
                Some(Token::end_of_chunk(chunk_end.offset))
            }
            None => None,
        };

        let mut channel = None;
        let mut argument = None;
        match raw.kind {
            TokenKind::Command(command) => {
                let status = Channel::from_status(text[0]);
                self.running_status.record(command, status);
                token = token.with_channel(status);
                channel = Some(Token::channel_of(status, token.span()));
            }
            TokenKind::RunningStatus => {
                let expansion = self.running_status.expand(raw.start)?;
                channel = Some(Token::channel_of(expansion.channel, token.span()));
                argument = Some(token.retag(TokenKind::ArgByte7));
                token.absorb();
                if expansion.remaining > 0 {
                    if end_of_chunk.is_some() {
                        warn!(
                            "running status at {} reached the chunk end, {} argument(s) missing",
                            raw.start, expansion.remaining
                        );
                    } else {
                        self.modes.push(Mode::NumericArguments);
                        self.frames
                            .arm_after_bytes(u32::from(expansion.remaining), end)?;
                    }
                }
            }
            _ => {}
        }

        self.offset = end;
        self.pending.push_back(token);
        self.pending.extend(end_of_chunk);
        self.pending.extend(channel);
        self.pending.extend(argument);
        Ok(true)
    }

    fn apply(&mut self, raw: &RawToken, text: &[u8]) -> DecodeResult<()> {
        let end = raw.end();
        match raw.action {
            ModeAction::None => {}
            ModeAction::Push(mode) => self.modes.push(mode),
            ModeAction::Pop => {
                self.modes.pop(raw.start)?;
            }
            ModeAction::Switch(mode) => self.modes.switch(mode, raw.start)?,
            ModeAction::SwitchForBytes(mode, n) => {
                self.modes.switch(mode, raw.start)?;
                self.frames.arm_after_bytes(n, end)?;
            }
            ModeAction::SwitchForVlq(mode) => {
                self.modes.switch(mode, raw.start)?;
                self.frames.arm_after_vlq(text, end)?;
            }
        }
        Ok(())
    }

    fn close_at_end(&mut self) -> DecodeResult<()> {
        let Some(chunk_end) = self.frames.chunk_end() else {
            return Ok(());
        };
        let at = self.input.len();
        if self.config.is_strict() {
            return Err(DecodeError::new(
                at,
                DecodeErrorKind::TruncatedChunk {
                    expected_end: chunk_end.offset,
                },
            ));
        }
        warn!(
            "input ended at {at}, chunk announced to end at {}",
            chunk_end.offset
        );
        self.frames.clear();
        self.modes.restore(chunk_end.restore_depth, at)?;
        self.pending.push_back(Token::end_of_chunk(at));
        Ok(())
    }
}

/// The big-endian length behind the four tag bytes of a chunk opener
fn chunk_length(text: &[u8], offset: usize) -> DecodeResult<u32> {
    text.get(4..8)
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .map(u32::from_be_bytes)
        .ok_or(DecodeError::new(offset, DecodeErrorKind::UnexpectedEof))
}

impl<'a, S: BaseScanner> Iterator for Tokenizer<'a, S> {
    type Item = DecodeResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            match self.step() {
                Ok(true) => {}
                Ok(false) => self.finished = true,
                Err(e) => {
                    self.finished = true;
                    self.pending.clear();
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S: BaseScanner> FusedIterator for Tokenizer<'_, S> {}
