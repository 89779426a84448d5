use alloc::{vec, vec::Vec};
use tracing::trace;

use crate::{DecodeError, DecodeErrorKind, DecodeResult};

/// A lexical mode. The active mode decides which tokens the scanner may produce next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Between chunks
    Root,
    /// Every byte is an argument token
    NumericArguments,
    /// A track body, expecting a delta-time
    Track,
    /// After a delta-time, expecting a status byte, a meta or a sysex prefix
    Event,
    /// Expecting the length quantity of a data run
    DataLength,
    /// Every byte is a text byte
    Text,
}

#[doc = r#"
The stack of lexical modes of one decode session.

The root mode is never popped; attempting to do so is a framing bug and
surfaces as [`DecodeErrorKind::StackUnderflow`].
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStack {
    modes: Vec<Mode>,
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeStack {
    /// Creates a stack holding only [`Mode::Root`]
    pub fn new() -> Self {
        Self {
            modes: vec![Mode::Root],
        }
    }

    /// The active mode
    pub fn current(&self) -> Mode {
        // the root is never removed
        self.modes.last().copied().unwrap_or(Mode::Root)
    }

    /// The number of modes on the stack, root included
    pub fn depth(&self) -> usize {
        self.modes.len()
    }

    /// Enter a mode
    pub fn push(&mut self, mode: Mode) {
        trace!("push mode {mode:?} at depth {}", self.modes.len());
        self.modes.push(mode);
    }

    /// Leave the active mode, returning it.
    ///
    /// `offset` is only used to position the error.
    pub fn pop(&mut self, offset: usize) -> DecodeResult<Mode> {
        if self.modes.len() <= 1 {
            return Err(DecodeError::new(offset, DecodeErrorKind::StackUnderflow));
        }
        let mode = self.current();
        self.modes.truncate(self.modes.len() - 1);
        trace!("pop mode {mode:?} at offset {offset}");
        Ok(mode)
    }

    /// Replace the active mode
    pub fn switch(&mut self, mode: Mode, offset: usize) -> DecodeResult<()> {
        self.pop(offset)?;
        self.push(mode);
        Ok(())
    }

    /// Pop modes until `depth` modes remain.
    ///
    /// Fails if that would remove the root mode.
    pub fn restore(&mut self, depth: usize, offset: usize) -> DecodeResult<()> {
        if depth == 0 {
            return Err(DecodeError::new(offset, DecodeErrorKind::StackUnderflow));
        }
        if depth < self.modes.len() {
            trace!("restore mode depth {} -> {depth}", self.modes.len());
            self.modes.truncate(depth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_is_never_popped() {
        let mut modes = ModeStack::new();
        assert_eq!(modes.current(), Mode::Root);
        let err = modes.pop(7).unwrap_err();
        assert_eq!(err.error_kind(), &DecodeErrorKind::StackUnderflow);
        assert_eq!(err.offset(), 7);
        assert_eq!(modes.depth(), 1);
    }

    #[test]
    fn push_pop_switch() {
        let mut modes = ModeStack::new();
        modes.push(Mode::Track);
        modes.push(Mode::Event);
        modes.switch(Mode::NumericArguments, 0).unwrap();
        assert_eq!(modes.current(), Mode::NumericArguments);
        assert_eq!(modes.depth(), 3);
        assert_eq!(modes.pop(0).unwrap(), Mode::NumericArguments);
        assert_eq!(modes.current(), Mode::Track);
    }

    #[test]
    fn restore_truncates_to_depth() {
        let mut modes = ModeStack::new();
        modes.push(Mode::Track);
        modes.push(Mode::Event);
        modes.push(Mode::NumericArguments);
        modes.restore(1, 0).unwrap();
        assert_eq!(modes.current(), Mode::Root);
        // restoring to a deeper level than present is a no-op
        modes.restore(3, 0).unwrap();
        assert_eq!(modes.depth(), 1);
        assert!(modes.restore(0, 0).is_err());
    }
}
