/// Runtime options of a [`Tokenizer`](super::Tokenizer)
///
/// ```rust
/// # use smflex::prelude::*;
/// let config = TokenizerConfig::new().strict_chunk_lengths(false);
/// assert!(!config.is_strict());
/// assert!(config.resets_running_status());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenizerConfig {
    strict_chunk_lengths: bool,
    reset_running_status_per_chunk: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerConfig {
    /// Strict chunk lengths, running status reset at every chunk
    pub const fn new() -> Self {
        Self {
            strict_chunk_lengths: true,
            reset_running_status_per_chunk: true,
        }
    }

    /// When set, input that ends inside a chunk is an error.
    /// Otherwise the chunk is closed at the end of the input with a warning.
    pub const fn strict_chunk_lengths(mut self, strict: bool) -> Self {
        self.strict_chunk_lengths = strict;
        self
    }

    /// When set, every chunk opener forgets the last channel-voice command.
    pub const fn reset_running_status_per_chunk(mut self, reset: bool) -> Self {
        self.reset_running_status_per_chunk = reset;
        self
    }

    /// See [`TokenizerConfig::strict_chunk_lengths`]
    pub const fn is_strict(&self) -> bool {
        self.strict_chunk_lengths
    }

    /// See [`TokenizerConfig::reset_running_status_per_chunk`]
    pub const fn resets_running_status(&self) -> bool {
        self.reset_running_status_per_chunk
    }
}
