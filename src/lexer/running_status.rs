use tracing::trace;

use crate::{
    DecodeError, DecodeErrorKind, DecodeResult,
    message::{Channel, VoiceCommand},
};

/// The command a running-status byte stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    /// The remembered command family
    pub command: VoiceCommand,
    /// The remembered channel
    pub channel: Channel,
    /// Data bytes still to come after the running-status byte itself
    pub remaining: u8,
}

#[doc = r#"
Remembers the last channel-voice command so that a bare data byte in status
position can be expanded into the arguments of a repeated command.
"#]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningStatus {
    last: Option<(VoiceCommand, Channel)>,
}

impl RunningStatus {
    /// Records a command whose status byte was present
    pub fn record(&mut self, command: VoiceCommand, channel: Channel) {
        self.last = Some((command, channel));
    }

    /// Forget the last command
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// The number of arguments the last command takes, `0` if there is none
    pub fn args_remaining(&self) -> u8 {
        self.last.map_or(0, |(command, _)| command.arity())
    }

    /// Expands a running-status byte found at `offset`.
    pub fn expand(&self, offset: usize) -> DecodeResult<Expansion> {
        let Some((command, channel)) = self.last else {
            return Err(DecodeError::new(
                offset,
                DecodeErrorKind::UnexpectedRunningStatus,
            ));
        };
        trace!("running status at {offset} repeats {command:?} on {channel}");
        Ok(Expansion {
            command,
            channel,
            remaining: command.arity() - 1,
        })
    }
}
