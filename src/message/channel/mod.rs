#![doc = r#"
Contains the MIDI channel type

# Channel numbering
```text
 status byte   1001 0011
               ^^^^ ^^^^
               |    channel nibble (0-15)
               command nibble
```
On the wire a channel is a nibble from `0` to `15`; musicians count
channels from `1` to `16`. [`Channel`] carries the nibble and displays the
musician's number.
"#]
use core::fmt;

use num_enum::TryFromPrimitive;

#[doc = r#"
One of the sixteen MIDI channels

# Example
```rust
# use smflex::prelude::*;
let channel = Channel::from_status(0x92);
assert_eq!(channel, Channel::Three);
assert_eq!(channel.nibble(), 2);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Channel {
    /// 0bxxxx0000
    One = 0,
    /// 0bxxxx0001
    Two,
    /// 0bxxxx0010
    Three,
    /// 0bxxxx0011
    Four,
    /// 0bxxxx0100
    Five,
    /// 0bxxxx0101
    Six,
    /// 0bxxxx0110
    Seven,
    /// 0bxxxx0111
    Eight,
    /// 0bxxxx1000
    Nine,
    /// 0bxxxx1001
    Ten,
    /// 0bxxxx1010
    Eleven,
    /// 0bxxxx1011
    Twelve,
    /// 0bxxxx1100
    Thirteen,
    /// 0bxxxx1101
    Fourteen,
    /// 0bxxxx1110
    Fifteen,
    /// 0bxxxx1111
    Sixteen,
}

impl Channel {
    /// Extracts the channel from the low nibble of a status byte.
    pub const fn from_status(status: u8) -> Self {
        use Channel::*;
        match status & 0x0F {
            0 => One,
            1 => Two,
            2 => Three,
            3 => Four,
            4 => Five,
            5 => Six,
            6 => Seven,
            7 => Eight,
            8 => Nine,
            9 => Ten,
            10 => Eleven,
            11 => Twelve,
            12 => Thirteen,
            13 => Fourteen,
            14 => Fifteen,
            _ => Sixteen,
        }
    }

    /// Returns the wire value, `0` to `15`.
    pub const fn nibble(&self) -> u8 {
        *self as u8
    }

    /// Returns the channel as musicians count it, `1` to `16`.
    pub const fn number(&self) -> u8 {
        self.nibble() + 1
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel {}", self.number())
    }
}

#[test]
fn channel_from_every_status_nibble() {
    use pretty_assertions::assert_eq;
    for status in 0x80..=0xEFu8 {
        let channel = Channel::from_status(status);
        assert_eq!(channel.nibble(), status & 0x0F);
    }
    assert_eq!(Channel::from_status(0x9F), Channel::Sixteen);
    assert_eq!(alloc::format!("{}", Channel::Ten), "Channel 10");
}
