#![doc = r#"
SMPTE frame rates

A MIDI file can count time in SMPTE frames instead of musical beats. Both the
header's division field and the SMPTE offset meta event name one of four frame
rates:

- 24 fps, film
- 25 fps, PAL and SECAM video
- 29.97 fps, NTSC color video with drop-frame numbering
- 30 fps, NTSC black and white video

The header stores the rate as a negative two's complement byte (`-24`, `-25`,
`-29`, `-30`); the offset event stores it as a two-bit code.
"#]

/// One of the four SMPTE frame rates a MIDI file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001), drop-frame
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// Reads the rate of the header's division field, `29` standing for 29.97.
    pub const fn from_frames_per_second(rate: u8) -> Option<Self> {
        match rate {
            24 => Some(Self::TwentyFour),
            25 => Some(Self::TwentyFive),
            29 => Some(Self::TwentyNine),
            30 => Some(Self::Thirty),
            _ => None,
        }
    }

    /// Reads the two-bit rate code of a SMPTE offset event.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::TwentyFour),
            1 => Some(Self::TwentyFive),
            2 => Some(Self::TwentyNine),
            3 => Some(Self::Thirty),
            _ => None,
        }
    }

    /// The rate as written in the header, `24`, `25`, `29` or `30`
    pub const fn frames_per_second(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 29,
            Self::Thirty => 30,
        }
    }

    /// The nominal rate used to number frames.
    ///
    /// Drop-frame 29.97 numbers its frames like 30 fps.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine | Self::Thirty => 30,
        }
    }

    /// The exact rate in frames per second
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

const DROP_FRAME: f64 = 30_000. / 1001.;

#[test]
fn header_and_coded_rates_agree() {
    use pretty_assertions::assert_eq;
    for code in 0..4 {
        let fps = SmpteFps::from_code(code).unwrap();
        assert_eq!(SmpteFps::from_frames_per_second(fps.frames_per_second()), Some(fps));
    }
    assert_eq!(SmpteFps::from_frames_per_second(28), None);
    assert_eq!(SmpteFps::TwentyNine.as_division(), 30);
}
