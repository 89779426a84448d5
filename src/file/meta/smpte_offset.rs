#![doc = r#"
The SMPTE offset meta event (`FF 54 05`)

Gives the SMPTE time at which a track is meant to start. The five payload bytes
are

```text
0rrhhhhh  rate code and hours
mm        minutes
ss        seconds
ff        frames
ff        subframes, hundredths of a frame
```
"#]

use crate::{SmpteError, file::SmpteFps};

/// The starting time of a track in SMPTE time code
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate of the time code
    pub fps: SmpteFps,
    /// 0 to 23
    pub hour: u8,
    /// 0 to 59
    pub minute: u8,
    /// 0 to 59
    pub second: u8,
    /// Frame within the second. Not validated, the upper bound depends on the rate.
    pub frame: u8,
    /// Hundredths of a frame, 0 to 99
    pub subframe: u8,
}

impl SmpteOffset {
    /// The offset in microseconds, frames counted at `fps`.
    ///
    /// Files with an SMPTE division should count at the division's rate.
    pub const fn as_micros_with_override(&self, fps: SmpteFps) -> f64 {
        let whole_seconds =
            self.hour as u64 * 3600 + self.minute as u64 * 60 + self.second as u64;
        (whole_seconds * 1_000_000) as f64
            + (self.frame as u64 * 1_000_000) as f64 / fps.as_f64()
            + (self.subframe as u64 * 10_000) as f64 / fps.as_f64()
    }

    /// The offset in microseconds at its own frame rate
    pub const fn as_micros(&self) -> f64 {
        self.as_micros_with_override(self.fps)
    }

    /// Reads the five payload bytes of the event.
    ///
    /// # Errors
    /// - [`SmpteError::Length`] unless `data` is five bytes long
    /// - [`SmpteError::TrackFrame`] for a rate code with the high bit set
    /// - [`SmpteError::HourOffset`], [`SmpteError::MinuteOffset`],
    ///   [`SmpteError::SecondOffset`] and [`SmpteError::Subframe`] for fields out of range
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        let [rate_hour, minute, second, frame, subframe] = *data else {
            return Err(SmpteError::Length(data.len()));
        };

        let fps = match SmpteFps::from_code(rate_hour >> 5) {
            Some(fps) => fps,
            None => return Err(SmpteError::TrackFrame(rate_hour >> 5)),
        };
        let hour = rate_hour & 0b0001_1111;
        if hour > 23 {
            return Err(SmpteError::HourOffset(hour));
        }
        if minute > 59 {
            return Err(SmpteError::MinuteOffset(minute));
        }
        if second > 59 {
            return Err(SmpteError::SecondOffset(second));
        }
        if subframe > 99 {
            return Err(SmpteError::Subframe(subframe));
        }
        Ok(Self {
            fps,
            hour,
            minute,
            second,
            frame,
            subframe,
        })
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // payload of 00 FF 54 05
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    let err = SmpteOffset::parse(&[0x7F, 0x17, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(31));

    let err = SmpteOffset::parse(&[0x41, 0x50, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::MinuteOffset(80));

    let err = SmpteOffset::parse(&[0x81, 0x17, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::TrackFrame(4));

    let err = SmpteOffset::parse(&[0x41, 0x17]).unwrap_err();
    assert_eq!(err, SmpteError::Length(2));
}
