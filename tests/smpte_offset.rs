mod common;

use common::*;
use pretty_assertions::assert_eq;
use smflex::prelude::*;

/// A format 0 file with an SMPTE division, an offset event and one note
fn midi_with_smpte_offset(
    fps: SmpteFps,
    hour: u8,
    minute: u8,
    second: u8,
    frame: u8,
    subframe: u8,
) -> Vec<u8> {
    let rate = -(fps.frames_per_second() as i8) as u8;
    let mut bytes = header_chunk(0, 1, [rate, 40]);

    let code = match fps {
        SmpteFps::TwentyFour => 0b00,
        SmpteFps::TwentyFive => 0b01,
        SmpteFps::TwentyNine => 0b10,
        SmpteFps::Thirty => 0b11,
    };
    let body = [
        0x00, 0xFF, 0x54, 0x05, // smpte offset
        (code << 5) | (hour & 0x1F),
        minute,
        second,
        frame,
        subframe,
        0x00, 0x90, 0x3C, 0x64, // note on
        0x60, 0x80, 0x3C, 0x40, // note off
        0x00, 0xFF, 0x2F, 0x00,
    ];
    bytes.extend_from_slice(&track_chunk(&body));
    bytes
}

fn offset_of(file: &MidiFile) -> SmpteOffset {
    match file.tracks()[0].events()[0].event() {
        MidiEvent::Meta(MetaEvent::SmpteOffset(offset)) => *offset,
        other => panic!("expected an smpte offset, got {other:?}"),
    }
}

#[test]
fn smpte_offset_24fps() {
    let bytes = midi_with_smpte_offset(SmpteFps::TwentyFour, 12, 30, 15, 18, 50);
    let file = MidiFile::parse(&bytes).unwrap();

    let division = file.division().smpte().unwrap();
    assert_eq!(division.fps(), Some(SmpteFps::TwentyFour));
    assert_eq!(division.ticks_per_frame(), 40);

    let offset = offset_of(&file);
    assert_eq!(
        offset,
        SmpteOffset {
            fps: SmpteFps::TwentyFour,
            hour: 12,
            minute: 30,
            second: 15,
            frame: 18,
            subframe: 50,
        }
    );
    let expected = (12 * 3600 + 30 * 60 + 15) as f64 * 1_000_000.0
        + (18.0 / 24.0) * 1_000_000.0
        + (50.0 / 100.0 / 24.0) * 1_000_000.0;
    assert!((offset.as_micros() - expected).abs() < 0.01);
}

#[test]
fn every_rate_round_trips_through_a_file() {
    for fps in [
        SmpteFps::TwentyFour,
        SmpteFps::TwentyFive,
        SmpteFps::TwentyNine,
        SmpteFps::Thirty,
    ] {
        let bytes = midi_with_smpte_offset(fps, 1, 2, 3, 4, 5);
        let file = MidiFile::parse(&bytes).unwrap();
        assert_eq!(file.division().smpte().and_then(|d| d.fps()), Some(fps));
        assert_eq!(offset_of(&file).fps, fps);
    }
}

#[test]
fn drop_frame_precision() {
    let bytes = midi_with_smpte_offset(SmpteFps::TwentyNine, 0, 0, 0, 1, 0);
    let offset = offset_of(&MidiFile::parse(&bytes).unwrap());
    let frame = 1_000_000.0 * 1001.0 / 30_000.0;
    assert!((offset.as_micros() - frame).abs() < 0.001);
}

#[test]
fn override_rate() {
    let bytes = midi_with_smpte_offset(SmpteFps::TwentyFour, 1, 0, 0, 12, 0);
    let offset = offset_of(&MidiFile::parse(&bytes).unwrap());
    let hour = 3_600_000_000.0;
    assert!((offset.as_micros_with_override(SmpteFps::TwentyFour) - (hour + 500_000.0)).abs() < 1.0);
    assert!((offset.as_micros_with_override(SmpteFps::TwentyFive) - (hour + 480_000.0)).abs() < 1.0);
    assert!((offset.as_micros_with_override(SmpteFps::Thirty) - (hour + 400_000.0)).abs() < 1.0);
}

#[test]
fn invalid_offset_fails_the_file() {
    let bytes = midi_with_smpte_offset(SmpteFps::Thirty, 0, 61, 0, 0, 0);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &DecodeErrorKind::Smpte(SmpteError::MinuteOffset(61))
    );
    // the meta prefix right after the first delta-time
    assert_eq!(err.offset(), 23);
}
