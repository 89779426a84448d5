#![allow(dead_code)]

use smflex::prelude::*;

/// Routes `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Tokenizes `bytes`, panicking on the first error
pub fn lex(bytes: &[u8]) -> Vec<Token<'_>> {
    init_tracing();
    Tokenizer::new(bytes)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("tokenizing failed: {e}"))
}

/// Checks kinds and texts of a token stream, pair by pair
pub fn assert_tokens(tokens: &[Token<'_>], expected: &[(TokenKind, &[u8])]) {
    let actual = tokens
        .iter()
        .map(|t| (t.kind(), t.text().to_vec()))
        .collect::<Vec<_>>();
    let expected = expected
        .iter()
        .map(|(kind, text)| (*kind, text.to_vec()))
        .collect::<Vec<_>>();
    pretty_assertions::assert_eq!(actual, expected);
}

/// `MThd` chunk with the given fields
pub fn header_chunk(format: u16, tracks: u16, division: [u8; 2]) -> Vec<u8> {
    let mut bytes = b"MThd\x00\x00\x00\x06".to_vec();
    bytes.extend_from_slice(&format.to_be_bytes());
    bytes.extend_from_slice(&tracks.to_be_bytes());
    bytes.extend_from_slice(&division);
    bytes
}

/// `MTrk` chunk around `body`
pub fn track_chunk(body: &[u8]) -> Vec<u8> {
    let mut bytes = b"MTrk".to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

/// A format 0 track: tempo, a C major arpeggio with running status, end of track
pub const FORMAT_0_TRACK: [u8; 59] = [
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x33, // MTrk, 51 bytes
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo 500000
    0x00, 0xC0, 0x05, // program change
    0x00, 0xC1, 0x2E, //
    0x00, 0xC2, 0x46, //
    0x00, 0x92, 0x30, 0x60, // note on, channel 3
    0x00, 0x3C, 0x60, // running status
    0x60, 0x91, 0x43, 0x40, // note on, channel 2
    0x60, 0x90, 0x4C, 0x20, // note on, channel 1
    0x81, 0x40, 0x82, 0x30, 0x40, // note off, channel 3
    0x00, 0x3C, 0x40, // running status
    0x00, 0x81, 0x43, 0x40, // note off, channel 2
    0x00, 0x80, 0x4C, 0x40, // note off, channel 1
    0x00, 0xFF, 0x2F, 0x00, // end of track
];
