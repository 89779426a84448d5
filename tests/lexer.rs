mod common;

use common::*;
use pretty_assertions::assert_eq;
use smflex::prelude::*;

use smflex::lexer::TokenKind::{
    ArgByte7, ArgByteUpper, BeginForeignChunk, BeginHeaderChunk, BeginTrackChunk, Channel,
    Command, DataLength, DeltaTime, EndOfChunk, Meta, RunningStatus, TextByte,
};

const NOTE_ON: TokenKind = Command(VoiceCommand::NoteOn);
const NOTE_OFF: TokenKind = Command(VoiceCommand::NoteOff);
const PROGRAM: TokenKind = Command(VoiceCommand::ProgramChange);

#[test]
fn format_0_header() {
    let bytes = header_chunk(0, 1, [0x00, 0x90]);
    let tokens = lex(&bytes);
    assert_tokens(
        &tokens,
        &[
            (BeginHeaderChunk, b"MThd\x00\x00\x00\x06"),
            (ArgByte7, &[0x00]),
            (ArgByte7, &[0x00]),
            (ArgByte7, &[0x00]),
            (ArgByte7, &[0x01]),
            (ArgByte7, &[0x00]),
            (ArgByteUpper, &[0x90]),
            (EndOfChunk, &[]),
        ],
    );
    assert_eq!(tokens.last().map(Token::span), Some(14..14));
}

#[test]
fn format_0_track_with_running_status() {
    let tokens = lex(&FORMAT_0_TRACK);
    assert_tokens(
        &tokens,
        &[
            (BeginTrackChunk, &FORMAT_0_TRACK[..8]),
            (DeltaTime, &[0x00]),
            (Meta(MetaKind::Tempo), &[0xFF, 0x51, 0x03]),
            (ArgByte7, &[0x07]),
            (ArgByteUpper, &[0xA1]),
            (ArgByte7, &[0x20]),
            (DeltaTime, &[0x00]),
            (PROGRAM, &[0xC0]),
            (Channel, &[0x00]),
            (ArgByte7, &[0x05]),
            (DeltaTime, &[0x00]),
            (PROGRAM, &[0xC1]),
            (Channel, &[0x01]),
            (ArgByte7, &[0x2E]),
            (DeltaTime, &[0x00]),
            (PROGRAM, &[0xC2]),
            (Channel, &[0x02]),
            (ArgByte7, &[0x46]),
            (DeltaTime, &[0x00]),
            (NOTE_ON, &[0x92]),
            (Channel, &[0x02]),
            (ArgByte7, &[0x30]),
            (ArgByte7, &[0x60]),
            (DeltaTime, &[0x00]),
            (RunningStatus, &[]),
            (Channel, &[0x02]),
            (ArgByte7, &[0x3C]),
            (ArgByte7, &[0x60]),
            (DeltaTime, &[0x60]),
            (NOTE_ON, &[0x91]),
            (Channel, &[0x01]),
            (ArgByte7, &[0x43]),
            (ArgByte7, &[0x40]),
            (DeltaTime, &[0x60]),
            (NOTE_ON, &[0x90]),
            (Channel, &[0x00]),
            (ArgByte7, &[0x4C]),
            (ArgByte7, &[0x20]),
            (DeltaTime, &[0x81, 0x40]),
            (NOTE_OFF, &[0x82]),
            (Channel, &[0x02]),
            (ArgByte7, &[0x30]),
            (ArgByte7, &[0x40]),
            (DeltaTime, &[0x00]),
            (RunningStatus, &[]),
            (Channel, &[0x02]),
            (ArgByte7, &[0x3C]),
            (ArgByte7, &[0x40]),
            (DeltaTime, &[0x00]),
            (NOTE_OFF, &[0x81]),
            (Channel, &[0x01]),
            (ArgByte7, &[0x43]),
            (ArgByte7, &[0x40]),
            (DeltaTime, &[0x00]),
            (NOTE_OFF, &[0x80]),
            (Channel, &[0x00]),
            (ArgByte7, &[0x4C]),
            (ArgByte7, &[0x40]),
            (DeltaTime, &[0x00]),
            (Meta(MetaKind::EndOfTrack), &[0xFF, 0x2F, 0x00]),
            (EndOfChunk, &[]),
        ],
    );
}

#[test]
fn running_status_tokens_share_the_data_byte_range() {
    let tokens = lex(&FORMAT_0_TRACK);
    let running = tokens
        .iter()
        .position(|t| t.kind() == RunningStatus)
        .unwrap();
    let [status, channel, arg] = &tokens[running..running + 3] else {
        unreachable!()
    };
    assert_eq!(status.span(), 29..30);
    assert_eq!(channel.span(), 29..30);
    assert_eq!(channel.channel(), Some(smflex::message::Channel::Three));
    assert_eq!(arg.span(), 29..30);
    assert_eq!(arg.byte(), Some(0x3C));
}

#[test]
fn track_after_header() {
    let mut bytes = header_chunk(0, 1, [0x00, 0x60]);
    bytes.extend_from_slice(&track_chunk(&[0x00, 0xFF, 0x2F, 0x00]));
    let tokens = lex(&bytes);

    let ends = tokens
        .iter()
        .filter(|t| t.kind() == EndOfChunk)
        .map(Token::start)
        .collect::<Vec<_>>();
    assert_eq!(ends, vec![14, 26]);
    assert_eq!(tokens[8].kind(), BeginTrackChunk);
    assert_eq!(tokens[8].start(), 14);
}

#[test]
fn consecutive_tracks_return_to_root() {
    let mut bytes = track_chunk(&[0x00, 0x90, 0x3C, 0x40]);
    bytes.extend_from_slice(&track_chunk(&[0x00, 0xFF, 0x03, 0x01, b'x']));
    bytes.extend_from_slice(&track_chunk(&[0x00, 0xF0, 0x01, 0xF7]));

    init_tracing();
    let mut tokenizer = Tokenizer::new(&bytes);
    let mut opened = Vec::new();
    while let Some(token) = tokenizer.next() {
        let token = token.unwrap();
        match token.kind() {
            BeginTrackChunk => opened.push(token.start()),
            EndOfChunk => {
                assert_eq!(tokenizer.mode(), Mode::Root);
                assert_eq!(tokenizer.depth(), 1);
            }
            _ => {}
        }
    }
    assert_eq!(opened, vec![0, 12, 25]);
}

#[test]
fn foreign_chunk_is_text() {
    let mut bytes = b"XMF!\x00\x00\x00\x03".to_vec();
    bytes.extend_from_slice(&[0x90, 0xFF, 0x00]);
    let tokens = lex(&bytes);
    assert_tokens(
        &tokens,
        &[
            (BeginForeignChunk, b"XMF!\x00\x00\x00\x03"),
            (TextByte, &[0x90]),
            (TextByte, &[0xFF]),
            (TextByte, &[0x00]),
            (EndOfChunk, &[]),
        ],
    );
}

#[test]
fn empty_data_run_pops_immediately() {
    let bytes = track_chunk(&[0x00, 0xFF, 0x01, 0x00, 0x00, 0xFF, 0x2F, 0x00]);
    let tokens = lex(&bytes);
    let kinds = tokens.iter().map(Token::kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            BeginTrackChunk,
            DeltaTime,
            Meta(MetaKind::Text),
            DataLength,
            DeltaTime,
            Meta(MetaKind::EndOfTrack),
            EndOfChunk,
        ]
    );
}

#[test]
fn errors_carry_offsets() {
    // a system common status byte is not allowed in a file
    let bytes = track_chunk(&[0x00, 0xF2, 0x00, 0x00]);
    let err = Tokenizer::new(&bytes)
        .find_map(Result::err)
        .unwrap();
    assert_eq!(
        err.error_kind(),
        &DecodeErrorKind::UnrecognizedInput {
            mode: Mode::Event,
            byte: 0xF2
        }
    );
    assert_eq!(err.offset(), 9);

    let bytes = track_chunk(&[0x00, 0x40, 0x40]);
    let err = Tokenizer::new(&bytes).find_map(Result::err).unwrap();
    assert_eq!(err.error_kind(), &DecodeErrorKind::UnexpectedRunningStatus);
    assert_eq!(err.offset(), 9);
}

#[test]
fn lenient_tokenizer_closes_a_truncated_track() {
    let mut bytes = track_chunk(&[0x00, 0x90, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00]);
    bytes.truncate(bytes.len() - 4);

    let err = Tokenizer::new(&bytes).find_map(Result::err).unwrap();
    assert!(err.is_eof());

    let config = TokenizerConfig::new().strict_chunk_lengths(false);
    let tokens = Tokenizer::with_config(&bytes, config)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let last = tokens.last().unwrap();
    assert_eq!(last.kind(), EndOfChunk);
    assert_eq!(last.start(), bytes.len());
}
