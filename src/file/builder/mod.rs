pub mod chunk;

use alloc::vec::Vec;
use tracing::warn;

use super::MidiFile;
use crate::{
    FileError,
    file::{
        MidiFileHeader, MidiFileTrack, MidiFileTrackFormat,
        builder::chunk::{Chunk, ForeignChunk},
    },
};

/// A builder used to assemble a [`MidiFile`] from its chunks.
///
/// The header may appear anywhere in the chunk sequence.
#[derive(Debug, Default)]
pub struct MidiFileBuilder {
    header: Option<MidiFileHeader>,
    tracks: Vec<MidiFileTrack>,
    foreign_chunks: Vec<ForeignChunk>,
}

impl MidiFileBuilder {
    /// Handles a chunk of a midi file.
    pub fn handle_chunk(&mut self, chunk: Chunk) -> Result<(), FileError> {
        match chunk {
            Chunk::Header(header) => {
                if self.header.is_some() {
                    return Err(FileError::DuplicateHeader);
                }
                if header.format() == MidiFileTrackFormat::SingleMultiChannelTrack
                    && self.tracks.len() > 1
                {
                    return Err(FileError::MultipleTracksForSingleMultiChannel);
                }
                self.header = Some(header);
            }
            Chunk::Track(track) => {
                if self
                    .header
                    .is_some_and(|h| h.format() == MidiFileTrackFormat::SingleMultiChannelTrack)
                    && !self.tracks.is_empty()
                {
                    return Err(FileError::MultipleTracksForSingleMultiChannel);
                }
                self.tracks.push(track);
            }
            Chunk::Foreign(chunk) => self.foreign_chunks.push(chunk),
        }
        Ok(())
    }

    /// Attempts to finish the midifile from the provided chunks.
    pub fn build(self) -> Result<MidiFile, FileError> {
        let Some(header) = self.header else {
            return Err(FileError::NoHeader);
        };
        if usize::from(header.track_count()) != self.tracks.len() {
            warn!(
                "header announced {} track(s), found {}",
                header.track_count(),
                self.tracks.len()
            );
        }
        Ok(MidiFile {
            header,
            tracks: self.tracks,
            foreign_chunks: self.foreign_chunks,
        })
    }
}
