// MIDI output from assembled tracks.
//
// Converts a generated Piece into a Standard MIDI File (SMF, Format 1).
// Track 0 carries the meta information the encoder contract requires — a
// fixed tempo and a 4/4 time signature — ahead of every instrument track.
// Instrument tracks are already delta-encoded by track.rs; this module only
// maps them onto the wire format.
//
// Uses the `midly` crate for MIDI writing.

use crate::event::{EventKind, TICKS_PER_BEAT};
use crate::generate::Piece;
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track as MidlyTrack, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Convert a Piece to MIDI and write to a file.
pub fn write_midi(piece: &Piece, bpm: u16, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let smf = to_smf(piece, bpm);
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a Piece to an in-memory SMF.
pub fn to_smf(piece: &Piece, bpm: u16) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_BEAT as u16)),
    ));

    // Track 0: tempo and time signature
    let mut meta_track: MidlyTrack<'static> = Vec::new();
    let tempo_microseconds = 60_000_000 / bpm as u32;
    meta_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    meta_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::TimeSignature(4, 2, 24, 8)),
    });
    meta_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(meta_track);

    // One track per assembled instrument role
    for track in &piece.tracks {
        let mut out: MidlyTrack<'static> = Vec::new();
        let channel = u4::new(track.channel);

        out.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(midly::MetaMessage::TrackName(track.name.as_bytes())),
        });

        for e in &track.events {
            let message = match e.kind {
                EventKind::On => MidiMessage::NoteOn {
                    key: u7::new(e.pitch),
                    vel: u7::new(e.velocity),
                },
                EventKind::Off => MidiMessage::NoteOff {
                    key: u7::new(e.pitch),
                    vel: u7::new(0),
                },
            };
            out.push(TrackEvent {
                delta: u28::new(e.delta),
                kind: TrackEventKind::Midi { channel, message },
            });
        }

        out.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
        });
        smf.tracks.push(out);
    }

    smf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProgressionTable, StyleTable};
    use crate::generate::{GenerateRequest, generate};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_smf_shape() {
        let req = GenerateRequest {
            style: "trap".to_string(),
            bpm: 140,
            bars: 2,
            chords: true,
        };
        let mut rng = StdRng::seed_from_u64(9);
        let piece = generate(
            &req,
            &StyleTable::default_table(),
            &ProgressionTable::default_table(),
            &mut rng,
        )
        .unwrap();

        let smf = to_smf(&piece, req.bpm);
        // Meta track + one track per instrument role.
        assert_eq!(smf.tracks.len(), 1 + piece.tracks.len());

        // Meta track carries tempo then time signature.
        assert!(matches!(
            smf.tracks[0][0].kind,
            TrackEventKind::Meta(midly::MetaMessage::Tempo(_))
        ));
        assert!(matches!(
            smf.tracks[0][1].kind,
            TrackEventKind::Meta(midly::MetaMessage::TimeSignature(4, 2, _, _))
        ));

        // Every track ends with EndOfTrack.
        for track in &smf.tracks {
            assert!(matches!(
                track.last().unwrap().kind,
                TrackEventKind::Meta(midly::MetaMessage::EndOfTrack)
            ));
        }
    }

    #[test]
    fn test_smf_serializes() {
        let req = GenerateRequest {
            style: "edm".to_string(),
            bpm: 124,
            bars: 4,
            chords: false,
        };
        let mut rng = StdRng::seed_from_u64(10);
        let piece = generate(
            &req,
            &StyleTable::default_table(),
            &ProgressionTable::default_table(),
            &mut rng,
        )
        .unwrap();

        let smf = to_smf(&piece, req.bpm);
        let mut buf = Vec::new();
        smf.write(&mut buf).unwrap();
        assert!(buf.starts_with(b"MThd"));
    }
}
