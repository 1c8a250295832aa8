// Request orchestration: one call from request to assembled tracks.
//
// Validates the request, resolves the style context, runs the four
// generators (chords only when asked), assembles the merged stream into
// channel-partitioned tracks and derives a suggested filename. This is the
// contract surface a request-handling layer builds on; the CLI in main.rs
// is one such layer.
//
// Generation is intentionally stochastic: two calls with the same request
// differ unless the caller seeds the rng identically.

use crate::bass::generate_bass;
use crate::chords::generate_chords;
use crate::config::{ProgressionTable, StyleTable};
use crate::drums::generate_drums;
use crate::melody::generate_melody;
use crate::name::track_name;
use crate::style::{StyleContext, resolve};
use crate::track::{Track, assemble};
use rand::Rng;
use std::fmt;

/// Parameters for one generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Style id, arbitrary case; unknown ids fall back to the baseline.
    pub style: String,
    /// Requested tempo in beats per minute.
    pub bpm: u16,
    /// Bars of 4/4 to cover.
    pub bars: usize,
    /// Whether to include the chord track.
    pub chords: bool,
}

/// The conditions the engine rejects outright. Everything else degrades
/// into defaults instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// A zero bar count would silently produce empty output.
    ZeroBars,
    /// A zero tempo cannot be encoded as a MIDI tempo.
    ZeroTempo,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::ZeroBars => write!(f, "bar count must be at least 1"),
            GenerateError::ZeroTempo => write!(f, "tempo must be at least 1 bpm"),
        }
    }
}

impl std::error::Error for GenerateError {}

/// A completed generation: the resolved context, the assembled tracks, a
/// suggested filename, and the chord-category label for reporting.
#[derive(Debug, Clone)]
pub struct Piece {
    pub context: StyleContext,
    pub tracks: Vec<Track>,
    pub suggested_filename: String,
    /// Chord-progression category used, when chords were requested.
    pub progression_label: Option<String>,
}

/// Run the full generation pipeline for one request.
pub fn generate(
    req: &GenerateRequest,
    styles: &StyleTable,
    progressions: &ProgressionTable,
    rng: &mut impl Rng,
) -> Result<Piece, GenerateError> {
    if req.bars == 0 {
        return Err(GenerateError::ZeroBars);
    }
    if req.bpm == 0 {
        return Err(GenerateError::ZeroTempo);
    }

    let ctx = resolve(&req.style, styles, rng);

    let mut events = Vec::new();
    generate_drums(&mut events, &ctx, req.bars, rng);
    generate_bass(&mut events, &ctx, req.bars, rng);
    generate_melody(&mut events, &ctx, req.bars, rng);
    let progression_label = if req.chords {
        Some(generate_chords(&mut events, &ctx, req.bars, progressions, rng))
    } else {
        None
    };

    let tracks = assemble(events);
    let suggested_filename = format!("{}.mid", track_name(&ctx, req.bpm, rng));

    Ok(Piece {
        context: ctx,
        tracks,
        suggested_filename,
        progression_label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn req(style: &str, bars: usize, chords: bool) -> GenerateRequest {
        GenerateRequest {
            style: style.to_string(),
            bpm: 120,
            bars,
            chords,
        }
    }

    fn run(req: &GenerateRequest, seed: u64) -> Piece {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(
            req,
            &StyleTable::default_table(),
            &ProgressionTable::default_table(),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_bars_and_tempo() {
        let mut rng = StdRng::seed_from_u64(1);
        let styles = StyleTable::default_table();
        let progs = ProgressionTable::default_table();

        let r = generate(&req("trap", 0, false), &styles, &progs, &mut rng);
        assert_eq!(r.unwrap_err(), GenerateError::ZeroBars);

        let mut bad_tempo = req("trap", 4, false);
        bad_tempo.bpm = 0;
        let r = generate(&bad_tempo, &styles, &progs, &mut rng);
        assert_eq!(r.unwrap_err(), GenerateError::ZeroTempo);
    }

    #[test]
    fn test_identical_seeds_identical_tracks() {
        let request = req("edm", 4, false);
        let a = run(&request, 42);
        let b = run(&request, 42);
        assert_eq!(a.tracks, b.tracks);
        assert_eq!(a.suggested_filename, b.suggested_filename);
    }

    #[test]
    fn test_track_set_with_and_without_chords() {
        let without = run(&req("boombap", 4, false), 5);
        let names: Vec<_> = without.tracks.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Bass", "Melody", "Drums"]);
        assert!(without.progression_label.is_none());

        let with = run(&req("boombap", 4, true), 5);
        let names: Vec<_> = with.tracks.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Bass", "Melody", "Chords", "Drums"]);
        assert!(with.progression_label.is_some());
    }

    #[test]
    fn test_unknown_style_still_produces_all_tracks() {
        let piece = run(&req("xyz123", 4, true), 8);
        assert_eq!(piece.tracks.len(), 4);
        assert_eq!(piece.context.style, crate::style::Style::BoomBap);
    }

    #[test]
    fn test_track_invariants_hold_end_to_end() {
        use crate::event::EventKind;
        for seed in 0..5 {
            let piece = run(&req("dilla", 8, true), seed);
            for track in &piece.tracks {
                let ticks = track.absolute_ticks();
                // Deltas are non-negative by type; ticks therefore ascend.
                assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
                for e in &track.events {
                    match e.kind {
                        EventKind::On => assert!((1..=127).contains(&e.velocity)),
                        EventKind::Off => assert_eq!(e.velocity, 0),
                    }
                }
                // Every on has a matching later-or-equal off on this track.
                let ons = track.events.iter().filter(|e| e.kind == EventKind::On).count();
                let offs = track.events.iter().filter(|e| e.kind == EventKind::Off).count();
                assert_eq!(ons, offs);
            }
        }
    }

    #[test]
    fn test_filename_ends_with_mid() {
        let piece = run(&req("flume", 2, false), 3);
        assert!(piece.suggested_filename.ends_with(".mid"));
    }
}
