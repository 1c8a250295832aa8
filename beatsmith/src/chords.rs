// Chord progression generation.
//
// Picks one category and one progression from the reference table (or the
// fixed fallback) and walks it cyclically across the requested span. The
// harmonic rhythm randomizes between whole-bar and half-bar changes, with
// the final step truncated so the chords cover the span exactly — no gap,
// no overshoot.
//
// Chords voice as stacked thirds over the scale: degree, degree+2, degree+4.
// Degrees past the end of the built scale are simply omitted, so partial
// chords near the top are valid output.

use crate::config::{FALLBACK_PROGRESSION, ProgressionTable};
use crate::event::{CHANNEL_CHORDS, NoteEvent, push_note};
use crate::scale::scale_notes;
use crate::style::StyleContext;
use rand::Rng;

/// One scheduled chord: start beat, duration in beats, scale-degree index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordStep {
    pub beat: f64,
    pub duration: f64,
    pub degree: usize,
}

/// Pick a (category, progression) pair from the table, or the fallback when
/// the table has nothing usable.
pub fn pick_progression(
    table: &ProgressionTable,
    rng: &mut impl Rng,
) -> (String, Vec<usize>) {
    let categories: Vec<&String> = table
        .progressions
        .iter()
        .filter(|(_, seqs)| seqs.iter().any(|p| !p.is_empty()))
        .map(|(k, _)| k)
        .collect();
    if categories.is_empty() {
        return ("fallback".to_string(), FALLBACK_PROGRESSION.to_vec());
    }
    let cat = categories[rng.random_range(0..categories.len())].clone();
    let seqs: Vec<&Vec<usize>> = table.progressions[&cat]
        .iter()
        .filter(|p| !p.is_empty())
        .collect();
    let progression = seqs[rng.random_range(0..seqs.len())].clone();
    (cat, progression)
}

/// Schedule the progression across `total_beats`: each step holds 4 beats
/// with 70% probability, 2 beats with 30%, and the last step truncates to
/// land exactly on the span boundary.
pub fn harmonic_schedule(
    progression: &[usize],
    total_beats: f64,
    rng: &mut impl Rng,
) -> Vec<ChordStep> {
    let mut steps = Vec::new();
    let mut beat = 0.0;
    let mut idx = 0;

    while beat < total_beats {
        let degree = progression[idx % progression.len()];
        let mut duration = if rng.random_bool(0.3) { 2.0 } else { 4.0 };
        if beat + duration > total_beats {
            duration = total_beats - beat;
        }
        steps.push(ChordStep { beat, duration, degree });
        beat += duration;
        idx += 1;
    }
    steps
}

/// Generate chord events covering `bars` bars. Returns the label of the
/// chosen progression category for caller-side reporting.
pub fn generate_chords(
    events: &mut Vec<NoteEvent>,
    ctx: &StyleContext,
    bars: usize,
    table: &ProgressionTable,
    rng: &mut impl Rng,
) -> String {
    // Mid-range: one octave below the melodic root, two octaves of scale.
    let scale = scale_notes(ctx.root - 12, ctx.scale, 2);
    let (category, progression) = pick_progression(table, rng);

    for step in harmonic_schedule(&progression, bars as f64 * 4.0, rng) {
        // Stacked thirds; out-of-range members drop out of the voicing.
        for offset in [0usize, 2, 4] {
            let degree = step.degree + offset;
            if degree < scale.len() {
                push_note(
                    events,
                    scale[degree],
                    step.beat,
                    70,
                    step.duration,
                    CHANNEL_CHORDS,
                    ctx,
                    rng,
                );
            }
        }
    }
    category
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleTable;
    use crate::style::resolve;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    #[test]
    fn test_schedule_covers_span_exactly() {
        let mut rng = StdRng::seed_from_u64(1);
        for bars in [1usize, 2, 3, 4, 7, 8, 16] {
            let total = bars as f64 * 4.0;
            for _ in 0..50 {
                let steps = harmonic_schedule(&[0, 3, 4, 0], total, &mut rng);
                // Contiguous, no gap or overlap, exact total.
                let mut cursor = 0.0;
                for s in &steps {
                    assert!((s.beat - cursor).abs() < 1e-9);
                    assert!(s.duration > 0.0);
                    cursor += s.duration;
                }
                assert!((cursor - total).abs() < 1e-9, "bars {bars}: sum {cursor}");
            }
        }
    }

    #[test]
    fn test_schedule_cycles_progression() {
        let mut rng = StdRng::seed_from_u64(2);
        let steps = harmonic_schedule(&[0, 5], 64.0, &mut rng);
        for (i, s) in steps.iter().enumerate() {
            assert_eq!(s.degree, [0, 5][i % 2]);
        }
    }

    #[test]
    fn test_empty_table_uses_fallback() {
        let table = ProgressionTable {
            progressions: BTreeMap::new(),
        };
        let mut rng = StdRng::seed_from_u64(3);
        let (cat, prog) = pick_progression(&table, &mut rng);
        assert_eq!(cat, "fallback");
        assert_eq!(prog, FALLBACK_PROGRESSION.to_vec());
    }

    #[test]
    fn test_chords_in_scale_and_channel() {
        let styles = StyleTable::default_table();
        let chords = ProgressionTable::default_table();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = resolve("storch", &styles, &mut rng);
            let scale = scale_notes(ctx.root - 12, ctx.scale, 2);

            let mut events = Vec::new();
            let category = generate_chords(&mut events, &ctx, 4, &chords, &mut rng);
            assert!(chords.progressions.contains_key(&category));
            assert!(!events.is_empty());
            for e in &events {
                assert_eq!(e.channel, CHANNEL_CHORDS);
                assert!(scale.contains(&e.pitch));
            }
        }
    }

    #[test]
    fn test_high_degrees_voice_partially() {
        // Degree 13 in a 14-note scale leaves only the base tone in range.
        let table = ProgressionTable {
            progressions: BTreeMap::from([("edge".to_string(), vec![vec![13]])]),
        };
        let styles = StyleTable::default_table();
        let mut rng = StdRng::seed_from_u64(7);
        let ctx = resolve("edm", &styles, &mut rng);

        let mut events = Vec::new();
        generate_chords(&mut events, &ctx, 1, &table, &mut rng);
        // One or two chord steps, each with a single surviving voice.
        assert!(events.len() == 2 || events.len() == 4, "{}", events.len());
        let scale = scale_notes(ctx.root - 12, ctx.scale, 2);
        assert!(events.iter().all(|e| e.pitch == scale[13]));
    }
}
