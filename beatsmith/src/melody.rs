// Melodic phrase generation: rhythm motifs + constrained random walk.
//
// A phrase is built in two stages. First a one-bar rhythm motif is drawn:
// weighted duration choices advance a beat cursor until the bar is full,
// with occasional rests between hits. Then a pitch walk maps each hit to a
// scale degree, stepping by small weighted amounts and reflecting off the
// scale boundaries instead of sticking to them.
//
// Four bars compose a loop in call-and-response form:
//   bar 1: phrase A, bar 2: fresh walk over A's rhythm, bar 3: A restated,
//   bar 4: a new phrase resolving to the scale's first degree on a held note.
// The loop is tiled to cover the requested bar count; on emission each note
// may be swapped for one of the scale's flavor degrees.

use crate::event::{CHANNEL_MELODY, NoteEvent, push_note};
use crate::scale::scale_notes;
use crate::style::StyleContext;
use rand::Rng;

/// A note start within a bar window, before pitch assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhythmHit {
    /// Beat offset from the start of the motif's bar.
    pub beat: f64,
    /// Length in beats.
    pub duration: f64,
}

/// A rhythm hit with its pitch assigned — the unit flowing into realization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodicNote {
    pub beat: f64,
    pub duration: f64,
    pub pitch: u8,
}

/// Draw a one-bar rhythm motif.
///
/// Durations are weighted toward eighths and quarters (50%/30%), with
/// sixteenths and dotted quarters as spice (10% each). The final hit is
/// truncated so the motif never runs past the bar. After each hit there is a
/// 15% chance of an extra half-beat or full-beat rest.
pub fn rhythm_motif(rng: &mut impl Rng) -> Vec<RhythmHit> {
    let mut rhythm = Vec::new();
    let mut cursor = 0.0;
    let end = 4.0;

    while cursor < end {
        let r = rng.random_range(0.0..1.0);
        let mut dur = if r < 0.5 {
            0.5
        } else if r < 0.8 {
            1.0
        } else if r < 0.9 {
            0.25
        } else {
            1.5
        };
        if cursor + dur > end {
            dur = end - cursor;
        }

        rhythm.push(RhythmHit { beat: cursor, duration: dur });
        cursor += dur;

        if rng.random_bool(0.15) {
            cursor += if rng.random_bool(0.5) { 0.5 } else { 1.0 };
        }
    }
    rhythm
}

/// Map a rhythm onto the scale with a constrained random walk.
///
/// Steps of -2..=2 scale degrees are drawn with weights 10/30/20/30/10,
/// favoring stepwise motion. An index that would leave the scale reflects
/// to one step inside the boundary.
pub fn random_walk(
    scale: &[u8],
    start_idx: usize,
    rhythm: &[RhythmHit],
    rng: &mut impl Rng,
) -> Vec<MelodicNote> {
    let mut phrase = Vec::with_capacity(rhythm.len());
    let mut idx = start_idx as i32;

    for hit in rhythm {
        let r = rng.random_range(0.0..1.0);
        let step = if r < 0.1 {
            -2
        } else if r < 0.4 {
            -1
        } else if r < 0.6 {
            0
        } else if r < 0.9 {
            1
        } else {
            2
        };

        let mut next = idx + step;
        if next < 0 {
            next = 1;
        }
        if next >= scale.len() as i32 {
            next = scale.len() as i32 - 2;
        }
        idx = next;

        phrase.push(MelodicNote {
            beat: hit.beat,
            duration: hit.duration,
            pitch: scale[idx as usize],
        });
    }
    phrase
}

/// Build the 4-bar A-A'-A-B loop over a two-octave scale.
///
/// Bar 4's final note is forced to the scale's first degree and stretched to
/// a two-beat hold — the cadential resolution the loop returns to on every
/// repetition.
pub fn build_loop(scale: &[u8], rng: &mut impl Rng) -> Vec<MelodicNote> {
    let motif_a = rhythm_motif(rng);
    let start_idx = scale.len() / 2;

    let mut loop_notes = Vec::new();

    // Bar 1: statement.
    let phrase_a = random_walk(scale, start_idx, &motif_a, rng);
    loop_notes.extend(phrase_a.iter().copied());

    // Bar 2: fresh walk over the same rhythm.
    for n in random_walk(scale, start_idx, &motif_a, rng) {
        loop_notes.push(MelodicNote { beat: n.beat + 4.0, ..n });
    }

    // Bar 3: exact restatement of A.
    for n in &phrase_a {
        loop_notes.push(MelodicNote { beat: n.beat + 8.0, ..*n });
    }

    // Bar 4: response, resolving home.
    let motif_b = rhythm_motif(rng);
    let mut phrase_b = random_walk(scale, 0, &motif_b, rng);
    if let Some(last) = phrase_b.last_mut() {
        last.pitch = scale[0];
        last.duration = 2.0;
    }
    for n in phrase_b {
        loop_notes.push(MelodicNote { beat: n.beat + 12.0, ..n });
    }

    loop_notes
}

/// Generate melody events covering `bars` bars.
///
/// The 4-bar loop is emitted at every 4-bar boundary below the request, so
/// short requests still receive one full loop. Each emitted note has a 20%
/// chance of being swapped for one of the scale's flavor degrees, giving
/// per-repetition color without changing the rhythm.
pub fn generate_melody(
    events: &mut Vec<NoteEvent>,
    ctx: &StyleContext,
    bars: usize,
    rng: &mut impl Rng,
) {
    let scale = scale_notes(ctx.root, ctx.scale, 2);
    let flavors = ctx.scale.flavor_degrees();
    let loop_notes = build_loop(&scale, rng);

    let mut chunk = 0;
    while chunk < bars {
        let chunk_offset = chunk as f64 * 4.0;
        for n in &loop_notes {
            let mut pitch = n.pitch;
            if !flavors.is_empty() && rng.random_bool(0.2) {
                let f_idx = flavors[rng.random_range(0..flavors.len())];
                if f_idx < scale.len() {
                    pitch = scale[f_idx];
                }
            }
            push_note(
                events,
                pitch,
                chunk_offset + n.beat,
                90,
                n.duration,
                CHANNEL_MELODY,
                ctx,
                rng,
            );
        }
        chunk += 4;
    }
}
