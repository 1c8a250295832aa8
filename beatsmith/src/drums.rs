// Drum pattern generation, one bar at a time.
//
// Three layers per bar: a probability-thinned hi-hat grid, a fixed backbone
// (kick on the downbeat, snare or clap on 1 and 3), and style-family extra
// kicks. All branching happens on the typed flags resolved into the
// StyleContext — no style-name comparisons here.
//
// Everything lands on the percussion channel (9).

use crate::event::{CHANNEL_DRUMS, NoteEvent, drum_map, push_note};
use crate::style::{Backbone, KickPattern, StyleContext};
use rand::Rng;

/// Chance a hi-hat grid step actually sounds; the rest are deliberate rests.
const HAT_PLACEMENT: f64 = 0.9;
/// Chance a placed hat becomes a 32nd-note roll, for roll-prone styles.
const ROLL_CHANCE: f64 = 0.15;

/// Generate drum events covering `bars` bars.
pub fn generate_drums(
    events: &mut Vec<NoteEvent>,
    ctx: &StyleContext,
    bars: usize,
    rng: &mut impl Rng,
) {
    let backbone_key = match ctx.backbone {
        Backbone::Snare => drum_map::SNARE,
        Backbone::Clap => drum_map::CLAP,
    };

    for bar in 0..bars {
        let offset = bar as f64 * 4.0;

        hat_layer(events, ctx, offset, rng);

        // Backbeat on 1 and 3, kick on the downbeat — every bar, every style.
        push_note(events, backbone_key, offset + 1.0, 110, 0.2, CHANNEL_DRUMS, ctx, rng);
        push_note(events, backbone_key, offset + 3.0, 110, 0.2, CHANNEL_DRUMS, ctx, rng);
        push_note(events, drum_map::KICK, offset, 120, 0.2, CHANNEL_DRUMS, ctx, rng);

        extra_kicks(events, ctx, offset, rng);
    }
}

/// Hi-hat grid for one bar at the style's resolution.
fn hat_layer(events: &mut Vec<NoteEvent>, ctx: &StyleContext, offset: f64, rng: &mut impl Rng) {
    let step = ctx.hat_resolution.step();
    let steps = (4.0 / step) as usize;

    for i in 0..steps {
        if !rng.random_bool(HAT_PLACEMENT) {
            continue;
        }
        let pos = offset + i as f64 * step;

        if ctx.hat_rolls && rng.random_bool(ROLL_CHANCE) {
            // Four 32nd notes in place of the single hit, softer and shorter.
            for r in 0..4 {
                push_note(
                    events,
                    drum_map::HAT_CLOSED,
                    pos + r as f64 * 0.0625,
                    60,
                    0.06,
                    CHANNEL_DRUMS,
                    ctx,
                    rng,
                );
            }
            continue;
        }

        let vel = if ctx.loose_hats {
            // Wide dynamic band with a slight on-grid accent — ghost-note feel.
            let mut v = rng.random_range(50..=95);
            if i % 2 == 0 {
                v += 10;
            }
            v.min(105)
        } else if i % 2 == 0 {
            85
        } else {
            60
        };
        push_note(events, drum_map::HAT_CLOSED, pos, vel, 0.1, CHANNEL_DRUMS, ctx, rng);
    }
}

/// Style-family extra kicks, each candidate gated independently per bar.
fn extra_kicks(events: &mut Vec<NoteEvent>, ctx: &StyleContext, offset: f64, rng: &mut impl Rng) {
    let k = drum_map::KICK;
    match ctx.kick_pattern {
        KickPattern::Syncopated => {
            if rng.random_bool(0.6) {
                push_note(events, k, offset + 2.5, 100, 0.2, CHANNEL_DRUMS, ctx, rng);
            }
            if rng.random_bool(0.4) {
                push_note(events, k, offset + 1.5, 90, 0.2, CHANNEL_DRUMS, ctx, rng);
            }
        }
        KickPattern::Trap => {
            if rng.random_bool(0.5) {
                push_note(events, k, offset + 2.75, 110, 0.2, CHANNEL_DRUMS, ctx, rng);
            }
            if rng.random_bool(0.5) {
                push_note(events, k, offset + 3.5, 100, 0.2, CHANNEL_DRUMS, ctx, rng);
            }
        }
        KickPattern::Drill => {
            if rng.random_bool(0.4) {
                push_note(events, k, offset + 3.5, 95, 0.2, CHANNEL_DRUMS, ctx, rng);
            }
        }
        KickPattern::FourOnFloor => {
            push_note(events, k, offset + 1.0, 120, 0.2, CHANNEL_DRUMS, ctx, rng);
            push_note(events, k, offset + 2.0, 120, 0.2, CHANNEL_DRUMS, ctx, rng);
            push_note(events, k, offset + 3.0, 120, 0.2, CHANNEL_DRUMS, ctx, rng);
        }
        KickPattern::Plain => {}
    }
}
