// Bass pattern generation.
//
// Deliberately style-generic: a root anchor on the downbeat of every bar,
// plus probability-gated connective hits on random scale tones. The scale
// sits two octaves below the context root so the part stays out of the
// melody's register.

use crate::event::{CHANNEL_BASS, NoteEvent, push_note};
use crate::scale::scale_notes;
use crate::style::StyleContext;
use rand::Rng;

/// Generate bass events covering `bars` bars.
pub fn generate_bass(
    events: &mut Vec<NoteEvent>,
    ctx: &StyleContext,
    bars: usize,
    rng: &mut impl Rng,
) {
    let root = ctx.root - 24;
    let scale = scale_notes(root, ctx.scale, 1);

    for bar in 0..bars {
        let offset = bar as f64 * 4.0;

        // Root on the downbeat establishes the harmony for the bar.
        push_note(events, scale[0], offset, 100, 0.8, CHANNEL_BASS, ctx, rng);

        // Shorter, softer connective motion.
        if rng.random_bool(0.6) {
            let tone = scale[rng.random_range(0..scale.len())];
            push_note(events, tone, offset + 1.5, 85, 0.4, CHANNEL_BASS, ctx, rng);
        }
        if rng.random_bool(0.6) {
            let tone = scale[rng.random_range(0..scale.len())];
            push_note(events, tone, offset + 3.0, 90, 0.4, CHANNEL_BASS, ctx, rng);
        }
    }
}
