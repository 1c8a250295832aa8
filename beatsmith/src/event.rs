// Note events and the single humanized realization point.
//
// Generators describe notes abstractly (pitch, beat position, velocity,
// duration in beats). `push_note` is the one place that turns those into
// paired on/off tick events, applying swing quantization and randomized
// micro-timing and velocity jitter. Routing every generator through it
// keeps the "feel" uniform across instrument roles.
//
// Ticks are absolute here; track.rs converts them to deltas at assembly.

use crate::style::StyleContext;
use rand::Rng;

/// MIDI ticks per quarter-note beat.
pub const TICKS_PER_BEAT: u32 = 480;

/// Fixed channel assignments by instrument role.
pub const CHANNEL_BASS: u8 = 0;
pub const CHANNEL_MELODY: u8 = 1;
pub const CHANNEL_CHORDS: u8 = 2;
pub const CHANNEL_DRUMS: u8 = 9;

/// General MIDI percussion keys used by the drum generator.
pub mod drum_map {
    pub const KICK: u8 = 36;
    pub const SNARE: u8 = 38;
    pub const CLAP: u8 = 39;
    pub const HAT_CLOSED: u8 = 42;
    pub const HAT_OPEN: u8 = 46;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    On,
    Off,
}

/// A single note-on or note-off at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub tick: u32,
    pub kind: EventKind,
    pub pitch: u8,
    /// 1-127 for on events, 0 for off events.
    pub velocity: u8,
    pub channel: u8,
}

/// Off-beat eighths within this distance of .5 get swing-quantized.
const SWING_TOLERANCE: f64 = 0.05;

/// Realize one abstract note as an on/off event pair.
///
/// Swing: when the context swings and `beat_pos` sits on an off-beat eighth
/// (fractional part within ±0.05 of one half), the on tick moves to
/// `(floor(beat_pos) + swing_amount) * TICKS_PER_BEAT`. Other positions are
/// untouched.
///
/// Humanization: velocity jitters by a uniform offset in [-5, 5] and clamps
/// to [1, 127]; the on tick jitters by a uniform offset in [-10, 10] ticks
/// and clamps to >= 0. The off event lands `duration` beats after the
/// jittered on tick, velocity 0.
pub fn push_note(
    events: &mut Vec<NoteEvent>,
    pitch: u8,
    beat_pos: f64,
    velocity: u8,
    duration: f64,
    channel: u8,
    ctx: &StyleContext,
    rng: &mut impl Rng,
) {
    let mut tick = (beat_pos * TICKS_PER_BEAT as f64) as i64;

    if ctx.swing {
        let fraction = beat_pos - beat_pos.floor();
        if (fraction - 0.5).abs() < SWING_TOLERANCE {
            tick = ((beat_pos.floor() + ctx.swing_amount) * TICKS_PER_BEAT as f64) as i64;
        }
    }

    let velocity = (velocity as i32 + rng.random_range(-5..=5)).clamp(1, 127) as u8;

    tick += rng.random_range(-10..=10);
    let tick = tick.max(0) as u32;

    events.push(NoteEvent {
        tick,
        kind: EventKind::On,
        pitch,
        velocity,
        channel,
    });
    events.push(NoteEvent {
        tick: tick + (duration * TICKS_PER_BEAT as f64) as u32,
        kind: EventKind::Off,
        pitch,
        velocity: 0,
        channel,
    });
}
