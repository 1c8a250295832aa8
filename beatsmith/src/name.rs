// Suggested-filename generation.
//
// Downstream consumers get a creative, human-readable name derived from the
// style, scale, tempo and chosen root:
//   AdjectiveNoun_Style_RootScale_BPM_Suffix
// e.g. "MidnightGroove_Trap_BbMinor_140_X47".

use crate::style::StyleContext;
use rand::Rng;

const ADJECTIVES: [&str; 20] = [
    "Crimson", "Midnight", "Neon", "Dusty", "Electric", "Silent", "Hidden", "Cosmic", "Urban",
    "Vintage", "Liquid", "Solar", "Broken", "Golden", "Dark", "Hollow", "Vivid", "Static",
    "Digital", "Analog",
];

const NOUNS: [&str; 20] = [
    "Echo", "Vibe", "Pulse", "Dream", "Shadow", "Loop", "Storm", "Drift", "Flow", "Signal",
    "Noise", "Haze", "Groove", "Wave", "Rider", "Soul", "Glitch", "Mode", "Vision", "Sequence",
];

const SUFFIX_LETTERS: [char; 4] = ['A', 'X', 'Z', 'V'];

/// Build a track name for the given context and tempo.
pub fn track_name(ctx: &StyleContext, bpm: u16, rng: &mut impl Rng) -> String {
    let adj = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let letter = SUFFIX_LETTERS[rng.random_range(0..SUFFIX_LETTERS.len())];
    let number = rng.random_range(10..100);

    format!(
        "{}{}_{}_{}{}_{}_{}{:02}",
        adj,
        noun,
        ctx.style.title(),
        ctx.root_name,
        ctx.scale.camel_name(),
        bpm,
        letter,
        number
    )
}
