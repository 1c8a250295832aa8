// Scale definitions and expansion.
//
// A scale is named by the user (or picked from the style table) as a free-form
// string and resolved to a fixed interval set: semitone offsets from the root.
// Unknown names never fail — they resolve to natural minor, so generation
// always has a usable pitch set.
//
// Besides the interval sets, each scale may carry "flavor" degrees: interval
// *indices* (not pitches) that are stylistically characteristic, like the
// flattened second of phrygian. The melody generator occasionally substitutes
// these in for emphasis.
//
// Used by style.rs for context resolution and by every pitched generator to
// build its playable pitch set.

use serde::{Deserialize, Serialize};

/// The scales the engine knows, each defined by its interval pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    /// Natural minor / aeolian — also the fallback for unknown names.
    Minor,
    Major,
    Dorian,
    Phrygian,
    /// Hexatonic blues scale.
    Blues,
    HarmonicMinor,
    DoubleHarmonicMajor,
    PhrygianDominant,
    Lydian,
    Locrian,
    MelodicMinor,
}

impl ScaleKind {
    /// Resolve a scale name, case-insensitively. Accepts the aliases the
    /// style table uses ("aeolian", "natural minor", "major (7th focused)").
    /// Anything unrecognized resolves to Minor — never an error.
    pub fn from_name(name: &str) -> ScaleKind {
        match name.to_lowercase().as_str() {
            "major" | "major (7th focused)" => ScaleKind::Major,
            "dorian" => ScaleKind::Dorian,
            "phrygian" => ScaleKind::Phrygian,
            "blues" => ScaleKind::Blues,
            "harmonic minor" => ScaleKind::HarmonicMinor,
            "double harmonic major" => ScaleKind::DoubleHarmonicMajor,
            "phrygian dominant" => ScaleKind::PhrygianDominant,
            "lydian" => ScaleKind::Lydian,
            "locrian" => ScaleKind::Locrian,
            "melodic minor" => ScaleKind::MelodicMinor,
            _ => ScaleKind::Minor, // includes "minor", "aeolian", "natural minor"
        }
    }

    /// Semitone intervals from the root, one octave's worth.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleKind::Minor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleKind::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleKind::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleKind::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            ScaleKind::Blues => &[0, 3, 5, 6, 7, 10],
            ScaleKind::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleKind::DoubleHarmonicMajor => &[0, 1, 4, 5, 7, 8, 11],
            ScaleKind::PhrygianDominant => &[0, 1, 4, 5, 7, 8, 10],
            ScaleKind::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            ScaleKind::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            ScaleKind::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
        }
    }

    /// Interval indices worth occasional emphasis: the b2 of phrygian, the
    /// #4 of lydian, the leading tone of harmonic minor, the major 6th of
    /// dorian. Empty for scales without a designated color tone.
    pub fn flavor_degrees(self) -> &'static [usize] {
        match self {
            ScaleKind::Phrygian => &[1],
            ScaleKind::PhrygianDominant => &[1, 2],
            ScaleKind::Lydian => &[3],
            ScaleKind::HarmonicMinor => &[6],
            ScaleKind::Dorian => &[5],
            _ => &[],
        }
    }

    /// CamelCase label for filename generation ("HarmonicMinor" etc.).
    pub fn camel_name(self) -> &'static str {
        match self {
            ScaleKind::Minor => "Minor",
            ScaleKind::Major => "Major",
            ScaleKind::Dorian => "Dorian",
            ScaleKind::Phrygian => "Phrygian",
            ScaleKind::Blues => "Blues",
            ScaleKind::HarmonicMinor => "HarmonicMinor",
            ScaleKind::DoubleHarmonicMajor => "DoubleHarmonicMajor",
            ScaleKind::PhrygianDominant => "PhrygianDominant",
            ScaleKind::Lydian => "Lydian",
            ScaleKind::Locrian => "Locrian",
            ScaleKind::MelodicMinor => "MelodicMinor",
        }
    }
}

/// Expand a root pitch and scale across `octaves` octaves.
///
/// Each octave block emits `root + 12*oct + interval` in interval order, so
/// the sequence ascends octave by octave. Length is always
/// `octaves * intervals.len()`.
pub fn scale_notes(root: u8, kind: ScaleKind, octaves: u8) -> Vec<u8> {
    let intervals = kind.intervals();
    let mut notes = Vec::with_capacity(octaves as usize * intervals.len());
    for oct in 0..octaves {
        let base = root + oct * 12;
        for &interval in intervals {
            notes.push(base + interval);
        }
    }
    notes
}

/// Pitch class (0-11) for a note name, sharps and flats both accepted.
pub fn pitch_class(name: &str) -> Option<u8> {
    match name {
        "C" => Some(0),
        "C#" | "Db" => Some(1),
        "D" => Some(2),
        "D#" | "Eb" => Some(3),
        "E" => Some(4),
        "F" => Some(5),
        "F#" | "Gb" => Some(6),
        "G" => Some(7),
        "G#" | "Ab" => Some(8),
        "A" => Some(9),
        "A#" | "Bb" => Some(10),
        "B" => Some(11),
        _ => None,
    }
}

/// Display name for a pitch class, preferring sharps.
pub fn pitch_name(pc: u8) -> &'static str {
    match pc % 12 {
        0 => "C",
        1 => "C#",
        2 => "D",
        3 => "D#",
        4 => "E",
        5 => "F",
        6 => "F#",
        7 => "G",
        8 => "G#",
        9 => "A",
        10 => "A#",
        _ => "B",
    }
}
