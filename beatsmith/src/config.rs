// Reference-data tables loaded from JSON.
//
// Two tables condition generation: the style table (candidate roots and
// scales per style) and the chord-progression table (scale-degree sequences
// per category). Both are external data the engine consumes, not generates.
//
// Loading failure is never fatal: callers fall back to the hardcoded
// defaults below, and the engine runs in a degraded-but-functional mode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Candidate roots and scales for one style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleEntry {
    /// Note names ("C", "Bb", ...) to pick the root pitch class from.
    pub roots: Vec<String>,
    /// Scale names to pick from; resolved via `ScaleKind::from_name`.
    pub scales: Vec<String>,
}

/// Style table: display name ("Boom Bap", "EDM") → candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleTable {
    pub styles: BTreeMap<String, StyleEntry>,
}

impl StyleTable {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let table: StyleTable = serde_json::from_str(&data)?;
        Ok(table)
    }

    /// Hardcoded table covering every known style.
    pub fn default_table() -> Self {
        let mut styles = BTreeMap::new();
        let mut add = |name: &str, roots: &[&str], scales: &[&str]| {
            styles.insert(
                name.to_string(),
                StyleEntry {
                    roots: roots.iter().map(|s| s.to_string()).collect(),
                    scales: scales.iter().map(|s| s.to_string()).collect(),
                },
            );
        };
        add("Boom Bap", &["C", "D", "F", "G", "A"], &["Dorian", "Minor", "Blues"]);
        add("Trap", &["Bb", "C#", "F", "G#"], &["Minor", "Harmonic Minor", "Phrygian"]);
        add("Drill", &["Bb", "B", "C#", "E"], &["Phrygian", "Minor", "Phrygian Dominant"]);
        add("Storch", &["C", "D", "Eb", "G"], &["Minor", "Harmonic Minor", "Double Harmonic Major"]);
        add("EDM", &["C", "F", "G", "A"], &["Major", "Minor", "Lydian"]);
        add("Flume", &["C", "Eb", "F", "Ab"], &["Blues", "Major", "Dorian"]);
        add("Dilla", &["C#", "D", "E", "F#"], &["Dorian", "Minor", "Blues"]);
        StyleTable { styles }
    }
}

/// Progression used when the table is missing or a category is empty: i-iv-v-i.
pub const FALLBACK_PROGRESSION: [usize; 4] = [0, 3, 4, 0];

/// Chord-progression table: category → list of degree-index sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionTable {
    pub progressions: BTreeMap<String, Vec<Vec<usize>>>,
}

impl ProgressionTable {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let table: ProgressionTable = serde_json::from_str(&data)?;
        Ok(table)
    }

    pub fn default_table() -> Self {
        let mut progressions = BTreeMap::new();
        progressions.insert(
            "pop".to_string(),
            vec![vec![0, 3, 4, 0], vec![0, 5, 3, 4], vec![0, 4, 5, 3]],
        );
        progressions.insert(
            "emotional".to_string(),
            vec![vec![0, 5, 1, 4], vec![5, 3, 0, 4]],
        );
        progressions.insert(
            "dark".to_string(),
            vec![vec![0, 1, 0, 6], vec![0, 3, 1, 0]],
        );
        progressions.insert(
            "jazz".to_string(),
            vec![vec![1, 4, 0, 0], vec![3, 6, 2, 5]],
        );
        ProgressionTable { progressions }
    }
}
