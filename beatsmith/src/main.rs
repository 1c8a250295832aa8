// Beatsmith CLI entry point.
//
// Generates a style-conditioned multi-track beat and writes it to MIDI.
// The pipeline: load reference tables → resolve style → generate parts →
// assemble tracks → write SMF.
//
// Usage:
//   cargo run -p beatsmith -- [output.mid] [--style NAME] [--bpm N]
//     [--bars N] [--chords] [--seed N]
//
// Styles: boombap, trap, drill, storch, edm, flume, dilla

use beatsmith::config::{ProgressionTable, StyleTable};
use beatsmith::generate::{GenerateRequest, generate};
use beatsmith::midi::write_midi;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("output.mid");
    let style: String = parse_flag(&args, "--style").unwrap_or_else(|| "boombap".to_string());
    let bpm: u16 = parse_flag(&args, "--bpm").unwrap_or(90);
    let bars: usize = parse_flag(&args, "--bars").unwrap_or(4);
    let chords = args.iter().any(|a| a == "--chords");
    let seed: Option<u64> = parse_flag(&args, "--seed");

    println!("=== Beatsmith ===");
    println!("Output: {}", output_path);
    println!("Style: {} | {} BPM | {} bars | chords: {}", style, bpm, bars, chords);
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }
    println!();

    let mut rng = if let Some(s) = seed {
        StdRng::seed_from_u64(s)
    } else {
        StdRng::from_os_rng()
    };

    // Reference tables: use the shipped data files when present, hardcoded
    // defaults otherwise. Degraded, not fatal.
    println!("[1/3] Loading reference data...");
    let styles = load_styles(Path::new("beatsmith/data/style_config.json"));
    let progressions = load_progressions(Path::new("beatsmith/data/chord_progressions.json"));

    println!("[2/3] Generating...");
    let request = GenerateRequest { style, bpm, bars, chords };
    let piece = match generate(&request, &styles, &progressions, &mut rng) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("  Invalid request: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "  Root: {} ({}) | Scale: {:?} | Swing: {}",
        piece.context.root_name, piece.context.root, piece.context.scale, piece.context.swing
    );
    if let Some(label) = &piece.progression_label {
        println!("  Progression category: {}", label);
    }
    for track in &piece.tracks {
        println!("  {} (ch {}): {} events", track.name, track.channel, track.events.len());
    }

    println!("[3/3] Writing MIDI to {}...", output_path);
    match write_midi(&piece, bpm, Path::new(output_path)) {
        Ok(()) => {
            println!("  Done! Suggested name: {}", piece.suggested_filename);
        }
        Err(e) => {
            eprintln!("  Error writing MIDI: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_styles(path: &Path) -> StyleTable {
    if path.exists() {
        match StyleTable::load(path) {
            Ok(t) => {
                println!("  Loaded {} styles from {}.", t.styles.len(), path.display());
                return t;
            }
            Err(e) => println!("  Failed to load style table: {}. Using defaults.", e),
        }
    } else {
        println!("  No style table at {}. Using defaults.", path.display());
    }
    StyleTable::default_table()
}

fn load_progressions(path: &Path) -> ProgressionTable {
    if path.exists() {
        match ProgressionTable::load(path) {
            Ok(t) => {
                println!(
                    "  Loaded {} progression categories from {}.",
                    t.progressions.len(),
                    path.display()
                );
                return t;
            }
            Err(e) => println!("  Failed to load progressions: {}. Using defaults.", e),
        }
    } else {
        println!("  No progression table at {}. Using defaults.", path.display());
    }
    ProgressionTable::default_table()
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
