// Beatsmith — style-conditioned beat and pattern generator.
//
// Turns a small style descriptor (a style id, a tempo, a bar count) into
// humanized multi-track note events and exports them as a Standard MIDI
// File. Four independent generators cover the instrument roles — drums,
// bass, melody and optional chords — all realized through a single
// humanization point so the timing feel stays uniform.
//
// Architecture:
// - scale.rs: scale interval sets, flavor degrees, pitch-set expansion
// - config.rs: JSON reference tables (styles, chord progressions) with
//   hardcoded fallbacks
// - style.rs: style resolution into one immutable per-request context with
//   typed behavioral flags
// - event.rs: note events + the humanized realization point (swing,
//   velocity/timing jitter)
// - drums.rs / bass.rs / melody.rs / chords.rs: the four role generators
// - track.rs: merge, stable sort, channel partition, delta encoding
// - midi.rs: SMF Format 1 output via midly
// - name.rs: suggested-filename generation
// - generate.rs: request validation and pipeline orchestration
//
// Generation is stochastic by design; every entry point takes
// `&mut impl Rng`, so seeding a `StdRng` makes output reproducible.

pub mod bass;
pub mod chords;
pub mod config;
pub mod drums;
pub mod event;
pub mod generate;
pub mod melody;
pub mod midi;
pub mod name;
pub mod scale;
pub mod style;
pub mod track;
