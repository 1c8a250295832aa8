// Style resolution: one immutable context per generation request.
//
// A request names a style by a lowercase id ("boombap", "trap", ...). This
// module maps that id to a known style (unknown ids get the Boom Bap
// baseline), picks a root and scale from the style table, and folds in the
// legacy per-style defaults for swing and tempo.
//
// The resolved StyleContext also carries typed behavioral flags (hat
// resolution, roll-proneness, velocity policy, backbone instrument, extra
// kick pattern) computed once here, so the generators branch on fields
// rather than comparing style strings throughout.

use crate::config::StyleTable;
use crate::scale::{ScaleKind, pitch_class, pitch_name};
use rand::Rng;

/// The styles the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    BoomBap,
    Trap,
    Drill,
    Storch,
    Edm,
    Flume,
    Dilla,
}

/// Hi-hat step resolution in beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatResolution {
    /// Eighth-note steps (0.5 beats).
    Eighth,
    /// Sixteenth-note steps (0.25 beats) for driving subgenres.
    Sixteenth,
}

impl HatResolution {
    pub fn step(self) -> f64 {
        match self {
            HatResolution::Eighth => 0.5,
            HatResolution::Sixteenth => 0.25,
        }
    }
}

/// Which instrument carries the backbeat on 1 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backbone {
    Snare,
    Clap,
}

/// Extra-kick placement family, beyond the downbeat kick every bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickPattern {
    /// Probability-gated offbeat kicks at 2.5 and 1.5.
    Syncopated,
    /// Probability-gated kicks at 2.75 and 3.5.
    Trap,
    /// A single probability-gated kick at 3.5.
    Drill,
    /// Unconditional kicks on 1, 2 and 3 (four on the floor).
    FourOnFloor,
    /// Downbeat only.
    Plain,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Style::BoomBap,
        Style::Trap,
        Style::Drill,
        Style::Storch,
        Style::Edm,
        Style::Flume,
        Style::Dilla,
    ];

    /// Resolve a request id. Unknown ids map to BoomBap — never an error.
    pub fn from_id(id: &str) -> Style {
        match id.to_lowercase().as_str() {
            "trap" => Style::Trap,
            "drill" => Style::Drill,
            "storch" => Style::Storch,
            "edm" => Style::Edm,
            "flume" => Style::Flume,
            "dilla" => Style::Dilla,
            _ => Style::BoomBap, // includes "boombap"
        }
    }

    /// Display key used by the style table ("Boom Bap", "EDM", ...).
    pub fn display_name(self) -> &'static str {
        match self {
            Style::BoomBap => "Boom Bap",
            Style::Trap => "Trap",
            Style::Drill => "Drill",
            Style::Storch => "Storch",
            Style::Edm => "EDM",
            Style::Flume => "Flume",
            Style::Dilla => "Dilla",
        }
    }

    /// Title-cased id for filename generation.
    pub fn title(self) -> &'static str {
        match self {
            Style::BoomBap => "Boombap",
            Style::Trap => "Trap",
            Style::Drill => "Drill",
            Style::Storch => "Storch",
            Style::Edm => "Edm",
            Style::Flume => "Flume",
            Style::Dilla => "Dilla",
        }
    }

    /// Legacy per-style tuple: (scale, root pitch, swing, swing amount,
    /// tempo range). Used when the style table has no entry for the style,
    /// and always consulted for the swing/tempo fields.
    fn legacy_defaults(self) -> (ScaleKind, u8, bool, f64, (u16, u16)) {
        match self {
            Style::BoomBap => (ScaleKind::Dorian, 60, true, 0.55, (85, 95)),
            Style::Trap => (ScaleKind::Minor, 58, false, 0.55, (130, 150)),
            Style::Drill => (ScaleKind::Phrygian, 58, false, 0.55, (140, 145)),
            Style::Storch => (ScaleKind::Minor, 60, false, 0.55, (90, 100)),
            Style::Edm => (ScaleKind::Major, 60, false, 0.55, (120, 128)),
            Style::Flume => (ScaleKind::Blues, 60, true, 0.55, (80, 110)),
            Style::Dilla => (ScaleKind::Dorian, 61, true, 0.58, (88, 92)),
        }
    }

    fn hat_resolution(self) -> HatResolution {
        match self {
            Style::Trap | Style::Drill | Style::Edm => HatResolution::Sixteenth,
            _ => HatResolution::Eighth,
        }
    }

    /// Trap occasionally swaps a hat hit for a 32nd-note roll.
    fn hat_rolls(self) -> bool {
        self == Style::Trap
    }

    /// Wide-band ghost-note hat velocities vs fixed accent alternation.
    fn loose_hats(self) -> bool {
        matches!(self, Style::BoomBap | Style::Dilla)
    }

    fn backbone(self) -> Backbone {
        match self {
            Style::Trap | Style::Drill => Backbone::Clap,
            _ => Backbone::Snare,
        }
    }

    fn kick_pattern(self) -> KickPattern {
        match self {
            Style::BoomBap | Style::Dilla => KickPattern::Syncopated,
            Style::Trap => KickPattern::Trap,
            Style::Drill => KickPattern::Drill,
            Style::Edm => KickPattern::FourOnFloor,
            Style::Storch | Style::Flume => KickPattern::Plain,
        }
    }
}

/// Everything the generators need to know about one request's style.
/// Resolved once by `resolve`, immutable afterwards.
#[derive(Debug, Clone)]
pub struct StyleContext {
    pub style: Style,
    /// Absolute root pitch, anchored near the C4 octave.
    pub root: u8,
    /// Display label for the root ("C#", "Bb", ...).
    pub root_name: String,
    pub scale: ScaleKind,
    pub swing: bool,
    /// Fraction of a beat the off-beat eighth lands at when swung.
    pub swing_amount: f64,
    /// Advisory only; the engine never clamps the requested tempo to it.
    pub tempo_range: (u16, u16),
    pub hat_resolution: HatResolution,
    pub hat_rolls: bool,
    pub loose_hats: bool,
    pub backbone: Backbone,
    pub kick_pattern: KickPattern,
}

/// Middle-register reference: roots are anchored at C4 = 60 and folded down
/// an octave if they land above B4.
const ROOT_ANCHOR: u8 = 60;
const ROOT_CEILING: u8 = 71;

/// Resolve a style id into a full context.
///
/// Root and scale come from the style table when it has an entry for the
/// style (uniform random picks from the candidate lists); otherwise the
/// legacy defaults are used wholesale. Swing and tempo always come from the
/// legacy defaults. Resolution cannot fail.
pub fn resolve(style_id: &str, table: &StyleTable, rng: &mut impl Rng) -> StyleContext {
    let style = Style::from_id(style_id);
    let (legacy_scale, legacy_root, swing, swing_amount, tempo_range) = style.legacy_defaults();

    let (root, root_name, scale) = match table.styles.get(style.display_name()) {
        Some(entry) if !entry.roots.is_empty() && !entry.scales.is_empty() => {
            let root_name = entry.roots[rng.random_range(0..entry.roots.len())].clone();
            let scale_name = &entry.scales[rng.random_range(0..entry.scales.len())];
            let mut root = ROOT_ANCHOR + pitch_class(&root_name).unwrap_or(0);
            if root > ROOT_CEILING {
                root -= 12;
            }
            (root, root_name, ScaleKind::from_name(scale_name))
        }
        _ => {
            let root_name = pitch_name(legacy_root % 12).to_string();
            (legacy_root, root_name, legacy_scale)
        }
    };

    StyleContext {
        style,
        root,
        root_name,
        scale,
        swing,
        swing_amount,
        tempo_range,
        hat_resolution: style.hat_resolution(),
        hat_rolls: style.hat_rolls(),
        loose_hats: style.loose_hats(),
        backbone: style.backbone(),
        kick_pattern: style.kick_pattern(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleTable;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_unknown_id_is_boombap() {
        assert_eq!(Style::from_id("xyz123"), Style::BoomBap);
        assert_eq!(Style::from_id(""), Style::BoomBap);
        assert_eq!(Style::from_id("TRAP"), Style::Trap);
    }

    #[test]
    fn test_resolve_root_stays_in_reference_octave() {
        let table = StyleTable::default_table();
        let mut rng = StdRng::seed_from_u64(1);
        for style in Style::ALL {
            for _ in 0..50 {
                let ctx = resolve(style.title(), &table, &mut rng);
                assert!(
                    (ROOT_ANCHOR..=ROOT_CEILING).contains(&ctx.root),
                    "{:?} root {} out of register",
                    style,
                    ctx.root
                );
                assert_eq!(pitch_class(&ctx.root_name), Some(ctx.root % 12));
            }
        }
    }

    #[test]
    fn test_resolve_without_table_uses_legacy() {
        let empty = StyleTable {
            styles: Default::default(),
        };
        let mut rng = StdRng::seed_from_u64(2);
        let ctx = resolve("dilla", &empty, &mut rng);
        assert_eq!(ctx.root, 61);
        assert_eq!(ctx.scale, ScaleKind::Dorian);
        assert!(ctx.swing);
        assert!((ctx.swing_amount - 0.58).abs() < 1e-9);
        assert_eq!(ctx.tempo_range, (88, 92));
    }

    #[test]
    fn test_behavioral_flags() {
        let table = StyleTable::default_table();
        let mut rng = StdRng::seed_from_u64(3);

        let trap = resolve("trap", &table, &mut rng);
        assert_eq!(trap.hat_resolution, HatResolution::Sixteenth);
        assert!(trap.hat_rolls);
        assert_eq!(trap.backbone, Backbone::Clap);
        assert_eq!(trap.kick_pattern, KickPattern::Trap);

        let boombap = resolve("boombap", &table, &mut rng);
        assert_eq!(boombap.hat_resolution, HatResolution::Eighth);
        assert!(!boombap.hat_rolls);
        assert!(boombap.loose_hats);
        assert_eq!(boombap.backbone, Backbone::Snare);
        assert_eq!(boombap.kick_pattern, KickPattern::Syncopated);

        let edm = resolve("edm", &table, &mut rng);
        assert_eq!(edm.kick_pattern, KickPattern::FourOnFloor);
        assert!(!edm.loose_hats);
    }

    #[test]
    fn test_resolve_picks_from_candidates() {
        let table = StyleTable::default_table();
        let entry = &table.styles["Trap"];
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let ctx = resolve("trap", &table, &mut rng);
            assert!(entry.roots.contains(&ctx.root_name));
            let candidate_scales: Vec<ScaleKind> = entry
                .scales
                .iter()
                .map(|s| ScaleKind::from_name(s))
                .collect();
            assert!(candidate_scales.contains(&ctx.scale));
        }
    }
}
