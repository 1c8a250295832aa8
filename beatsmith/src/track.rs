// Track assembly: merge, partition, delta-encode.
//
// Generators emit absolute-tick events into one shared stream. Assembly
// stably sorts that stream by tick (ties keep emission order), partitions it
// into the fixed instrument roles by channel, and re-expresses each event's
// time as a delta from its predecessor within the same track. Channels that
// received no events produce no track.

use crate::event::{
    CHANNEL_BASS, CHANNEL_CHORDS, CHANNEL_DRUMS, CHANNEL_MELODY, EventKind, NoteEvent,
};

/// Fixed role order for track emission: bass, melody, chords, drums.
const ROLES: [(u8, &str); 4] = [
    (CHANNEL_BASS, "Bass"),
    (CHANNEL_MELODY, "Melody"),
    (CHANNEL_CHORDS, "Chords"),
    (CHANNEL_DRUMS, "Drums"),
];

/// A delta-timed event within one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaEvent {
    /// Ticks since the previous event in this track.
    pub delta: u32,
    pub kind: EventKind,
    pub pitch: u8,
    pub velocity: u8,
}

/// One channel's worth of ordered, delta-encoded events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub channel: u8,
    pub name: &'static str,
    pub events: Vec<DeltaEvent>,
}

impl Track {
    /// Reconstruct the absolute tick of every event from the deltas.
    pub fn absolute_ticks(&self) -> Vec<u32> {
        let mut ticks = Vec::with_capacity(self.events.len());
        let mut tick = 0u32;
        for e in &self.events {
            tick += e.delta;
            ticks.push(tick);
        }
        ticks
    }
}

/// Assemble the merged event stream into per-role tracks.
pub fn assemble(mut events: Vec<NoteEvent>) -> Vec<Track> {
    // Stable: equal ticks keep generator emission order.
    events.sort_by_key(|e| e.tick);

    let mut tracks = Vec::new();
    for (channel, name) in ROLES {
        let part: Vec<&NoteEvent> = events.iter().filter(|e| e.channel == channel).collect();
        if part.is_empty() {
            continue;
        }

        let mut delta_events = Vec::with_capacity(part.len());
        let mut last_tick = 0u32;
        for e in part {
            let delta = e.tick.saturating_sub(last_tick);
            delta_events.push(DeltaEvent {
                delta,
                kind: e.kind,
                pitch: e.pitch,
                velocity: e.velocity,
            });
            last_tick = e.tick;
        }

        tracks.push(Track {
            channel,
            name,
            events: delta_events,
        });
    }
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(tick: u32, pitch: u8, channel: u8) -> NoteEvent {
        NoteEvent {
            tick,
            kind: EventKind::On,
            pitch,
            velocity: 100,
            channel,
        }
    }

    fn off(tick: u32, pitch: u8, channel: u8) -> NoteEvent {
        NoteEvent {
            tick,
            kind: EventKind::Off,
            pitch,
            velocity: 0,
            channel,
        }
    }

    #[test]
    fn test_partition_and_role_names() {
        let events = vec![
            on(0, 36, CHANNEL_DRUMS),
            off(100, 36, CHANNEL_DRUMS),
            on(0, 40, CHANNEL_BASS),
            off(200, 40, CHANNEL_BASS),
        ];
        let tracks = assemble(events);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name, "Bass");
        assert_eq!(tracks[0].channel, CHANNEL_BASS);
        assert_eq!(tracks[1].name, "Drums");
        assert_eq!(tracks[1].channel, CHANNEL_DRUMS);
    }

    #[test]
    fn test_empty_roles_produce_no_tracks() {
        let tracks = assemble(vec![on(0, 60, CHANNEL_MELODY), off(480, 60, CHANNEL_MELODY)]);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Melody");
    }

    #[test]
    fn test_deltas_reconstruct_ticks() {
        let events = vec![
            on(480, 60, CHANNEL_MELODY),
            on(0, 62, CHANNEL_MELODY),
            off(960, 60, CHANNEL_MELODY),
            off(480, 62, CHANNEL_MELODY),
        ];
        let tracks = assemble(events);
        assert_eq!(tracks[0].absolute_ticks(), vec![0, 480, 480, 960]);
    }

    #[test]
    fn test_stable_tie_order() {
        // Two events at the same tick keep their emission order.
        let events = vec![on(240, 60, CHANNEL_CHORDS), on(240, 64, CHANNEL_CHORDS)];
        let tracks = assemble(events);
        assert_eq!(tracks[0].events[0].pitch, 60);
        assert_eq!(tracks[0].events[1].pitch, 64);
        assert_eq!(tracks[0].events[1].delta, 0);
    }

    #[test]
    fn test_assembly_idempotence() {
        // Re-assembling events rebuilt from an assembled track reproduces
        // the same deltas and absolute ticks.
        let events = vec![
            on(13, 60, CHANNEL_MELODY),
            off(250, 60, CHANNEL_MELODY),
            on(251, 64, CHANNEL_MELODY),
            off(700, 64, CHANNEL_MELODY),
        ];
        let tracks = assemble(events);
        let ticks = tracks[0].absolute_ticks();

        let rebuilt: Vec<NoteEvent> = tracks[0]
            .events
            .iter()
            .zip(&ticks)
            .map(|(e, &tick)| NoteEvent {
                tick,
                kind: e.kind,
                pitch: e.pitch,
                velocity: e.velocity,
                channel: tracks[0].channel,
            })
            .collect();

        let tracks2 = assemble(rebuilt);
        assert_eq!(tracks, tracks2);
    }
}
