use crate::world::{TickEvents, TickInput, World};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scripted input for driving a `World` tick by tick.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(flatten)]
    pub input: TickInput,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<TickInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(frame.input);
            }
        }
        out
    }

    /// Feed every input to `world`, advancing the wall clock by `tick_ms` per tick.
    pub fn run(&self, world: &mut World) -> Vec<TickEvents> {
        self.expanded_inputs()
            .into_iter()
            .enumerate()
            .map(|(i, input)| world.tick(input, (i as u64 + 1) * self.tick_ms))
            .collect()
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.tick_ms == 0 {
        return Err("Replay validation failed: tick_ms must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_tick_ms() -> u64 {
    16
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "vengine_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn load(name_hint: &str, json: &str) -> ReplaySequence {
        let path = temp_file_path(name_hint);
        fs::write(&path, json).expect("write replay file");
        let replay = load_replay_from_path(&path).expect("replay should load");
        let _ = fs::remove_file(path);
        replay
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let replay = load(
            "parse",
            r#"{
              "frames": [
                { "right": true, "repeat": 3 },
                { "jump": true }
              ]
            }"#,
        );
        assert_eq!(replay.tick_ms, 16);
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].right && !expanded[0].jump);
        assert!(expanded[3].jump && !expanded[3].right);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn caught_paused_and_restarted_round() {
        let replay = load(
            "round",
            r#"{
              "tick_ms": 16,
              "frames": [
                { "right": true, "repeat": 90 },
                { "toggle_pause": true },
                { "restart": true, "repeat": 2 }
              ]
            }"#,
        );
        let mut world = World::default();
        let events = replay.run(&mut world);

        assert!(events[85].caught);
        assert!(events.iter().filter(|e| e.caught).count() == 1);
        // Pause is ignored while dead; the first restart starts a new round,
        // the second is ignored because the round is running again.
        assert!(!events[90].pause_toggled);
        assert!(events[91].restarted);
        assert!(!events[92].restarted);
        assert_eq!(world.session, SessionState::Running);
        assert_eq!(world.player.x, 50);
        assert_eq!(world.monster.x, 700 - 2 * 2);
    }

    #[test]
    fn held_jump_bounces_repeatedly() {
        let replay = load(
            "bounce",
            r#"{ "frames": [ { "jump": true, "repeat": 100 } ] }"#,
        );
        let mut world = World::default();
        let events = replay.run(&mut world);
        let jumps: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.jumped)
            .map(|(i, _)| i)
            .collect();
        // Airborne for 28 ticks, lands on the 29th, jumps again on the 30th.
        assert_eq!(jumps, vec![0, 29, 58, 87]);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = load(
            "deterministic",
            r#"{
              "frames": [
                { "right": true, "repeat": 30 },
                { "right": true, "jump": true },
                { "left": true, "repeat": 45 },
                { "repeat": 10 }
              ]
            }"#,
        );
        let mut run_a = World::default();
        let mut run_b = World::default();
        let events_a = replay.run(&mut run_a);
        let events_b = replay.run(&mut run_b);

        assert_eq!(events_a, events_b);
        assert_eq!(run_a.player, run_b.player);
        assert_eq!(run_a.monster, run_b.monster);
        assert_eq!(run_a.session, run_b.session);
    }
}
