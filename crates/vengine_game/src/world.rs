//! The whole game state and its per-tick update.
//!
//! `World` owns the player, the monster and the session state. The main loop
//! hands it one `TickInput` per rendered frame together with the wall clock:
//!
//!   1. edge events: restart (only while dead), then pause toggle
//!   2. if running: movement input, gravity, integration, bounds
//!   3. monster pursuit step toward the player's new x
//!   4. catch test, which may end the round
//!   5. animation frame advance on the wall clock
//!
//! Side effects the world cannot perform itself (the jump sound) are reported
//! back in `TickEvents`.

use crate::collision;
use crate::config::WorldConfig;
use crate::monster::Monster;
use crate::player::{MoveInput, Player};
use crate::session::SessionState;

/// Input for one tick. Movement fields are level-triggered (key is down);
/// `toggle_pause` and `restart` are edges (key went down this frame).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(test, derive(serde::Deserialize), serde(default))]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub toggle_pause: bool,
    pub restart: bool,
}

impl TickInput {
    pub fn movement(&self) -> MoveInput {
        MoveInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub jumped: bool,
    pub caught: bool,
    pub restarted: bool,
    pub pause_toggled: bool,
}

#[derive(Debug, Clone)]
pub struct World {
    pub config: WorldConfig,
    pub player: Player,
    pub monster: Monster,
    pub session: SessionState,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            player: Player::spawn(&config),
            monster: Monster::spawn(&config),
            session: SessionState::Running,
            config,
        }
    }

    pub fn tick(&mut self, input: TickInput, now_ms: u64) -> TickEvents {
        let mut events = TickEvents::default();

        if input.restart && self.session.can_restart() {
            self.restart(now_ms);
            events.restarted = true;
        }

        if input.toggle_pause {
            let next = self.session.toggle_pause();
            if next != self.session {
                self.session = next;
                events.pause_toggled = true;
                log::info!(
                    "Simulation {}",
                    if next == SessionState::Paused {
                        "PAUSED"
                    } else {
                        "RESUMED"
                    }
                );
            }
        }

        if !self.session.is_simulating() {
            return events;
        }

        events.jumped = self.player.step(input.movement(), &self.config);
        self.monster.pursue(self.player.x, self.config.monster_step);

        if collision::is_caught(&self.player, &self.monster, self.config.catch_distance) {
            self.session = SessionState::Dead;
            events.caught = true;
            log::info!(
                "Caught at player=({}, {}) monster=({}, {}). Press X to restart.",
                self.player.x,
                self.player.y,
                self.monster.x,
                self.monster.y
            );
        }

        // The catching tick still animates; the freeze starts next tick.
        self.player.frames.update(now_ms);
        events
    }

    /// Fresh round: every entity field back to its spawn value.
    pub fn restart(&mut self, now_ms: u64) {
        self.player = Player::spawn(&self.config);
        self.player.frames.reset(now_ms);
        self.monster = Monster::spawn(&self.config);
        self.session = SessionState::Running;
        log::info!("Round restarted");
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::AnimationState;

    const TICK_MS: u64 = 16;

    fn hold_right() -> TickInput {
        TickInput {
            right: true,
            ..TickInput::default()
        }
    }

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    /// Collisions out of the picture, to observe movement on its own.
    fn no_catch_world() -> World {
        World::new(WorldConfig {
            catch_distance: 0.0,
            ..WorldConfig::default()
        })
    }

    #[test]
    fn starts_at_spawn_points() {
        let world = World::default();
        assert_eq!((world.player.x, world.player.y), (50, 450));
        assert_eq!((world.monster.x, world.monster.y), (700, 450));
        assert_eq!(world.session, SessionState::Running);
        assert!(world.player.on_ground);
    }

    #[test]
    fn holding_right_walks_to_the_wall_while_monster_closes_in() {
        let mut world = no_catch_world();
        let mut now = 0;
        for _ in 0..250 {
            let px_before = world.player.x;
            let mx_before = world.monster.x;
            now += TICK_MS;
            world.tick(hold_right(), now);

            assert_eq!(world.player.x, (px_before + 5).min(750));
            if mx_before - 2 >= world.player.x {
                assert_eq!(world.monster.x, mx_before - 2);
            }
            assert_eq!(world.player.animation, AnimationState::WalkingRight);
        }
        assert_eq!(world.player.x, 750);
        // The monster slipped past the player and chased it back to the wall.
        assert_eq!(world.monster.x, 750);
    }

    #[test]
    fn walking_into_the_monster_ends_the_round() {
        let mut world = World::default();
        let mut now = 0;
        let mut caught_at = None;
        for tick in 1..=200 {
            now += TICK_MS;
            let events = world.tick(hold_right(), now);
            if events.caught {
                caught_at = Some(tick);
                break;
            }
        }
        // Gap closes 7px per tick from 650: 650 - 7 * 86 = 48 < 50.
        assert_eq!(caught_at, Some(86));
        assert_eq!(world.session, SessionState::Dead);
        assert_eq!(world.player.x, 50 + 5 * 86);
        assert_eq!(world.monster.x, 700 - 2 * 86);
    }

    #[test]
    fn dead_world_is_frozen() {
        let mut world = World::default();
        world.session = SessionState::Dead;
        let player = world.player;
        let monster = world.monster;
        for i in 1..=30 {
            world.tick(hold_right(), i * 200);
        }
        assert_eq!(world.player, player);
        assert_eq!(world.monster, monster);
    }

    #[test]
    fn jump_velocity_sequence_until_landing() {
        let mut world = World::default();
        let jump = press(|i| i.jump = true);
        let events = world.tick(jump, TICK_MS);
        assert!(events.jumped);
        // Jump sets -15, gravity is applied in the same tick.
        assert_eq!(world.player.velocity_y, -14);
        assert!(!world.player.on_ground);

        let mut expected = -14;
        let mut ticks = 1;
        while !world.player.on_ground {
            let events = world.tick(TickInput::default(), TICK_MS * (ticks + 1));
            assert!(!events.jumped);
            ticks += 1;
            expected += 1;
            if world.player.on_ground {
                break;
            }
            assert_eq!(world.player.velocity_y, expected);
            assert!(world.player.y < 450);
        }
        assert_eq!(ticks, 29);
        assert_eq!(world.player.y, 450);
        assert_eq!(world.player.velocity_y, 0);
    }

    #[test]
    fn jump_pressed_midair_has_no_effect() {
        let mut world = World::default();
        let jump = press(|i| i.jump = true);
        world.tick(jump, TICK_MS);
        let vy = world.player.velocity_y;
        let events = world.tick(jump, 2 * TICK_MS);
        assert!(!events.jumped);
        assert_eq!(world.player.velocity_y, vy + 1);
    }

    #[test]
    fn pause_freezes_and_resumes() {
        let mut world = World::default();
        let events = world.tick(press(|i| i.toggle_pause = true), TICK_MS);
        assert!(events.pause_toggled);
        assert_eq!(world.session, SessionState::Paused);

        let monster = world.monster;
        world.tick(hold_right(), 2 * TICK_MS);
        assert_eq!(world.monster, monster);
        assert_eq!(world.player.x, 50);

        world.tick(press(|i| i.toggle_pause = true), 3 * TICK_MS);
        assert_eq!(world.session, SessionState::Running);
        // The resume tick also simulates.
        assert_eq!(world.monster.x, monster.x - 2);
    }

    #[test]
    fn pause_key_ignored_when_dead() {
        let mut world = World::default();
        world.session = SessionState::Dead;
        let events = world.tick(press(|i| i.toggle_pause = true), TICK_MS);
        assert!(!events.pause_toggled);
        assert_eq!(world.session, SessionState::Dead);
    }

    #[test]
    fn restart_ignored_unless_dead() {
        let mut world = World::default();
        world.player.x = 300;
        let events = world.tick(press(|i| i.restart = true), TICK_MS);
        assert!(!events.restarted);
        assert_eq!(world.player.x, 300);

        world.session = SessionState::Paused;
        let events = world.tick(press(|i| i.restart = true), 2 * TICK_MS);
        assert!(!events.restarted);
        assert_eq!(world.session, SessionState::Paused);
    }

    #[test]
    fn restart_resets_every_field() {
        let mut world = World::default();
        world.player.x = 612;
        world.player.y = 301;
        world.player.velocity_x = -5;
        world.player.velocity_y = 7;
        world.player.on_ground = false;
        world.player.animation = AnimationState::WalkingLeft;
        world.player.frames.current_frame = 3;
        world.monster.x = 590;
        world.session = SessionState::Dead;

        world.restart(5_000);

        assert_eq!((world.player.x, world.player.y), (50, 450));
        assert_eq!((world.player.velocity_x, world.player.velocity_y), (0, 0));
        assert!(world.player.on_ground);
        assert_eq!(world.player.animation, AnimationState::Idle);
        assert_eq!(world.player.frames.current_frame, 0);
        assert_eq!(world.player.frames.last_frame_ms, 5_000);
        assert_eq!((world.monster.x, world.monster.y), (700, 450));
        assert_eq!(world.session, SessionState::Running);
    }

    #[test]
    fn restart_key_while_dead_starts_a_new_round_that_simulates() {
        let mut world = World::default();
        world.player.x = 400;
        world.monster.x = 420;
        world.session = SessionState::Dead;

        let events = world.tick(press(|i| i.restart = true), 10_000);
        assert!(events.restarted);
        assert_eq!(world.session, SessionState::Running);
        assert_eq!((world.player.x, world.player.y), (50, 450));
        // Restart is handled before the step, so the monster already moved.
        assert_eq!(world.monster.x, 698);
    }

    #[test]
    fn restart_and_pause_in_one_frame_apply_restart_first() {
        let mut world = World::default();
        world.player.x = 400;
        world.session = SessionState::Dead;

        let events = world.tick(
            press(|i| {
                i.restart = true;
                i.toggle_pause = true;
            }),
            TICK_MS,
        );
        assert!(events.restarted);
        assert!(events.pause_toggled);
        // Fresh round, paused before it takes a step.
        assert_eq!(world.session, SessionState::Paused);
        assert_eq!(world.player.x, 50);
        assert_eq!(world.monster.x, 700);
    }

    #[test]
    fn animation_advances_on_wall_clock_only_while_running() {
        let mut world = World::default();
        world.tick(hold_right(), 101);
        assert_eq!(world.player.frames.current_frame, 1);
        world.tick(hold_right(), 150);
        assert_eq!(world.player.frames.current_frame, 1);
        world.tick(hold_right(), 202);
        assert_eq!(world.player.frames.current_frame, 2);

        world.tick(press(|i| i.toggle_pause = true), 210);
        for t in 1..=10 {
            world.tick(TickInput::default(), 210 + t * 500);
        }
        assert_eq!(world.player.frames.current_frame, 2);
    }

    #[test]
    fn catching_tick_still_animates() {
        let mut world = World::default();
        world.monster.x = 100;
        let events = world.tick(TickInput::default(), 500);
        assert!(events.caught);
        assert_eq!(world.player.frames.current_frame, 1);
    }
}
