//! World tunables. There is no runtime configuration surface; these defaults
//! are the game. Tests build variants to isolate one rule at a time.

use vengine_core::animation::{DEFAULT_FRAME_MS, DEFAULT_TOTAL_FRAMES};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub player_width: i32,
    pub player_height: i32,
    pub monster_width: i32,
    pub monster_height: i32,
    /// Feet line; the player's top edge rests at `ground_y - player_height`.
    pub ground_y: i32,
    pub walk_speed: i32,
    pub jump_velocity: i32,
    pub gravity: i32,
    pub monster_step: i32,
    /// Corner-to-corner distance below which the monster catches the player.
    pub catch_distance: f32,
    pub player_start_x: i32,
    /// Gap between the monster's spawn and the right screen edge.
    pub monster_spawn_margin: i32,
    pub animation_frames: u32,
    pub animation_frame_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            player_width: 50,
            player_height: 50,
            monster_width: 50,
            monster_height: 50,
            ground_y: 600 - 100,
            walk_speed: 5,
            jump_velocity: -15,
            gravity: 1,
            monster_step: 2,
            catch_distance: 50.0,
            player_start_x: 50,
            monster_spawn_margin: 50,
            animation_frames: DEFAULT_TOTAL_FRAMES,
            animation_frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl WorldConfig {
    pub fn player_rest_y(&self) -> i32 {
        self.ground_y - self.player_height
    }

    pub fn player_max_x(&self) -> i32 {
        self.screen_width - self.player_width
    }

    pub fn player_start(&self) -> (i32, i32) {
        (self.player_start_x, self.player_rest_y())
    }

    pub fn monster_start(&self) -> (i32, i32) {
        (
            self.screen_width - self.monster_width - self.monster_spawn_margin,
            self.ground_y - self.monster_height,
        )
    }
}
