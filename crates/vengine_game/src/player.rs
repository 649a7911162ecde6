use vengine_core::animation::FrameCycle;

use crate::config::WorldConfig;

/// Horizontal-motion category; selects the sprite-sheet row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AnimationState {
    #[default]
    Idle,
    WalkingRight,
    WalkingLeft,
}

impl AnimationState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::WalkingRight => "walking right",
            Self::WalkingLeft => "walking left",
        }
    }
}

/// Level-triggered movement keys for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub velocity_x: i32,
    pub velocity_y: i32,
    pub on_ground: bool,
    pub animation: AnimationState,
    pub frames: FrameCycle,
}

impl Player {
    pub fn spawn(config: &WorldConfig) -> Self {
        let (x, y) = config.player_start();
        Self {
            x,
            y,
            velocity_x: 0,
            velocity_y: 0,
            on_ground: true,
            animation: AnimationState::Idle,
            frames: FrameCycle::new(config.animation_frames, config.animation_frame_ms),
        }
    }

    /// One simulation tick: input, gravity, integration, bounds.
    /// Returns true when a jump started this tick.
    pub fn step(&mut self, input: MoveInput, config: &WorldConfig) -> bool {
        let jumped = self.apply_input(input, config);
        self.integrate(config);
        jumped
    }

    pub fn apply_input(&mut self, input: MoveInput, config: &WorldConfig) -> bool {
        // Left wins when both directions are held.
        if input.left {
            self.velocity_x = -config.walk_speed;
            self.animation = AnimationState::WalkingLeft;
        } else if input.right {
            self.velocity_x = config.walk_speed;
            self.animation = AnimationState::WalkingRight;
        } else {
            self.velocity_x = 0;
            self.animation = AnimationState::Idle;
        }

        // Jump is only legal from the ground.
        if input.jump && self.on_ground {
            self.velocity_y = config.jump_velocity;
            self.on_ground = false;
            return true;
        }
        false
    }

    pub fn integrate(&mut self, config: &WorldConfig) {
        self.velocity_y += config.gravity;
        self.x += self.velocity_x;
        self.y += self.velocity_y;

        self.x = self.x.clamp(0, config.player_max_x());

        // No ceiling: a jump may leave the top of the screen.
        let rest_y = config.player_rest_y();
        if self.y >= rest_y {
            self.y = rest_y;
            self.velocity_y = 0;
            self.on_ground = true;
        }
    }
}
