use crate::config::WorldConfig;

/// The pursuer. It has no velocity of its own: each tick it steps a fixed
/// distance toward the player's current x. Its y never changes after spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monster {
    pub x: i32,
    pub y: i32,
}

impl Monster {
    pub fn spawn(config: &WorldConfig) -> Self {
        let (x, y) = config.monster_start();
        Self { x, y }
    }

    /// Both comparisons run in sequence against the updated x. At distance 1
    /// the two steps cancel, and at equality nothing moves.
    pub fn pursue(&mut self, target_x: i32, step: i32) {
        if self.x > target_x {
            self.x -= step;
        }
        if self.x < target_x {
            self.x += step;
        }
    }
}
