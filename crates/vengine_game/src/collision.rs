//! Catch test between the player and the monster.
//!
//! Distance is measured between top-left corners, not centres, and compared
//! strictly against the catch radius.

use crate::monster::Monster;
use crate::player::Player;

pub fn corner_distance(ax: i32, ay: i32, bx: i32, by: i32) -> f32 {
    let dx = (bx - ax) as i64;
    let dy = (by - ay) as i64;
    ((dx * dx + dy * dy) as f64).sqrt() as f32
}

pub fn is_caught(player: &Player, monster: &Monster, catch_distance: f32) -> bool {
    corner_distance(player.x, player.y, monster.x, monster.y) < catch_distance
}
