//! Player sprite-sheet layout: a grid of equal cells where each column is an
//! animation frame and each row is an `AnimationState`.

use crate::player::AnimationState;

/// Pixel rectangle inside a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub cell_width: u32,
    pub cell_height: u32,
}

impl SpriteSheet {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    pub fn row_for(state: AnimationState) -> u32 {
        match state {
            AnimationState::Idle => 0,
            AnimationState::WalkingRight => 1,
            AnimationState::WalkingLeft => 2,
        }
    }

    pub fn frame_rect(&self, state: AnimationState, frame: u32) -> SourceRect {
        SourceRect {
            x: frame * self.cell_width,
            y: Self::row_for(state) * self.cell_height,
            w: self.cell_width,
            h: self.cell_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_frames_walk_the_first_row() {
        let sheet = SpriteSheet::new(50, 50);
        assert_eq!(
            sheet.frame_rect(AnimationState::Idle, 0),
            SourceRect {
                x: 0,
                y: 0,
                w: 50,
                h: 50
            }
        );
        assert_eq!(sheet.frame_rect(AnimationState::Idle, 3).x, 150);
    }

    #[test]
    fn each_state_has_its_own_row() {
        let sheet = SpriteSheet::new(50, 50);
        assert_eq!(sheet.frame_rect(AnimationState::WalkingRight, 2).y, 50);
        assert_eq!(sheet.frame_rect(AnimationState::WalkingLeft, 2).y, 100);
        assert_eq!(sheet.frame_rect(AnimationState::WalkingLeft, 2).x, 100);
    }
}
