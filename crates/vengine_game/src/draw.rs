//! Per-frame draw list, built from the world in painter's order.
//!
//! The list is renderer-agnostic: textures are named by `TextureKey` and
//! rectangles are in screen pixels. The GPU side turns it into a mesh.

use crate::assets::AssetId;
use crate::sprite_sheet::{SourceRect, SpriteSheet};
use crate::world::World;

const GROUND_TILE: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Background,
    Ground,
    PlayerSheet,
    Monster,
}

impl TextureKey {
    pub const ALL: [TextureKey; 4] = [
        TextureKey::Background,
        TextureKey::Ground,
        TextureKey::PlayerSheet,
        TextureKey::Monster,
    ];

    pub fn asset(self) -> AssetId {
        match self {
            Self::Background => AssetId::Background,
            Self::Ground => AssetId::Ground,
            Self::PlayerSheet => AssetId::PlayerSheet,
            Self::Monster => AssetId::Monster,
        }
    }
}

/// Screen-space destination rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub texture: TextureKey,
    /// `None` samples the whole texture.
    pub source: Option<SourceRect>,
    pub dest: DestRect,
}

/// Background, ground tiles, player, monster. No z-sorting beyond this order.
pub fn build_draw_list(world: &World, sheet: &SpriteSheet) -> Vec<DrawCommand> {
    let config = &world.config;
    let mut commands = Vec::with_capacity(64);

    commands.push(DrawCommand {
        texture: TextureKey::Background,
        source: None,
        dest: DestRect {
            x: 0,
            y: 0,
            w: config.screen_width,
            h: config.screen_height,
        },
    });

    let tile_crop = SourceRect {
        x: 0,
        y: 0,
        w: GROUND_TILE as u32,
        h: GROUND_TILE as u32,
    };
    for y in (config.ground_y..config.screen_height).step_by(GROUND_TILE as usize) {
        for x in (0..config.screen_width).step_by(GROUND_TILE as usize) {
            commands.push(DrawCommand {
                texture: TextureKey::Ground,
                source: Some(tile_crop),
                dest: DestRect {
                    x,
                    y,
                    w: GROUND_TILE,
                    h: GROUND_TILE,
                },
            });
        }
    }

    let player = &world.player;
    commands.push(DrawCommand {
        texture: TextureKey::PlayerSheet,
        source: Some(sheet.frame_rect(player.animation, player.frames.current_frame)),
        dest: DestRect {
            x: player.x,
            y: player.y,
            w: config.player_width,
            h: config.player_height,
        },
    });

    commands.push(DrawCommand {
        texture: TextureKey::Monster,
        source: None,
        dest: DestRect {
            x: world.monster.x,
            y: world.monster.y,
            w: config.monster_width,
            h: config.monster_height,
        },
    });

    commands
}
