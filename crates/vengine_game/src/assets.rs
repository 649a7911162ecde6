//! Fixed asset table and loader.
//!
//! The game ships exactly five files. Their names are compiled in; there is no
//! manifest, environment override or command-line flag. Lookup tries the
//! working directory's `assets/` first, then the workspace `assets/` directory
//! recorded at build time, so `cargo run` works from anywhere in the tree.
//! A file missing from both is a fatal startup error.

use std::path::{Path, PathBuf};

use crate::error::GameError;

const ASSET_DIR: &str = "assets";
const BUILD_ASSET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    PlayerSheet,
    Monster,
    Ground,
    Background,
    JumpSound,
}

impl AssetId {
    #[cfg(test)]
    pub const ALL: [AssetId; 5] = [
        AssetId::PlayerSheet,
        AssetId::Monster,
        AssetId::Ground,
        AssetId::Background,
        AssetId::JumpSound,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::PlayerSheet => "player_spritesheet.png",
            Self::Monster => "enemy.png",
            Self::Ground => "ground.png",
            Self::Background => "background.png",
            Self::JumpSound => "jump.wav",
        }
    }
}

pub struct AssetLoader {
    search_dirs: Vec<PathBuf>,
}

impl AssetLoader {
    pub fn new() -> Self {
        Self {
            search_dirs: vec![PathBuf::from(ASSET_DIR), PathBuf::from(BUILD_ASSET_DIR)],
        }
    }

    #[cfg(test)]
    pub fn with_base_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            search_dirs: vec![dir.as_ref().to_path_buf()],
        }
    }

    /// First existing candidate, or the primary location when none exists so
    /// the error names the path a user would expect.
    pub fn resolve(&self, id: AssetId) -> PathBuf {
        let candidates: Vec<PathBuf> = self
            .search_dirs
            .iter()
            .map(|dir| dir.join(id.file_name()))
            .collect();
        candidates
            .iter()
            .find(|path| path.is_file())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(id.file_name()))
    }

    pub fn load_bytes(&self, id: AssetId) -> Result<Vec<u8>, GameError> {
        let path = self.resolve(id);
        let bytes = std::fs::read(&path).map_err(|source| GameError::Asset {
            path: path.clone(),
            source,
        })?;
        log::debug!("Loaded asset {:?} from {} ({} bytes)", id, path.display(), bytes.len());
        Ok(bytes)
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}
