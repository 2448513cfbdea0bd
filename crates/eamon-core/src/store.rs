use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::artifact::Artifact;
use crate::entity::PlayerId;
use crate::error::{CoreError, CoreResult};
use crate::player::Player;

/// File name of the saved shop stock inside a `JsonDirStore` directory.
const SHOP_FILE: &str = "shop.json";

/// Load/save boundary for player records.
pub trait PlayerStore {
    /// Load a player snapshot.
    fn load_player(&self, id: PlayerId) -> CoreResult<Player>;

    /// Save a player snapshot, replacing any previous record.
    fn save_player(&self, id: PlayerId, player: &Player) -> CoreResult<()>;
}

/// Keeps players in memory. Useful for tests and one-shot sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: Mutex<HashMap<PlayerId, Player>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for MemoryStore {
    fn load_player(&self, id: PlayerId) -> CoreResult<Player> {
        let players = self.players.lock().unwrap_or_else(|e| e.into_inner());
        players
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    fn save_player(&self, id: PlayerId, player: &Player) -> CoreResult<()> {
        let mut players = self.players.lock().unwrap_or_else(|e| e.into_inner());
        players.insert(id, player.clone());
        Ok(())
    }
}

/// Stores each player as `<id>.json` in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Use `dir` for player files. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: PlayerId) -> PathBuf {
        self.dir.join(format!("{}.json", id.0))
    }

    /// The next unused player id in the directory.
    pub fn next_id(&self) -> CoreResult<PlayerId> {
        if !self.dir.exists() {
            return Ok(PlayerId(1));
        }
        let mut max = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let id = path
                .extension()
                .filter(|ext| *ext == "json")
                .and_then(|_| path.file_stem())
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u32>().ok());
            if let Some(id) = id {
                max = max.max(id);
            }
        }
        Ok(PlayerId(max + 1))
    }

    /// The shop stock saved beside the players, or `None` before the shop
    /// has been stocked.
    pub fn load_stock(&self) -> CoreResult<Option<Vec<Artifact>>> {
        let path = self.dir.join(SHOP_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stock: Vec<Artifact> = serde_json::from_str(&text)?;
        debug!(items = stock.len(), path = %path.display(), "shop stock loaded");
        Ok(Some(stock))
    }

    /// Replace the saved shop stock.
    pub fn save_stock(&self, stock: &[Artifact]) -> CoreResult<()> {
        let path = self.dir.join(SHOP_FILE);
        self.write_json(&path, &stock)?;
        debug!(items = stock.len(), path = %path.display(), "shop stock saved");
        Ok(())
    }

    /// Write through a temp file so a crash never leaves half a record.
    fn write_json(&self, path: &Path, value: &impl serde::Serialize) -> CoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl PlayerStore for JsonDirStore {
    fn load_player(&self, id: PlayerId) -> CoreResult<Player> {
        let path = self.path_for(id);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut player: Player = serde_json::from_str(&text)?;
        player.clamp_abilities();
        debug!(%id, path = %path.display(), "player loaded");
        Ok(player)
    }

    fn save_player(&self, id: PlayerId, player: &Player) -> CoreResult<()> {
        let path = self.path_for(id);
        self.write_json(&path, player)?;
        debug!(%id, path = %path.display(), "player saved");
        Ok(())
    }
}
