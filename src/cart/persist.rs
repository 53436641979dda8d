//! Durable Cart Slots
//!
//! Carts survive restarts by mirroring every mutation into a JSON slot on
//! disk (one file per cart id, holding the serialized line array). The
//! mirror is best-effort: a slot that cannot be read or parsed falls back
//! to an empty cart, and write failures are logged rather than propagated
//! so a storage hiccup never breaks the shopping flow.

use super::models::CartLine;
use super::state::Cart;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed archive of cart slots.
#[derive(Debug, Clone)]
pub struct CartArchive {
    dir: PathBuf,
}

impl CartArchive {
    /// Opens an archive rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(err) = fs::create_dir_all(&dir) {
            tracing::warn!("cart archive at {:?} unavailable: {err}", dir);
        }
        Self { dir }
    }

    /// Resolves the archive directory from the environment.
    ///
    /// Strategy:
    /// 1. `FARMERGIANT_DATA_DIR` if set
    /// 2. `./data/carts` relative to the current directory
    pub fn from_env() -> Self {
        let dir = std::env::var_os("FARMERGIANT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                let current_dir =
                    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                current_dir.join("data").join("carts")
            });
        Self::new(dir)
    }

    fn slot_path(&self, cart_id: &str) -> PathBuf {
        // Cart ids are minted as simple uuids; anything else is sanitized
        // so a hostile id cannot escape the archive directory.
        let safe: String = cart_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    /// Serializes the full cart and overwrites its slot. Last write wins.
    pub fn store(&self, cart_id: &str, cart: &Cart) {
        let path = self.slot_path(cart_id);
        let json = match serde_json::to_string(cart.lines()) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("cart {cart_id} not serializable: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&path, json) {
            tracing::warn!("cart slot {:?} not written: {err}", path);
        }
    }

    /// Deletes the slot for `cart_id` (checkout / wholesale clear).
    pub fn remove(&self, cart_id: &str) {
        let path = self.slot_path(cart_id);
        if let Err(err) = fs::remove_file(&path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("cart slot {:?} not removed: {err}", path);
            }
        }
    }

    /// Restores every parseable slot in the archive.
    ///
    /// Malformed or unreadable slots are skipped with a warning; restore is
    /// best-effort and never surfaces an error to the caller.
    pub fn load_all(&self) -> Vec<(String, Cart)> {
        let mut restored = Vec::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("cart archive {:?} not readable: {err}", self.dir);
                return restored;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(cart_id) = slot_id(&path) else {
                continue;
            };
            match read_slot(&path) {
                Some(lines) => restored.push((cart_id, Cart::from_lines(lines))),
                None => tracing::warn!("cart slot {:?} ignored (malformed)", path),
            }
        }

        restored
    }
}

fn slot_id(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(".json").map(str::to_owned)
}

fn read_slot(path: &Path) -> Option<Vec<CartLine>> {
    let json = fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}
