use crate::entity::{BotError, Notifications, Watchlist};
use log::{debug, error, info, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

// Load a JSON table, falling back to an empty one when the file is absent or unreadable
pub async fn load_table<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    debug!("Loading JSON file: {}", path.display());

    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("{} does not exist", path.display());
            return T::default();
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(table) => table,
        Err(e) => {
            error!("JSON decode error for file {}: {}", path.display(), e);
            T::default()
        }
    }
}

// Replace a JSON table on disk. Failures are logged and the previous file is kept.
pub async fn save_table<T>(path: &Path, table: &T)
where
    T: Serialize,
{
    debug!("Saving data to JSON file: {}", path.display());

    if let Err(e) = write_atomically(path, table).await {
        error!("Error saving JSON file {}: {}", path.display(), e);
    }
}

async fn write_atomically<T: Serialize>(path: &Path, table: &T) -> Result<(), BotError> {
    let content = serde_json::to_string_pretty(table)?;

    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, content).await?;
    tokio::fs::rename(&tmp_path, path).await?;

    Ok(())
}

/// File-backed store for the watchlist and notifications tables.
///
/// Reads always go to disk. Every load-modify-save runs under the lock of the
/// table it touches; when both are touched the watchlist lock is taken first.
pub struct JsonDb {
    watchlist_path: PathBuf,
    notifications_path: PathBuf,
    watchlist_lock: Mutex<()>,
    notifications_lock: Mutex<()>,
}

impl JsonDb {
    pub fn new(watchlist_path: impl Into<PathBuf>, notifications_path: impl Into<PathBuf>) -> Self {
        Self {
            watchlist_path: watchlist_path.into(),
            notifications_path: notifications_path.into(),
            watchlist_lock: Mutex::new(()),
            notifications_lock: Mutex::new(()),
        }
    }

    pub fn watchlist_path(&self) -> &Path {
        &self.watchlist_path
    }

    pub fn notifications_path(&self) -> &Path {
        &self.notifications_path
    }

    pub async fn get_watchlist(&self) -> Watchlist {
        load_table(&self.watchlist_path).await
    }

    pub async fn get_notifications(&self) -> Notifications {
        load_table(&self.notifications_path).await
    }

    /// Apply `f` to a fresh copy of the watchlist and persist it if `f` succeeds
    pub async fn update_watchlist<R, F>(&self, f: F) -> Result<R, BotError>
    where
        F: FnOnce(&mut Watchlist) -> Result<R, BotError>,
    {
        let _guard = self.watchlist_lock.lock().await;

        let mut watchlist: Watchlist = load_table(&self.watchlist_path).await;
        let result = f(&mut watchlist)?;
        save_table(&self.watchlist_path, &watchlist).await;

        Ok(result)
    }

    /// Apply `f` to a fresh copy of the notifications and persist them if `f` succeeds
    pub async fn update_notifications<R, F>(&self, f: F) -> Result<R, BotError>
    where
        F: FnOnce(&mut Notifications) -> Result<R, BotError>,
    {
        let _guard = self.notifications_lock.lock().await;

        let mut notifications: Notifications = load_table(&self.notifications_path).await;
        let result = f(&mut notifications)?;
        save_table(&self.notifications_path, &notifications).await;

        Ok(result)
    }

    /// Apply `f` to both tables and persist both if `f` succeeds
    pub async fn update_tables<R, F>(&self, f: F) -> Result<R, BotError>
    where
        F: FnOnce(&mut Watchlist, &mut Notifications) -> Result<R, BotError>,
    {
        let _watchlist_guard = self.watchlist_lock.lock().await;
        let _notifications_guard = self.notifications_lock.lock().await;

        let mut watchlist: Watchlist = load_table(&self.watchlist_path).await;
        let mut notifications: Notifications = load_table(&self.notifications_path).await;

        let result = f(&mut watchlist, &mut notifications)?;

        save_table(&self.watchlist_path, &watchlist).await;
        save_table(&self.notifications_path, &notifications).await;
        info!(
            "Saved {} watchlist entries and {} notifications",
            watchlist.len(),
            notifications.len()
        );

        Ok(result)
    }
}
