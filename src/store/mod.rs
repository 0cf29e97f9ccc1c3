use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::UserCatalog;
use crate::errors::{store_context, with_store_context};

/// JSON file holding every user's catalog, keyed by user name
pub struct UserStore {
    path: PathBuf,
    users: BTreeMap<String, UserCatalog>,
}

impl UserStore {
    /// Open the data file; a missing file is an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let users = read_json_opt(&path)?.unwrap_or_default();

        Ok(Self { path, users })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn user_names(&self) -> Vec<&str> {
        self.users.keys().map(String::as_str).collect()
    }

    pub fn load_user(&self, name: &str) -> Option<UserCatalog> {
        self.users.get(name).cloned()
    }

    /// Existing catalog for the user, or an empty one for a new user
    pub fn load_or_create_user(&self, name: &str) -> UserCatalog {
        self.load_user(name).unwrap_or_else(|| {
            info!("No data for user {}, starting a new catalog", name);
            UserCatalog::new()
        })
    }

    /// Replace the user's catalog and write the whole file back
    pub fn save_user(&mut self, name: &str, catalog: &UserCatalog) -> Result<()> {
        self.users.insert(name.to_string(), catalog.clone());
        write_json(&self.path, &self.users)?;

        info!("Saved data for {} to {}", name, self.path.display());
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let display = path.display().to_string();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        with_store_context(fs::create_dir_all(parent), "create directory for", &display)?;
    }

    let json = serde_json::to_string_pretty(data).context("Failed to serialize user data")?;
    with_store_context(fs::write(path, json), "write", &display)
}

fn read_json_opt<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let display = path.display().to_string();
    let json = with_store_context(fs::read_to_string(path), "read", &display)?;
    let data = serde_json::from_str(&json).with_context(|| {
        format!(
            "{}. First 200 chars: {}",
            store_context("parse", &display),
            json.chars().take(200).collect::<String>()
        )
    })?;
    Ok(Some(data))
}
