use anyhow::Result;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::{BeerRecord, UserCatalog};
use crate::rating::RatingValue;
use crate::store::UserStore;

/// Edits one user's catalog and persists it through the store
pub struct CatalogService {
    config: AppConfig,
    store: UserStore,
}

impl CatalogService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = UserStore::open(&config.store.data_path)?;
        info!("Using data file {}", store.path().display());
        Ok(Self { config, store })
    }

    pub fn with_store(config: AppConfig, store: UserStore) -> Self {
        Self { config, store }
    }

    pub fn users(&self) -> Vec<&str> {
        self.store.user_names()
    }

    pub fn catalog(&self, user: &str) -> Result<UserCatalog> {
        self.store
            .load_user(user)
            .ok_or_else(|| anyhow::anyhow!(crate::errors::not_found_context("user", user)))
    }

    pub fn add_style(&mut self, user: &str, style: &str) -> Result<UserCatalog> {
        let mut catalog = self.store.load_or_create_user(user);
        if !catalog.add_style(style)? {
            info!("Style {} already known for {}", style.trim(), user);
        }
        self.store.save_user(user, &catalog)?;
        Ok(catalog)
    }

    pub fn rate(&mut self, user: &str, record: BeerRecord) -> Result<UserCatalog> {
        let mut catalog = self.catalog(user)?;
        catalog.add_rating(record, &self.config.scaler)?;
        self.store.save_user(user, &catalog)?;
        Ok(catalog)
    }

    pub fn rerate(
        &mut self,
        user: &str,
        brewery: &str,
        beer: &str,
        rating: RatingValue,
    ) -> Result<UserCatalog> {
        let mut catalog = self.catalog(user)?;
        catalog.rerate(brewery, beer, rating, &self.config.scaler)?;
        self.store.save_user(user, &catalog)?;
        Ok(catalog)
    }
}
