//! Settings cache and service.
//!
//! The settings row is read on nearly every request path (registration
//! gate, application gate, webhook URLs, panel credentials), so reads go
//! through an in-memory memo of the single row. The memo has no TTL; every
//! setter invalidates it explicitly, which keeps reads coherent under the
//! portal's single-writer usage.

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    data::settings::SettingsRepository,
    error::AppError,
    model::settings::{SiteSettings, UpdateSettingsParam},
};

/// Shared memo of the settings row.
///
/// Cloning shares the underlying slot, so the copy stored in `AppState`
/// and the copies handed to services all observe the same invalidations.
#[derive(Clone, Default)]
pub struct SettingsCache {
    cached: Arc<RwLock<Option<SiteSettings>>>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self) -> Option<SiteSettings> {
        self.cached.read().await.clone()
    }

    async fn fill(&self, settings: SiteSettings) {
        *self.cached.write().await = Some(settings);
    }

    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}

/// Read-through access to the settings row plus the admin update path.
pub struct SettingsService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a SettingsCache,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a SettingsCache) -> Self {
        Self { db, cache }
    }

    /// Gets the current settings, hitting the database only on a cold cache.
    pub async fn get(&self) -> Result<SiteSettings, AppError> {
        if let Some(settings) = self.cache.get().await {
            return Ok(settings);
        }

        let settings = SettingsRepository::new(self.db).get_or_create().await?;
        self.cache.fill(settings.clone()).await;

        Ok(settings)
    }

    /// Applies a full settings update and invalidates the memo.
    pub async fn update(&self, param: UpdateSettingsParam) -> Result<SiteSettings, AppError> {
        let settings = SettingsRepository::new(self.db).update(param).await?;
        self.cache.invalidate().await;

        Ok(settings)
    }

    /// Flips the applications-open toggle and invalidates the memo.
    pub async fn set_applications_open(&self, open: bool) -> Result<SiteSettings, AppError> {
        let settings = SettingsRepository::new(self.db)
            .set_applications_open(open)
            .await?;
        self.cache.invalidate().await;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::prelude::SystemSetting;
    use test_utils::builder::TestBuilder;

    /// Tests the read-through fill.
    ///
    /// Expected: Ok with the same settings from cold and warm reads
    #[tokio::test]
    async fn caches_first_read() {
        let test = TestBuilder::new()
            .with_table(SystemSetting)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let cache = SettingsCache::new();
        let service = SettingsService::new(db, &cache);

        let cold = service.get().await.unwrap();
        let warm = service.get().await.unwrap();

        assert_eq!(cold, warm);
        assert!(cache.get().await.is_some());
    }

    /// Tests that a write through the service is visible to the next read.
    ///
    /// A stale memo here would be the classic cache-invalidation bug: the
    /// admin flips a toggle and the site keeps serving the old value.
    ///
    /// Expected: Ok with the fresh value after the update
    #[tokio::test]
    async fn update_invalidates_memo() {
        let test = TestBuilder::new()
            .with_table(SystemSetting)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let cache = SettingsCache::new();
        let service = SettingsService::new(db, &cache);

        let before = service.get().await.unwrap();
        assert!(!before.applications_open);

        service.set_applications_open(true).await.unwrap();

        let after = service.get().await.unwrap();
        assert!(after.applications_open);
    }

    /// Tests that an out-of-band invalidation forces a reload.
    ///
    /// Expected: Ok with the cache refilled after the next read
    #[tokio::test]
    async fn manual_invalidation_clears_memo() {
        let test = TestBuilder::new()
            .with_table(SystemSetting)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let cache = SettingsCache::new();
        let service = SettingsService::new(db, &cache);

        service.get().await.unwrap();
        cache.invalidate().await;
        assert!(cache.get().await.is_none());

        service.get().await.unwrap();
        assert!(cache.get().await.is_some());
    }
}
