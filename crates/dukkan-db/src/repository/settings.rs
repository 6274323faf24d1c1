//! # Settings Repository
//!
//! One record under `app-settings`. A fresh store reads as
//! [`AppSettings::default`] (placeholder business info, tax 15).

use tracing::debug;

use crate::error::DbResult;
use crate::keys;
use crate::store::KvStore;
use dukkan_core::settings::{AppSettings, BusinessInfo, BusinessInfoPatch, Language, Theme};

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    store: KvStore,
}

impl SettingsRepository {
    pub fn new(store: KvStore) -> Self {
        SettingsRepository { store }
    }

    pub async fn load(&self) -> DbResult<AppSettings> {
        Ok(self.store.get(keys::SETTINGS, AppSettings::default()).await)
    }

    pub async fn set_theme(&self, theme: Theme) -> DbResult<AppSettings> {
        debug!(?theme, "Setting theme");
        self.modify(|s| {
            s.theme = theme;
            Ok(())
        })
        .await
    }

    pub async fn set_language(&self, language: Language) -> DbResult<AppSettings> {
        debug!(language = language.code(), "Setting language");
        self.modify(|s| {
            s.language = language;
            Ok(())
        })
        .await
    }

    /// Merges `patch` into the stored business info. Invalid tax leaves the
    /// record untouched.
    pub async fn update_business_info(&self, patch: BusinessInfoPatch) -> DbResult<BusinessInfo> {
        patch.validate()?;
        debug!("Updating business info");
        let settings = self
            .modify(|s| {
                patch.apply(&mut s.business_info)?;
                Ok(())
            })
            .await?;
        Ok(settings.business_info)
    }

    async fn modify<F>(&self, change: F) -> DbResult<AppSettings>
    where
        F: FnOnce(&mut AppSettings) -> DbResult<()>,
    {
        let mut tx = self.store.begin().await?;
        let mut settings: AppSettings = tx.load(keys::SETTINGS, AppSettings::default()).await?;
        change(&mut settings)?;
        tx.set(keys::SETTINGS, &settings).await?;
        tx.commit().await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};

    async fn repo() -> (Database, SettingsRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();
        (db, repo)
    }

    #[tokio::test]
    async fn test_fresh_store_has_placeholders() {
        let (_db, repo) = repo().await;
        let settings = repo.load().await.unwrap();
        assert_eq!(settings.business_info.name, "اسم المتجر");
        assert_eq!(settings.business_info.tax, 15.0);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.language, Language::Ar);
    }

    #[tokio::test]
    async fn test_record_without_tax_loads_zero() {
        let (db, repo) = repo().await;
        db.store()
            .set(
                keys::SETTINGS,
                &serde_json::json!({
                    "theme": "dark",
                    "businessInfo": { "name": "متجر قديم" }
                }),
            )
            .await
            .unwrap();

        let settings = repo.load().await.unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, Language::Ar);
        assert_eq!(settings.business_info.name, "متجر قديم");
        assert_eq!(settings.business_info.tax, 0.0);
    }

    #[tokio::test]
    async fn test_patch_merges() {
        let (_db, repo) = repo().await;
        let info = repo
            .update_business_info(BusinessInfoPatch {
                name: Some("متجر النور".to_string()),
                tax: Some(5.0),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(info.name, "متجر النور");
        assert_eq!(info.address, "عنوان المتجر");
        assert_eq!(repo.load().await.unwrap().business_info.tax, 5.0);
    }

    #[tokio::test]
    async fn test_invalid_tax_is_rejected() {
        let (_db, repo) = repo().await;
        let err = repo
            .update_business_info(BusinessInfoPatch {
                tax: Some(120.0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));
        assert_eq!(repo.load().await.unwrap().business_info.tax, 15.0);
    }

    #[tokio::test]
    async fn test_theme_and_language_persist() {
        let (_db, repo) = repo().await;
        repo.set_theme(Theme::Dark).await.unwrap();
        repo.set_language(Language::En).await.unwrap();

        let settings = repo.load().await.unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, Language::En);
    }
}
