//! # Settings Commands
//!
//! Every change is persisted before the command returns, then recorded in
//! the notification center.

use dukkan_core::settings::{AppSettings, BusinessInfo, BusinessInfoPatch, Language, Theme};
use tracing::debug;

use super::{failed, notify_success};
use crate::error::ApiError;
use crate::state::DbState;

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "الفاتح",
        Theme::Dark => "الداكن",
        Theme::System => "النظام",
    }
}

fn language_label(language: Language) -> &'static str {
    match language {
        Language::Ar => "العربية",
        Language::En => "الإنجليزية",
    }
}

pub async fn get_settings(db: &DbState) -> Result<AppSettings, ApiError> {
    debug!("get_settings command");
    Ok(db.inner().settings().load().await?)
}

pub async fn set_theme(db: &DbState, theme: Theme) -> Result<AppSettings, ApiError> {
    debug!(?theme, "set_theme command");
    match db.inner().settings().set_theme(theme).await {
        Ok(settings) => {
            notify_success(
                db,
                "تم تغيير المظهر",
                &format!("تم تغيير المظهر إلى {}", theme_label(theme)),
            )
            .await;
            Ok(settings)
        }
        Err(e) => Err(failed(db, "خطأ في الإعدادات", e).await),
    }
}

pub async fn set_language(db: &DbState, language: Language) -> Result<AppSettings, ApiError> {
    debug!(language = language.code(), "set_language command");
    match db.inner().settings().set_language(language).await {
        Ok(settings) => {
            notify_success(
                db,
                "تم تغيير اللغة",
                &format!("تم تغيير اللغة إلى {}", language_label(language)),
            )
            .await;
            Ok(settings)
        }
        Err(e) => Err(failed(db, "خطأ في الإعدادات", e).await),
    }
}

/// Merges the given fields into the stored business info.
///
/// ## Returns
/// * `Ok(BusinessInfo)` - the record after the merge
/// * `Err(VALIDATION_ERROR)` - tax outside 0..=100; nothing written
pub async fn update_business_info(
    db: &DbState,
    patch: BusinessInfoPatch,
) -> Result<BusinessInfo, ApiError> {
    debug!("update_business_info command");
    match db.inner().settings().update_business_info(patch).await {
        Ok(info) => {
            notify_success(db, "تم تحديث معلومات المتجر", "تم تحديث معلومات المتجر بنجاح").await;
            Ok(info)
        }
        Err(e) => Err(failed(db, "خطأ في الإعدادات", e).await),
    }
}
