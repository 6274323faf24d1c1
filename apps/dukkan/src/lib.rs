//! # Dukkan Application Library
//!
//! Configuration, state, and the commands behind every screen of the back
//! office.
//!
//! ## Module Organization
//! ```text
//! dukkan_app/
//! ├── lib.rs          ◄─── You are here (App, startup, logging)
//! ├── config.rs       ◄─── AppConfig from environment + platform dirs
//! ├── error.rs        ◄─── ApiError returned by every command
//! ├── state/
//! │   ├── db.rs       ◄─── DbState (Database handle)
//! │   ├── draft.rs    ◄─── DraftState (invoice being rung up)
//! │   └── export.rs   ◄─── ExportState (Exporter)
//! └── commands/
//!     ├── inventory.rs
//!     ├── sales.rs
//!     ├── debts.rs
//!     ├── reports.rs
//!     ├── settings.rs
//!     ├── notifications.rs
//!     └── documents.rs
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging ── tracing-subscriber, RUST_LOG overrides        │
//! │  2. Load AppConfig ────── DUKKAN_* env vars over platform defaults      │
//! │  3. Open the store ────── SQLite (WAL), run embedded migrations         │
//! │  4. Build state ───────── DbState, DraftState, ExportState              │
//! │  5. Print dashboard stats as JSON                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use dukkan_db::{Database, DbConfig};
use dukkan_docs::{Exporter, PdfRenderer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use error::ApiError;
use state::{DbState, DraftState, ExportState};

/// Every piece of state a command can ask for.
#[derive(Debug, Clone)]
pub struct App {
    pub db: DbState,
    pub draft: DraftState,
    pub export: ExportState,
    pub config: AppConfig,
}

impl App {
    /// Opens (or creates) the store at `config.db_path`.
    pub async fn open(config: AppConfig) -> Result<Self, ApiError> {
        if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                tracing::error!(path = %parent.display(), error = %e, "Cannot create data directory");
                ApiError::internal("Could not create the data directory")
            })?;
        }

        let db = Database::new(DbConfig::new(config.db_path.clone())).await?;
        info!(path = %config.db_path.display(), "Store opened");
        App::with_database(db, config)
    }

    /// Wraps an already open database. Exports are PDFs embedding
    /// `config.pdf_font`, or a system Arabic font when none is set.
    pub fn with_database(db: Database, config: AppConfig) -> Result<Self, ApiError> {
        let renderer = PdfRenderer::discover(config.pdf_font.as_deref())?;
        if !renderer.has_embedded_font() {
            tracing::warn!("Exported PDFs will not show Arabic text; set DUKKAN_PDF_FONT");
        }
        Ok(App {
            db: DbState::new(db),
            draft: DraftState::new(),
            export: ExportState::new(Exporter::pdf(&config.export_dir, renderer)),
            config,
        })
    }
}

/// Loads configuration, opens the store, and prints the dashboard figures.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("Starting Dukkan");

    let config = AppConfig::from_env()?;
    info!(
        db = %config.db_path.display(),
        exports = %config.export_dir.display(),
        oversell = config.allow_oversell,
        "Configuration loaded"
    );

    let app = App::open(config).await?;
    let stats = commands::reports::dashboard_stats(&app.db).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    app.db.inner().close().await;
    Ok(())
}

/// ## Log Levels
/// - `RUST_LOG=debug` - everything at debug
/// - `RUST_LOG=dukkan_db=trace` - one crate only
/// - Default: `info,dukkan=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dukkan=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_open_creates_data_dir() {
        let root = std::env::temp_dir().join(format!("dukkan-open-{}", Uuid::new_v4()));
        let config = AppConfig::with_paths(root.join("data").join("dukkan.db"), root.join("out"));

        let app = App::open(config).await.unwrap();
        assert!(app.db.inner().health_check().await);
        assert!(root.join("data").join("dukkan.db").exists());
        assert_eq!(app.export.inner().dir(), root.join("out").as_path());

        app.db.inner().close().await;
        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_pdf_font_fails_open() {
        let root = std::env::temp_dir().join(format!("dukkan-font-{}", Uuid::new_v4()));
        let mut config = AppConfig::with_paths(root.join("dukkan.db"), root.join("out"));
        config.pdf_font = Some(root.join("missing.ttf"));

        let err = App::open(config).await.unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ExportError);

        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let root = std::env::temp_dir().join(format!("dukkan-reopen-{}", Uuid::new_v4()));
        let config = AppConfig::with_paths(root.join("dukkan.db"), root.join("out"));

        let app = App::open(config.clone()).await.unwrap();
        commands::settings::set_theme(&app.db, dukkan_core::settings::Theme::Dark)
            .await
            .unwrap();
        app.db.inner().close().await;

        let app = App::open(config).await.unwrap();
        let settings = commands::settings::get_settings(&app.db).await.unwrap();
        assert_eq!(settings.theme, dukkan_core::settings::Theme::Dark);

        app.db.inner().close().await;
        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
