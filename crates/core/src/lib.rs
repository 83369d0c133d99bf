pub mod aggregate;
pub mod domain;
pub mod error;
pub mod format;
pub mod session;
pub mod storage;
pub mod store;
pub mod time;

pub use error::PlanError;

pub mod config {
    use crate::domain::destination::Catalog;
    use crate::storage::gateway::DEFAULT_STORAGE_KEY;
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_DATA_DIR: &str = ".tripplan";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub data_dir: PathBuf,
        pub catalog_path: Option<PathBuf>,
        pub storage_key: String,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                data_dir: non_empty_var("TRIPPLAN_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
                catalog_path: non_empty_var("TRIPPLAN_CATALOG").map(PathBuf::from),
                storage_key: non_empty_var("TRIPPLAN_STORAGE_KEY")
                    .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_catalog_path(&self) -> anyhow::Result<&PathBuf> {
            self.catalog_path
                .as_ref()
                .context("TRIPPLAN_CATALOG (or --catalog) is required")
        }

        pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
            let path = self.require_catalog_path()?;
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            Catalog::from_json(&text)
                .with_context(|| format!("invalid catalog {}", path.display()))
        }
    }

    fn non_empty_var(name: &str) -> Option<String> {
        std::env::var(name)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

}
