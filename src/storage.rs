use crate::changelog;
use crate::errors::AppError;
use crate::models::ChangelogData;
use chrono::Utc;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Loads the changelog, seeding it when the file is missing or unreadable.
pub async fn load_changelog(path: &Path) -> ChangelogData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse changelog file: {err}");
                changelog::seed(Utc::now())
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no changelog at {}, seeding", path.display());
            changelog::seed(Utc::now())
        }
        Err(err) => {
            error!("failed to read changelog file: {err}");
            changelog::seed(Utc::now())
        }
    }
}

pub async fn persist_changelog(path: &Path, data: &ChangelogData) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}
