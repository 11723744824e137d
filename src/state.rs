use crate::models::ChangelogData;
use crate::discord::DiscordClient;
use crate::supabase::SupabaseClient;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub changelog: Arc<Mutex<ChangelogData>>,
    pub supabase: Option<SupabaseClient>,
    pub discord: Option<DiscordClient>,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        changelog: ChangelogData,
        supabase: Option<SupabaseClient>,
        discord: Option<DiscordClient>,
    ) -> Self {
        Self {
            data_path,
            changelog: Arc::new(Mutex::new(changelog)),
            supabase,
            discord,
        }
    }
}
