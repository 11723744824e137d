use crate::handlers;
use crate::maps::MAX_MAP_BYTES;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Headroom for multipart boundaries and headers around the file itself.
const UPLOAD_BODY_LIMIT: usize = MAX_MAP_BYTES + 64 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/color", get(handlers::get_color))
        .route("/api/auto-delete-channels", get(handlers::get_auto_delete_channels))
        .route("/api/guilds", get(handlers::list_guilds))
        .route("/api/guilds/:guild_id/channels", get(handlers::list_guild_channels))
        .route("/api/channels/:channel_id/messages", get(handlers::list_channel_messages))
        .route("/api/send-message", post(handlers::send_message))
        .route("/api/maps", get(handlers::list_maps))
        .route(
            "/api/maps/upload",
            post(handlers::upload_map).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/maps/download/:id", get(handlers::download_map))
        .route("/api/maps/:id", delete(handlers::delete_map))
        .route("/api/changelog", get(handlers::get_changelog))
        .route("/api/changelog/:index/view", post(handlers::view_changelog))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
