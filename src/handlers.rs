use crate::changelog;
use crate::channels::with_time_left;
use crate::color::{ColorSample, PixelReport};
use crate::discord::{self, ChannelView, DiscordClient, GuildView, MessageView};
use crate::errors::AppError;
use crate::maps::{self, MAX_MAP_BYTES};
use crate::models::{
    ChangelogEntry, ColorQuery, HealthResponse, MapFile, SendMessageRequest, SentMessageResponse,
    StatsQuery, StatsResponse, SuccessResponse, UploadResponse, ViewResponse,
};
use crate::state::AppState;
use crate::stats::{build_stats, cutoff, degraded_stats, resolve_days};
use crate::storage::persist_changelog;
use crate::supabase::{Row, SupabaseClient};
use crate::ui::render_index;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.supabase.is_some()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        supabase: state.supabase.is_some(),
        discord: state.discord.is_some(),
        changelog: true,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Never fails: an unreachable event source yields a zero-filled window.
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Json<StatsResponse> {
    let days = resolve_days(query.days.as_deref());
    let Some(client) = state.supabase.as_ref() else {
        return Json(degraded_stats(days));
    };

    match client.fetch_events_since(cutoff(Utc::now(), days)).await {
        Ok(events) => Json(build_stats(&events, days)),
        Err(err) => {
            warn!("failed to fetch analytics events: {err}");
            Json(degraded_stats(days))
        }
    }
}

pub async fn get_color(Query(query): Query<ColorQuery>) -> Result<Json<PixelReport>, AppError> {
    let sample = match (query.hex.as_deref(), query.r, query.g, query.b) {
        (Some(hex), ..) => ColorSample::from_hex(hex)
            .ok_or_else(|| AppError::bad_request("hex must look like #rrggbb"))?,
        (None, Some(r), Some(g), Some(b)) => ColorSample::new(clamp_channel(r), clamp_channel(g), clamp_channel(b)),
        _ => return Err(AppError::bad_request("provide hex or all of r, g, b")),
    };
    Ok(Json(sample.report()))
}

fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

pub async fn get_auto_delete_channels(State(state): State<AppState>) -> Result<Json<Vec<Row>>, AppError> {
    let client = backend(&state)?;
    let rows = client.fetch_active_auto_delete_channels().await?;
    Ok(Json(with_time_left(rows, Utc::now())))
}

pub async fn list_maps(State(state): State<AppState>) -> Result<Json<Vec<MapFile>>, AppError> {
    let client = backend(&state)?;
    let objects = client.list_maps().await?;
    Ok(Json(maps::list_files(&objects)))
}

pub async fn upload_map(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let client = backend(&state)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        if field.name() != Some("map") {
            continue;
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        if !maps::is_map_file(&original_name) {
            return Err(AppError::bad_request("only .map files are allowed"));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::bad_request(err.to_string()))?;
        if bytes.len() > MAX_MAP_BYTES {
            return Err(AppError::new(StatusCode::PAYLOAD_TOO_LARGE, "map file exceeds 100 MiB"));
        }

        let id = Uuid::new_v4();
        let object_name = maps::object_name(id, &original_name);
        let storage_path = maps::storage_path(&object_name);
        let file_size = bytes.len() as u64;
        client.upload_map(&storage_path, bytes).await?;
        info!(%id, file_size, "uploaded map {original_name}");

        let (_, stored_name) = maps::split_object_name(&object_name);
        return Ok(Json(UploadResponse {
            success: true,
            map: MapFile {
                id: id.to_string(),
                original_name: stored_name,
                storage_path,
                file_size,
                uploaded_at: Utc::now().to_rfc3339(),
            },
        }));
    }

    Err(AppError::bad_request("no file uploaded in field 'map'"))
}

pub async fn download_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let client = backend(&state)?;
    let objects = client.list_maps().await?;
    let object = maps::find_by_id(&objects, &id).ok_or_else(|| AppError::not_found("map not found"))?;

    let storage_path = maps::storage_path(&object.name);
    let bytes = client.download_map(&storage_path).await.map_err(|err| {
        warn!("download of {storage_path} failed: {err}");
        AppError::not_found("map file not found")
    })?;
    let (_, original_name) = maps::split_object_name(&object.name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, maps::content_disposition(&original_name)),
        ],
        bytes,
    ))
}

pub async fn delete_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let client = backend(&state)?;
    let objects = client.list_maps().await?;
    let object = maps::find_by_id(&objects, &id).ok_or_else(|| AppError::not_found("map not found"))?;

    client.remove_map(&maps::storage_path(&object.name)).await?;
    info!(%id, "deleted map");
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn list_guilds(State(state): State<AppState>) -> Result<Json<Vec<GuildView>>, AppError> {
    let client = bot(&state)?;
    Ok(Json(client.guilds().await?))
}

pub async fn list_guild_channels(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> Result<Json<Vec<ChannelView>>, AppError> {
    let client = bot(&state)?;
    let channels = client
        .guild_channels(&guild_id)
        .await
        .map_err(|err| missing_or(err, "Guild not found"))?;
    Ok(Json(channels))
}

pub async fn list_channel_messages(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let client = bot(&state)?;
    text_channel(client, &channel_id).await?;
    Ok(Json(client.messages(&channel_id).await?))
}

pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SentMessageResponse>, AppError> {
    let client = bot(&state)?;
    let channel_id = request.channel_id.filter(|id| !id.is_empty());
    let body = discord::outgoing_message(request.content.as_deref(), request.embed);
    let (Some(channel_id), Some(body)) = (channel_id, body) else {
        return Err(AppError::bad_request("channelId and content/embed are required"));
    };

    text_channel(client, &channel_id).await?;
    let message = client.send_message(&channel_id, &body).await?;
    info!(channel_id = %message.channel_id, message_id = %message.id, "sent bot message");
    Ok(Json(SentMessageResponse {
        success: true,
        message_id: message.id,
        channel_id: message.channel_id,
    }))
}

const CHANNEL_NOT_FOUND: &str = "Channel not found or not text-based";

async fn text_channel(client: &DiscordClient, channel_id: &str) -> Result<(), AppError> {
    let channel = client
        .channel(channel_id)
        .await
        .map_err(|err| missing_or(err, CHANNEL_NOT_FOUND))?;
    if discord::is_text_based(channel.kind) {
        Ok(())
    } else {
        Err(AppError::not_found(CHANNEL_NOT_FOUND))
    }
}

// Discord answers 403 for guilds and channels the bot can't see.
fn missing_or(err: reqwest::Error, message: &str) -> AppError {
    let hidden = [reqwest::StatusCode::NOT_FOUND, reqwest::StatusCode::FORBIDDEN];
    match err.status() {
        Some(status) if hidden.contains(&status) => AppError::not_found(message),
        _ => AppError::from(err),
    }
}

pub async fn get_changelog(State(state): State<AppState>) -> Json<Vec<Option<ChangelogEntry>>> {
    let data = state.changelog.lock().await;
    Json(changelog::grid(&data))
}

pub async fn view_changelog(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ViewResponse>, AppError> {
    let mut data = state.changelog.lock().await;
    let views = changelog::record_view(&mut data, index)
        .ok_or_else(|| AppError::not_found("changelog entry not found"))?;

    persist_changelog(&state.data_path, &data).await?;

    Ok(Json(ViewResponse { success: true, views }))
}

fn bot(state: &AppState) -> Result<&DiscordClient, AppError> {
    state
        .discord
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Discord bot not available"))
}

fn backend(state: &AppState) -> Result<&SupabaseClient, AppError> {
    state
        .supabase
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Supabase not configured"))
}
