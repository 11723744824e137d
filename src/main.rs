use guild_dashboard::{
    discord::DiscordClient, load_changelog, router, supabase::SupabaseClient, AppState, Config,
};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let changelog = load_changelog(&config.data_path).await;

    let supabase = match config.supabase.as_ref() {
        Some(supabase) => match SupabaseClient::new(supabase, config.upstream_timeout) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!("failed to build Supabase client: {err}");
                None
            }
        },
        None => None,
    };

    let discord = match config.discord.as_ref() {
        Some(discord) => match DiscordClient::new(discord, config.upstream_timeout) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!("failed to build Discord client: {err}");
                None
            }
        },
        None => None,
    };

    let state = AppState::new(config.data_path.clone(), changelog, supabase, discord);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("dashboard listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
