mod bootstrap;
mod profile;
mod realtime;
mod render;
mod reinit;
mod router;
mod signal;
mod store;
mod subscription;

use std::sync::{Arc, Mutex};

use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::bootstrap::Orchestrator;
use crate::profile::HttpProfileService;
use crate::realtime::{ChannelConfig, WsChannel};
use crate::reinit::{RenderHost, spawn_reinit_watchers};
use crate::render::DomAnchor;
use crate::router::AppRouter;
use crate::store::Store;

#[derive(Parser, Debug)]
#[command(name = "protoboard", about = "Collaborative design tool client shell")]
struct Args {
    /// Base URL of the backend API.
    #[arg(long, env = "PROTOBOARD_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Websocket URL for the realtime channel.
    #[arg(long, env = "PROTOBOARD_WS_URL", default_value = "ws://127.0.0.1:3000/api/ws")]
    ws_url: String,

    /// DOM anchor id the UI tree mounts under.
    #[arg(long, env = "PROTOBOARD_ANCHOR", default_value = "app")]
    anchor: String,

    /// Initial locale.
    #[arg(long, env = "PROTOBOARD_LOCALE", default_value = "en")]
    locale: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let store = Arc::new(Store::new());
    let profiles = Arc::new(HttpProfileService::new(args.base_url.clone()));
    let router = Arc::new(AppRouter::new());
    let realtime = Arc::new(WsChannel::new(ChannelConfig::new(args.ws_url.clone()), store.clone()));

    let orchestrator = Orchestrator::new(store.clone(), profiles, router, realtime);
    let _effects = orchestrator.activate();

    let host = Arc::new(Mutex::new(RenderHost::new(store.clone(), DomAnchor::new(args.anchor))));

    // Locale and hot-reload triggers both drive the soft reinit path. The
    // senders stay alive for the process lifetime; i18n and dev tooling drive
    // them in a full deployment.
    let (_locale_tx, locale_rx) = watch::channel(args.locale);
    let (_reload_tx, reload_rx) = mpsc::channel(8);
    let _watchers = spawn_reinit_watchers(store, host, locale_rx, reload_rx);

    info!(base_url = %args.base_url, ws_url = %args.ws_url, "protoboard shell running");
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "shutdown signal listener failed");
    }
    info!("shutting down");
}
