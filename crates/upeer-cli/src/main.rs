use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncBufReadExt;
use tracing::{info, warn};

use upeer_client::services::{ChatService, GroupService, PostService};
use upeer_client::{ApiClient, Config, FileTokenStore, SessionManager, SessionState};
use upeer_realtime::{ChatSocket, spawn_poller};
use upeer_sync::{ChatRoom, PostBoard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upeer=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    let tokens = Arc::new(FileTokenStore::new(&config.token_path));
    let api = ApiClient::new(&config.api_url, tokens);
    let sessions = SessionManager::new(api.clone());

    // Rehydrate from the stored token, falling back to a fresh login.
    let session = match sessions.load_session()? {
        SessionState::Authenticated(session) => session,
        _ => {
            let email = std::env::var("UPEER_EMAIL")
                .context("no stored session; set UPEER_EMAIL and UPEER_PASSWORD to log in")?;
            let password =
                std::env::var("UPEER_PASSWORD").context("UPEER_PASSWORD is not set")?;
            sessions.login(&email, &password).await?
        }
    };
    info!(
        "logged in as {} (user {})",
        session.name.as_deref().unwrap_or(&session.email),
        session.user_id
    );

    let mut board = PostBoard::new(PostService::new(api.clone()), GroupService::new(api.clone()));
    board.refresh().await?;
    for post in board.posts().snapshot() {
        println!(
            "[{}] #{} {}: {}",
            post.post_type.as_str(),
            post.post_id,
            post.author,
            post.content
        );
    }

    // With a group id argument, tail its chat.
    match std::env::args().nth(1) {
        Some(arg) => {
            let group_id: i64 = arg.parse().context("group id must be a number")?;
            tail_chat(&config, api, group_id).await
        }
        None => Ok(()),
    }
}

/// Tail a group chat: the poller is the authoritative transport, the
/// socket an accelerator. The room dedupes by id, so both may feed it.
async fn tail_chat(config: &Config, api: ApiClient, group_id: i64) -> anyhow::Result<()> {
    let room = Arc::new(tokio::sync::Mutex::new(ChatRoom::new(
        ChatService::new(api.clone()),
        group_id,
    )));

    let poll_room = room.clone();
    let poller = spawn_poller(config.poll_interval, move || {
        let room = poll_room.clone();
        async move {
            if let Err(e) = room.lock().await.refresh().await {
                warn!("chat poll failed: {}", e);
            }
        }
    });

    // Best-effort push channel. If it drops, polling alone carries on;
    // nothing reconnects automatically.
    if let Some(token) = api.tokens().load() {
        match ChatSocket::connect(&config.ws_url, group_id, &token).await {
            Ok(socket) => {
                let mut events = socket.subscribe();
                let event_room = room.clone();
                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            _ = socket.closed() => break,
                            event = events.recv() => match event {
                                Ok(event) => event_room.lock().await.apply_event(event),
                                Err(_) => break,
                            },
                        }
                    }
                    info!("chat socket gone; polling alone from here");
                });
            }
            Err(e) => warn!("chat socket unavailable, polling only: {}", e),
        }
    }

    let mut feed = room.lock().await.messages().subscribe();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut printed = 0usize;
    info!("tailing group {} chat; type to send, Ctrl-D to quit", group_id);

    loop {
        tokio::select! {
            changed = feed.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = feed.borrow_and_update().clone();
                for msg in snapshot.iter().skip(printed) {
                    println!("{} {}: {}", msg.timestamp.format("%H:%M"), msg.sender, msg.content);
                }
                printed = snapshot.len();
            }
            line = lines.next_line() => match line? {
                Some(line) if !line.trim().is_empty() => {
                    if let Err(e) = room.lock().await.send(line.trim()).await {
                        warn!("send failed: {}", e);
                    }
                }
                Some(_) => {}
                None => break,
            },
        }
    }

    poller.cancel();
    poller.stopped().await;
    Ok(())
}
