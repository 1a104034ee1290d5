use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use compass_core::config::AppConfig;
use compass_core::construction::{ConstructionScene, ConstructionSession};
use compass_core::lamp::LampScene;
use futures::{sink::SinkExt, stream::StreamExt};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

mod commands;

/// Environment variable naming a JSON config file.
const CONFIG_ENV: &str = "COMPASS_CONFIG";

// Application State
struct AppState {
    config: AppConfig,
    lamp: Arc<RwLock<LampScene>>,
}

fn load_config() -> AppConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return AppConfig::default();
    };
    match AppConfig::from_path(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            warn!("Falling back to default config, {} is unusable: {}", path, e);
            AppConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = load_config();
    let shared_state = Arc::new(AppState {
        lamp: Arc::new(RwLock::new(LampScene::build(&config.lamp))),
        config,
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on {}", addr);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            warn!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        warn!("Server stopped: {}", e);
    }
}

async fn root() -> &'static str {
    "Hello from the compass construction backend!"
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    info!("Client connected, session {}", session_id);

    let (mut sender, mut receiver) = socket.split();

    // Each connection constructs on its own canvas
    let mut session = ConstructionSession::new(ConstructionScene::seeded(), state.config.canvas.clone());

    for frame in commands::greeting(&session) {
        if sender.send(Message::Text(frame)).await.is_err() {
            return;
        }
    }

    while let Some(msg) = receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => continue,
        };
        info!("Session {} received: {}", session_id, text);

        for reply in commands::respond(&text, &mut session, &state.lamp) {
            if sender.send(Message::Text(reply)).await.is_err() {
                warn!("Session {} lost its socket", session_id);
                return;
            }
        }
    }

    info!("Session {} closed with {} primitives", session_id, session.scene.len());
}
