use std::path::Path;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exam_portal::{config::Settings, db, paths, portal::Portal, routes, state::ServerState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "exam_portal=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = Settings::load();

  let pool = db::init_db(&settings.database_path).expect("Failed to initialize database");
  let portal = Portal::open(pool, Utc::now());
  let state = ServerState::new(portal, paths::uploads_dir().into());

  let app = routes::router(state, Path::new(paths::static_dir()));

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Live Exam Portal is running at http://localhost:{}", settings.port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
