use std::sync::Arc;

use mailroom::config::AppConfig;
use mailroom::lifecycle::Lifecycle;
use mailroom::metrics;
use mailroom::probe;
use mailroom::pubsub::{self, PubSub};
use mailroom::routes;
use mailroom::state::AppState;
use mailroom::telemetry::init_tracing;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cfg = AppConfig::from_env();
    init_tracing(&cfg.log_filter);

    let _probe = probe::spawn_dns_probe();

    let client: Arc<dyn PubSub> = match pubsub::connect(&cfg).await {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!(error = %err, "failed to connect to Pub/Sub; aborting startup");
            std::process::exit(1);
        }
    };

    let mut lifecycle = Lifecycle::new();
    let stop_client = Arc::clone(&client);
    lifecycle.on_stop("pubsub-client", async move {
        stop_client.close().await.map_err(Into::into)
    });

    let app = routes::router(AppState::new(client));

    info!(
        addr = %cfg.bind_addr,
        project = %cfg.project_id,
        health_topic = routes::HEALTH_TOPIC,
        "starting mailroom"
    );
    metrics::BOOT_COUNTER.inc();

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .expect("bind");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    if let Err(err) = lifecycle.shutdown().await {
        error!(error = %err, "shutdown finished with error");
        std::process::exit(1);
    }
    info!("shutdown complete");
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
}
