use tracing::info;

pub const PUBSUB_HOST: &str = "pubsub.googleapis.com";

/// Fire-and-forget DNS lookup of the Pub/Sub endpoint, logged for boot-time
/// diagnostics. Resolution failure is intentionally ignored: the probe must
/// never affect health or serving.
pub fn spawn_dns_probe() -> tokio::task::JoinHandle<()> {
    tokio::spawn(async {
        let Ok(addrs) = tokio::net::lookup_host((PUBSUB_HOST, 443)).await else {
            return;
        };
        let addrs: Vec<String> = addrs.map(|addr| addr.ip().to_string()).collect();
        info!(host = PUBSUB_HOST, addrs = ?addrs, "resolved Pub/Sub endpoint");
    })
}
