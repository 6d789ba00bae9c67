use crate::database::outbox_store::OutboxStore;
use crate::outbox::MailTransport;
use app_state::OutboxConstants;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, warn};

/// Spawns the background loop draining the email outbox. Every tick it
/// takes a batch of queued rows, hands each to the transport and records
/// the outcome, so completion and failure stay observable in the table.
pub fn spawn_outbox_worker(
    pool: PgPool,
    transport: Arc<dyn MailTransport>,
    outbox: OutboxConstants,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(outbox.poll_interval_seconds));
        loop {
            interval.tick().await;
            if let Err(e) = drain_once(&pool, transport.as_ref(), &outbox).await {
                error!("Outbox pass failed: {e:?}");
            }
        }
    })
}

/// One polling pass over the queue. Public so tests can drive the outbox
/// without the timer loop.
pub async fn drain_once(
    pool: &PgPool,
    transport: &dyn MailTransport,
    outbox: &OutboxConstants,
) -> color_eyre::Result<()> {
    let batch = OutboxStore::next_batch(pool, outbox.batch_size).await?;
    for email in batch {
        match transport.deliver(&email).await {
            Ok(()) => OutboxStore::mark_sent(pool, email.id).await?,
            Err(e) => {
                warn!(
                    "Delivery of email #{} to {} failed (attempt {}): {e:?}",
                    email.id,
                    email.recipient,
                    email.attempts + 1
                );
                OutboxStore::mark_failed_attempt(pool, email.id, outbox.max_attempts).await?;
            }
        }
    }
    Ok(())
}
