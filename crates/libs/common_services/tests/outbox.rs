mod helpers;

use app_state::OutboxConstants;
use async_trait::async_trait;
use color_eyre::eyre::eyre;
use common_services::database::outbox_email::{EmailStatus, OutboxEmail};
use common_services::database::outbox_store::OutboxStore;
use common_services::outbox::{drain_once, LogMailTransport, MailTransport};

struct FailingTransport;

#[async_trait]
impl MailTransport for FailingTransport {
    async fn deliver(&self, _email: &OutboxEmail) -> color_eyre::Result<()> {
        Err(eyre!("carrier unavailable"))
    }
}

fn outbox_constants(max_attempts: i32) -> OutboxConstants {
    OutboxConstants {
        poll_interval_seconds: 1,
        batch_size: 50,
        max_attempts,
    }
}

// One sequential test: the outbox table is shared state, and concurrent
// drains would steal each other's rows.
#[tokio::test]
async fn outbox_records_sent_and_failed_outcomes() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };

    // Successful delivery.
    let email = OutboxStore::enqueue(
        &pool,
        "someone@test.example",
        "[Lumeo] Confirm Your Account",
        "Hello!",
    )
    .await
    .unwrap();
    assert_eq!(email.status, EmailStatus::Queued);
    assert_eq!(email.attempts, 0);

    drain_once(&pool, &LogMailTransport, &outbox_constants(3))
        .await
        .unwrap();

    let sent = OutboxStore::find_by_id(&pool, email.id).await.unwrap().unwrap();
    assert_eq!(sent.status, EmailStatus::Sent);
    assert_eq!(sent.attempts, 1);
    assert!(sent.sent_at.is_some());

    // Failing delivery: stays queued until max_attempts, then failed.
    let email = OutboxStore::enqueue(
        &pool,
        "other@test.example",
        "[Lumeo] Reset Your Password",
        "Hello!",
    )
    .await
    .unwrap();

    let constants = outbox_constants(2);
    drain_once(&pool, &FailingTransport, &constants).await.unwrap();
    let after_first = OutboxStore::find_by_id(&pool, email.id).await.unwrap().unwrap();
    assert_eq!(after_first.status, EmailStatus::Queued);
    assert_eq!(after_first.attempts, 1);

    drain_once(&pool, &FailingTransport, &constants).await.unwrap();
    let after_second = OutboxStore::find_by_id(&pool, email.id).await.unwrap().unwrap();
    assert_eq!(after_second.status, EmailStatus::Failed);
    assert_eq!(after_second.attempts, 2);
    assert!(after_second.sent_at.is_none());
}
