use crate::database::outbox_email::OutboxEmail;
use async_trait::async_trait;
use color_eyre::Result;
use tracing::info;

/// Delivery seam for outbox emails. Actual SMTP/provider delivery lives
/// outside this system; implementations adapt to whatever carrier the
/// deployment uses.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, email: &OutboxEmail) -> Result<()>;
}

/// Default transport: records the send in the log stream. Useful for
/// development and tests; production wires a real carrier here.
pub struct LogMailTransport;

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn deliver(&self, email: &OutboxEmail) -> Result<()> {
        info!(
            recipient = %email.recipient,
            subject = %email.subject,
            "Delivering email #{}",
            email.id
        );
        Ok(())
    }
}
