use crate::database::outbox_store::OutboxStore;
use crate::database::DbError;
use app_state::MailSettings;
use sqlx::{Executor, Postgres};

/// Enqueues the account-confirmation email.
pub async fn send_confirm_email(
    executor: impl Executor<'_, Database = Postgres>,
    mail: &MailSettings,
    public_url: &str,
    recipient: &str,
    username: &str,
    token: &str,
) -> Result<(), DbError> {
    let subject = format!("{}Confirm Your Account", mail.subject_prefix);
    let body = format!(
        "Hello {username},\n\n\
         Welcome! Please confirm your account:\n\n\
         {public_url}/auth/confirm?token={token}\n\n\
         If you did not register, simply ignore this email."
    );
    OutboxStore::enqueue(executor, recipient, &subject, &body).await?;
    Ok(())
}

/// Enqueues the password-reset email.
pub async fn send_reset_password_email(
    executor: impl Executor<'_, Database = Postgres>,
    mail: &MailSettings,
    public_url: &str,
    recipient: &str,
    username: &str,
    token: &str,
) -> Result<(), DbError> {
    let subject = format!("{}Reset Your Password", mail.subject_prefix);
    let body = format!(
        "Hello {username},\n\n\
         To reset your password:\n\n\
         {public_url}/auth/reset-password?token={token}\n\n\
         If this wasn't you, ignore this email."
    );
    OutboxStore::enqueue(executor, recipient, &subject, &body).await?;
    Ok(())
}

/// Enqueues the change-email confirmation, sent to the new address.
pub async fn send_change_email_email(
    executor: impl Executor<'_, Database = Postgres>,
    mail: &MailSettings,
    public_url: &str,
    recipient: &str,
    username: &str,
    token: &str,
) -> Result<(), DbError> {
    let subject = format!("{}Change Your Email", mail.subject_prefix);
    let body = format!(
        "Hello {username},\n\n\
         To confirm your new email address:\n\n\
         {public_url}/auth/change-email?token={token}\n\n\
         If this wasn't you, ignore this email."
    );
    OutboxStore::enqueue(executor, recipient, &subject, &body).await?;
    Ok(())
}
