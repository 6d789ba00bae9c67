use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub pagination: PageSizeSettings,
    pub mail: MailSettings,
    pub secrets: SecretSettings,
    pub constants: RawConstants,
}

/// Defines where uploaded photos and avatars are stored and how the
/// resized derivatives are produced.
#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub upload_folder: PathBuf,
    pub avatar_folder: PathBuf,
    /// Lowercase file extensions accepted for photo uploads.
    pub allowed_extensions: Vec<String>,
    pub photo_sizes: PhotoSizeSettings,
    pub photo_suffixes: PhotoSuffixSettings,
    pub avatar_sizes: AvatarSizeSettings,
}

/// Target widths (pixels) for the photo derivatives. Derivation only
/// downscales; sources at or under the target keep their original file.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PhotoSizeSettings {
    pub small: u32,
    pub medium: u32,
}

/// Filename suffixes inserted before the extension of a derivative,
/// e.g. `abc123_s.jpg`.
#[derive(Debug, Deserialize, Clone)]
pub struct PhotoSuffixSettings {
    pub small: String,
    pub medium: String,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AvatarSizeSettings {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub public_url: String,
    pub allowed_origins: Vec<String>,
    pub rate_limiting: RateLimitingSettings,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RateLimitingSettings {
    pub req_per_second: u64,
    pub burst_size: u32,
}

/// Per-feature page sizes for the offset-paginated list endpoints.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PageSizeSettings {
    pub photos: i64,
    pub comments: i64,
    pub users: i64,
    pub search_results: i64,
    pub notifications: i64,
    pub collectors: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailSettings {
    pub subject_prefix: String,
    pub sender: String,
    /// Registrations with this email receive the Administrator role.
    pub admin_email: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
    pub outbox: OutboxConstants,
}

/// Database connection pool configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConstants {
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
    /// Expiry for confirm/reset/change-email tokens.
    pub account_token_expiry_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutboxConstants {
    pub poll_interval_seconds: u64,
    pub batch_size: i64,
    pub max_attempts: i32,
}
