use crate::{AuthConstants, DatabaseConstants, OutboxConstants, RawSettings};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConstants {
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
    pub outbox: OutboxConstants,
}

impl From<RawSettings> for AppConstants {
    fn from(raw: RawSettings) -> Self {
        Self {
            database: raw.constants.database,
            auth: raw.constants.auth,
            outbox: raw.constants.outbox,
        }
    }
}
