use crate::database::app_user::UserRole;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRolePayload {
    pub role: UserRole,
}
