use crate::api::pagination::Page;
use crate::api::admin::error::AdminError;
use crate::database::app_user::{User, UserRole};
use crate::database::role::RoleWithPermissions;
use crate::database::role_store::RoleStore;
use crate::database::user_store::UserStore;
use crate::page_offset;
use sqlx::PgPool;
use tracing::info;

async fn get_user(pool: &PgPool, user_id: i32) -> Result<User, AdminError> {
    UserStore::find_by_id(pool, user_id)
        .await?
        .ok_or(AdminError::UserNotFound(user_id))
}

/// All users, newest account first.
pub async fn list_users(
    pool: &PgPool,
    per_page: i64,
    page: i64,
) -> Result<Page<User>, AdminError> {
    let offset = page_offset(page, per_page);
    let items = UserStore::page(pool, per_page, offset).await?;
    let total = UserStore::count(pool).await?;
    Ok(Page::new(items, page, per_page, total))
}

/// Locks a user: the Locked role keeps only FOLLOW and COLLECT.
pub async fn lock_user(pool: &PgPool, moderator: &User, user_id: i32) -> Result<User, AdminError> {
    let user = get_user(pool, user_id).await?;
    if user.is_admin() {
        return Err(AdminError::CannotModerateAdmin);
    }
    let locked = UserStore::set_locked(pool, user_id, true, UserRole::Locked).await?;
    info!("User {} locked by {}", user.username, moderator.username);
    Ok(locked)
}

pub async fn unlock_user(
    pool: &PgPool,
    moderator: &User,
    user_id: i32,
) -> Result<User, AdminError> {
    let user = get_user(pool, user_id).await?;
    let unlocked = UserStore::set_locked(pool, user_id, false, UserRole::User).await?;
    info!("User {} unlocked by {}", user.username, moderator.username);
    Ok(unlocked)
}

/// Blocks a user; they can no longer log in.
pub async fn block_user(pool: &PgPool, moderator: &User, user_id: i32) -> Result<User, AdminError> {
    let user = get_user(pool, user_id).await?;
    if user.is_admin() {
        return Err(AdminError::CannotModerateAdmin);
    }
    let blocked = UserStore::set_active(pool, user_id, false).await?;
    info!("User {} blocked by {}", user.username, moderator.username);
    Ok(blocked)
}

pub async fn unblock_user(
    pool: &PgPool,
    moderator: &User,
    user_id: i32,
) -> Result<User, AdminError> {
    let user = get_user(pool, user_id).await?;
    let unblocked = UserStore::set_active(pool, user_id, true).await?;
    info!("User {} unblocked by {}", user.username, moderator.username);
    Ok(unblocked)
}

/// Reassigns a role (ADMINISTER only).
pub async fn set_role(
    pool: &PgPool,
    admin: &User,
    user_id: i32,
    role: UserRole,
) -> Result<User, AdminError> {
    let user = get_user(pool, user_id).await?;
    let updated = UserStore::set_role(pool, user_id, role).await?;
    info!(
        "Role of {} changed to {} by {}",
        user.username, role, admin.username
    );
    Ok(updated)
}

/// The seeded role/permission reference data.
pub async fn list_roles(pool: &PgPool) -> Result<Vec<RoleWithPermissions>, AdminError> {
    Ok(RoleStore::list_with_permissions(pool).await?)
}
