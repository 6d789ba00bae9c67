mod helpers;

use common_services::database::app_user::UserRole;
use common_services::database::role_store::RoleStore;

/// The seeded reference tables must carry exactly the capability map the
/// in-code checks use.
#[tokio::test]
async fn seeded_role_tables_match_the_capability_map() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };

    let roles = RoleStore::list_with_permissions(&pool).await.unwrap();
    assert_eq!(roles.len(), 4);

    for role in roles {
        let mapped = match role.name.as_str() {
            "Locked" => UserRole::Locked,
            "User" => UserRole::User,
            "Moderator" => UserRole::Moderator,
            "Administrator" => UserRole::Administrator,
            other => panic!("unexpected role in seed: {other}"),
        };
        let expected: Vec<&str> = mapped.permissions().iter().map(|p| p.as_str()).collect();
        assert_eq!(role.permissions, expected, "mismatch for {}", role.name);
    }
}
