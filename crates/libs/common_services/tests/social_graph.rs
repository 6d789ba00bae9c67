mod helpers;

use common_services::api::social::error::SocialError;
use common_services::api::social::service as social;
use common_services::database::collect_store::CollectStore;
use common_services::database::follow_store::FollowStore;

const PUBLIC_URL: &str = "http://localhost:5000";

#[tokio::test]
async fn follow_then_unfollow_round_trip() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let a = helpers::create_user(&pool, true).await;
    let b = helpers::create_user(&pool, true).await;

    assert!(!FollowStore::is_following(&pool, a.id, b.id).await.unwrap());

    social::follow(&pool, PUBLIC_URL, &a, &b.username).await.unwrap();
    assert!(FollowStore::is_following(&pool, a.id, b.id).await.unwrap());
    // The edge is directed.
    assert!(!FollowStore::is_following(&pool, b.id, a.id).await.unwrap());

    social::unfollow(&pool, &a, &b.username).await.unwrap();
    assert!(!FollowStore::is_following(&pool, a.id, b.id).await.unwrap());
}

#[tokio::test]
async fn follow_edge_is_idempotent() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let a = helpers::create_user(&pool, true).await;
    let b = helpers::create_user(&pool, true).await;

    assert!(FollowStore::follow(&pool, a.id, b.id).await.unwrap());
    // The duplicate insert is absorbed, not an integrity error.
    assert!(!FollowStore::follow(&pool, a.id, b.id).await.unwrap());
    assert_eq!(FollowStore::followers_count(&pool, b.id).await.unwrap(), 1);

    assert!(FollowStore::unfollow(&pool, a.id, b.id).await.unwrap());
    assert!(!FollowStore::unfollow(&pool, a.id, b.id).await.unwrap());
}

#[tokio::test]
async fn users_do_not_follow_themselves() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let a = helpers::create_user(&pool, true).await;

    // No implicit self-edge at creation time.
    assert!(!FollowStore::is_following(&pool, a.id, a.id).await.unwrap());
    assert_eq!(FollowStore::followers_count(&pool, a.id).await.unwrap(), 0);

    let err = social::follow(&pool, PUBLIC_URL, &a, &a.username)
        .await
        .unwrap_err();
    assert!(matches!(err, SocialError::SelfFollow));
}

#[tokio::test]
async fn repeated_follow_through_the_service_reports_already_following() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let a = helpers::create_user(&pool, true).await;
    let b = helpers::create_user(&pool, true).await;

    social::follow(&pool, PUBLIC_URL, &a, &b.username).await.unwrap();
    let err = social::follow(&pool, PUBLIC_URL, &a, &b.username)
        .await
        .unwrap_err();
    assert!(matches!(err, SocialError::AlreadyFollowing));
    assert_eq!(FollowStore::followers_count(&pool, b.id).await.unwrap(), 1);
}

#[tokio::test]
async fn unconfirmed_users_cannot_follow() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let a = helpers::create_user(&pool, false).await;
    let b = helpers::create_user(&pool, true).await;

    let err = social::follow(&pool, PUBLIC_URL, &a, &b.username)
        .await
        .unwrap_err();
    assert!(matches!(err, SocialError::NotConfirmed));
}

#[tokio::test]
async fn collect_mirrors_the_follow_semantics() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let author = helpers::create_user(&pool, true).await;
    let collector = helpers::create_user(&pool, true).await;
    let photo = helpers::create_photo(&pool, &author).await;

    assert!(!CollectStore::is_collecting(&pool, collector.id, photo.id)
        .await
        .unwrap());

    social::collect(&pool, PUBLIC_URL, &collector, photo.id)
        .await
        .unwrap();
    assert!(CollectStore::is_collecting(&pool, collector.id, photo.id)
        .await
        .unwrap());

    // Second collect is rejected without creating a second edge.
    let err = social::collect(&pool, PUBLIC_URL, &collector, photo.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SocialError::AlreadyCollected));
    assert_eq!(
        CollectStore::collectors_count(&pool, photo.id).await.unwrap(),
        1
    );

    social::uncollect(&pool, &collector, photo.id).await.unwrap();
    let err = social::uncollect(&pool, &collector, photo.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SocialError::NotCollected));
}
