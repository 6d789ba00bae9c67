mod helpers;

use common_services::api::comments::service as comments;
use common_services::api::social::service as social;
use common_services::database::comment_store::CommentStore;
use common_services::database::notification_store::NotificationStore;
use common_services::database::user_store::UserStore;

const PUBLIC_URL: &str = "http://localhost:5000";

#[tokio::test]
async fn follow_notifies_an_opted_in_receiver_exactly_once() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let follower = helpers::create_user(&pool, true).await;
    let followed = helpers::create_user(&pool, true).await;

    social::follow(&pool, PUBLIC_URL, &follower, &followed.username)
        .await
        .unwrap();

    let unread = NotificationStore::page(&pool, followed.id, true, 10, 0)
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert!(!unread[0].is_read);
    assert!(unread[0].message.contains(&follower.username));
    assert!(unread[0]
        .message
        .contains(&format!("/users/{}", follower.username)));
}

#[tokio::test]
async fn no_notification_when_the_receiver_opted_out() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let follower = helpers::create_user(&pool, true).await;
    let followed = helpers::create_user(&pool, true).await;
    UserStore::update_notification_settings(&pool, followed.id, false, false, false)
        .await
        .unwrap();

    social::follow(&pool, PUBLIC_URL, &follower, &followed.username)
        .await
        .unwrap();

    let count = NotificationStore::count(&pool, followed.id, false)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn collecting_your_own_photo_does_not_notify_you() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let author = helpers::create_user(&pool, true).await;
    let photo = helpers::create_photo(&pool, &author).await;

    social::collect(&pool, PUBLIC_URL, &author, photo.id)
        .await
        .unwrap();

    let count = NotificationStore::count(&pool, author.id, false)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn collect_by_someone_else_notifies_the_author() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let author = helpers::create_user(&pool, true).await;
    let collector = helpers::create_user(&pool, true).await;
    let photo = helpers::create_photo(&pool, &author).await;

    social::collect(&pool, PUBLIC_URL, &collector, photo.id)
        .await
        .unwrap();

    let unread = NotificationStore::page(&pool, author.id, true, 10, 0)
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert!(unread[0].message.contains(&collector.username));
    assert!(unread[0].message.contains(&format!("/photos/{}", photo.id)));
}

#[tokio::test]
async fn comment_notifies_the_author_and_reply_references_stay_stable() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let author = helpers::create_user(&pool, true).await;
    let commenter = helpers::create_user(&pool, true).await;
    let photo = helpers::create_photo(&pool, &author).await;

    let top = comments::create_comment(&pool, PUBLIC_URL, &commenter, photo.id, "Nice shot!", None)
        .await
        .unwrap();
    assert_eq!(top.replied_id, None);
    assert_eq!(
        NotificationStore::count(&pool, author.id, true).await.unwrap(),
        1
    );

    // The author replying to the commenter notifies the commenter.
    let reply = comments::create_comment(
        &pool,
        PUBLIC_URL,
        &author,
        photo.id,
        "Thanks!",
        Some(top.id),
    )
    .await
    .unwrap();
    assert_eq!(reply.replied_id, Some(top.id));
    assert_eq!(
        NotificationStore::count(&pool, commenter.id, true)
            .await
            .unwrap(),
        1
    );

    // Reply-of-a-reply is representable and keeps its own reference.
    let nested = comments::create_comment(
        &pool,
        PUBLIC_URL,
        &commenter,
        photo.id,
        "Any time.",
        Some(reply.id),
    )
    .await
    .unwrap();
    assert_eq!(nested.replied_id, Some(reply.id));

    let replies = CommentStore::replies_of(&pool, top.id).await.unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].id, reply.id);

    // Deleting the thread root cascades the whole reply chain.
    CommentStore::delete(&pool, top.id).await.unwrap();
    assert!(CommentStore::find_by_id(&pool, reply.id).await.unwrap().is_none());
    assert!(CommentStore::find_by_id(&pool, nested.id).await.unwrap().is_none());
}

#[tokio::test]
async fn only_the_receiver_reads_a_notification() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let follower = helpers::create_user(&pool, true).await;
    let followed = helpers::create_user(&pool, true).await;

    social::follow(&pool, PUBLIC_URL, &follower, &followed.username)
        .await
        .unwrap();
    let unread = NotificationStore::page(&pool, followed.id, true, 10, 0)
        .await
        .unwrap();
    let notification = &unread[0];

    use common_services::api::notifications::error::NotificationsError;
    use common_services::api::notifications::service as notifications;

    let err = notifications::read_notification(&pool, &follower, notification.id)
        .await
        .unwrap_err();
    assert!(matches!(err, NotificationsError::AccessDenied));

    notifications::read_notification(&pool, &followed, notification.id)
        .await
        .unwrap();
    assert_eq!(
        NotificationStore::count(&pool, followed.id, true)
            .await
            .unwrap(),
        0
    );
}
