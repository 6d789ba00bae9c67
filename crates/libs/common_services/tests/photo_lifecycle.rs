mod helpers;

use common_services::api::comments::service as comments;
use common_services::api::photos::error::PhotosError;
use common_services::api::photos::service as photos;
use common_services::database::comment_store::CommentStore;
use common_services::database::photo_store::PhotoStore;
use common_services::database::tag_store::TagStore;
use image::{DynamicImage, RgbImage};
use std::io::Cursor;

const PUBLIC_URL: &str = "http://localhost:5000";

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        image::Rgb([120, 160, 40]),
    ));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
    buffer.into_inner()
}

#[tokio::test]
async fn upload_produces_bounded_derivatives() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let mut uploads = helpers::upload_settings(dir.path());
    uploads.photo_sizes.small = 200;
    uploads.photo_sizes.medium = 400;
    let author = helpers::create_user(&pool, true).await;

    let photo = photos::upload_photo(
        &pool,
        &uploads,
        &author,
        "square.png",
        png_bytes(800, 800),
        Some("An 800 by 800 test card".to_owned()),
    )
    .await
    .unwrap();

    assert_ne!(photo.filename_s, photo.filename);
    assert_ne!(photo.filename_m, photo.filename);
    assert_ne!(photo.filename_s, photo.filename_m);

    let small = image::open(uploads.upload_folder.join(&photo.filename_s)).unwrap();
    let medium = image::open(uploads.upload_folder.join(&photo.filename_m)).unwrap();
    assert!(small.width() <= 200);
    assert!(medium.width() <= 400);
    // Aspect ratio preserved for the square source.
    assert_eq!(small.width(), small.height());
    assert_eq!(medium.width(), medium.height());
}

#[tokio::test]
async fn small_uploads_reuse_the_original_file() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let uploads = helpers::upload_settings(dir.path());
    let author = helpers::create_user(&pool, true).await;

    let photo = photos::upload_photo(
        &pool,
        &uploads,
        &author,
        "tiny.png",
        png_bytes(300, 200),
        None,
    )
    .await
    .unwrap();

    assert_eq!(photo.filename_s, photo.filename);
    assert_eq!(photo.filename_m, photo.filename);
}

#[tokio::test]
async fn unconfirmed_or_unauthorized_uploads_are_rejected() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let uploads = helpers::upload_settings(dir.path());

    let unconfirmed = helpers::create_user(&pool, false).await;
    let err = photos::upload_photo(
        &pool,
        &uploads,
        &unconfirmed,
        "a.png",
        png_bytes(10, 10),
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PhotosError::NotConfirmed));

    let confirmed = helpers::create_user(&pool, true).await;
    let err = photos::upload_photo(
        &pool,
        &uploads,
        &confirmed,
        "not-an-image.txt",
        b"hello".to_vec(),
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PhotosError::InvalidImage));
}

#[tokio::test]
async fn deleting_a_photo_cascades_and_cleans_up() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let uploads = helpers::upload_settings(dir.path());
    let author = helpers::create_user(&pool, true).await;
    let commenter = helpers::create_user(&pool, true).await;

    let photo = photos::upload_photo(
        &pool,
        &uploads,
        &author,
        "subject.png",
        png_bytes(900, 600),
        None,
    )
    .await
    .unwrap();
    let keeper = helpers::create_photo(&pool, &author).await;

    // One tag only on the doomed photo, one shared with another photo.
    let hex = uuid::Uuid::new_v4().simple().to_string();
    let orphan_name = format!("sunset{}", &hex[..8]);
    let shared_name = format!("alpine{}", &hex[..8]);
    let tags = photos::add_tags(
        &pool,
        &author,
        photo.id,
        &format!("{orphan_name} {shared_name}"),
    )
    .await
    .unwrap();
    assert_eq!(tags.len(), 2);
    let shared = tags.iter().find(|t| t.name == shared_name).unwrap().clone();
    let orphaned = tags.iter().find(|t| t.name == orphan_name).unwrap().clone();
    photos::add_tags(&pool, &author, keeper.id, &shared_name)
        .await
        .unwrap();

    let comment = comments::create_comment(
        &pool,
        PUBLIC_URL,
        &commenter,
        photo.id,
        "lovely",
        None,
    )
    .await
    .unwrap();

    let stored: Vec<_> = photo
        .distinct_files()
        .iter()
        .map(|name| uploads.upload_folder.join(name))
        .collect();
    for file in &stored {
        assert!(file.exists());
    }

    photos::delete_photo(&pool, &uploads, &author, photo.id)
        .await
        .unwrap();

    assert!(PhotoStore::find_by_id(&pool, photo.id).await.unwrap().is_none());
    assert!(CommentStore::find_by_id(&pool, comment.id)
        .await
        .unwrap()
        .is_none());
    // The orphaned tag goes with the photo; the shared one survives.
    assert!(TagStore::find_by_id(&pool, orphaned.id).await.unwrap().is_none());
    assert!(TagStore::find_by_id(&pool, shared.id).await.unwrap().is_some());
    for file in &stored {
        assert!(!file.exists(), "{} should be removed", file.display());
    }
}

#[tokio::test]
async fn non_owner_non_moderator_cannot_delete() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let uploads = helpers::upload_settings(dir.path());
    let author = helpers::create_user(&pool, true).await;
    let stranger = helpers::create_user(&pool, true).await;
    let photo = helpers::create_photo(&pool, &author).await;

    let err = photos::delete_photo(&pool, &uploads, &stranger, photo.id)
        .await
        .unwrap_err();
    assert!(matches!(err, PhotosError::PermissionDenied));
    assert!(PhotoStore::find_by_id(&pool, photo.id).await.unwrap().is_some());
}

#[tokio::test]
async fn removing_the_last_tag_link_deletes_the_tag() {
    let Some(pool) = helpers::test_pool().await else {
        return;
    };
    let author = helpers::create_user(&pool, true).await;
    let photo = helpers::create_photo(&pool, &author).await;

    let hex = uuid::Uuid::new_v4().simple().to_string();
    let name = format!("mono{}", &hex[..8]);
    let tags = photos::add_tags(&pool, &author, photo.id, &name).await.unwrap();
    let tag = tags[0].clone();

    photos::remove_tag(&pool, &author, photo.id, tag.id)
        .await
        .unwrap();
    assert!(TagStore::find_by_id(&pool, tag.id).await.unwrap().is_none());
}
