#![allow(dead_code)]

use app_state::{
    AvatarSizeSettings, PhotoSizeSettings, PhotoSuffixSettings, UploadSettings,
};
use common_services::database::app_user::{User, UserRole};
use common_services::database::photo::Photo;
use common_services::database::photo_store::PhotoStore;
use common_services::database::user_store::UserStore;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;

/// Connects to the test database and brings the schema up to date.
/// Returns `None` (callers skip) when `DATABASE_URL` is not exported.
pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("cannot connect to the test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations failed");
    Some(pool)
}

fn unique(prefix: &str) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &hex[..12])
}

pub async fn create_user(pool: &PgPool, confirmed: bool) -> User {
    let username = unique("u");
    let email = format!("{username}@test.example");
    let user = UserStore::create(pool, &username, &email, "not-a-real-hash", UserRole::User)
        .await
        .expect("user insert failed");
    if confirmed {
        UserStore::set_confirmed(pool, user.id).await.unwrap();
        return UserStore::find_by_id(pool, user.id).await.unwrap().unwrap();
    }
    user
}

pub async fn create_photo(pool: &PgPool, author: &User) -> Photo {
    let filename = format!("{}.jpg", unique("p"));
    let filename_s = format!("{}_s.jpg", &filename[..filename.len() - 4]);
    let filename_m = format!("{}_m.jpg", &filename[..filename.len() - 4]);
    PhotoStore::create(pool, author.id, &filename, &filename_s, &filename_m, None)
        .await
        .expect("photo insert failed")
}

pub fn upload_settings(dir: &Path) -> UploadSettings {
    UploadSettings {
        upload_folder: dir.join("uploads"),
        avatar_folder: dir.join("avatars"),
        allowed_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        photo_sizes: PhotoSizeSettings {
            small: 400,
            medium: 800,
        },
        photo_suffixes: PhotoSuffixSettings {
            small: "_s".into(),
            medium: "_m".into(),
        },
        avatar_sizes: AvatarSizeSettings {
            small: 64,
            medium: 128,
            large: 256,
        },
    }
}
