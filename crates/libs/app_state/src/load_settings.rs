use crate::{AppConstants, AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

fn load_raw_settings() -> Result<RawSettings> {
    // Load .env first so environment overrides (e.g. the database url)
    // take precedence over the YAML file.
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml").canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    Ok(builder.build()?.try_deserialize::<RawSettings>()?)
}

pub fn load_app_settings() -> Result<AppSettings> {
    let settings: AppSettings = load_raw_settings()?.into();

    fs::create_dir_all(&settings.uploads.upload_folder).expect("Cannot create upload folder");
    fs::create_dir_all(&settings.uploads.avatar_folder).expect("Cannot create avatar folder");

    Ok(settings)
}

fn load_app_constants() -> Result<AppConstants> {
    Ok(load_raw_settings()?.into())
}

pub static CONSTANTS: LazyLock<AppConstants> =
    LazyLock::new(|| load_app_constants().expect("Cannot load app settings."));

#[must_use]
pub fn constants() -> &'static AppConstants {
    &CONSTANTS
}
