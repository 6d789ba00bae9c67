use crate::{
    ApiSettings, LoggingSettings, MailSettings, PageSizeSettings, RawSettings, SecretSettings,
    UploadSettings,
};
use std::path::absolute;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub pagination: PageSizeSettings,
    pub mail: MailSettings,
    pub secrets: SecretSettings,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let upload_folder = absolute(&raw.uploads.upload_folder).expect("Invalid upload_folder");
        let avatar_folder = absolute(&raw.uploads.avatar_folder).expect("Invalid avatar_folder");
        let allowed_extensions = raw
            .uploads
            .allowed_extensions
            .iter()
            .map(|e| e.to_lowercase())
            .collect();
        let uploads = UploadSettings {
            upload_folder,
            avatar_folder,
            allowed_extensions,
            photo_sizes: raw.uploads.photo_sizes,
            photo_suffixes: raw.uploads.photo_suffixes,
            avatar_sizes: raw.uploads.avatar_sizes,
        };

        Self {
            uploads,
            logging: raw.logging,
            api: raw.api,
            pagination: raw.pagination,
            mail: raw.mail,
            secrets: raw.secrets,
        }
    }
}

impl UploadSettings {
    /// Whether a filename carries one of the accepted photo extensions.
    #[must_use]
    pub fn is_allowed_photo(&self, filename: &str) -> bool {
        let Some((_, extension)) = filename.rsplit_once('.') else {
            return false;
        };
        self.allowed_extensions.contains(&extension.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AvatarSizeSettings, PhotoSizeSettings, PhotoSuffixSettings};

    fn upload_settings() -> UploadSettings {
        UploadSettings {
            upload_folder: "./data/uploads".into(),
            avatar_folder: "./data/avatars".into(),
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

    #[test]
    fn accepts_known_extensions_case_insensitively() {
        let uploads = upload_settings();
        assert!(uploads.is_allowed_photo("cat.jpg"));
        assert!(uploads.is_allowed_photo("cat.JPEG"));
        assert!(uploads.is_allowed_photo("archive.tar.png"));
    }

    #[test]
    fn rejects_unknown_or_missing_extensions() {
        let uploads = upload_settings();
        assert!(!uploads.is_allowed_photo("script.exe"));
        assert!(!uploads.is_allowed_photo("noextension"));
    }
}
