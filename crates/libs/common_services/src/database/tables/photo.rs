use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A photo row. The three filename columns are the original upload and
/// its small/medium derivatives; derivatives of images already at or
/// under the target width alias the original file.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct Photo {
    pub id: i32,
    pub description: Option<String>,
    pub filename: String,
    pub filename_s: String,
    pub filename_m: String,
    pub can_comment: bool,
    pub flag: i32,
    pub created_at: DateTime<Utc>,
    pub author_id: i32,
}

/// Ordering for photos-within-a-tag listings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhotoTagOrder {
    #[default]
    ByTime,
    ByCollects,
}

impl Photo {
    /// The distinct stored files backing this photo. Derivatives that
    /// alias the original are listed once.
    #[must_use]
    pub fn distinct_files(&self) -> Vec<&str> {
        let mut files = vec![self.filename.as_str()];
        for name in [self.filename_s.as_str(), self.filename_m.as_str()] {
            if !files.contains(&name) {
                files.push(name);
            }
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn photo(filename: &str, s: &str, m: &str) -> Photo {
        Photo {
            id: 1,
            description: None,
            filename: filename.to_owned(),
            filename_s: s.to_owned(),
            filename_m: m.to_owned(),
            can_comment: true,
            flag: 0,
            created_at: Utc::now(),
            author_id: 1,
        }
    }

    #[test]
    fn distinct_files_deduplicates_aliased_derivatives() {
        let p = photo("a.jpg", "a_s.jpg", "a_m.jpg");
        assert_eq!(p.distinct_files(), vec!["a.jpg", "a_s.jpg", "a_m.jpg"]);

        // A small source keeps the original file for both derivatives.
        let p = photo("a.jpg", "a.jpg", "a.jpg");
        assert_eq!(p.distinct_files(), vec!["a.jpg"]);
    }
}
