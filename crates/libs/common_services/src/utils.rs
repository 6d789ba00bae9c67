/// Generate a unique storage filename for an upload, preserving the
/// original (lowercased) extension.
#[must_use]
pub fn unique_filename(original_name: &str) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{hex}.{}", ext.to_lowercase()),
        _ => hex,
    }
}

/// Insert a derivative suffix before the extension, e.g.
/// `abc.jpg` + `_s` -> `abc_s.jpg`.
#[must_use]
pub fn suffixed_filename(filename: &str, suffix: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}{suffix}.{ext}"),
        None => format!("{filename}{suffix}"),
    }
}

/// 1-based page number and per-page size to a SQL offset.
#[must_use]
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    (page.max(1) - 1) * per_page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_filename_keeps_extension() {
        let name = unique_filename("IMG_1234.JPG");
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), 32 + 4);
        assert_ne!(unique_filename("IMG_1234.JPG"), name);
    }

    #[test]
    fn unique_filename_without_extension() {
        let name = unique_filename("noext");
        assert_eq!(name.len(), 32);
        assert!(!name.contains('.'));
    }

    #[test]
    fn suffixed_filename_inserts_before_extension() {
        assert_eq!(suffixed_filename("abc.jpg", "_s"), "abc_s.jpg");
        assert_eq!(suffixed_filename("a.b.png", "_m"), "a.b_m.png");
        assert_eq!(suffixed_filename("bare", "_s"), "bare_s");
    }

    #[test]
    fn page_offset_clamps_to_first_page() {
        assert_eq!(page_offset(0, 12), 0);
        assert_eq!(page_offset(1, 12), 0);
        assert_eq!(page_offset(3, 12), 24);
    }
}
