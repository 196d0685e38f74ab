//! Upload constraint checks

use crate::config::UploadConfig;
use crate::model::FileMeta;

/// Outcome of checking a selected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCheck {
    Accepted,
    TooLarge { size: u64, max: u64 },
    UnsupportedType { mime: String },
}

impl FileCheck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FileCheck::Accepted)
    }
}

/// Check size first, then MIME type
pub fn check_file(file: &FileMeta, limits: &UploadConfig) -> FileCheck {
    if file.size > limits.max_size_bytes {
        return FileCheck::TooLarge {
            size: file.size,
            max: limits.max_size_bytes,
        };
    }

    if !limits.allowed_types.iter().any(|t| t == &file.mime) {
        return FileCheck::UnsupportedType {
            mime: file.mime.clone(),
        };
    }

    FileCheck::Accepted
}

/// Human-readable byte count
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_UPLOAD_BYTES};
    use proptest::prelude::*;

    #[test]
    fn test_one_byte_over_limit_is_rejected() {
        let limits = UploadConfig::default();
        let file = FileMeta::new("scan.pdf", DEFAULT_MAX_UPLOAD_BYTES + 1, "application/pdf");
        assert_eq!(
            check_file(&file, &limits),
            FileCheck::TooLarge {
                size: DEFAULT_MAX_UPLOAD_BYTES + 1,
                max: DEFAULT_MAX_UPLOAD_BYTES
            }
        );
    }

    #[test]
    fn test_exact_limit_is_accepted() {
        let limits = UploadConfig::default();
        let file = FileMeta::new("scan.pdf", DEFAULT_MAX_UPLOAD_BYTES, "application/pdf");
        assert!(check_file(&file, &limits).is_accepted());
    }

    #[test]
    fn test_unsupported_type() {
        let limits = UploadConfig::default();
        let file = FileMeta::new("notes.txt", 12, "text/plain");
        assert_eq!(
            check_file(&file, &limits),
            FileCheck::UnsupportedType {
                mime: "text/plain".to_string()
            }
        );
    }

    #[test]
    fn test_size_checked_before_type() {
        let limits = UploadConfig::default();
        let file = FileMeta::new("movie.mkv", DEFAULT_MAX_UPLOAD_BYTES * 3, "video/x-matroska");
        assert!(matches!(check_file(&file, &limits), FileCheck::TooLarge { .. }));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(DEFAULT_MAX_UPLOAD_BYTES), "10.0 MB");
    }

    proptest! {
        /// Property: any allowed type within the limit is accepted
        #[test]
        fn allowed_types_within_limit_are_accepted(
            size in 0u64..=DEFAULT_MAX_UPLOAD_BYTES,
            idx in 0usize..DEFAULT_ALLOWED_TYPES.len(),
        ) {
            let file = FileMeta::new("upload", size, DEFAULT_ALLOWED_TYPES[idx]);
            prop_assert!(check_file(&file, &UploadConfig::default()).is_accepted());
        }
    }
}
