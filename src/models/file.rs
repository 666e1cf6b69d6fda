use serde::{Deserialize, Serialize};

/// Coarse file-type grouping used for filtered listings and usage
/// aggregation. The platform assigns the category at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Document,
    Image,
    Video,
    Audio,
    Other,
}

impl FileCategory {
    pub const ALL: [FileCategory; 5] = [
        Self::Document,
        Self::Image,
        Self::Video,
        Self::Audio,
        Self::Other,
    ];

    /// Plural display title for summary cards and listing headings.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Document => "Documents",
            Self::Image => "Images",
            Self::Video => "Videos",
            Self::Audio => "Audio",
            Self::Other => "Others",
        }
    }

    /// Icon served from the assets bucket.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Document => "/static/icons/file-document.svg",
            Self::Image => "/static/icons/file-image.svg",
            Self::Video => "/static/icons/file-video.svg",
            Self::Audio => "/static/icons/file-audio.svg",
            Self::Other => "/static/icons/file-other.svg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "document" => Some(Self::Document),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// File record as stored by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDoc {
    pub id: String,
    pub name: String,
    pub category: FileCategory,
    #[serde(default)]
    pub extension: String,
    pub size: u64,
    pub created_at: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Listing container. Older platform deployments omit `documents` entirely
/// when a query matches nothing, so it defaults to empty rather than failing.
#[derive(Debug, Default, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub documents: Vec<FileDoc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_display_and_parse() {
        for cat in FileCategory::ALL {
            assert_eq!(FileCategory::parse(&cat.to_string()), Some(cat));
        }
        assert_eq!(FileCategory::parse("archive"), None);
    }

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FileCategory::Document).unwrap(),
            "\"document\""
        );
        let cat: FileCategory = serde_json::from_str("\"audio\"").unwrap();
        assert_eq!(cat, FileCategory::Audio);
    }

    #[test]
    fn listing_without_documents_field_is_empty() {
        let list: FileList = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(list.documents.is_empty());

        let list: FileList = serde_json::from_str("{}").unwrap();
        assert!(list.documents.is_empty());
        assert_eq!(list.total, 0);
    }

    #[test]
    fn file_without_url_or_extension_deserializes() {
        let file: FileDoc = serde_json::from_str(
            r#"{"id":"f1","name":"notes.txt","category":"document","size":12,"created_at":"2026-07-01T09:30:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(file.extension, "");
        assert!(file.url.is_none());
    }
}
