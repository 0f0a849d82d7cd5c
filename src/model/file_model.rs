use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ARCHIVE_EXTS, AUDIO_EXTS, CODE_EXTS, DOCUMENT_EXTS, IMAGE_EXTS, VIDEO_EXTS,
};
use crate::utils::display_name;

/// One stored object as known to the catalog. `name` is the full storage
/// path `<user_id>/<filename>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mimetype: String,
}

impl FileRecord {
    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }

    pub fn category(&self) -> FileCategory {
        FileCategory::from_mime(&self.mimetype)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Document,
    Archive,
    Code,
    Other,
}

impl FileCategory {
    // Prefix checks run before the substring checks, so e.g. a mimetype
    // containing both "video" and "json" classifies as Video.
    pub fn from_mime(mimetype: &str) -> Self {
        if mimetype.starts_with("image/") {
            FileCategory::Image
        } else if mimetype.starts_with("video/") {
            FileCategory::Video
        } else if mimetype.starts_with("audio/") {
            FileCategory::Audio
        } else if mimetype.contains("pdf") || mimetype.contains("document") {
            FileCategory::Document
        } else if mimetype.contains("zip") || mimetype.contains("archive") {
            FileCategory::Archive
        } else if mimetype.contains("javascript") || mimetype.contains("json") || mimetype.contains("html") {
            FileCategory::Code
        } else {
            FileCategory::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Image => "Image",
            FileCategory::Video => "Video",
            FileCategory::Audio => "Audio",
            FileCategory::Document => "Document",
            FileCategory::Archive => "Archive",
            FileCategory::Code => "Code",
            FileCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Type selector shared by the list filter and the upload validator.
/// `All` means any file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Image,
    Document,
    Video,
    Audio,
    Archive,
    Code,
}

impl TypeFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" | "any" => Some(TypeFilter::All),
            "image" => Some(TypeFilter::Image),
            "document" => Some(TypeFilter::Document),
            "video" => Some(TypeFilter::Video),
            "audio" => Some(TypeFilter::Audio),
            "archive" => Some(TypeFilter::Archive),
            "code" => Some(TypeFilter::Code),
            _ => None,
        }
    }

    pub fn matches(&self, category: FileCategory) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Image => category == FileCategory::Image,
            TypeFilter::Document => category == FileCategory::Document,
            TypeFilter::Video => category == FileCategory::Video,
            TypeFilter::Audio => category == FileCategory::Audio,
            TypeFilter::Archive => category == FileCategory::Archive,
            TypeFilter::Code => category == FileCategory::Code,
        }
    }

    /// Extension allow-list for upload validation. Empty means no restriction.
    pub fn allowed_exts(&self) -> &'static [&'static str] {
        match self {
            TypeFilter::All => &[],
            TypeFilter::Image => &IMAGE_EXTS,
            TypeFilter::Document => &DOCUMENT_EXTS,
            TypeFilter::Video => &VIDEO_EXTS,
            TypeFilter::Audio => &AUDIO_EXTS,
            TypeFilter::Archive => &ARCHIVE_EXTS,
            TypeFilter::Code => &CODE_EXTS,
        }
    }
}

/// Local search/filter state, never persisted remotely.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub search_term: String,
    pub type_filter: TypeFilter,
}

/// A file selected for upload, before the store assigns its final name.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.name).first_or_octet_stream().to_string()
    }
}
