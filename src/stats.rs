use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::constants::{RECENT_WINDOW_DAYS, STORAGE_LIMIT_BYTES};
use crate::model::{FileCategory, FileRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUsage {
    pub count: usize,
    pub total_size: u64,
}

#[derive(Debug, Clone, Default)]
pub struct StorageUsage {
    pub total_files: usize,
    pub total_size: u64,
    pub by_category: BTreeMap<FileCategory, CategoryUsage>,
    pub recent_uploads: usize,
}

impl StorageUsage {
    pub fn usage_percentage(&self) -> f64 {
        self.total_size as f64 / STORAGE_LIMIT_BYTES as f64 * 100.0
    }

    pub fn remaining_bytes(&self) -> u64 {
        STORAGE_LIMIT_BYTES.saturating_sub(self.total_size)
    }
}

/// Pure reduction over a snapshot. A record modified exactly at the 7x24h
/// boundary counts as not recent.
pub fn summarize(files: &[FileRecord], now: DateTime<Utc>) -> StorageUsage {
    let week_ago = now - Duration::days(RECENT_WINDOW_DAYS);
    let mut usage = StorageUsage {
        total_files: files.len(),
        ..Default::default()
    };
    for file in files {
        usage.total_size += file.size;
        if file.updated_at > week_ago {
            usage.recent_uploads += 1;
        }
        let entry = usage.by_category.entry(file.category()).or_default();
        entry.count += 1;
        entry.total_size += file.size;
    }
    usage
}
