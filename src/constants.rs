// Messages
pub const MESSAGE_NOT_AUTHENTICATED: &str = "User not authenticated";
pub const MESSAGE_LOAD_FAILED: &str = "Failed to load files from cloud storage";
pub const MESSAGE_UPLOAD_FAILED: &str = "Failed to upload files to cloud storage";
pub const MESSAGE_DELETE_FAILED: &str = "Failed to delete file from cloud storage";
pub const MESSAGE_DOWNLOAD_FAILED: &str = "Failed to download file from cloud";
pub const MESSAGE_FILES_REJECTED: &str = "Some files were filtered out due to file type or size restrictions";
pub const MESSAGE_BUCKET_MISSING: &str = "Files bucket not found";
pub const MESSAGE_MISSING_ENV: &str =
    "Missing Supabase environment variables. Please add SUPABASE_URL and SUPABASE_ANON_KEY to your environment variables.";

// Bucket
pub const BUCKET_FILES: &str = "files";
pub const BUCKET_FILE_SIZE_LIMIT: u64 = 52428800; // 50MB

// Limits
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024; // per file, enforced client side
pub const LIST_LIMIT: u32 = 100;
pub const STATS_LIST_LIMIT: u32 = 1000;
pub const STORAGE_LIMIT_BYTES: u64 = 5 * 1024 * 1024 * 1024; // 5GB per user

// Misc
pub const CACHE_CONTROL: &str = "3600";
pub const RECENT_WINDOW_DAYS: i64 = 7;

// Upload extension allow-lists, per category
pub const IMAGE_EXTS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];
pub const DOCUMENT_EXTS: [&str; 7] = [".pdf", ".doc", ".docx", ".txt", ".rtf", ".xlsx", ".pptx"];
pub const VIDEO_EXTS: [&str; 6] = [".mp4", ".avi", ".mov", ".wmv", ".flv", ".mkv"];
pub const AUDIO_EXTS: [&str; 5] = [".mp3", ".wav", ".flac", ".aac", ".ogg"];
pub const ARCHIVE_EXTS: [&str; 5] = [".zip", ".rar", ".7z", ".tar", ".gz"];
pub const CODE_EXTS: [&str; 12] = [
    ".js", ".ts", ".jsx", ".tsx", ".py", ".java", ".cpp", ".c", ".html", ".css", ".json", ".xml",
];
