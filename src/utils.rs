const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return String::from("0 Bytes");
    }
    let i = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let i = i.min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(i as i32);
    // two decimals, trailing zeros dropped
    let formatted = format!("{:.2}", value);
    let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", formatted, SIZE_UNITS[i])
}

pub fn display_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn file_ext(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

pub fn owner_of(path: &str) -> &str {
    path.split('/').next().unwrap_or("")
}
