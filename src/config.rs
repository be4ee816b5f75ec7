use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "media_info.csv";
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi"];
pub const DEFAULT_FFPROBE: &str = "ffprobe";

const MIN_DEFAULT_WORKERS: usize = 4;
const MAX_DEFAULT_WORKERS: usize = 12;

/// Everything one run needs. Built once in `main` and passed down.
#[derive(Debug, Clone)]
pub struct Config {
    pub root_dir: PathBuf,
    pub output: PathBuf,
    pub concurrency: usize,
    /// Lowercase, without the leading dot. Matched case-insensitively.
    pub extensions: Vec<String>,
    pub follow_links: bool,
    pub ffprobe: PathBuf,
    pub show_progress: bool,
}

impl Config {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Config {
            root_dir: root_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            concurrency: default_concurrency(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            follow_links: false,
            ffprobe: PathBuf::from(DEFAULT_FFPROBE),
            show_progress: true,
        }
    }
}

/// Worker count when none is given: one per CPU, kept within 4..=12.
pub fn default_concurrency() -> usize {
    num_cpus::get().clamp(MIN_DEFAULT_WORKERS, MAX_DEFAULT_WORKERS)
}

/// Normalize a user-supplied extension: strip leading dots, trim, lowercase.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
