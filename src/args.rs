use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, Config};

/// Inventory the media files under a directory into a CSV report.
#[derive(Debug, Parser)]
#[command(name = "media_inventory", version)]
pub struct Args {
    /// Directory to scan recursively
    pub root_dir: PathBuf,

    /// CSV file to write
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Number of files probed at the same time [default: CPU count, 4..=12]
    #[arg(short = 'j', long = "jobs", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Comma-separated extensions to include (case-insensitive)
    #[arg(short, long, value_delimiter = ',', default_values_t = default_extensions())]
    pub extensions: Vec<String>,

    /// Follow symbolic links while walking the tree
    #[arg(long)]
    pub follow_links: bool,

    /// ffprobe executable to run
    #[arg(long, default_value = config::DEFAULT_FFPROBE)]
    pub ffprobe: PathBuf,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

fn default_extensions() -> Vec<String> {
    config::DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Args {
    pub fn into_config(self) -> Config {
        let extensions = self
            .extensions
            .iter()
            .map(|e| config::normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();

        Config {
            root_dir: self.root_dir,
            output: self.output,
            concurrency: self
                .jobs
                .map(usize::from)
                .unwrap_or_else(config::default_concurrency),
            extensions,
            follow_links: self.follow_links,
            ffprobe: self.ffprobe,
            show_progress: !self.no_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation_uses_defaults() {
        let config = Args::try_parse_from(["media_inventory", "/videos"])
            .unwrap()
            .into_config();

        assert_eq!(config.root_dir, PathBuf::from("/videos"));
        assert_eq!(config.output, PathBuf::from("media_info.csv"));
        assert_eq!(config.extensions, vec!["mp4", "mkv", "avi"]);
        assert!(config.show_progress);
    }

    #[test]
    fn test_extension_list_is_normalized() {
        let config = Args::try_parse_from([
            "media_inventory",
            "/videos",
            "-e",
            ".MOV,webm,,M4V",
            "-j",
            "2",
            "-o",
            "out.csv",
            "--no-progress",
        ])
        .unwrap()
        .into_config();

        assert_eq!(config.extensions, vec!["mov", "webm", "m4v"]);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert!(!config.show_progress);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Args::try_parse_from(["media_inventory", "/videos", "-j", "0"]).is_err());
    }
}
