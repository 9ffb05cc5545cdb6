use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable naming an optional `key = value` config file.
pub const CONFIG_ENV: &str = "FILL_BUCKET_CONFIG";

pub const DEFAULT_MAX_HOLES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketConfig {
    /// Holes kept per polygon before triangulation.
    pub max_holes: usize,
    /// Log group openings, hole limiting and uploads.
    pub verbose: bool,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self { max_holes: DEFAULT_MAX_HOLES, verbose: false }
    }
}

static CONFIG: OnceLock<BucketConfig> = OnceLock::new();

pub fn bucket_config() -> &'static BucketConfig {
    CONFIG.get_or_init(read_config)
}

fn read_config() -> BucketConfig {
    load_config(std::env::var_os(CONFIG_ENV).map(PathBuf::from).as_deref())
}

/// Parse the file at `path`. No path, or an unreadable file, yields the defaults.
pub fn load_config(path: Option<&Path>) -> BucketConfig {
    let Some(path) = path else {
        return BucketConfig::default();
    };
    match std::fs::read_to_string(path) {
        Ok(text) => parse_config(&text),
        Err(e) => {
            log::warn!("config {}: {e}; using defaults", path.display());
            BucketConfig::default()
        }
    }
}

pub fn parse_config(text: &str) -> BucketConfig {
    let mut cfg = BucketConfig::default();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.splitn(2, '=');
        let key = parts.next().unwrap_or("").trim();
        let value = parts.next().unwrap_or("").trim();

        if key.eq_ignore_ascii_case("max_holes") {
            match value.parse::<usize>() {
                Ok(n) => cfg.max_holes = n,
                Err(_) => log::warn!("config: max_holes={value:?} is not a count; keeping {}", cfg.max_holes),
            }
        } else if key.eq_ignore_ascii_case("verbose") {
            cfg.verbose = matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes");
        } else {
            log::warn!("config: unknown key {key:?}");
        }
    }

    cfg
}
