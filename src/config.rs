use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub templates_dir: PathBuf,
    /// When set, upload links are absolute URLs under this base.
    pub base_url: Option<String>,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("BENCHBOARD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid BENCHBOARD_HOST: {e}"))?;

        let port: u16 = env_or("BENCHBOARD_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid BENCHBOARD_PORT: {e}"))?;

        let base_dir = executable_dir();

        let data_dir = std::env::var("BENCHBOARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| base_dir.join("data"));

        let templates_dir = std::env::var("BENCHBOARD_TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| base_dir.join("templates"));

        let base_url = std::env::var("BENCHBOARD_BASE_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let max_body_size: usize = env_or("BENCHBOARD_MAX_BODY_SIZE", "104857600")
            .parse()
            .map_err(|e| format!("Invalid BENCHBOARD_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("BENCHBOARD_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            data_dir,
            templates_dir,
            base_url,
            max_body_size,
            log_level,
        })
    }

    /// Viewer link for a record, relative unless a base URL is configured.
    pub fn record_link(&self, id: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}/benchmarks/{id}"),
            None => format!("/benchmarks/{id}"),
        }
    }
}

/// Directory containing the running executable, or the working directory
/// if that cannot be determined.
fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
