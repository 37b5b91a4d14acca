use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server settings, read from the environment.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory holding the data package.
    pub data_root: PathBuf,
    pub addr: SocketAddr,
    /// Optional dashboard config (JSON).
    pub config: Option<PathBuf>,
    /// `Cache-Control` max-age of rendered responses, in seconds.
    pub max_age: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let addr = env_var_string("DOSSIER_ADDR", "127.0.0.1:8080");
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("invalid DOSSIER_ADDR {addr:?}: {e}"))?;
        Ok(Self {
            data_root: PathBuf::from(env_var_string("DOSSIER_DATA_ROOT", "data")),
            addr,
            config: env::var("DOSSIER_CONFIG")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            max_age: env_var_u32("DOSSIER_MAX_AGE", 60),
        })
    }
}

fn env_var_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_var_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
