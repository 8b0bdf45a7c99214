use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration for the LFS object backend
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Root directory holding canonical objects and staging files
    pub storage_root: PathBuf,

    /// Maximum object size in bytes (default: 20 GiB)
    pub max_object_size: u64,

    /// Socket address the HTTP server binds to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("./data/objects"),
            max_object_size: 20 * 1024 * 1024 * 1024, // 20 GiB
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            storage_root: env::var("LFS_STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(default.storage_root),

            max_object_size: env::var("LFS_MAX_OBJECT_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_object_size),

            bind_addr: env::var("LFS_BIND_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.bind_addr),
        }
    }

    /// Create config for development (small size cap, local scratch dir)
    pub fn development() -> Self {
        Self {
            storage_root: PathBuf::from("./data/objects-dev"),
            max_object_size: 256 * 1024 * 1024, // 256 MB
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.max_object_size, 20 * 1024 * 1024 * 1024);
        assert_eq!(config.storage_root, PathBuf::from("./data/objects"));
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn test_development_config() {
        let config = ServerConfig::development();
        assert_eq!(config.max_object_size, 256 * 1024 * 1024);
        assert_eq!(config.storage_root, PathBuf::from("./data/objects-dev"));
    }
}
