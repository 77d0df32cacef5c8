use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use n2k_store::StoreConfig;

/// Server runtime configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Storage selection shared with the rest of the process.
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr, store: StoreConfig) -> Self {
        Self { bind_addr, store }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use n2k_store::BackendKind;

    #[test]
    fn config_construction() {
        let config = ServerConfig::new(
            "0.0.0.0:3000".parse().unwrap(),
            StoreConfig::new(BackendKind::Sled, "n2kdb"),
        );
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.store.backend, BackendKind::Sled);
    }
}
