use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// Connections silent for this long are dropped so dead peers cannot
    /// accumulate workers forever.
    pub idle_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TELLERD_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:54321".to_string())
            .parse()
            .expect("Invalid TELLERD_LISTEN_ADDR");
        let db_path =
            std::env::var("TELLERD_DB_PATH").unwrap_or_else(|_| "./db/tellerd.db".into());
        let idle_secs: u64 = std::env::var("TELLERD_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .unwrap_or(300);
        Self {
            listen_addr,
            db_path,
            idle_timeout: Duration::from_secs(idle_secs),
        }
    }
}
