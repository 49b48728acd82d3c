use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 3000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Credential and token settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_hours: default_token_ttl(), bcrypt_cost: default_bcrypt_cost() }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_token_ttl() -> i64 { 24 }
fn default_bcrypt_cost() -> u32 { 10 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Read and parse `path`. A missing file yields the defaults; any other read
/// or parse error is returned.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(anyhow!("cannot read {path}: {e}")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Parse `config.toml` (or `CONFIG_PATH`) without env fallbacks or checks.
    pub fn load() -> Result<Self> {
        load_or_default(&config_path())
    }

    /// Load `config.toml` (or `CONFIG_PATH`); a missing file falls back to
    /// defaults filled from the environment.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server（环境变量优先级低于配置文件）
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if self.host.trim().is_empty() || self.host == ServerConfig::default().host {
                self.host = host;
            }
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            if self.port == ServerConfig::default().port {
                self.port = port;
            }
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML 未提供 URL 时从 DATABASE_URL 填充
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        if self.max_connections == 0 { self.max_connections = default_max_connections(); }
        if self.connect_timeout_secs == 0 { self.connect_timeout_secs = default_connect_timeout(); }
        if self.acquire_timeout_secs == 0 { self.acquire_timeout_secs = default_acquire_timeout(); }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        Ok(())
    }
}

impl AuthSettings {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            if let Ok(secret) = std::env::var("JWT_SECRET") {
                self.jwt_secret = secret;
            }
        }
        if let Some(ttl) = std::env::var("JWT_TTL_HOURS").ok().and_then(|v| v.parse::<i64>().ok()) {
            self.token_ttl_hours = ttl;
        }
        if let Some(cost) = std::env::var("BCRYPT_COST").ok().and_then(|v| v.parse::<u32>().ok()) {
            self.bcrypt_cost = cost;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set it in config.toml or JWT_SECRET"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(anyhow!("auth.token_ttl_hours must be positive"));
        }
        // bcrypt accepts costs 4..=31
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(anyhow!("auth.bcrypt_cost must be within 4..=31"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fills_section_defaults() {
        let cfg = parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8081

            [database]
            url = "postgres://u:p@localhost:5432/shop"

            [auth]
            jwt_secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8081");
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.auth.bcrypt_cost, 10);
        assert_eq!(cfg.auth.token_ttl_hours, 24);
    }

    #[test]
    fn database_url_scheme_is_checked() {
        let db = DatabaseConfig { url: "mysql://localhost/shop".into(), min_connections: 1, max_connections: 5, ..Default::default() };
        assert!(db.validate().is_err());
        let db = DatabaseConfig { url: "postgresql://localhost/shop".into(), min_connections: 1, max_connections: 5, ..Default::default() };
        assert!(db.validate().is_ok());
    }

    #[test]
    fn auth_settings_reject_bad_cost() {
        let auth = AuthSettings { jwt_secret: "x".into(), token_ttl_hours: 1, bcrypt_cost: 2 };
        assert!(auth.validate().is_err());
        let auth = AuthSettings { jwt_secret: "x".into(), token_ttl_hours: 1, bcrypt_cost: 10 };
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("syntaxwear-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[auth]\njwt_secret = \"from-file\"\nbcrypt_cost = \"twelve\"\n").unwrap();
        let res = load_or_default(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn database_section_loads_without_auth() {
        let path = std::env::temp_dir().join(format!("syntaxwear-db-{}.toml", std::process::id()));
        std::fs::write(&path, "[database]\nurl = \"postgres://seed:pw@db:5432/shop\"\nmax_connections = 3\nmin_connections = 1\n").unwrap();
        let res = load_or_default(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        let db = res.unwrap().database;
        assert_eq!(db.url, "postgres://seed:pw@db:5432/shop");
        assert_eq!(db.max_connections, 3);
        assert!(db.validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("syntaxwear-does-not-exist.toml");
        let cfg = load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.auth.bcrypt_cost, 10);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let auth = AuthSettings { jwt_secret: "  ".into(), ..Default::default() };
        assert!(auth.validate().is_err());
    }
}
