use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Connection string used when neither `config.toml` nor `DATABASE_URL` names one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./test.db?mode=rwc";

/// Fixed routes served next to the dog routes; `http.base_path` may not reuse them.
pub const HEALTH_PATH: &str = "/health";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const RESERVED_PATHS: [&str; 2] = [HEALTH_PATH, OPENAPI_PATH];

/// Origin accepted by the `root` profile.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://komer6.github.io";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: Some(4) }
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

fn default_max_connections() -> u32 { 5 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Where the dog routes are mounted and which origins may call them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub cors: CorsPolicy,
}

fn default_base_path() -> String { "/".into() }

impl Default for HttpConfig {
    fn default() -> Self { Self::root_profile() }
}

impl HttpConfig {
    /// Routes on `/`, only the GitHub Pages frontend may call them.
    pub fn root_profile() -> Self {
        Self {
            base_path: "/".into(),
            cors: CorsPolicy::SingleOrigin { origin: DEFAULT_ALLOWED_ORIGIN.into() },
        }
    }

    /// Routes on `/dogs`, any origin may call them.
    pub fn dogs_profile() -> Self {
        Self { base_path: "/dogs".into(), cors: CorsPolicy::AnyOrigin }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base_path.starts_with('/') {
            return Err(anyhow!("http.base_path must start with '/'"));
        }
        if RESERVED_PATHS.contains(&self.base_path.trim_end_matches('/')) {
            return Err(anyhow!("http.base_path {} is already served by the server", self.base_path));
        }
        if let CorsPolicy::SingleOrigin { origin } = &self.cors {
            let lower = origin.to_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(anyhow!("http.cors.origin must start with http:// or https://"));
            }
        }
        Ok(())
    }

    fn normalize(&mut self) {
        let trimmed = self.base_path.trim();
        self.base_path = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/').to_string()
        } else if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        if let CorsPolicy::SingleOrigin { origin } = &mut self.cors {
            *origin = normalize_origin(origin);
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CorsPolicy {
    SingleOrigin { origin: String },
    AnyOrigin,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::SingleOrigin { origin: DEFAULT_ALLOWED_ORIGIN.into() }
    }
}

/// Browsers send `Origin` as `scheme://host[:port]`; drop any path so a
/// configured page URL still matches.
pub fn normalize_origin(origin: &str) -> String {
    let origin = origin.trim();
    let authority_start = origin.find("://").map(|i| i + 3).unwrap_or(0);
    match origin[authority_start..].find('/') {
        Some(slash) => origin[..authority_start + slash].to_string(),
        None => origin.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormatConfig {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormatConfig,
}

/// Read `CONFIG_PATH` (default `config.toml`); defaults when the file does not exist.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if std::path::Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// [`load_default`], then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_with(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::normalize_and_validate`] with an explicit variable lookup.
    pub fn normalize_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.server.normalize(&lookup)?;
        self.database.normalize_from(&lookup);
        self.database.validate()?;
        self.http.normalize();
        self.http.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.host.trim().is_empty() {
            self.host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        }
        if self.port == 0 {
            self.port = match lookup("SERVER_PORT") {
                Some(p) => p.parse::<u16>().map_err(|_| anyhow!("SERVER_PORT is not a valid port: {p}"))?,
                None => 8000,
            };
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    fn normalize_from<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // TOML 中未提供 URL 时，依次尝试 DATABASE_URL 与内置默认值
        if self.url.trim().is_empty() {
            self.url = lookup("DATABASE_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        if !self.url.to_lowercase().starts_with("sqlite:") {
            return Err(anyhow!("database.url must start with sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }

    /// Directory of the SQLite file named by `url`, if it is file-backed.
    pub fn sqlite_data_dir(&self) -> Option<std::path::PathBuf> {
        let rest = self.url.strip_prefix("sqlite://").or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path.starts_with(":memory:") {
            return None;
        }
        std::path::Path::new(path).parent().map(|p| p.to_path_buf())
    }
}
