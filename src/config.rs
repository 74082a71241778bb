use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::{Parser, ValueEnum};
use std::fs;
use tracing::{info, warn};
use toml;

/// Which of the two APIs a process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Companies, job posts and applications
    Jobs,
    /// Users, posts, comments and likes
    Blog,
}

impl Service {
    /// File name of the service's database when none is configured
    pub fn default_database_file(self) -> &'static str {
        match self {
            Service::Jobs => "job_board.db",
            Service::Blog => "blog.db",
        }
    }

    pub fn default_bind_address(self) -> &'static str {
        match self {
            Service::Jobs => "127.0.0.1:3000",
            Service::Blog => "127.0.0.1:3001",
        }
    }
}

/// Longest session lifetime accepted, ten years
pub const MAX_SESSION_TTL_HOURS: u32 = 24 * 365 * 10;

/// Configuration for a noticeboard server process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address the HTTP server listens on
    pub bind_address: String,
    /// How long a login session stays valid, in hours
    pub session_ttl_hours: u32,
    /// Name of the cookie carrying the session token
    pub session_cookie_name: String,
    /// Emit logs as JSON lines instead of text
    pub log_json: bool,
    /// Directory for daily rolling log files; stdout when unset
    pub log_dir: Option<PathBuf>,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub bind_address: Option<String>,
    #[serde(default)]
    pub session_ttl_hours: Option<u32>,
    #[serde(default)]
    pub session_cookie_name: Option<String>,
    #[serde(default)]
    pub log_json: Option<bool>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub cors_origins: Option<Vec<String>>,
}

/// Command line arguments for the server
#[derive(Parser, Debug)]
#[clap(name = "noticeboard", about = "Job board and blog JSON APIs")]
pub struct CliArgs {
    /// Which API to serve
    #[clap(long, value_enum, env = "NOTICEBOARD_SERVICE")]
    pub service: Service,

    /// Path to a TOML config file, overriding the platform config directory
    #[clap(long, env = "NOTICEBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to listen on, e.g. 127.0.0.1:3000
    #[clap(long, env = "BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// Session lifetime in hours
    #[clap(long, env = "SESSION_TTL_HOURS")]
    pub session_ttl_hours: Option<u32>,

    /// Session cookie name
    #[clap(long, env = "SESSION_COOKIE_NAME")]
    pub session_cookie_name: Option<String>,

    /// Log as JSON lines
    #[clap(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,

    /// Directory for rolling log files
    #[clap(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Comma separated list of allowed CORS origins
    #[clap(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Debug mode
    #[clap(long, env = "NOTICEBOARD_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            bind_address: update.bind_address.unwrap_or(self.bind_address),
            session_ttl_hours: update.session_ttl_hours.unwrap_or(self.session_ttl_hours),
            session_cookie_name: update.session_cookie_name.unwrap_or(self.session_cookie_name),
            log_json: update.log_json.unwrap_or(self.log_json),
            log_dir: update.log_dir.or(self.log_dir),
            cors_origins: update.cors_origins.unwrap_or(self.cors_origins),
        }
    }

    /// One-line description of the settings worth logging at startup
    pub fn summary(&self) -> String {
        format!(
            "database_url={}, bind_address={}, session_ttl={}h, log_json={}",
            self.database_url, self.bind_address, self.session_ttl_hours, self.log_json
        )
    }

    /// Checks values that parse but can't be used
    pub fn validate(&self) -> Result<(), String> {
        if self.session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(format!(
                "session_ttl_hours must be at most {}, got {}",
                MAX_SESSION_TTL_HOURS, self.session_ttl_hours
            ));
        }
        Ok(())
    }
}

/// Returns the base (default) configuration for a service
pub fn base_config(service: Service, config_path: Option<PathBuf>) -> Config {
    let file = service.default_database_file();
    let database_url = config_path.map_or(file.to_string(), |path| path.join(file).to_string_lossy().to_string());

    Config {
        database_url,
        bind_address: service.default_bind_address().to_string(),
        session_ttl_hours: 336,
        session_cookie_name: "sessionid".to_string(),
        log_json: false,
        log_dir: None,
        cors_origins: Vec::new(),
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            },
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url,
        bind_address: args.bind_address,
        session_ttl_hours: args.session_ttl_hours,
        session_cookie_name: args.session_cookie_name,
        log_json: args.log_json,
        log_dir: args.log_dir,
        cors_origins: args.cors_origins,
    }
}

/// Gets the platform config directory, if it exists
pub fn get_config_dir_path() -> Option<PathBuf> {
    let config_path = match ProjectDirs::from("com", "noticeboard", "noticeboard") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    };

    config_path.and_then(|path| {
        if !path.exists() {
            info!("Config path not found at {:?}, using defaults", path);
            None
        } else {
            Some(path)
        }
    })
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let config_dir = get_config_dir_path();
    let config_file = args
        .config
        .clone()
        .or_else(|| config_dir.as_ref().map(|dir| dir.join("config.toml")));

    let base = base_config(args.service, config_dir);

    base.apply_update(config_from_file(config_file).unwrap_or_default())
        .apply_update(config_from_args(args))
}
