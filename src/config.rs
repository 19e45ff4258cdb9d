//! 运行配置
//!
//! 读取优先级：
//! 1. 环境变量 `TELEGRAM_BOT_TOKEN` / `TELEGRAM_API_BASE` / `LINK_TOAST_TIMEOUT_SECS` / `LINK_TOAST_APP_ID`
//! 2. 配置文件 `~/.config/link-toast`（JSON，字段 `telegram_bot_token`、`api_base_url`、`timeout_secs`、`app_id`）
//! 3. 默认值（token 没有默认值，缺失时为空字符串）

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::telegram::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use crate::toast::DEFAULT_APP_ID;

pub const ENV_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_API_BASE: &str = "TELEGRAM_API_BASE";
pub const ENV_TIMEOUT: &str = "LINK_TOAST_TIMEOUT_SECS";
pub const ENV_APP_ID: &str = "LINK_TOAST_APP_ID";

/// 运行配置
#[derive(Clone)]
pub struct Config {
    /// Bot token（可能为空，拉取时才会失败）
    pub token: String,
    /// Bot API 地址
    pub api_base: String,
    /// HTTP 超时（秒）
    pub timeout_secs: u64,
    /// toast 使用的 AppUserModelID
    pub app_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            app_id: DEFAULT_APP_ID.to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &if self.token.is_empty() { "<empty>" } else { "<redacted>" })
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// 配置文件内容
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    telegram_bot_token: Option<String>,
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
    app_id: Option<String>,
}

impl Config {
    /// 从进程环境和默认配置文件加载
    pub fn load() -> Self {
        let path = default_config_path();
        Self::from_sources(|key| std::env::var(key).ok(), path.as_deref())
    }

    /// 从给定的环境查找函数和配置文件加载
    pub fn from_sources<F>(env: F, file: Option<&Path>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_config = file.map(read_file_config).unwrap_or_default();
        let defaults = Self::default();

        // token 只要环境变量存在（即使为空）就以环境变量为准
        let token = env(ENV_TOKEN)
            .or(file_config.telegram_bot_token)
            .unwrap_or_default();

        let api_base = non_empty(env(ENV_API_BASE))
            .or_else(|| non_empty(file_config.api_base_url))
            .unwrap_or(defaults.api_base);

        let timeout_secs = env(ENV_TIMEOUT)
            .and_then(|v| match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    warn!(value = %v, "Ignoring invalid {}", ENV_TIMEOUT);
                    None
                }
            })
            .or(file_config.timeout_secs.filter(|secs| *secs > 0))
            .unwrap_or(defaults.timeout_secs);

        let app_id = non_empty(env(ENV_APP_ID))
            .or_else(|| non_empty(file_config.app_id))
            .unwrap_or(defaults.app_id);

        Self {
            token,
            api_base,
            timeout_secs,
            app_id,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `~/.config/link-toast`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/link-toast"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 读取配置文件；不存在时静默忽略，损坏时告警后忽略
fn read_file_config(path: &Path) -> FileConfig {
    if !path.exists() {
        return FileConfig::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config file");
            return FileConfig::default();
        }
    };

    match serde_json::from_str::<FileConfig>(&content) {
        Ok(config) => {
            debug!(path = %path.display(), "Loaded config file");
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
            FileConfig::default()
        }
    }
}
