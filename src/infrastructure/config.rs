use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants;
use crate::error::{AppError, AppResult};

/// 配置文件结构
///
/// 所有字段都是可选的；配置文件不存在时使用默认值，本工具从不写入配置文件。
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// java 可执行文件路径
    pub java: Option<PathBuf>,
    /// 属性文件路径，设置后不再启动 JVM
    pub properties_file: Option<PathBuf>,
    /// 覆盖快照中的属性
    pub properties: BTreeMap<String, String>,
}

impl Config {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从默认位置加载配置
    pub fn load() -> AppResult<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::new()),
        }
    }

    /// 从指定文件加载配置，文件不存在时返回默认配置
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config_load_failed(&path.display().to_string(), &e.to_string())
        })?;

        Self::parse(&content).map_err(|e| match e {
            AppError::Config { message } => {
                AppError::config_load_failed(&path.display().to_string(), &message)
            }
            other => other,
        })
    }

    /// 解析 TOML 配置内容
    pub fn parse(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config {
            message: e.message().to_string(),
        })
    }
}

/// 获取配置文件路径
///
/// `JAVA_CONFIG_FILE` 优先，否则为 `~/.java-config/config.toml`。
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(constants::env::CONFIG_FILE) {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| home.join(".java-config").join("config.toml"))
}
