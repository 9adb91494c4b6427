use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::core::constants;
use crate::core::EnvironmentSnapshot;
use crate::error::AppResult;
use crate::infrastructure::config::Config;
use crate::infrastructure::jvm::{find_java_executable, query_jvm_properties};
use crate::infrastructure::properties::load_properties_file;

/// 属性快照的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    /// 读取 `.properties` 文件
    PropertiesFile(PathBuf),
    /// 启动 JVM 查询，`None` 表示自动查找 java
    Jvm(Option<PathBuf>),
}

impl SnapshotSource {
    /// 根据环境变量和配置选择来源
    ///
    /// `JAVA_CONFIG_PROPERTIES` 优先于配置文件中的 `properties_file`，
    /// 两者都没有时启动 JVM。
    pub fn select(config: &Config) -> Self {
        let properties_file = env::var_os(constants::env::PROPERTIES_FILE)
            .map(PathBuf::from)
            .or_else(|| config.properties_file.clone());

        match properties_file {
            Some(path) => SnapshotSource::PropertiesFile(path),
            None => SnapshotSource::Jvm(config.java.clone()),
        }
    }

    /// 加载快照，并应用配置中的属性覆盖
    pub fn load(&self, config: &Config) -> AppResult<EnvironmentSnapshot> {
        let snapshot = match self {
            SnapshotSource::PropertiesFile(path) => {
                debug!(path = %path.display(), "loading properties file");
                load_properties_file(path)?
            }
            SnapshotSource::Jvm(java) => {
                let java = find_java_executable(java.as_deref())?;
                query_jvm_properties(&java)?
            }
        };

        Ok(snapshot.with_overrides(config.properties.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_properties_file_source_applies_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jvm.properties");
        fs::write(&path, "java.home=/usr/lib/jvm/jre\nos.arch=amd64\n").unwrap();

        let mut config = Config::new();
        config
            .properties
            .insert("java.home".to_string(), "/opt/jdk".to_string());

        let snapshot = SnapshotSource::PropertiesFile(path).load(&config).unwrap();
        assert_eq!(snapshot.get("java.home"), Some("/opt/jdk"));
        assert_eq!(snapshot.get("os.arch"), Some("amd64"));
    }

    #[test]
    fn test_jvm_source_reports_launch_failure() {
        let temp_dir = TempDir::new().unwrap();
        let source = SnapshotSource::Jvm(Some(temp_dir.path().join("no-java")));
        assert!(source.load(&Config::new()).is_err());
    }
}
