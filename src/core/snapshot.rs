use std::collections::BTreeMap;

use crate::core::constants::property;
use crate::error::{AppError, AppResult};
use crate::utils::paths::host_path_separator;

/// 运行时属性快照
///
/// 每次运行只构建一次，之后只读。所有查询操作都显式接收快照，
/// 而不是读取进程的全局状态。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    properties: BTreeMap<String, String>,
}

impl EnvironmentSnapshot {
    pub fn new(properties: BTreeMap<String, String>) -> Self {
        Self { properties }
    }

    /// 读取属性
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// 读取必需的属性，不存在时返回 `MissingProperty`
    pub fn require(&self, name: &str) -> AppResult<&str> {
        self.get(name)
            .ok_or_else(|| AppError::missing_property(name))
    }

    /// 库路径等路径列表使用的分隔符
    ///
    /// 优先使用快照中的 `path.separator`，只有它恰好是单个字符时才采用。
    pub fn path_separator(&self) -> char {
        self.get(property::PATH_SEPARATOR)
            .and_then(single_char)
            .unwrap_or_else(host_path_separator)
    }

    /// 用覆盖项生成新的快照
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in overrides {
            self.properties.insert(key.into(), value.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_missing_property() {
        let snapshot: EnvironmentSnapshot = [("os.arch", "amd64")].into_iter().collect();

        assert_eq!(snapshot.require("os.arch").unwrap(), "amd64");
        match snapshot.require("os.name") {
            Err(AppError::MissingProperty { name }) => assert_eq!(name, "os.name"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_path_separator_from_property() {
        let snapshot: EnvironmentSnapshot = [("path.separator", ";")].into_iter().collect();
        assert_eq!(snapshot.path_separator(), ';');
    }

    #[test]
    fn test_path_separator_falls_back_to_host() {
        let empty = EnvironmentSnapshot::default();
        assert_eq!(empty.path_separator(), host_path_separator());

        let bogus: EnvironmentSnapshot = [("path.separator", "::")].into_iter().collect();
        assert_eq!(bogus.path_separator(), host_path_separator());
    }

    #[test]
    fn test_overrides_replace_and_extend() {
        let snapshot: EnvironmentSnapshot = [("java.home", "/usr/lib/jvm/jre"), ("os.arch", "amd64")]
            .into_iter()
            .collect();

        let snapshot = snapshot.with_overrides([("java.home", "/opt/jdk"), ("user.language", "en")]);

        assert_eq!(snapshot.get("java.home"), Some("/opt/jdk"));
        assert_eq!(snapshot.get("os.arch"), Some("amd64"));
        assert_eq!(snapshot.get("user.language"), Some("en"));
        assert_eq!(snapshot.len(), 3);
    }
}
