//! 通过启动 JVM 获取系统属性
//!
//! 运行 `java -XshowSettings:properties -version`，解析输出中的
//! `Property settings:` 段落。

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;
use which::which;

use crate::core::constants::{self, property};
use crate::core::EnvironmentSnapshot;
use crate::error::{AppError, AppResult};
use crate::utils::paths::{host_path_separator, java_executable_name};

const SETTINGS_HEADER: &str = "Property settings:";

/// 查找 java 可执行文件
///
/// 顺序：显式指定的路径、`$JAVA_HOME/bin/java`、`PATH` 中的第一个 java。
pub fn find_java_executable(configured: Option<&Path>) -> AppResult<PathBuf> {
    if let Some(java) = configured {
        return Ok(java.to_path_buf());
    }

    if let Some(java_home) = env::var_os(constants::env::JAVA_HOME) {
        let java = PathBuf::from(java_home)
            .join("bin")
            .join(java_executable_name());
        if java.is_file() {
            return Ok(java);
        }
        debug!(java = %java.display(), "JAVA_HOME does not contain a java executable");
    }

    which("java").map_err(|_| AppError::JavaNotFound)
}

/// 启动 JVM 并读取属性快照
pub fn query_jvm_properties(java: &Path) -> AppResult<EnvironmentSnapshot> {
    debug!(java = %java.display(), "querying JVM properties");

    let output = Command::new(java)
        .arg("-XshowSettings:properties")
        .arg("-version")
        .output()
        .map_err(|e| AppError::jvm_launch_failed(java, e.to_string()))?;

    if !output.status.success() {
        return Err(AppError::jvm_launch_failed(
            java,
            format!("exited with {}", output.status),
        ));
    }

    // 不同版本的 JDK 会把设置打印到 stderr 或 stdout
    let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
    text.push('\n');
    text.push_str(&String::from_utf8_lossy(&output.stdout));

    let properties = parse_show_settings(&text);
    if properties.is_empty() {
        return Err(AppError::jvm_launch_failed(
            java,
            "no property settings in output",
        ));
    }

    Ok(EnvironmentSnapshot::new(properties))
}

/// 解析 `-XshowSettings:properties` 的输出
///
/// 段落中每个属性形如 `    key = value`；缩进更深的行是路径列表属性的
/// 后续元素，用 `path.separator` 连接。空元素打印为只有缩进的行，
/// 所以段落只在真正的空行处结束。
pub fn parse_show_settings(output: &str) -> BTreeMap<String, String> {
    let mut entries: Vec<(String, Vec<String>)> = Vec::new();
    let mut key_indent = None;

    let lines = output
        .lines()
        .skip_while(|line| line.trim() != SETTINGS_HEADER)
        .skip(1);

    for line in lines {
        if line.is_empty() {
            break;
        }

        let indent = line.len() - line.trim_start().len();
        let is_continuation = key_indent.is_some_and(|key_indent| indent > key_indent);

        if is_continuation {
            if let Some((_, values)) = entries.last_mut() {
                values.push(line.trim().to_string());
            }
            continue;
        }

        if line.trim().is_empty() {
            break;
        }

        // 值为空时输出为 `key = `，行尾空格可能已被去掉
        let (key, value) = match line.trim_start().split_once(" = ") {
            Some((key, value)) => (key, value.trim_end()),
            None => match line.trim().strip_suffix(" =") {
                Some(key) => (key, ""),
                None => continue,
            },
        };

        key_indent.get_or_insert(indent);
        entries.push((key.to_string(), vec![value.to_string()]));
    }

    let separator = entries
        .iter()
        .find(|(key, _)| key == property::PATH_SEPARATOR)
        .and_then(|(_, values)| values.first())
        .filter(|value| value.chars().count() == 1)
        .and_then(|value| value.chars().next())
        .unwrap_or_else(host_path_separator)
        .to_string();

    entries
        .into_iter()
        .map(|(key, values)| (key, values.join(separator.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Property settings:
    file.encoding = UTF-8
    java.class.path =
    java.home = /usr/lib/jvm/java-17-openjdk
    java.library.path = /usr/java/packages/lib
        /usr/lib64
        /lib64
    java.version = 17.0.9
    line.separator = \\n
    os.arch = amd64
    path.separator = :
    sun.arch.data.model = 64

openjdk version \"17.0.9\" 2023-10-17
OpenJDK Runtime Environment (build 17.0.9+9)
";

    #[test]
    fn test_parse_simple_properties() {
        let props = parse_show_settings(SAMPLE);

        assert_eq!(props["java.home"], "/usr/lib/jvm/java-17-openjdk");
        assert_eq!(props["java.version"], "17.0.9");
        assert_eq!(props["os.arch"], "amd64");
        assert_eq!(props["sun.arch.data.model"], "64");
        assert_eq!(props["path.separator"], ":");
    }

    #[test]
    fn test_parse_multi_valued_property() {
        let props = parse_show_settings(SAMPLE);
        assert_eq!(
            props["java.library.path"],
            "/usr/java/packages/lib:/usr/lib64:/lib64"
        );
    }

    #[test]
    fn test_parse_empty_values() {
        let props = parse_show_settings(SAMPLE);
        assert_eq!(props["java.class.path"], "");
        assert_eq!(props["line.separator"], "\\n");
    }

    #[test]
    fn test_section_ends_at_blank_line() {
        let props = parse_show_settings(SAMPLE);
        assert_eq!(props.len(), 9);
        assert!(!props.keys().any(|k| k.contains("openjdk")));
    }

    #[test]
    fn test_empty_list_elements_keep_the_block_going() {
        let output = "\
Property settings:
    java.home = /usr/lib/jvm/java-17
    java.library.path = /foo
        
        /usr/lib64
    os.arch = amd64
    path.separator = :

openjdk version \"17\"
";
        let props = parse_show_settings(output);

        assert_eq!(props["java.library.path"], "/foo::/usr/lib64");
        assert_eq!(props.get("os.arch").map(String::as_str), Some("amd64"));
        assert_eq!(props["path.separator"], ":");
        assert_eq!(props.len(), 4);
    }

    #[test]
    fn test_empty_first_and_last_list_elements() {
        let output = "\
Property settings:
    java.library.path =
        /usr/lib64
        
    os.name = Linux
";
        let props = parse_show_settings(output);

        assert_eq!(props["java.library.path"], ":/usr/lib64:");
        assert_eq!(props["os.name"], "Linux");
    }

    #[test]
    fn test_windows_separator() {
        let output = "\
Property settings:
    java.library.path = C:\\jdk\\bin
        C:\\Windows\\system32
    path.separator = ;
";
        let props = parse_show_settings(output);
        assert_eq!(props["java.library.path"], "C:\\jdk\\bin;C:\\Windows\\system32");
    }

    #[test]
    fn test_no_settings_section() {
        assert!(parse_show_settings("openjdk version \"17\"\n").is_empty());
    }

    #[test]
    fn test_configured_java_wins() {
        let java = Path::new("/opt/custom/bin/java");
        assert_eq!(find_java_executable(Some(java)).unwrap(), java);
    }

    #[test]
    fn test_missing_java_fails_to_launch() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = query_jvm_properties(&temp_dir.path().join("java"));
        assert!(matches!(result, Err(AppError::JvmLaunch { .. })));
    }
}
