use std::path::PathBuf;

use tracing::debug;

use crate::core::constants::{layout, property};
use crate::core::{EnvironmentSnapshot, FilesystemProbe};
use crate::error::{AppError, AppResult};

/// 根据 `java.home` 推断 JDK 目录
///
/// 只识别两种布局：
/// - `java.home` 下存在 `include` 目录，它本身就是 JDK 目录；
/// - `java.home` 的最后一段是 `jre`，JDK 目录是它的上级。
///
/// 其他布局（例如只有 JRE 的安装）返回 `JdkNotFound`，不再继续猜测。
pub fn resolve_jdk_home<P: FilesystemProbe>(
    env: &EnvironmentSnapshot,
    probe: &P,
) -> AppResult<PathBuf> {
    let java_home = env
        .get(property::JAVA_HOME)
        .ok_or(AppError::JdkNotFound)?;
    let candidate = PathBuf::from(java_home);

    if probe.is_dir(&candidate.join(layout::INCLUDE_DIR)) {
        debug!(home = %candidate.display(), "java.home is a JDK");
        return Ok(candidate);
    }

    let is_nested_jre = candidate
        .file_name()
        .is_some_and(|name| name == layout::NESTED_JRE_DIR);
    if is_nested_jre {
        if let Some(parent) = candidate.parent().filter(|p| !p.as_os_str().is_empty()) {
            debug!(home = %parent.display(), "java.home is a JRE nested in a JDK");
            return Ok(parent.to_path_buf());
        }
    }

    debug!(java_home, "unrecognized JDK layout");
    Err(AppError::JdkNotFound)
}

/// 报告 JDK 目录的绝对路径
pub fn report_jdk_home<P: FilesystemProbe>(
    env: &EnvironmentSnapshot,
    probe: &P,
) -> AppResult<String> {
    let home = resolve_jdk_home(env, probe)?;
    Ok(probe.absolute(&home)?.display().to_string())
}
