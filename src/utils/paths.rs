use std::io;
use std::path::{Path, PathBuf};

/// 当前平台的路径列表分隔符
pub fn host_path_separator() -> char {
    if cfg!(target_os = "windows") {
        ';'
    } else {
        ':'
    }
}

/// java 可执行文件名
pub fn java_executable_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "java.exe"
    } else {
        "java"
    }
}

/// 转换为绝对路径，不解析符号链接和 `..`
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// 去掉 Windows 规范路径的 `\\?\` 前缀，编译器和链接器不接受这种写法
pub fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    if cfg!(target_os = "windows") {
        if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix(r"\\?\")) {
            if !rest.starts_with("UNC") {
                return PathBuf::from(rest);
            }
        }
    }
    path
}
