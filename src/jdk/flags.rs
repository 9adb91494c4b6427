use std::fmt;
use std::path::Path;

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::core::constants::{layout, property};
use crate::core::{EnvironmentSnapshot, FilesystemProbe};
use crate::error::{AppError, AppResult};
use crate::jdk::home::resolve_jdk_home;

/// 有序的编译/链接参数列表，输出时以空格连接
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: Vec<String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flag: impl Into<String>) {
        self.flags.push(flag.into());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.flags
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flags.join(" "))
    }
}

impl FromIterator<String> for FlagSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}

fn include_flag(dir: &Path) -> String {
    format!("-I{}", dir.display())
}

/// 生成编译 JNI 代码所需的 `-I` 参数
///
/// 第一个参数总是 JDK 的 `include` 目录，之后是其中包含 `jni_md.h`
/// 的子目录，按目录列表顺序排列。
pub fn build_cflags<P: FilesystemProbe>(
    env: &EnvironmentSnapshot,
    probe: &P,
) -> AppResult<FlagSet> {
    let jdk_home = resolve_jdk_home(env, probe)?;
    let include_dir = probe.absolute(&jdk_home.join(layout::INCLUDE_DIR))?;

    if !probe.exists(&include_dir.join(layout::JNI_HEADER)) {
        return Err(AppError::missing_header(include_dir));
    }

    let mut flags = FlagSet::new();
    flags.push(include_flag(&include_dir));

    // 平台头文件目录名因平台而异，以 jni_md.h 为准
    for child in probe.list_dir(&include_dir)? {
        if probe.is_dir(&child) && probe.exists(&child.join(layout::JNI_MD_HEADER)) {
            debug!(dir = %child.display(), "found platform JNI headers");
            flags.push(include_flag(&probe.absolute(&child)?));
        }
    }

    Ok(flags)
}

/// 根据 `java.library.path` 生成 `-L` 参数
///
/// 不存在的目录直接跳过；同一个物理目录的不同写法按规范路径去重，
/// 保留第一次出现的位置。结果为空不是错误。
///
/// 空条目表示当前目录，但末尾的空条目会被丢弃，与 JVM 拆分该属性的方式一致。
pub fn build_ldflags<P: FilesystemProbe>(
    env: &EnvironmentSnapshot,
    probe: &P,
) -> AppResult<FlagSet> {
    let library_path = env.require(property::JAVA_LIBRARY_PATH)?;
    let separator = env.path_separator();

    let mut seen = IndexSet::new();
    for entry in split_path_list(library_path, separator) {
        let path = probe.absolute(Path::new(entry))?;
        if !probe.is_dir(&path) {
            trace!(entry, "skipping library path entry that is not a directory");
            continue;
        }

        let canonical = probe.canonicalize(&path)?;
        if !seen.insert(canonical) {
            trace!(entry, "skipping duplicate library path entry");
        }
    }

    Ok(seen
        .iter()
        .map(|dir| format!("-L{}", dir.display()))
        .collect())
}

/// 拆分路径列表：保留开头和中间的空条目，丢弃末尾的空条目；
/// 整个值为空时得到一个空条目
fn split_path_list(value: &str, separator: char) -> Vec<&str> {
    if value.is_empty() {
        return vec![""];
    }

    let mut entries: Vec<&str> = value.split(separator).collect();
    while entries.last().is_some_and(|entry| entry.is_empty()) {
        entries.pop();
    }
    entries
}
