use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::utils::paths;

/// 文件系统探测能力
///
/// 核心逻辑只通过这个 trait 访问文件系统，测试可以换成内存中的目录树。
pub trait FilesystemProbe {
    /// 路径是否存在（跟随符号链接）
    fn exists(&self, path: &Path) -> bool;

    /// 路径是否是目录（跟随符号链接）
    fn is_dir(&self, path: &Path) -> bool;

    /// 列出目录的直接子项，保持文件系统给出的顺序
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// 转换为绝对路径，不解析符号链接
    fn absolute(&self, path: &Path) -> io::Result<PathBuf>;

    /// 规范化路径：解析符号链接以及 `.`、`..`
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// 真实文件系统
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl FilesystemProbe for RealFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        paths::absolute(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path).map(paths::strip_verbatim_prefix)
    }
}

/// 符号链接最大跳转次数，超过视为循环
const MAX_SYMLINK_HOPS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File,
    Symlink(PathBuf),
}

/// 内存中的文件系统
///
/// 路径必须是绝对路径。添加条目时会自动创建缺失的上级目录。
/// 目录列表按路径排序返回。
///
/// ```
/// use java_config::core::{FilesystemProbe, MemoryFilesystem};
/// use std::path::Path;
///
/// let mut fs = MemoryFilesystem::new();
/// fs.add_file("/opt/jdk/include/jni.h")
///     .add_symlink("/usr/lib/jvm/default", "/opt/jdk");
///
/// assert!(fs.is_dir(Path::new("/usr/lib/jvm/default/include")));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    nodes: BTreeMap<PathBuf, Node>,
    current_dir: PathBuf,
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        let root = PathBuf::from(std::path::MAIN_SEPARATOR_STR);
        let mut nodes = BTreeMap::new();
        nodes.insert(root.clone(), Node::Dir);
        Self {
            nodes,
            current_dir: root,
        }
    }

    /// 设置相对路径使用的工作目录
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = dir.into();
        self
    }

    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.insert(path.as_ref(), Node::Dir)
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.insert(path.as_ref(), Node::File)
    }

    pub fn add_symlink(&mut self, path: impl AsRef<Path>, target: impl Into<PathBuf>) -> &mut Self {
        self.insert(path.as_ref(), Node::Symlink(target.into()))
    }

    fn insert(&mut self, path: &Path, node: Node) -> &mut Self {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
        self.nodes.insert(path.to_path_buf(), node);
        self
    }

    /// 解析出存在的节点对应的规范路径
    fn resolve(&self, path: &Path, hops: usize) -> Option<PathBuf> {
        if hops > MAX_SYMLINK_HOPS {
            return None;
        }

        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current_dir.join(path)
        };

        let mut resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::Normal(name) => {
                    resolved.push(name);
                    if let Node::Symlink(target) = self.nodes.get(&resolved)? {
                        let base = resolved
                            .parent()
                            .map(Path::to_path_buf)
                            .unwrap_or_default();
                        resolved = self.resolve(&base.join(target), hops + 1)?;
                    }
                }
            }
        }

        self.nodes.contains_key(&resolved).then_some(resolved)
    }

    fn node(&self, path: &Path) -> Option<(PathBuf, &Node)> {
        let resolved = self.resolve(path, 0)?;
        let node = self.nodes.get(&resolved)?;
        Some((resolved, node))
    }
}

impl FilesystemProbe for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.node(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(path), Some((_, Node::Dir)))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let resolved = match self.node(path) {
            Some((resolved, Node::Dir)) => resolved,
            Some(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("not a directory: {}", path.display()),
                ))
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", path.display()),
                ))
            }
        };

        Ok(self
            .nodes
            .keys()
            .filter(|child| child.parent() == Some(resolved.as_path()))
            .filter_map(|child| child.file_name())
            .map(|name| path.join(name))
            .collect())
    }

    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.current_dir.join(path))
        }
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.resolve(path, 0).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file or directory: {}", path.display()),
            )
        })
    }
}
