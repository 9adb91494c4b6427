//! 查询 JDK 安装信息（JDK 目录、JNI 编译和链接参数、版本与平台属性），
//! 以类似 `pkg-config` 的方式输出，供 Makefile 和 autoconf 脚本使用。

// 核心模块
pub mod cli;
pub mod core;
pub mod error;
pub mod infrastructure;
pub mod jdk;
pub mod utils;

// 重新导出常用类型
pub use crate::core::{EnvironmentSnapshot, FilesystemProbe, MemoryFilesystem, RealFilesystem};
pub use error::{AppError, AppResult};
pub use jdk::{build_cflags, build_ldflags, report_property, resolve_jdk_home, FlagSet, Report};
