use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
///
/// 前三个变体是查询 JDK 信息时的配置问题，其余来自配置文件、属性文件和 JVM 进程。
/// 所有错误对本次调用都是终止性的。
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Expected system property {name} but it was not found")]
    MissingProperty { name: String },

    #[error("Could not determine JDK location")]
    JdkNotFound,

    #[error("Could not find jni.h in JDK include directory {}", path.display())]
    MissingHeader { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Could not find a java executable; set JAVA_HOME or configure `java` in the config file")]
    JavaNotFound,

    #[error("Failed to query JVM {}: {reason}", java.display())]
    JvmLaunch { java: PathBuf, reason: String },

    #[error("Malformed properties file at line {line}: {reason}")]
    PropertiesParse { line: usize, reason: String },
}

/// 应用程序 Result 类型
pub type AppResult<T> = Result<T, AppError>;

/// 便捷的错误创建函数
impl AppError {
    pub fn missing_property(name: &str) -> Self {
        Self::MissingProperty {
            name: name.to_string(),
        }
    }

    pub fn missing_header(include_dir: impl Into<PathBuf>) -> Self {
        Self::MissingHeader {
            path: include_dir.into(),
        }
    }

    pub fn config_load_failed(path: &str, reason: &str) -> Self {
        Self::Config {
            message: format!("cannot load {}: {}", path, reason),
        }
    }

    pub fn jvm_launch_failed(java: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::JvmLaunch {
            java: java.into(),
            reason: reason.into(),
        }
    }
}
