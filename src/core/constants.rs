//! 应用程序常量定义
//!
//! 本模块包含全局使用的常量：属性名、环境变量名和 JDK 目录布局中的固定文件名。

/// JVM 系统属性名
pub mod property {
    pub const JAVA_HOME: &str = "java.home";
    pub const JAVA_LIBRARY_PATH: &str = "java.library.path";
    pub const PATH_SEPARATOR: &str = "path.separator";
    pub const OS_ARCH: &str = "os.arch";
    pub const OS_NAME: &str = "os.name";
    pub const OS_VERSION: &str = "os.version";
    pub const JAVA_VERSION: &str = "java.version";
    pub const JAVA_VM_VERSION: &str = "java.vm.version";
    pub const JAVA_SPECIFICATION_VERSION: &str = "java.specification.version";
    pub const JAVA_RUNTIME_VERSION: &str = "java.runtime.version";
    pub const DATA_MODEL: &str = "sun.arch.data.model";
    pub const CPU_ENDIAN: &str = "sun.cpu.endian";
    pub const USER_LANGUAGE: &str = "user.language";
}

/// JDK 目录布局
pub mod layout {
    /// JDK 头文件目录
    pub const INCLUDE_DIR: &str = "include";
    /// 嵌套在 JDK 内部的 JRE 目录名
    pub const NESTED_JRE_DIR: &str = "jre";
    pub const JNI_HEADER: &str = "jni.h";
    /// 平台相关头文件，所在子目录即平台头文件目录
    pub const JNI_MD_HEADER: &str = "jni_md.h";
}

/// 环境变量
pub mod env {
    /// 指定属性文件，替代启动 JVM 获取属性
    pub const PROPERTIES_FILE: &str = "JAVA_CONFIG_PROPERTIES";
    /// 指定配置文件路径
    pub const CONFIG_FILE: &str = "JAVA_CONFIG_FILE";
    /// 日志过滤规则（EnvFilter 语法）
    pub const LOG_FILTER: &str = "JAVA_CONFIG_LOG";
    pub const JAVA_HOME: &str = "JAVA_HOME";
}

/// 日志相关常量
pub mod log {
    /// 默认日志级别
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

/// 进程退出码
pub mod exit_code {
    pub const USAGE: i32 = 1;
    pub const FAILURE: i32 = 2;
}
