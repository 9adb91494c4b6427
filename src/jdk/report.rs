use crate::core::constants::property;
use crate::core::{EnvironmentSnapshot, FilesystemProbe};
use crate::error::AppResult;
use crate::jdk::flags::{build_cflags, build_ldflags};
use crate::jdk::home::report_jdk_home;

/// 读取属性的原始值，不做任何转义或裁剪
pub fn report_property<'a>(env: &'a EnvironmentSnapshot, name: &str) -> AppResult<&'a str> {
    env.require(name)
}

/// 可查询的报告项，对应一个命令行参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Home,
    JdkHome,
    Arch,
    Version,
    VmVersion,
    SpecVersion,
    RuntimeVersion,
    OsVersion,
    OsName,
    DataModel,
    Endian,
    Language,
    CFlags,
    LdFlags,
}

impl Report {
    pub const ALL: [Report; 14] = [
        Report::Home,
        Report::JdkHome,
        Report::Arch,
        Report::Version,
        Report::VmVersion,
        Report::SpecVersion,
        Report::RuntimeVersion,
        Report::OsVersion,
        Report::OsName,
        Report::DataModel,
        Report::Endian,
        Report::Language,
        Report::CFlags,
        Report::LdFlags,
    ];

    /// 解析命令行参数：去掉前导 `-`，不区分大小写。无法识别时返回 `None`
    pub fn from_flag(flag: &str) -> Option<Self> {
        let name = flag.trim_start_matches('-').to_lowercase();
        Self::ALL.into_iter().find(|report| report.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Report::Home => "home",
            Report::JdkHome => "jdkhome",
            Report::Arch => "arch",
            Report::Version => "version",
            Report::VmVersion => "vmversion",
            Report::SpecVersion => "specversion",
            Report::RuntimeVersion => "runtimeversion",
            Report::OsVersion => "osversion",
            Report::OsName => "osname",
            Report::DataModel => "datamodel",
            Report::Endian => "endian",
            Report::Language => "language",
            Report::CFlags => "cflags",
            Report::LdFlags => "ldflags",
        }
    }

    /// 报告项的取值方式
    pub fn source(self) -> ReportSource {
        match self {
            Report::Home => ReportSource::Property(property::JAVA_HOME),
            Report::Arch => ReportSource::Property(property::OS_ARCH),
            Report::Version => ReportSource::Property(property::JAVA_VERSION),
            Report::VmVersion => ReportSource::Property(property::JAVA_VM_VERSION),
            Report::SpecVersion => ReportSource::Property(property::JAVA_SPECIFICATION_VERSION),
            Report::RuntimeVersion => ReportSource::Property(property::JAVA_RUNTIME_VERSION),
            Report::OsVersion => ReportSource::Property(property::OS_VERSION),
            Report::OsName => ReportSource::Property(property::OS_NAME),
            Report::DataModel => ReportSource::Property(property::DATA_MODEL),
            Report::Endian => ReportSource::Property(property::CPU_ENDIAN),
            Report::Language => ReportSource::Property(property::USER_LANGUAGE),
            Report::JdkHome => ReportSource::JdkHome,
            Report::CFlags => ReportSource::CFlags,
            Report::LdFlags => ReportSource::LdFlags,
        }
    }

    /// 计算报告内容（单行，不含换行符）
    pub fn evaluate<P: FilesystemProbe>(
        self,
        env: &EnvironmentSnapshot,
        probe: &P,
    ) -> AppResult<String> {
        match self.source() {
            ReportSource::Property(name) => report_property(env, name).map(str::to_string),
            ReportSource::JdkHome => report_jdk_home(env, probe),
            ReportSource::CFlags => Ok(build_cflags(env, probe)?.to_string()),
            ReportSource::LdFlags => Ok(build_ldflags(env, probe)?.to_string()),
        }
    }
}

/// 报告项的取值方式：直接读取属性，或者由属性和文件系统推导
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    Property(&'static str),
    JdkHome,
    CFlags,
    LdFlags,
}
