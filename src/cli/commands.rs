use clap::Parser;

use crate::jdk::Report;

/// java-config CLI 应用程序
///
/// 所有参数都按原样收集：`--version` 等也是报告项，而不是 clap 内置的参数。
#[derive(Parser, Debug)]
#[command(name = "java-config")]
#[command(about = "Report JDK locations and JNI compiler/linker flags", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// 报告项，例如 `cflags`、`--ldflags`、`-jdkhome`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

impl Cli {
    /// 解析出可识别的报告项，无法识别的参数直接忽略
    pub fn reports(&self) -> Vec<Report> {
        parse_reports(&self.flags)
    }
}

/// 解析报告项，保持参数顺序
pub fn parse_reports<S: AsRef<str>>(flags: &[S]) -> Vec<Report> {
    flags
        .iter()
        .filter_map(|flag| {
            let report = Report::from_flag(flag.as_ref());
            if report.is_none() {
                tracing::debug!(flag = flag.as_ref(), "ignoring unrecognized flag");
            }
            report
        })
        .collect()
}
