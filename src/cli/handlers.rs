use crate::cli::output::OutputBuffer;
use crate::core::{EnvironmentSnapshot, FilesystemProbe, RealFilesystem};
use crate::error::AppResult;
use crate::infrastructure::{Config, SnapshotSource};
use crate::jdk::Report;

/// 命令处理器
pub struct CommandHandler {
    config: Config,
}

impl CommandHandler {
    /// 加载配置并创建处理器
    pub fn new() -> AppResult<Self> {
        Ok(Self::with_config(Config::load()?))
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// 处理报告请求
    ///
    /// 没有可识别的报告项时不加载快照，直接返回空输出。
    pub fn handle(&self, reports: &[Report]) -> AppResult<OutputBuffer> {
        if reports.is_empty() {
            return Ok(OutputBuffer::new());
        }

        let source = SnapshotSource::select(&self.config);
        let snapshot = source.load(&self.config)?;
        run_reports(&snapshot, &RealFilesystem, reports)
    }
}

/// 依次计算报告项，遇到第一个错误即停止
pub fn run_reports<P: FilesystemProbe>(
    snapshot: &EnvironmentSnapshot,
    probe: &P,
    reports: &[Report],
) -> AppResult<OutputBuffer> {
    let mut output = OutputBuffer::new();
    for report in reports {
        let line = report.evaluate(snapshot, probe)?;
        output.push_line(&line);
    }
    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cli::commands::parse_reports;
    use crate::core::MemoryFilesystem;
    use crate::error::AppError;

    fn jdk_fixture() -> (EnvironmentSnapshot, MemoryFilesystem) {
        let mut fs = MemoryFilesystem::new();
        fs.add_file("/usr/lib/jvm/java-8/include/jni.h")
            .add_file("/usr/lib/jvm/java-8/include/linux/jni_md.h")
            .add_dir("/usr/lib/jvm/java-8/jre/lib/amd64/server")
            .add_dir("/usr/lib");

        let snapshot = [
            ("java.home", "/usr/lib/jvm/java-8/jre"),
            (
                "java.library.path",
                "/usr/lib/jvm/java-8/jre/lib/amd64/server:/usr/java/packages/lib/amd64:/usr/lib:/usr/lib",
            ),
            ("path.separator", ":"),
            ("os.arch", "amd64"),
        ]
        .into_iter()
        .collect();

        (snapshot, fs)
    }

    #[test]
    fn test_cflags_and_ldflags_in_order() {
        let (snapshot, fs) = jdk_fixture();
        let reports = parse_reports(&["cflags", "--unknown", "ldflags"]);

        let output = run_reports(&snapshot, &fs, &reports).unwrap();
        assert_eq!(
            output.as_str(),
            "-I/usr/lib/jvm/java-8/include -I/usr/lib/jvm/java-8/include/linux\n\
             -L/usr/lib/jvm/java-8/jre/lib/amd64/server -L/usr/lib\n"
        );
    }

    #[test]
    fn test_property_and_home_reports() {
        let (snapshot, fs) = jdk_fixture();
        let reports = parse_reports(&["--HOME", "-jdkhome", "arch"]);

        let output = run_reports(&snapshot, &fs, &reports).unwrap();
        assert_eq!(
            output.as_str(),
            "/usr/lib/jvm/java-8/jre\n/usr/lib/jvm/java-8\namd64\n"
        );
    }

    #[test]
    fn test_late_failure_discards_output() {
        let (snapshot, fs) = jdk_fixture();
        let reports = parse_reports(&["arch", "osname"]);

        match run_reports(&snapshot, &fs, &reports) {
            Err(AppError::MissingProperty { name }) => assert_eq!(name, "os.name"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_no_reports_skip_snapshot_loading() {
        let handler = CommandHandler::with_config(Config {
            java: Some("/nonexistent/bin/java".into()),
            ..Config::default()
        });

        let output = handler.handle(&[]).unwrap();
        assert!(output.is_empty());
    }
}
