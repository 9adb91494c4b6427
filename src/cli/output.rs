use std::io::{self, Write};

/// 报告输出缓冲区
///
/// 所有报告成功后才写到 stdout，避免失败时留下部分输出。
#[derive(Debug, Default)]
pub struct OutputBuffer {
    buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一行
    pub fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// 一次性写出
    pub fn flush_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.buffer.as_bytes())?;
        out.flush()
    }
}

/// 用法说明
pub fn usage_text() -> String {
    format!(
        "java-config version {}\n{}",
        env!("CARGO_PKG_VERSION"),
        include_str!("../usage.txt")
    )
}
