//! Java `.properties` 文件解析
//!
//! 支持 `#`/`!` 注释、`=`/`:`/空白分隔符、行尾反斜杠续行以及
//! `\t \n \r \f \uXXXX` 转义，其他 `\x` 转义得到 `x` 本身（例如 `\:`）。

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::EnvironmentSnapshot;
use crate::error::{AppError, AppResult};

/// 从文件加载属性快照
pub fn load_properties_file(path: &Path) -> AppResult<EnvironmentSnapshot> {
    let content = fs::read_to_string(path)?;
    let properties = parse_properties(&content)?;
    tracing::debug!(
        path = %path.display(),
        count = properties.len(),
        "loaded properties file"
    );
    Ok(EnvironmentSnapshot::new(properties))
}

/// 解析属性文本，后出现的同名键覆盖前面的
pub fn parse_properties(content: &str) -> AppResult<BTreeMap<String, String>> {
    let mut properties = BTreeMap::new();
    let mut lines = content.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line_number = index + 1;
        let trimmed = line.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::from(trimmed);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        properties.insert(
            unescape(key, line_number)?,
            unescape(value, line_number)?,
        );
    }

    Ok(properties)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// 行尾有奇数个反斜杠时表示续行
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// 按第一个未转义的 `=`、`:` 或空白拆分键值
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(&['=', ':'][..]) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> AppResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| AppError::PropertiesParse {
                        line,
                        reason: format!("malformed \\uxxxx escape: \\u{hex}"),
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_dumped_system_properties() {
        let content = "\
#Sun Jan 16 10:00:00 PST 2011
java.home=/usr/lib/jvm/java-6-openjdk/jre
path.separator=\\:
java.library.path=/usr/lib/jvm/java-6-openjdk/jre/lib/amd64/server\\:/usr/lib/jni\\:/lib
java.vendor.url=http\\://java.sun.com/
sun.cpu.isalist=
";
        let props = parse_properties(content).unwrap();

        assert_eq!(props["java.home"], "/usr/lib/jvm/java-6-openjdk/jre");
        assert_eq!(props["path.separator"], ":");
        assert_eq!(
            props["java.library.path"],
            "/usr/lib/jvm/java-6-openjdk/jre/lib/amd64/server:/usr/lib/jni:/lib"
        );
        assert_eq!(props["java.vendor.url"], "http://java.sun.com/");
        assert_eq!(props["sun.cpu.isalist"], "");
    }

    #[test]
    fn test_separators_and_comments() {
        let content = "\
! comment
   # indented comment
a = 1
b:2
c 3
d   =   spaced value
key\\ with\\ spaces=x
";
        let props = parse_properties(content).unwrap();

        assert_eq!(props["a"], "1");
        assert_eq!(props["b"], "2");
        assert_eq!(props["c"], "3");
        assert_eq!(props["d"], "spaced value");
        assert_eq!(props["key with spaces"], "x");
        assert_eq!(props.len(), 5);
    }

    #[test]
    fn test_line_continuation() {
        let content = "list = one,\\\n       two,\\\n  three\nescaped = ends with backslash\\\\\nnext = ok\n";
        let props = parse_properties(content).unwrap();

        assert_eq!(props["list"], "one,two,three");
        assert_eq!(props["escaped"], "ends with backslash\\");
        assert_eq!(props["next"], "ok");
    }

    #[test]
    fn test_escapes() {
        let props = parse_properties("line.separator=\\n\ntab=a\\tb\nunicode=caf\\u00e9\n").unwrap();

        assert_eq!(props["line.separator"], "\n");
        assert_eq!(props["tab"], "a\tb");
        assert_eq!(props["unicode"], "café");
    }

    #[test]
    fn test_malformed_unicode_escape() {
        match parse_properties("ok=1\nbad=\\u12\n") {
            Err(AppError::PropertiesParse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jvm.properties");
        fs::write(&path, "os.arch=amd64\n").unwrap();

        let snapshot = load_properties_file(&path).unwrap();
        assert_eq!(snapshot.get("os.arch"), Some("amd64"));

        assert!(matches!(
            load_properties_file(&temp_dir.path().join("missing")),
            Err(AppError::Io(_))
        ));
    }
}
