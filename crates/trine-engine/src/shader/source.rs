use std::path::Path;

/// Reads a shader source file as text.
///
/// Every line is appended prefixed with `\n`, so a non-empty result starts
/// with a newline and carries no trailing one. GLSL ignores both.
///
/// Bytes that are not valid UTF-8 (a Latin-1 comment, say) become U+FFFD
/// instead of cutting the file short. A file that cannot be read yields an
/// empty source; the compiler then reports the problem through its info log.
pub fn read_source(path: &Path) -> String {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("cannot read shader source {}: {e}", path.display());
            return String::new();
        }
    };

    let text = String::from_utf8_lossy(&bytes);

    let mut source = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        source.push('\n');
        source.push_str(line);
    }

    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn each_line_is_prefixed_with_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#version 330 core\nvoid main() {{}}\n").unwrap();

        let source = read_source(file.path());
        assert_eq!(source, "\n#version 330 core\nvoid main() {}");
    }

    #[test]
    fn crlf_line_endings_are_normalized() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\r\nb\r\n").unwrap();

        assert_eq!(read_source(file.path()), "\na\nb");
    }

    #[test]
    fn invalid_utf8_keeps_the_rest_of_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"#version 330 core\n// caf\xe9\nvoid main() {}\n").unwrap();

        let source = read_source(file.path());
        assert_eq!(source, "\n#version 330 core\n// caf\u{FFFD}\nvoid main() {}");
    }

    #[test]
    fn empty_file_gives_empty_source() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(read_source(file.path()), "");
    }

    #[test]
    fn missing_file_gives_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = read_source(&dir.path().join("Missing.vertexshader"));
        assert!(source.is_empty());
    }
}
