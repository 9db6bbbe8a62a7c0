//! Declaration Reader
//!
//! Streams declaration lines out of a pre-filtered header. The filter that
//! produced the header leaves some noise behind (the include of the platform
//! header, the typedefs the declarations rely on, and functions returning
//! `const` pointers), which is dropped here.

use crate::error::BindgenError;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Line prefixes that never introduce a declaration
const NOISE_PREFIXES: &[&str] = &["#include", "typedef ", "const "];

/// Trim a raw header line, returning `None` for noise and blank lines
fn declaration_line(raw: &str) -> Option<&str> {
    let line = raw.trim();
    if line.is_empty() || NOISE_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return None;
    }
    Some(line)
}

/// Declaration lines of an in-memory header
pub fn declaration_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter_map(declaration_line)
}

/// Lazy, single-pass reader over a header file on disk
pub struct DeclarationReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl DeclarationReader {
    /// Open a header file. Failing to open it is fatal.
    pub fn open(path: &Path) -> Result<Self, BindgenError> {
        let file = File::open(path).map_err(|source| BindgenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(DeclarationReader {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for DeclarationReader {
    type Item = Result<String, BindgenError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.lines.next()? {
                Ok(raw) => raw,
                Err(source) => {
                    return Some(Err(BindgenError::Io {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };
            if let Some(line) = declaration_line(&raw) {
                return Some(Ok(line.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "#include <KHR/khrplatform.h>\n\
typedef unsigned int GLenum;\n\
  void glActiveTexture(GLenum texture);  \n\
\n\
const GLubyte* glGetString(GLenum name);\n\
GLboolean glIsEnabled(GLenum cap);\n";

    #[test]
    fn test_in_memory_lines_skip_noise() {
        let lines: Vec<&str> = declaration_lines(HEADER).collect();
        assert_eq!(
            lines,
            vec![
                "void glActiveTexture(GLenum texture);",
                "GLboolean glIsEnabled(GLenum cap);",
            ]
        );
    }

    #[test]
    fn test_file_reader_matches_in_memory() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();

        let reader = DeclarationReader::open(file.path()).unwrap();
        let lines: Vec<String> = reader.collect::<Result<_, _>>().unwrap();
        let expected: Vec<String> = declaration_lines(HEADER).map(String::from).collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = DeclarationReader::open(&dir.path().join("missing.h"));
        assert!(matches!(result, Err(BindgenError::Io { .. })));
    }
}
