//! Signature parser for filtered C declarations
//!
//! Accepts exactly one declaration per line:
//! ```text
//! <type> <name>(<type> <name>, <type> <name>, ...);
//! ```
//! Types are kept as written (`const GLchar*`, `GLuint*`); whether a type is
//! supported is decided later by the classifier and the marshaller.

use crate::error::BindgenError;
use std::fmt;

/// One declared argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// Type as written, possibly several words (`const GLchar*`)
    pub ty: String,
    pub name: String,
}

impl Arg {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Arg {
            ty: ty.into(),
            name: name.into(),
        }
    }

    /// Whether the argument is passed through a pointer
    pub fn is_pointer(&self) -> bool {
        self.ty.contains('*')
    }
}

/// A parsed function declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub return_type: String,
    /// Native function name, e.g. `glGenTextures`
    pub name: String,
    pub args: Vec<Arg>,
}

impl Declaration {
    /// All type names the declaration mentions, return type first
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.return_type.as_str()).chain(self.args.iter().map(|a| a.ty.as_str()))
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", arg.ty, arg.name)?;
        }
        write!(f, ");")
    }
}

/// Parse a single declaration line
///
/// A line that does not end in `);` means the upstream filter is broken, so
/// it is reported as a fatal error rather than skipped.
pub fn parse_declaration(line: &str) -> Result<Declaration, BindgenError> {
    let line = line.trim();
    let body = line
        .strip_suffix(");")
        .ok_or_else(|| BindgenError::malformed(line, "missing ');' terminator"))?;

    let (return_type, rest) = body
        .split_once(char::is_whitespace)
        .ok_or_else(|| BindgenError::malformed(line, "missing return type"))?;

    let (name, arg_text) = rest
        .trim_start()
        .split_once('(')
        .ok_or_else(|| BindgenError::malformed(line, "missing '('"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(BindgenError::malformed(line, "missing function name"));
    }
    if arg_text.contains(['(', ')']) {
        return Err(BindgenError::malformed(line, "nested parentheses"));
    }

    let args = if arg_text.trim().is_empty() {
        Vec::new()
    } else {
        arg_text
            .split(',')
            .map(|entry| parse_arg(line, entry))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Declaration {
        return_type: return_type.to_string(),
        name: name.to_string(),
        args,
    })
}

/// Split an argument on its last whitespace run: `const GLchar* name`
fn parse_arg(line: &str, entry: &str) -> Result<Arg, BindgenError> {
    let entry = entry.trim();
    let Some((ty, name)) = entry.rsplit_once(char::is_whitespace) else {
        return Err(BindgenError::malformed(line, format!("argument '{}' has no name", entry)));
    };
    Ok(Arg::new(ty.trim_end(), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let decl = parse_declaration("void glBindTexture(GLenum target, GLuint texture);").unwrap();
        assert_eq!(decl.return_type, "void");
        assert_eq!(decl.name, "glBindTexture");
        assert_eq!(
            decl.args,
            vec![Arg::new("GLenum", "target"), Arg::new("GLuint", "texture")]
        );
    }

    #[test]
    fn test_parse_no_args() {
        let decl = parse_declaration("GLuint glCreateProgram();").unwrap();
        assert_eq!(decl.return_type, "GLuint");
        assert_eq!(decl.name, "glCreateProgram");
        assert!(decl.args.is_empty());
    }

    #[test]
    fn test_parse_multi_word_types() {
        let line = "void glBindAttribLocation(GLuint program, GLuint index, const GLchar* name);";
        let decl = parse_declaration(line).unwrap();
        assert_eq!(decl.args[2], Arg::new("const GLchar*", "name"));
        assert!(decl.args[2].is_pointer());
        assert!(!decl.args[0].is_pointer());
    }

    #[test]
    fn test_parse_pointer_return_type() {
        let line = "void* glMapBufferRange(GLenum target, GLintptr offset, \
                    GLsizeiptr length, GLbitfield access);";
        let decl = parse_declaration(line).unwrap();
        assert_eq!(decl.return_type, "void*");
        assert_eq!(decl.args.len(), 4);
    }

    #[test]
    fn test_parse_extra_whitespace() {
        let line = "  void   glUniform1i( GLint  location ,  GLint v0 );";
        let decl = parse_declaration(line).unwrap();
        assert_eq!(decl.name, "glUniform1i");
        assert_eq!(
            decl.args,
            vec![Arg::new("GLint", "location"), Arg::new("GLint", "v0")]
        );
    }

    #[test]
    fn test_missing_terminator_is_fatal() {
        let result = parse_declaration("void glClear(GLbitfield mask)");
        assert!(matches!(
            result,
            Err(BindgenError::MalformedDeclaration { .. })
        ));
        assert!(result.unwrap_err().to_string().contains("');'"));
    }

    #[test]
    fn test_missing_paren_is_fatal() {
        let result = parse_declaration("void glClear);");
        assert!(result.unwrap_err().to_string().contains("missing '('"));
    }

    #[test]
    fn test_unnamed_argument_is_fatal() {
        let result = parse_declaration("void glFinish(void);");
        assert!(result.unwrap_err().to_string().contains("has no name"));
    }

    #[test]
    fn test_display_round_trips_text() {
        let line = "void glTexParameteriv(GLenum target, GLenum pname, const GLint* params);";
        assert_eq!(parse_declaration(line).unwrap().to_string(), line);
    }

    #[test]
    fn test_type_names_lists_return_first() {
        let line = "GLint glGetUniformLocation(GLuint program, const GLchar* name);";
        let decl = parse_declaration(line).unwrap();
        let names: Vec<&str> = decl.type_names().collect();
        assert_eq!(names, vec!["GLint", "GLuint", "const GLchar*"]);
    }
}
