//! Marshalling rules between script values and native GL values
//!
//! The table is closed: a type without an entry here is a generator bug (or a
//! gap in the binding tables), never a declaration to skip.

use crate::error::BindgenError;

/// Argument-pattern tag checked by the runtime before calling a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTag {
    Bool,
    Number,
    String,
}

impl PatternTag {
    /// Runtime constant naming this pattern
    pub fn constant(self) -> &'static str {
        match self {
            PatternTag::Bool => "TYPE_PATTERN_BOOL",
            PatternTag::Number => "TYPE_PATTERN_NUMBER",
            PatternTag::String => "TYPE_PATTERN_STRING",
        }
    }
}

/// Native representation a script argument is unpacked into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostType {
    /// `GLboolean`
    Bool,
    /// `GLenum`, `GLuint`, `GLbitfield`
    U32,
    /// `GLint`, `GLsizei`
    I32,
    /// `GLsizeiptr`
    Size,
    /// `GLintptr`
    Long,
    /// `GLfloat`, narrowed from the script's double
    Float,
    /// `const GLchar*`, borrowed from the script string without copying
    Str,
    /// `PtrOffset`, a byte offset GL insists on taking as a pointer
    PtrOffset,
}

impl HostType {
    /// Look up the marshalling rule for a declared argument type
    pub fn of(type_name: &str) -> Option<Self> {
        let host = match type_name {
            "GLboolean" => HostType::Bool,
            "GLenum" | "GLuint" | "GLbitfield" => HostType::U32,
            "GLint" | "GLsizei" => HostType::I32,
            "GLsizeiptr" => HostType::Size,
            "GLintptr" => HostType::Long,
            "GLfloat" => HostType::Float,
            "const GLchar*" => HostType::Str,
            "PtrOffset" => HostType::PtrOffset,
            _ => return None,
        };
        Some(host)
    }

    /// Like [`HostType::of`], but an unknown type is fatal
    pub fn require(type_name: &str, function: &str) -> Result<Self, BindgenError> {
        Self::of(type_name).ok_or_else(|| BindgenError::UnrecognizedType {
            type_name: type_name.to_string(),
            function: function.to_string(),
        })
    }

    pub fn pattern(self) -> PatternTag {
        match self {
            HostType::Bool => PatternTag::Bool,
            HostType::Str => PatternTag::String,
            HostType::U32
            | HostType::I32
            | HostType::Size
            | HostType::Long
            | HostType::Float
            | HostType::PtrOffset => PatternTag::Number,
        }
    }

    /// Local declaration initialised from `args[index]`
    pub fn init_local(self, name: &str, index: usize) -> String {
        match self {
            HostType::Bool => format!("ubool {} = AS_BOOL(args[{}]);", name, index),
            HostType::U32 => format!("u32 {} = AS_U32(args[{}]);", name, index),
            HostType::I32 => format!("i32 {} = AS_I32(args[{}]);", name, index),
            HostType::Size => format!("size_t {} = (size_t)AS_NUMBER(args[{}]);", name, index),
            HostType::Long => format!("long {} = (long)AS_NUMBER(args[{}]);", name, index),
            HostType::Float => format!("float {} = (float)AS_NUMBER(args[{}]);", name, index),
            HostType::Str => format!("const char *{} = AS_STRING(args[{}])->chars;", name, index),
            HostType::PtrOffset => format!(
                "const void *{} = (void*)(size_t)AS_NUMBER(args[{}]);",
                name, index
            ),
        }
    }
}

/// How a native return value becomes the binding's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnWrap {
    /// `void`: the call is a plain statement
    Discard,
    /// `GLboolean`
    Bool,
    /// `GLenum`, `GLuint`, `GLint`
    Number,
}

impl ReturnWrap {
    pub fn of(type_name: &str, function: &str) -> Result<Self, BindgenError> {
        match type_name {
            "void" => Ok(ReturnWrap::Discard),
            "GLboolean" => Ok(ReturnWrap::Bool),
            "GLenum" | "GLuint" | "GLint" => Ok(ReturnWrap::Number),
            _ => Err(BindgenError::UnrecognizedReturnType {
                type_name: type_name.to_string(),
                function: function.to_string(),
            }),
        }
    }

    /// Statement issuing `call` and storing its result
    pub fn statement(self, call: &str) -> String {
        match self {
            ReturnWrap::Discard => format!("{};", call),
            ReturnWrap::Bool => format!("*out = BOOL_VAL({});", call),
            ReturnWrap::Number => format!("*out = NUMBER_VAL({});", call),
        }
    }
}

/// Scalar behind a single-element pointer parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerScalar {
    Int,
    Float,
    Uint,
}

impl PointerScalar {
    /// Recognise `GLint*`, `GLfloat*`, `GLuint*` and their `const` forms
    pub fn of(type_name: &str) -> Option<Self> {
        let bare = type_name.strip_prefix("const ").unwrap_or(type_name);
        match bare {
            "GLint*" => Some(PointerScalar::Int),
            "GLfloat*" => Some(PointerScalar::Float),
            "GLuint*" => Some(PointerScalar::Uint),
            _ => None,
        }
    }

    /// GL type of the pointee
    pub fn gl_type(self) -> &'static str {
        match self {
            PointerScalar::Int => "GLint",
            PointerScalar::Float => "GLfloat",
            PointerScalar::Uint => "GLuint",
        }
    }

    /// Expression reading the pointee from `args[index]`
    pub fn read_arg(self, index: usize) -> String {
        match self {
            PointerScalar::Int => format!("(GLint)AS_NUMBER(args[{}])", index),
            PointerScalar::Float => format!("(GLfloat)AS_NUMBER(args[{}])", index),
            PointerScalar::Uint => format!("AS_U32(args[{}])", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_categories_split() {
        assert_eq!(HostType::of("GLenum"), Some(HostType::U32));
        assert_eq!(HostType::of("GLbitfield"), Some(HostType::U32));
        assert_eq!(HostType::of("GLsizei"), Some(HostType::I32));
        assert_eq!(HostType::of("GLsizeiptr"), Some(HostType::Size));
        assert_eq!(HostType::of("GLintptr"), Some(HostType::Long));
    }

    #[test]
    fn test_patterns() {
        assert_eq!(HostType::Bool.pattern(), PatternTag::Bool);
        assert_eq!(HostType::Str.pattern(), PatternTag::String);
        assert_eq!(HostType::PtrOffset.pattern(), PatternTag::Number);
        assert_eq!(HostType::Float.pattern(), PatternTag::Number);
        assert_eq!(PatternTag::Number.constant(), "TYPE_PATTERN_NUMBER");
    }

    #[test]
    fn test_init_local() {
        assert_eq!(
            HostType::Float.init_local("red", 0),
            "float red = (float)AS_NUMBER(args[0]);"
        );
        assert_eq!(
            HostType::Str.init_local("name", 2),
            "const char *name = AS_STRING(args[2])->chars;"
        );
        assert_eq!(
            HostType::PtrOffset.init_local("indices", 3),
            "const void *indices = (void*)(size_t)AS_NUMBER(args[3]);"
        );
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let err = HostType::require("GLshort", "glFoo").unwrap_err();
        assert!(matches!(err, BindgenError::UnrecognizedType { .. }));
        assert!(HostType::of("GLuint*").is_none());
    }

    #[test]
    fn test_return_wrap() {
        let is_enabled = ReturnWrap::of("GLboolean", "glIsEnabled").unwrap();
        assert_eq!(
            is_enabled.statement("glIsEnabled(cap)"),
            "*out = BOOL_VAL(glIsEnabled(cap));"
        );
        let flush = ReturnWrap::of("void", "glFlush").unwrap();
        assert_eq!(flush.statement("glFlush()"), "glFlush();");
        assert!(matches!(
            ReturnWrap::of("GLsizei", "glFoo"),
            Err(BindgenError::UnrecognizedReturnType { .. })
        ));
    }

    #[test]
    fn test_pointer_scalar_forms() {
        assert_eq!(PointerScalar::of("GLint*"), Some(PointerScalar::Int));
        assert_eq!(
            PointerScalar::of("const GLfloat*"),
            Some(PointerScalar::Float)
        );
        assert_eq!(
            PointerScalar::of("const GLuint*"),
            Some(PointerScalar::Uint)
        );
        assert_eq!(PointerScalar::of("GLenum*"), None);
    }
}
