//! Binding tables and output settings
//!
//! The tables deciding how each declaration is bound ship with the tool as
//! an embedded TOML file (the GLES 3 profile). A user file can be layered on
//! top of it with [`TablesConfig::merge`]:
//!
//! ```toml
//! [functions]
//! in_out_vector = ["glGetIntegerv"]
//!
//! [output]
//! guard = "my_gl_bindings_h"
//! ```
//!
//! Lists are unioned with the defaults; output settings replace them.
//! The merged configuration is resolved once into a [`BindingProfile`], an
//! immutable set of lookups handed to the classifier and the code generator.

use crate::error::BindgenError;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Embedded default tables (OpenGL ES 3.0)
pub static DEFAULT_TABLES: &str = include_str!("gles3.toml");

/// Output settings as written in a tables file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Include guard macro
    pub guard: Option<String>,
    /// Name of the generated registry array
    pub registry: Option<String>,
    /// Comment block emitted after the guard
    pub header_comment: Option<String>,
    /// Include targets, written with their quotes or angle brackets
    pub includes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeTables {
    /// Types with no script representation; declarations using them are skipped
    pub unsupported: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FunctionTables {
    /// Functions never bound
    pub unsupported: Vec<String>,
    /// `(GLsizei n, GLuint* xs)` functions bound with `n` fixed to 1
    pub singularizable: Vec<String>,
    /// Functions whose final pointer parameter holds a single value
    pub in_out_vector: Vec<String>,
}

/// A binding tables file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablesConfig {
    /// Prefix every bound function carries (`gl`)
    pub api_prefix: Option<String>,
    pub output: OutputConfig,
    pub types: TypeTables,
    pub functions: FunctionTables,
}

impl TablesConfig {
    /// Parse tables from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, BindgenError> {
        toml::from_str(toml_str)
            .map_err(|e| BindgenError::Config(format!("Failed to parse tables: {}", e)))
    }

    /// Load the embedded default tables
    pub fn default_config() -> Result<Self, BindgenError> {
        Self::from_toml(DEFAULT_TABLES)
    }

    /// Read tables from a file
    pub fn from_file(path: &Path) -> Result<Self, BindgenError> {
        let content = fs::read_to_string(path).map_err(|source| BindgenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Merge another config into this one (user overrides)
    pub fn merge(&mut self, other: TablesConfig) {
        if other.api_prefix.is_some() {
            self.api_prefix = other.api_prefix;
        }

        let output = other.output;
        if output.guard.is_some() {
            self.output.guard = output.guard;
        }
        if output.registry.is_some() {
            self.output.registry = output.registry;
        }
        if output.header_comment.is_some() {
            self.output.header_comment = output.header_comment;
        }
        if output.includes.is_some() {
            self.output.includes = output.includes;
        }

        self.types.unsupported.extend(other.types.unsupported);
        let FunctionTables {
            unsupported,
            singularizable,
            in_out_vector,
        } = other.functions;
        self.functions.unsupported.extend(unsupported);
        self.functions.singularizable.extend(singularizable);
        self.functions.in_out_vector.extend(in_out_vector);
    }
}

/// Resolved output settings
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub guard: String,
    pub registry: String,
    pub header_comment: String,
    pub includes: Vec<String>,
}

/// Immutable lookup tables for one generation run
#[derive(Debug, Clone)]
pub struct BindingProfile {
    pub api_prefix: String,
    pub output: OutputSettings,
    unsupported_types: HashSet<String>,
    unsupported_functions: HashSet<String>,
    singularizable: HashSet<String>,
    in_out_vector: HashSet<String>,
}

impl BindingProfile {
    /// Resolve and validate a configuration
    pub fn from_config(config: TablesConfig) -> Result<Self, BindgenError> {
        let api_prefix = config
            .api_prefix
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| BindgenError::Config("api_prefix must be set".to_string()))?;

        let output = config.output;
        let guard = require_identifier("output.guard", output.guard)?;
        let registry = require_identifier("output.registry", output.registry)?;
        let header_comment = output.header_comment.unwrap_or_default();
        let header_comment = header_comment.trim_end().to_string();
        if !header_comment.is_empty()
            && !(header_comment.starts_with("/*") && header_comment.ends_with("*/"))
        {
            return Err(BindgenError::Config(
                "output.header_comment must be a /* ... */ block".to_string(),
            ));
        }
        let includes = output.includes.unwrap_or_default();
        for include in &includes {
            let quoted = include.len() > 2 && include.starts_with('"') && include.ends_with('"');
            let angled = include.len() > 2 && include.starts_with('<') && include.ends_with('>');
            if !quoted && !angled {
                return Err(BindgenError::Config(format!(
                    "include '{}' must be written as \"file.h\" or <file.h>",
                    include
                )));
            }
        }

        let profile = BindingProfile {
            api_prefix,
            output: OutputSettings {
                guard,
                registry,
                header_comment,
                includes,
            },
            unsupported_types: config.types.unsupported.into_iter().collect(),
            unsupported_functions: config.functions.unsupported.into_iter().collect(),
            singularizable: config.functions.singularizable.into_iter().collect(),
            in_out_vector: config.functions.in_out_vector.into_iter().collect(),
        };
        profile.warn_overlaps();

        debug!(
            unsupported_types = profile.unsupported_types.len(),
            unsupported_functions = profile.unsupported_functions.len(),
            singularizable = profile.singularizable.len(),
            in_out_vector = profile.in_out_vector.len(),
            "resolved binding tables"
        );
        Ok(profile)
    }

    /// The embedded GLES 3 profile
    pub fn gles3() -> Result<Self, BindgenError> {
        Self::from_config(TablesConfig::default_config()?)
    }

    /// Default tables, optionally merged with a user tables file
    pub fn load(tables: Option<&Path>) -> Result<Self, BindgenError> {
        let mut config = TablesConfig::default_config()?;
        if let Some(path) = tables {
            config.merge(TablesConfig::from_file(path)?);
        }
        Self::from_config(config)
    }

    pub fn is_unsupported_type(&self, type_name: &str) -> bool {
        self.unsupported_types.contains(type_name)
    }

    pub fn is_unsupported_function(&self, name: &str) -> bool {
        self.unsupported_functions.contains(name)
    }

    pub fn is_singularizable(&self, name: &str) -> bool {
        self.singularizable.contains(name)
    }

    pub fn is_in_out_vector(&self, name: &str) -> bool {
        self.in_out_vector.contains(name)
    }

    /// Functions listed in more than one table are resolved by precedence;
    /// point them out since the lower-precedence entry is dead.
    fn warn_overlaps(&self) {
        let mut shadowed: Vec<&String> = self
            .singularizable
            .iter()
            .chain(self.in_out_vector.iter())
            .filter(|name| self.unsupported_functions.contains(*name))
            .chain(
                self.singularizable
                    .iter()
                    .filter(|name| self.in_out_vector.contains(*name)),
            )
            .collect();
        shadowed.sort();
        shadowed.dedup();
        for name in shadowed {
            warn!(function = %name, "function appears in more than one binding table");
        }
    }
}

/// A required C identifier setting
fn require_identifier(key: &str, value: Option<String>) -> Result<String, BindgenError> {
    let value = value.ok_or_else(|| BindgenError::Config(format!("{} must be set", key)))?;
    let mut chars = value.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(BindgenError::Config(format!(
            "{} '{}' is not a valid C identifier",
            key, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_parse() {
        let profile = BindingProfile::gles3().unwrap();
        assert_eq!(profile.api_prefix, "gl");
        assert_eq!(profile.output.guard, "mtots_m_opengles3_gen_h");
        assert_eq!(profile.output.registry, "genFunctions");
        assert_eq!(profile.output.includes.len(), 3);
        assert!(profile.output.header_comment.starts_with("/*"));
        assert!(profile.is_unsupported_type("void*"));
        assert!(profile.is_unsupported_type("const GLchar*const*"));
        assert!(!profile.is_unsupported_type("const GLchar*"));
        assert!(profile.is_unsupported_function("glUnmapBuffer"));
        assert!(profile.is_singularizable("glGenTextures"));
        assert!(profile.is_in_out_vector("glGetProgramiv"));
        assert!(!profile.is_in_out_vector("glGetIntegerv"));
    }

    #[test]
    fn test_merge_unions_lists_and_overrides_output() {
        let mut config = TablesConfig::default_config().unwrap();
        let user = TablesConfig::from_toml(
            r#"
[functions]
in_out_vector = ["glGetIntegerv"]

[output]
guard = "my_gl_h"
"#,
        )
        .unwrap();
        config.merge(user);

        let profile = BindingProfile::from_config(config).unwrap();
        assert!(profile.is_in_out_vector("glGetIntegerv"));
        assert!(profile.is_in_out_vector("glGetProgramiv"));
        assert_eq!(profile.output.guard, "my_gl_h");
        assert_eq!(profile.output.registry, "genFunctions");
    }

    #[test]
    fn test_missing_prefix_rejected() {
        let config = TablesConfig::from_toml(
            r#"
[output]
guard = "g"
registry = "r"
"#,
        )
        .unwrap();
        let err = BindingProfile::from_config(config).unwrap_err();
        assert!(err.to_string().contains("api_prefix"));
    }

    #[test]
    fn test_invalid_guard_rejected() {
        let mut config = TablesConfig::default_config().unwrap();
        config.output.guard = Some("not-an-identifier".to_string());
        let err = BindingProfile::from_config(config).unwrap_err();
        assert!(err.to_string().contains("not a valid C identifier"));
    }

    #[test]
    fn test_invalid_include_rejected() {
        let mut config = TablesConfig::default_config().unwrap();
        config.output.includes = Some(vec!["gl3.h".to_string()]);
        let err = BindingProfile::from_config(config).unwrap_err();
        assert!(err.to_string().contains("gl3.h"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = TablesConfig::from_toml("[functions]\nsingular = [\"glGenBuffers\"]\n");
        assert!(matches!(result, Err(BindgenError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.toml");
        fs::write(&path, "[types]\nunsupported = [\"GLshort\"]\n").unwrap();

        let profile = BindingProfile::load(Some(&path)).unwrap();
        assert!(profile.is_unsupported_type("GLshort"));
        assert!(profile.is_unsupported_type("void*"));
    }
}
