//! Naming policy for generated bindings
//!
//! All string conventions inherited from the GL naming style live here:
//!
//! - `glGenTextures` has base name `GenTextures` (API prefix stripped) and is
//!   exposed to scripts as `genTextures` (first letter lower-cased).
//! - Singularized functions drop one trailing `s` from both names:
//!   `GenTexture` / `genTexture`.
//! - A pointer parameter declared `const` feeds a value *into* the call
//!   ([`Direction::Consumes`]); a non-`const` one is written by the call and
//!   becomes the binding's result ([`Direction::Produces`]).
//! - Generated C identifiers are `impl<Base>`, `args<Base>` and `func<Base>`.
//!
//! Generated call sites depend on these exact names.

use crate::error::BindgenError;

/// Whether a pointer parameter yields a result or receives a caller value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Non-`const` pointer: the call writes a value that becomes the result
    Produces,
    /// `const` pointer: a caller-supplied value is passed by address
    Consumes,
}

impl Direction {
    /// Direction implied by a pointer parameter's declared type
    pub fn of_pointer(type_name: &str) -> Self {
        if type_name.starts_with("const ") {
            Direction::Consumes
        } else {
            Direction::Produces
        }
    }
}

/// Names derived from a native function name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingNames {
    /// Suffix shared by the generated C identifiers, e.g. `GenTexture`
    pub base: String,
    /// Name the scripting runtime sees, e.g. `genTexture`
    pub exposed: String,
}

impl BindingNames {
    /// Derive names by stripping the API prefix and lower-casing the first letter
    pub fn derive(function: &str, prefix: &str) -> Result<Self, BindgenError> {
        let base = function
            .strip_prefix(prefix)
            .ok_or_else(|| BindgenError::MissingPrefix {
                function: function.to_string(),
                prefix: prefix.to_string(),
            })?;

        let mut chars = base.chars();
        let first = chars
            .next()
            .ok_or_else(|| BindgenError::malformed(function, "nothing after the API prefix"))?;
        let exposed: String = first.to_lowercase().chain(chars).collect();

        Ok(BindingNames {
            base: base.to_string(),
            exposed,
        })
    }

    /// Drop the plural `s` from both names (`GenTextures` -> `GenTexture`)
    pub fn singularize(&self, function: &str) -> Result<Self, BindgenError> {
        let Some(base) = self.base.strip_suffix('s') else {
            return Err(BindgenError::precondition(
                function,
                format!("'{}' is not plural", self.base),
            ));
        };
        let Some(exposed) = self.exposed.strip_suffix('s') else {
            return Err(BindgenError::precondition(
                function,
                format!("'{}' is not plural", self.exposed),
            ));
        };
        Ok(BindingNames {
            base: base.to_string(),
            exposed: exposed.to_string(),
        })
    }

    /// Name of the generated implementation function
    pub fn impl_fn(&self) -> String {
        format!("impl{}", self.base)
    }

    /// Name of the generated argument-pattern table
    pub fn pattern_table(&self) -> String {
        format!("args{}", self.base)
    }

    /// Name of the generated function descriptor
    pub fn descriptor(&self) -> String {
        format!("func{}", self.base)
    }
}
