//! Declaration classifier
//!
//! Sorts each declaration into exactly one binding category. Checks run in
//! a fixed precedence:
//!
//! 1. listed as unsupported -> skipped
//! 2. listed as in/out vector -> [`Category::InOutVector`]
//! 3. listed as singularizable -> [`Category::Singularized`]
//! 4. mentions an unsupported type -> skipped
//! 5. otherwise -> [`Category::Normal`]
//!
//! The listed categories come with shape requirements. A listed function that
//! does not meet them means the tables and the header disagree, which is fatal.

use crate::config::BindingProfile;
use crate::error::BindgenError;
use crate::marshal::PointerScalar;
use crate::naming::Direction;
use crate::parser::Declaration;
use tracing::debug;

/// Count parameter every singularizable function starts with
const COUNT_TYPE: &str = "GLsizei";
const COUNT_NAME: &str = "n";

/// Why a declaration is left out of the bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Listed in the unsupported functions table
    UnsupportedFunction,
    /// Return or argument type is in the unsupported types table
    UnsupportedType(String),
}

/// How a declaration is bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Every argument marshalled, the return value wrapped
    Normal,
    /// `f(GLsizei n, GLuint* xs)` called with `n = 1`
    Singularized(Direction),
    /// Final pointer parameter carries a single value
    InOutVector(Direction),
    Skipped(SkipReason),
}

impl Category {
    /// Short label used in summaries and logs
    pub fn label(&self) -> &'static str {
        match self {
            Category::Normal => "normal",
            Category::Singularized(_) => "singularized",
            Category::InOutVector(_) => "in/out vector",
            Category::Skipped(_) => "skipped",
        }
    }
}

/// Assigns categories using a fixed set of binding tables
pub struct Classifier<'a> {
    profile: &'a BindingProfile,
}

impl<'a> Classifier<'a> {
    pub fn new(profile: &'a BindingProfile) -> Self {
        Classifier { profile }
    }

    pub fn classify(&self, decl: &Declaration) -> Result<Category, BindgenError> {
        let category = if self.profile.is_unsupported_function(&decl.name) {
            Category::Skipped(SkipReason::UnsupportedFunction)
        } else if self.profile.is_in_out_vector(&decl.name) {
            Category::InOutVector(check_in_out_vector(decl)?)
        } else if self.profile.is_singularizable(&decl.name) {
            Category::Singularized(check_singularizable(decl)?)
        } else if let Some(ty) = decl
            .type_names()
            .find(|ty| self.profile.is_unsupported_type(ty))
        {
            Category::Skipped(SkipReason::UnsupportedType(ty.to_string()))
        } else {
            Category::Normal
        };

        debug!(function = %decl.name, category = category.label(), "classified");
        Ok(category)
    }
}

/// Shape of an in/out vector function: scalar leading arguments, then a
/// `GLint*` or `GLfloat*` (possibly `const`), returning `void`
fn check_in_out_vector(decl: &Declaration) -> Result<Direction, BindgenError> {
    let (last, leading) = decl.args.split_last().ok_or_else(|| {
        BindgenError::precondition(&decl.name, "expected a trailing pointer parameter")
    })?;

    match PointerScalar::of(&last.ty) {
        Some(PointerScalar::Int | PointerScalar::Float) => {}
        _ => {
            return Err(BindgenError::precondition(
                &decl.name,
                format!(
                    "final parameter '{} {}' is not a GLint/GLfloat pointer",
                    last.ty, last.name
                ),
            ));
        }
    }
    if let Some(arg) = leading.iter().find(|a| a.is_pointer()) {
        return Err(BindgenError::precondition(
            &decl.name,
            format!("leading parameter '{} {}' is a pointer", arg.ty, arg.name),
        ));
    }
    if decl.return_type != "void" {
        return Err(BindgenError::precondition(
            &decl.name,
            format!("return type '{}' is not void", decl.return_type),
        ));
    }

    Ok(Direction::of_pointer(&last.ty))
}

/// Shape of a singularizable function: `(GLsizei n, [const] GLuint* xs)`
fn check_singularizable(decl: &Declaration) -> Result<Direction, BindgenError> {
    let [count, values] = decl.args.as_slice() else {
        return Err(BindgenError::precondition(
            &decl.name,
            format!("expected 2 parameters, found {}", decl.args.len()),
        ));
    };

    if count.ty != COUNT_TYPE || count.name != COUNT_NAME {
        return Err(BindgenError::precondition(
            &decl.name,
            format!(
                "first parameter is '{} {}', expected '{} {}'",
                count.ty, count.name, COUNT_TYPE, COUNT_NAME
            ),
        ));
    }
    if PointerScalar::of(&values.ty) != Some(PointerScalar::Uint) {
        return Err(BindgenError::precondition(
            &decl.name,
            format!("second parameter '{}' is not a GLuint pointer", values.ty),
        ));
    }

    Ok(Direction::of_pointer(&values.ty))
}
