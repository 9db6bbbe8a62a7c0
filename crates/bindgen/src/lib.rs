//! GLES Binding Generator
//!
//! Generates the native-function bindings of the mtots `opengles3` module
//! from a pre-filtered OpenGL ES 3 header.
//!
//! # Pipeline
//!
//! ```text
//! header -> reader -> parser -> classifier -> codegen -> header source
//! ```
//!
//! - [`reader`] yields declaration lines, dropping includes and typedefs
//! - [`parser`] splits a line into return type, name and arguments
//! - [`classify`] picks one binding category per declaration
//! - [`marshal`] knows how each GL type crosses the script boundary
//! - [`codegen`] emits implementation, pattern table and descriptor per
//!   binding, then the registry array
//!
//! The binding tables driving classification live in [`config`].
//!
//! ```rust,ignore
//! use glesgen::{BindingProfile, generate_file_with};
//!
//! let profile = BindingProfile::gles3()?;
//! let generated = generate_file_with(Path::new("filtered.h"), &profile, |skipped| {
//!     eprintln!("{}", skipped);
//! })?;
//! print!("{}", generated.source);
//! ```

pub mod classify;
pub mod codegen;
pub mod config;
pub mod error;
pub mod marshal;
pub mod naming;
pub mod parser;
pub mod reader;

pub use classify::{Category, Classifier, SkipReason};
pub use codegen::{Binding, CodeGen, Generated, SkippedDeclaration, Summary};
pub use config::{BindingProfile, TablesConfig};
pub use error::BindgenError;
pub use parser::{Arg, Declaration, parse_declaration};
pub use reader::{DeclarationReader, declaration_lines};

use std::path::Path;

/// Generate bindings for a header file
pub fn generate_file(path: &Path, profile: &BindingProfile) -> Result<Generated, BindgenError> {
    generate_file_with(path, profile, |_| {})
}

/// Generate bindings for a header file, handing each skipped declaration to
/// `on_skip` as soon as it is classified
///
/// Notices already delivered stay delivered when a later declaration aborts
/// the run.
pub fn generate_file_with(
    path: &Path,
    profile: &BindingProfile,
    mut on_skip: impl FnMut(&SkippedDeclaration),
) -> Result<Generated, BindgenError> {
    let mut codegen = CodeGen::new(profile);
    for line in DeclarationReader::open(path)? {
        let decl = parse_declaration(&line?)?;
        if let Some(skipped) = codegen.add_declaration(&decl)? {
            on_skip(skipped);
        }
    }
    codegen.finish()
}

/// Generate bindings for header text already in memory
pub fn generate_source(text: &str, profile: &BindingProfile) -> Result<Generated, BindgenError> {
    let mut codegen = CodeGen::new(profile);
    for line in declaration_lines(text) {
        codegen.add_declaration(&parse_declaration(line)?)?;
    }
    codegen.finish()
}
