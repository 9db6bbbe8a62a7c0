//! Binding Code Generation
//!
//! Turns classified declarations into C source for the mtots runtime. Each
//! retained declaration becomes a [`Binding`] of up to three pieces:
//!
//! ```c
//! static ubool implIsEnabled(i16 argCount, Value *args, Value *out) {
//!   u32 cap = AS_U32(args[0]);
//!   *out = BOOL_VAL(glIsEnabled(cap));
//!   return UTRUE;
//! }
//! static TypePattern argsIsEnabled[] = {   // omitted without bound arguments
//!   { TYPE_PATTERN_NUMBER },
//! };
//! static CFunction funcIsEnabled = {
//!   implIsEnabled, "isEnabled",
//!   sizeof(argsIsEnabled)/sizeof(TypePattern), 0, argsIsEnabled,
//! };
//! ```
//!
//! Bindings are kept in declaration order. Once every declaration has been
//! seen, [`CodeGen::finish`] renders the header, the bindings and the
//! registry array listing every descriptor.

mod in_out;
mod normal;
mod render;
mod singular;

use crate::classify::{Category, Classifier, SkipReason};
use crate::config::BindingProfile;
use crate::error::BindgenError;
use crate::marshal::PatternTag;
use crate::naming::BindingNames;
use crate::parser::Declaration;
use std::fmt;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Generated source for one declaration
#[derive(Debug, Clone)]
pub struct Binding {
    /// Native function the binding calls
    pub function: String,
    pub names: BindingNames,
    /// Patterns of the bound arguments, in order
    pub patterns: Vec<PatternTag>,
    pub implementation: String,
    /// Absent when the binding takes no bound arguments
    pub pattern_table: Option<String>,
    pub descriptor: String,
}

/// A declaration left out of the bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeclaration {
    pub function: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipping {}", self.function)
    }
}

/// Declaration counts per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub normal: usize,
    pub singularized: usize,
    pub in_out_vector: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.normal + self.singularized + self.in_out_vector + self.skipped
    }

    fn record(&mut self, category: &Category) {
        match category {
            Category::Normal => self.normal += 1,
            Category::Singularized(_) => self.singularized += 1,
            Category::InOutVector(_) => self.in_out_vector += 1,
            Category::Skipped(_) => self.skipped += 1,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "normal:        {}", self.normal)?;
        writeln!(f, "singularized:  {}", self.singularized)?;
        writeln!(f, "in/out vector: {}", self.in_out_vector)?;
        writeln!(f, "skipped:       {}", self.skipped)?;
        write!(f, "total:         {}", self.total())
    }
}

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct Generated {
    /// The complete generated header
    pub source: String,
    /// Retained bindings in declaration order
    pub bindings: Vec<Binding>,
    pub skipped: Vec<SkippedDeclaration>,
    pub summary: Summary,
}

impl Generated {
    /// Descriptor names listed in the registry, in order
    pub fn registry(&self) -> Vec<String> {
        self.bindings.iter().map(|b| b.names.descriptor()).collect()
    }
}

/// Accumulates bindings for one run
pub struct CodeGen<'a> {
    profile: &'a BindingProfile,
    classifier: Classifier<'a>,
    bindings: Vec<Binding>,
    skipped: Vec<SkippedDeclaration>,
    summary: Summary,
}

impl<'a> CodeGen<'a> {
    pub fn new(profile: &'a BindingProfile) -> Self {
        CodeGen {
            profile,
            classifier: Classifier::new(profile),
            bindings: Vec::new(),
            skipped: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Classify a declaration and generate its binding, if it gets one
    ///
    /// Returns the skip notice when the declaration is left out, so callers
    /// can report it before the run completes.
    pub fn add_declaration(
        &mut self,
        decl: &Declaration,
    ) -> Result<Option<&SkippedDeclaration>, BindgenError> {
        let names = BindingNames::derive(&decl.name, &self.profile.api_prefix)?;
        let category = self.classifier.classify(decl)?;
        self.summary.record(&category);

        let binding = match category {
            Category::Skipped(reason) => {
                debug!(function = %decl.name, ?reason, "skipping declaration");
                self.skipped.push(SkippedDeclaration {
                    function: decl.name.clone(),
                    reason,
                });
                return Ok(self.skipped.last());
            }
            Category::Normal => self.generate_normal(decl, names)?,
            Category::Singularized(direction) => {
                self.generate_singularized(decl, names, direction)?
            }
            Category::InOutVector(direction) => self.generate_in_out(decl, names, direction)?,
        };

        self.bindings.push(binding);
        Ok(None)
    }

    /// Render the complete header
    pub fn finish(self) -> Result<Generated, BindgenError> {
        let source = self.render()?;
        info!(
            bindings = self.bindings.len(),
            skipped = self.skipped.len(),
            "generated bindings"
        );
        Ok(Generated {
            source,
            bindings: self.bindings,
            skipped: self.skipped,
            summary: self.summary,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shared pieces
    // ─────────────────────────────────────────────────────────────────────────

    /// Assemble a binding from its implementation body and bound patterns
    fn assemble(
        &self,
        decl: &Declaration,
        names: BindingNames,
        body: &[String],
        patterns: Vec<PatternTag>,
    ) -> Result<Binding, BindgenError> {
        let mut implementation = String::new();
        writeln!(
            &mut implementation,
            "static ubool {}(i16 argCount, Value *args, Value *out) {{",
            names.impl_fn()
        )?;
        for line in body {
            writeln!(&mut implementation, "  {}", line)?;
        }
        writeln!(&mut implementation, "  return UTRUE;")?;
        writeln!(&mut implementation, "}}")?;

        let pattern_table = if patterns.is_empty() {
            None
        } else {
            let mut table = String::new();
            writeln!(
                &mut table,
                "static TypePattern {}[] = {{",
                names.pattern_table()
            )?;
            for pattern in &patterns {
                writeln!(&mut table, "  {{ {} }},", pattern.constant())?;
            }
            writeln!(&mut table, "}};")?;
            Some(table)
        };

        let mut descriptor = String::new();
        writeln!(
            &mut descriptor,
            "static CFunction {} = {{",
            names.descriptor()
        )?;
        writeln!(
            &mut descriptor,
            "  {}, \"{}\",",
            names.impl_fn(),
            names.exposed
        )?;
        if pattern_table.is_some() {
            let table = names.pattern_table();
            writeln!(
                &mut descriptor,
                "  sizeof({})/sizeof(TypePattern), 0, {},",
                table, table
            )?;
        }
        writeln!(&mut descriptor, "}};")?;

        Ok(Binding {
            function: decl.name.clone(),
            names,
            patterns,
            implementation,
            pattern_table,
            descriptor,
        })
    }
}

/// `f(a, b, c)`
fn call_expr<'s>(function: &str, args: impl IntoIterator<Item = &'s str>) -> String {
    let args: Vec<&str> = args.into_iter().collect();
    format!("{}({})", function, args.join(", "))
}
