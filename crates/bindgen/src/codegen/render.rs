//! Final assembly of the generated header.

use super::CodeGen;
use crate::error::BindgenError;
use std::fmt::Write as _;

impl CodeGen<'_> {
    /// Guard, header comment, includes, bindings, registry, closing guard
    pub(super) fn render(&self) -> Result<String, BindgenError> {
        let output = &self.profile.output;
        let mut source = String::new();

        writeln!(&mut source, "#ifndef {}", output.guard)?;
        writeln!(&mut source, "#define {}", output.guard)?;
        if !output.header_comment.is_empty() {
            writeln!(&mut source, "{}", output.header_comment)?;
        }
        for include in &output.includes {
            writeln!(&mut source, "#include {}", include)?;
        }
        writeln!(&mut source)?;

        for binding in &self.bindings {
            source.push_str(&binding.implementation);
            if let Some(table) = &binding.pattern_table {
                source.push_str(table);
            }
            source.push_str(&binding.descriptor);
        }

        writeln!(&mut source, "static CFunction *{}[] = {{", output.registry)?;
        for binding in &self.bindings {
            writeln!(&mut source, "  &{},", binding.names.descriptor())?;
        }
        writeln!(&mut source, "}};")?;
        writeln!(&mut source, "#endif/*{}*/", output.guard)?;

        Ok(source)
    }
}
