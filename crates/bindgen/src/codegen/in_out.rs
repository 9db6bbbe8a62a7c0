//! In/out vector bindings
//!
//! Functions such as `glGetProgramiv` take their result through a pointer that
//! only ever holds one value. The pointer becomes a local: read back as the
//! binding's result when non-`const`, filled from the last script argument
//! when `const`.

use super::{Binding, CodeGen, call_expr};
use crate::error::BindgenError;
use crate::marshal::{HostType, PatternTag, PointerScalar};
use crate::naming::{BindingNames, Direction};
use crate::parser::Declaration;

impl CodeGen<'_> {
    pub(super) fn generate_in_out(
        &self,
        decl: &Declaration,
        names: BindingNames,
        direction: Direction,
    ) -> Result<Binding, BindgenError> {
        let (last, leading) = decl.args.split_last().ok_or_else(|| {
            BindgenError::precondition(&decl.name, "expected a trailing pointer parameter")
        })?;
        let scalar = PointerScalar::of(&last.ty).ok_or_else(|| BindgenError::UnrecognizedType {
            type_name: last.ty.clone(),
            function: decl.name.clone(),
        })?;

        let mut body = Vec::with_capacity(decl.args.len() + 2);
        let mut patterns = Vec::with_capacity(decl.args.len());
        for (i, arg) in leading.iter().enumerate() {
            let host = HostType::require(&arg.ty, &decl.name)?;
            body.push(host.init_local(&arg.name, i));
            patterns.push(host.pattern());
        }

        match direction {
            Direction::Produces => body.push(format!("{} {};", scalar.gl_type(), last.name)),
            Direction::Consumes => {
                body.push(format!(
                    "{} {} = {};",
                    scalar.gl_type(),
                    last.name,
                    scalar.read_arg(leading.len())
                ));
                patterns.push(PatternTag::Number);
            }
        }

        let out_arg = format!("&{}", last.name);
        let call = call_expr(
            &decl.name,
            leading
                .iter()
                .map(|a| a.name.as_str())
                .chain(std::iter::once(out_arg.as_str())),
        );
        body.push(format!("{};", call));
        if direction == Direction::Produces {
            body.push(format!("*out = NUMBER_VAL({});", last.name));
        }

        self.assemble(decl, names, &body, patterns)
    }
}
