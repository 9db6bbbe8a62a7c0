//! Bindings for declarations whose arguments and result are all scalars.

use super::{Binding, CodeGen, call_expr};
use crate::error::BindgenError;
use crate::marshal::{HostType, ReturnWrap};
use crate::naming::BindingNames;
use crate::parser::Declaration;

impl CodeGen<'_> {
    /// Marshal every argument, call, then wrap the result
    pub(super) fn generate_normal(
        &self,
        decl: &Declaration,
        names: BindingNames,
    ) -> Result<Binding, BindgenError> {
        let mut body = Vec::with_capacity(decl.args.len() + 1);
        let mut patterns = Vec::with_capacity(decl.args.len());
        for (i, arg) in decl.args.iter().enumerate() {
            let host = HostType::require(&arg.ty, &decl.name)?;
            body.push(host.init_local(&arg.name, i));
            patterns.push(host.pattern());
        }

        let call = call_expr(&decl.name, decl.args.iter().map(|a| a.name.as_str()));
        let wrap = ReturnWrap::of(&decl.return_type, &decl.name)?;
        body.push(wrap.statement(&call));

        self.assemble(decl, names, &body, patterns)
    }
}
