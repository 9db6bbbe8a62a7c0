//! Singularized bindings
//!
//! `glGenTextures(GLsizei n, GLuint* textures)` is bound as `genTexture()`,
//! calling through with `n = 1` and a single local in place of the array.

use super::{Binding, CodeGen};
use crate::error::BindgenError;
use crate::marshal::{PatternTag, PointerScalar};
use crate::naming::{BindingNames, Direction};
use crate::parser::Declaration;

/// Local standing in for the one-element array
const VALUE: &str = "value";

impl CodeGen<'_> {
    pub(super) fn generate_singularized(
        &self,
        decl: &Declaration,
        names: BindingNames,
        direction: Direction,
    ) -> Result<Binding, BindgenError> {
        let names = names.singularize(&decl.name)?;
        let scalar = PointerScalar::Uint;
        let call = format!("{}(1, &{});", decl.name, VALUE);

        let (body, patterns) = match direction {
            Direction::Produces => (
                vec![
                    format!("{} {};", scalar.gl_type(), VALUE),
                    call,
                    format!("*out = NUMBER_VAL({});", VALUE),
                ],
                Vec::new(),
            ),
            Direction::Consumes => (
                vec![
                    format!("{} {} = {};", scalar.gl_type(), VALUE, scalar.read_arg(0)),
                    call,
                ],
                vec![PatternTag::Number],
            ),
        };

        self.assemble(decl, names, &body, patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{generate, generate_with, profile_with};
    use crate::error::BindgenError;
    use crate::marshal::PatternTag;

    #[test]
    fn test_producer_takes_no_arguments() {
        let generated = generate(&["void glGenTextures(GLsizei n, GLuint* textures);"]).unwrap();
        let binding = &generated.bindings[0];

        assert_eq!(binding.names.exposed, "genTexture");
        assert_eq!(binding.names.base, "GenTexture");
        assert!(binding.patterns.is_empty());
        assert!(binding.pattern_table.is_none());
        assert_eq!(
            binding.implementation,
            "static ubool implGenTexture(i16 argCount, Value *args, Value *out) {\n\
             \x20 GLuint value;\n\
             \x20 glGenTextures(1, &value);\n\
             \x20 *out = NUMBER_VAL(value);\n\
             \x20 return UTRUE;\n\
             }\n"
        );
        assert_eq!(
            binding.descriptor,
            "static CFunction funcGenTexture = {\n  implGenTexture, \"genTexture\",\n};\n"
        );
        assert_eq!(generated.registry(), vec!["funcGenTexture"]);
    }

    #[test]
    fn test_consumer_takes_one_number() {
        let generated = generate(&[
            "void glDeleteVertexArrays(GLsizei n, const GLuint* arrays);",
        ])
        .unwrap();
        let binding = &generated.bindings[0];

        assert_eq!(binding.names.exposed, "deleteVertexArray");
        assert_eq!(binding.patterns, vec![PatternTag::Number]);
        assert_eq!(
            binding.implementation,
            "static ubool implDeleteVertexArray(i16 argCount, Value *args, Value *out) {\n\
             \x20 GLuint value = AS_U32(args[0]);\n\
             \x20 glDeleteVertexArrays(1, &value);\n\
             \x20 return UTRUE;\n\
             }\n"
        );
        assert_eq!(
            binding.descriptor,
            "static CFunction funcDeleteVertexArray = {\n\
             \x20 implDeleteVertexArray, \"deleteVertexArray\",\n\
             \x20 sizeof(argsDeleteVertexArray)/sizeof(TypePattern), 0, argsDeleteVertexArray,\n\
             };\n"
        );
    }

    #[test]
    fn test_name_must_be_plural() {
        let profile = profile_with("[functions]\nsingularizable = [\"glGenFoo\"]\n");
        let line = "void glGenFoo(GLsizei n, GLuint* foo);";
        let err = generate_with(&profile, &[line]).unwrap_err();
        assert!(matches!(err, BindgenError::Precondition { .. }));
        assert!(err.to_string().contains("not plural"));
    }
}
