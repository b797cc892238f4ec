mod formula_compiler;
pub use formula_compiler::{FormulaCompiler, FormulaSettings};

mod latex_compiler;
pub use latex_compiler::{mask_special_chars, LatexCompiler, LatexSettings};

mod mathml_compiler;
pub use mathml_compiler::{escape, MathMlCompiler, MathMlSettings, MATHML_NAMESPACE, SBML_NAMESPACE};

use crate::{error::AstError, node::AstNode};

/// Rejects a root whose degree is the literal zero.
pub(crate) fn check_root_degree(degree: &AstNode) -> Result<(), AstError> {
    if degree.is_literal(0) {
        return Err(AstError::InvalidArgument("cannot take the zeroth root".to_string()));
    }
    Ok(())
}

impl AstNode {
    /// Renders this tree as infix formula text with the default settings.
    pub fn to_formula(&self) -> Result<String, AstError> {
        Ok(self.compile(&mut FormulaCompiler::default())?.into_value())
    }

    /// Renders this tree as LaTeX with the default settings.
    pub fn to_latex(&self) -> Result<String, AstError> {
        Ok(self.compile(&mut LatexCompiler::default())?.into_value())
    }

    /// Renders this tree as a compact content MathML document.
    pub fn to_math_ml(&self) -> Result<String, AstError> {
        let mut compiler = MathMlCompiler::default();
        compiler.document(self)?;
        Ok(compiler.into_output())
    }
}
