use crate::parser::ast::{File, FuncDecl, TypeSpec};
use crate::parser::{traverse_file, Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    AggregateType,
}

/// An exported top-level declaration. Unexported names and other declaration
/// shapes never become one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    pub line: usize,
}

#[derive(Default)]
struct ExportExtractor {
    exports: Vec<Declaration>,
}

impl Visitor for ExportExtractor {
    fn visit_func_decl(&mut self, func: &FuncDecl) {
        // methods are function declarations too
        if func.name.is_exported() {
            self.exports.push(Declaration {
                name: func.name.name.clone(),
                kind: DeclKind::Function,
                line: func.name.span.line,
            });
        }
    }

    fn visit_type_spec(&mut self, spec: &TypeSpec) {
        if spec.name.is_exported() && spec.is_struct {
            self.exports.push(Declaration {
                name: spec.name.name.clone(),
                kind: DeclKind::AggregateType,
                line: spec.name.span.line,
            });
        }
    }
}

/// Exported functions and exported struct types declared at the top level,
/// in source order.
pub fn exported_declarations(file: &File) -> Vec<Declaration> {
    let mut ex = ExportExtractor::default();
    traverse_file(file, &mut ex);
    ex.exports
}

/// Names of the exported top-level functions, in source order.
pub fn exported_function_names(file: &File) -> Vec<String> {
    exported_declarations(file)
        .into_iter()
        .filter(|decl| decl.kind == DeclKind::Function)
        .map(|decl| decl.name)
        .collect()
}
