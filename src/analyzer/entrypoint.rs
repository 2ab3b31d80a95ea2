use crate::parser::ast::{Decl, File};

/// Package name and primary handler of an entrypoint file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrypoint {
    pub package_name: String,
    /// First exported function in declaration order, `None` when there is none.
    pub function_name: Option<String>,
}

pub fn select_entrypoint(file: &File) -> Entrypoint {
    let function_name = file.decls.iter().find_map(|decl| match decl {
        Decl::Func(func) if func.name.is_exported() => Some(func.name.name.clone()),
        _ => None,
    });
    Entrypoint {
        package_name: file.package.name.clone(),
        function_name,
    }
}
