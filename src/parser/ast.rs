/// 1-based position of a node's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Export status of a declared name, fixed once when the identifier is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Exported,
    Unexported,
}

impl Visibility {
    /// Go exports a name when its first character is an uppercase letter.
    pub fn of(name: &str) -> Self {
        match name.chars().next() {
            Some(c) if c.is_uppercase() => Visibility::Exported,
            _ => Visibility::Unexported,
        }
    }

    pub fn is_exported(self) -> bool {
        matches!(self, Visibility::Exported)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub vis: Visibility,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        let name = name.into();
        let vis = Visibility::of(&name);
        Self { name, vis, span }
    }

    pub fn is_exported(&self) -> bool {
        self.vis.is_exported()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

/// Top-level structure of one Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub package: Ident,
    /// Functions, methods and type specs in source order. `const`, `var` and
    /// `import` declarations are validated but not kept.
    pub decls: Vec<Decl>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Type(TypeSpec),
}

/// A top-level `func`, with or without a receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: Ident,
    /// The declared type is a struct literal, looking through parentheses.
    /// Aliases (`type A = struct{...}`) count.
    pub is_struct: bool,
}
