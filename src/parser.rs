pub mod ast;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::error::AnalyzeError;
use ast::{Comment, Decl, File, FuncDecl, Ident, Span, TypeSpec};

#[derive(Debug, Error)]
pub enum ParseError {
    /// Line and column are 1-based; the column counts bytes.
    #[error("{line}:{column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("could not load the Go grammar")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parsing was cancelled")]
    Cancelled,
}

impl ParseError {
    fn at(node: Node, message: impl Into<String>) -> Self {
        let pos = node.start_position();
        ParseError::Syntax {
            message: message.into(),
            line: pos.row + 1,
            column: pos.column + 1,
        }
    }
}

/// Parses Go source text into its top-level structure. Comments anywhere in
/// the file are kept on the returned [`File`].
pub fn parse_source(source: &str) -> Result<File, ParseError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or(ParseError::Cancelled)?;
    let root = tree.root_node();

    if root.has_error() {
        let node = first_error(root).unwrap_or(root);
        return Err(ParseError::at(node, describe_error(node, source)));
    }

    let (package, decls) = lower_top_level(root, source)?;
    Ok(File {
        package,
        decls,
        comments: collect_comments(root, source),
    })
}

/// A Go file read from disk. The text is kept verbatim because the reference
/// matcher works on it directly; the tree is produced on demand.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, AnalyzeError> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|source| AnalyzeError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, text })
    }

    pub fn parse(&self) -> Result<File, AnalyzeError> {
        parse_source(&self.text).map_err(|source| AnalyzeError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Reads and parses a file in one step.
pub fn parse_file(path: impl AsRef<Path>) -> Result<File, AnalyzeError> {
    SourceFile::read(path)?.parse()
}

/// Callbacks for the top-level declarations of a file, in source order.
/// Nothing nested inside function bodies is visited.
pub trait Visitor {
    fn visit_func_decl(&mut self, _func: &FuncDecl) {}
    fn visit_type_spec(&mut self, _spec: &TypeSpec) {}
}

pub fn traverse_file(file: &File, visitor: &mut dyn Visitor) {
    for decl in &file.decls {
        match decl {
            Decl::Func(func) => visitor.visit_func_decl(func),
            Decl::Type(spec) => visitor.visit_type_spec(spec),
        }
    }
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

fn span(node: Node) -> Span {
    let pos = node.start_position();
    Span {
        line: pos.row + 1,
        column: pos.column + 1,
    }
}

fn ident(node: Node, source: &str) -> Ident {
    Ident::new(text(node, source), span(node))
}

/// First ERROR or MISSING node in source order. Subtrees without errors are
/// not entered.
fn first_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn describe_error(node: Node, source: &str) -> String {
    if node.is_missing() {
        return format!("missing '{}'", node.kind());
    }
    let snippet = text(node, source)
        .split_whitespace()
        .next()
        .unwrap_or_default();
    match snippet.chars().count() {
        0 => "syntax error".to_string(),
        n if n > 24 => format!("unexpected '{}…'", snippet.chars().take(24).collect::<String>()),
        _ => format!("unexpected '{snippet}'"),
    }
}

fn collect_comments(root: Node, source: &str) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.kind() == "comment" {
            comments.push(Comment {
                text: text(node, source).trim_end_matches(['\r', '\n']).to_string(),
                span: span(node),
            });
        } else if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return comments;
            }
        }
    }
}

/// The Go grammar accepts statements and a missing package clause at the top
/// level so it can read snippets. A source file allows neither.
fn lower_top_level(root: Node, source: &str) -> Result<(Ident, Vec<Decl>), ParseError> {
    let mut package: Option<Ident> = None;
    let mut decls = Vec::new();
    let mut past_imports = false;

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "comment" => {}
            "package_clause" => {
                if package.is_some() {
                    return Err(ParseError::at(child, "unexpected second package clause"));
                }
                package = Some(package_name(child, source)?);
            }
            kind if package.is_none() => {
                return Err(ParseError::at(child, format!("expected 'package', found {kind}")));
            }
            "import_declaration" if past_imports => {
                return Err(ParseError::at(
                    child,
                    "imports must appear before other declarations",
                ));
            }
            "import_declaration" => {}
            "function_declaration" | "method_declaration" => {
                past_imports = true;
                if let Some(name) = child.child_by_field_name("name") {
                    decls.push(Decl::Func(FuncDecl {
                        name: ident(name, source),
                    }));
                }
            }
            "type_declaration" => {
                past_imports = true;
                lower_type_specs(child, source, &mut decls);
            }
            "const_declaration" | "var_declaration" => past_imports = true,
            kind => {
                return Err(ParseError::at(
                    child,
                    format!("non-declaration statement outside function body, found {kind}"),
                ));
            }
        }
    }

    match package {
        Some(package) => Ok((package, decls)),
        None => Err(ParseError::at(root, "expected 'package', found end of file")),
    }
}

fn package_name(clause: Node, source: &str) -> Result<Ident, ParseError> {
    let mut cursor = clause.walk();
    let name = clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_identifier")
        .map(|n| ident(n, source))
        .ok_or_else(|| ParseError::at(clause, "missing package name"))?;
    if name.name == "_" {
        return Err(ParseError::at(clause, "invalid package name _"));
    }
    Ok(name)
}

/// `type_alias` is `type A = B`; both shapes carry `name` and `type` fields.
fn lower_type_specs(decl: Node, source: &str, out: &mut Vec<Decl>) {
    let mut cursor = decl.walk();
    for spec in decl.named_children(&mut cursor) {
        if !matches!(spec.kind(), "type_spec" | "type_alias") {
            continue;
        }
        let Some(name) = spec.child_by_field_name("name") else {
            continue;
        };
        let is_struct = spec
            .child_by_field_name("type")
            .map(unparenthesize)
            .is_some_and(|ty| ty.kind() == "struct_type");
        out.push(Decl::Type(TypeSpec {
            name: ident(name, source),
            is_struct,
        }));
    }
}

fn unparenthesize(mut ty: Node) -> Node {
    while ty.kind() == "parenthesized_type" {
        let mut cursor = ty.walk();
        let inner = ty
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment");
        match inner {
            Some(inner) => ty = inner,
            None => break,
        }
    }
    ty
}

#[cfg(test)]
mod tests {
    use super::ast::Visibility;
    use super::*;

    fn funcs(file: &File) -> Vec<&FuncDecl> {
        file.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Func(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    fn type_specs(file: &File) -> Vec<&TypeSpec> {
        file.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Type(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn syntax_line(err: ParseError) -> usize {
        match err {
            ParseError::Syntax { line, .. } => line,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn parses_package_imports_and_funcs() {
        let src = r#"// Package api serves requests.
package api

import (
	"encoding/json"
	h "net/http"
	_ "embed"
)

import "fmt"

func Handler(w h.ResponseWriter, r *h.Request) {
	// greet
	fmt.Fprintf(w, "hi %s", r.URL.Path)
}

func helper() int { return 1 }
"#;
        let file = parse_source(src).unwrap();
        assert_eq!(file.package.name, "api");
        let fs = funcs(&file);
        assert_eq!(fs.len(), 2);
        assert_eq!(fs[0].name.name, "Handler");
        assert_eq!(fs[0].name.vis, Visibility::Exported);
        assert_eq!(fs[0].name.span.line, 12);
        assert_eq!(fs[1].name.vis, Visibility::Unexported);
        let comments: Vec<_> = file.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(comments, vec!["// Package api serves requests.", "// greet"]);
        assert_eq!(file.comments[1].span.line, 13);
    }

    #[test]
    fn parses_methods_and_generics() {
        let src = r#"package store

type List[T any] struct {
	items []T
}

func (l *List[T]) Push(v T) { l.items = append(l.items, v) }

func Map[T, U any](in []T, f func(T) U) []U {
	out := make([]U, 0, len(in))
	for _, v := range in {
		out = append(out, f(v))
	}
	return out
}

type Number interface {
	~int | ~int64 | float64
}
"#;
        let file = parse_source(src).unwrap();
        let fs = funcs(&file);
        assert_eq!(fs[0].name.name, "Push");
        assert_eq!(fs[1].name.name, "Map");
        let types = type_specs(&file);
        assert!(types[0].is_struct);
        assert!(!types[1].is_struct);
    }

    #[test]
    fn struct_detection_covers_groups_aliases_and_parens() {
        let src = r#"package a

type Buf [4]byte
type Alias = struct{ X int }
type Named Other
type (
	Wrapped (struct{ Y int })
	Grid[T any] [][]T
)
"#;
        let file = parse_source(src).unwrap();
        let shapes: Vec<_> = type_specs(&file)
            .iter()
            .map(|t| (t.name.name.as_str(), t.is_struct))
            .collect();
        assert_eq!(
            shapes,
            vec![
                ("Buf", false),
                ("Alias", true),
                ("Named", false),
                ("Wrapped", true),
                ("Grid", false),
            ]
        );
    }

    #[test]
    fn accepts_values_with_function_literals_and_bodyless_funcs() {
        let src = r#"package a

var (
	handlers = map[string]func(){
		"a": func() { if x := 1; x > 0 { return } },
	}
	count int
)

const (
	A = iota
	B
)

func Asm(x int) int
"#;
        let file = parse_source(src).unwrap();
        assert_eq!(funcs(&file).len(), 1);
        assert!(type_specs(&file).is_empty());
    }

    #[test]
    fn rejects_invalid_file_structure() {
        for src in [
            "",
            "func main() {}",
            "package _\n",
            "package a\nx := 1\n",
            "package a\nfunc F() {}\nimport \"fmt\"\n",
        ] {
            assert!(parse_source(src).is_err(), "expected failure for {src:?}");
        }
    }

    #[test]
    fn rejects_invalid_syntax_in_bodies_and_initializers() {
        for src in [
            "package a\nfunc Handler( {\n",
            "package a\nfunc F() { if x { }\n",
            "package a\nfunc F() { ) }\n",
            "package a\nfunc Handler() { x := := 1 }\n",
            "package a\nfunc Handler() { return return }\n",
            "package a\nfunc Handler() { if }\n",
            "package a\nfunc Handler() { for for }\n",
            "package a\nfunc Handler() { ; ; func }\n",
            "package a\nvar x =\n",
            "package a\nvar x = [1, 2}\n",
        ] {
            assert!(parse_source(src).is_err(), "expected failure for {src:?}");
        }
    }

    #[test]
    fn parse_error_reports_position() {
        let err = parse_source("package a\n\nfunc F() {\n\tx := := 1\n}\n").unwrap_err();
        assert_eq!(syntax_line(err), 4);

        let err = parse_source("package a\nfunc F() {}\nimport \"fmt\"\n").unwrap_err();
        assert!(err.to_string().starts_with("3:1: imports must appear"));
    }

    #[test]
    fn leading_bom_is_ignored() {
        let file = parse_source("\u{feff}package a\nfunc F() {}\n").unwrap();
        assert_eq!(file.package.name, "a");
    }

    #[test]
    fn traverse_visits_top_level_only_in_order() {
        #[derive(Default)]
        struct Names(Vec<String>);
        impl Visitor for Names {
            fn visit_func_decl(&mut self, func: &FuncDecl) {
                self.0.push(func.name.name.clone());
            }
            fn visit_type_spec(&mut self, spec: &TypeSpec) {
                self.0.push(spec.name.name.clone());
            }
        }
        let src = "package a\nfunc B() { type Inner struct{} }\ntype A struct{}\nfunc C() {}\n";
        let file = parse_source(src).unwrap();
        let mut names = Names::default();
        traverse_file(&file, &mut names);
        assert_eq!(names.0, vec!["B", "A", "C"]);
    }
}
