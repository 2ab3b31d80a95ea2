use glob::Pattern;

/// Knobs for candidate discovery. The defaults reproduce the Go conventions:
/// `.go` sources, `*test.go` files ignored, symlinks not followed.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Source extension without the dot.
    pub extension: String,
    /// Glob matched against each file's base name; matches are never candidates.
    pub test_file_pattern: Pattern,
    pub follow_links: bool,
}

impl AnalyzeOptions {
    pub fn is_test_file(&self, file_name: &str) -> bool {
        self.test_file_pattern.matches(file_name)
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            extension: "go".to_string(),
            test_file_pattern: Pattern::new("*test.go").expect("static glob is valid"),
            follow_links: false,
        }
    }
}
