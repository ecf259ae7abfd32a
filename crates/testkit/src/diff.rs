//! Unified diff builder for a single cask file.
//!
//! ```rust
//! use casket_testkit::CaskDiff;
//!
//! let diff = CaskDiff::new("Casks/foo.rb")
//!     .removed("  version \"1.0\"")
//!     .added("  version \"2.0\"")
//!     .build();
//!
//! assert!(diff.contains("\n+  version \"2.0\""));
//! ```

#[derive(Debug, Clone)]
enum Line {
    Context(String),
    Added(String),
    Removed(String),
}

#[derive(Debug, Clone)]
pub struct CaskDiff {
    path: String,
    new_file: bool,
    lines: Vec<Line>,
}

impl CaskDiff {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            new_file: false,
            lines: Vec::new(),
        }
    }

    /// Render as a file introduced by the range.
    pub fn new_file(mut self) -> Self {
        self.new_file = true;
        self
    }

    pub fn context(mut self, line: &str) -> Self {
        self.lines.push(Line::Context(line.to_string()));
        self
    }

    pub fn added(mut self, line: &str) -> Self {
        self.lines.push(Line::Added(line.to_string()));
        self
    }

    pub fn removed(mut self, line: &str) -> Self {
        self.lines.push(Line::Removed(line.to_string()));
        self
    }

    pub fn build(&self) -> String {
        let old_count = self
            .lines
            .iter()
            .filter(|l| !matches!(l, Line::Added(_)))
            .count();
        let new_count = self
            .lines
            .iter()
            .filter(|l| !matches!(l, Line::Removed(_)))
            .count();

        let mut out = format!("diff --git a/{0} b/{0}\n", self.path);
        if self.new_file {
            out.push_str("new file mode 100644\n");
            out.push_str("index 0000000..1111111\n");
            out.push_str("--- /dev/null\n");
            out.push_str(&format!("+++ b/{}\n", self.path));
            out.push_str(&format!("@@ -0,0 +1,{new_count} @@\n"));
        } else {
            out.push_str("index 1111111..2222222 100644\n");
            out.push_str(&format!("--- a/{}\n", self.path));
            out.push_str(&format!("+++ b/{}\n", self.path));
            out.push_str(&format!("@@ -1,{old_count} +1,{new_count} @@\n"));
        }

        for line in &self.lines {
            let (prefix, text) = match line {
                Line::Context(t) => (' ', t),
                Line::Added(t) => ('+', t),
                Line::Removed(t) => ('-', t),
            };
            out.push(prefix);
            out.push_str(text);
            out.push('\n');
        }
        out
    }
}
