/// Line-oriented assembler for generated shell scripts.
///
/// Invariants:
/// - `build()` joins pushed text with `\n` and ensures a trailing newline when
///   non-empty.
/// - Pushed text is emitted verbatim; text containing `\n` therefore occupies
///   multiple script lines. Callers that need one logical line per push must
///   not embed newlines themselves.
#[derive(Debug, Default)]
pub struct ShellFile {
    lines: Vec<String>,
}

impl ShellFile {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Push one script line (or a verbatim multi-line block).
    pub fn push(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn extend<I>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = String>,
    {
        for l in lines {
            self.lines.push(l);
        }
        self
    }

    pub fn build(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
