//! Statement builder shared by the generators.
//!
//! Generators record discrete statements together with their indentation
//! level and only turn them into text once the walk is complete.

use std::fmt::Display;

/// A recorded statement and the indentation it is rendered at.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitted<S> {
    pub indent: usize,
    pub statement: S,
}

/// How rendered lines are put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Every line ends with `\n`.
    Terminated,
    /// Lines are joined with `\n`, the last one has no newline.
    Separated,
}

/// Accumulates statements of type `S` for one generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBuilder<S> {
    statements: Vec<Emitted<S>>,
}

impl<S> Default for CodeBuilder<S> {
    fn default() -> Self {
        Self { statements: Vec::new() }
    }
}

impl<S: Display> CodeBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, indent: usize, statement: S) {
        self.statements.push(Emitted { indent, statement });
    }

    pub fn statements(&self) -> &[Emitted<S>] {
        &self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Renders every statement on its own line, indented with tabs.
    pub fn render(&self, ending: LineEnding) -> String {
        let lines: Vec<String> = self
            .statements
            .iter()
            .map(|emitted| format!("{}{}", "\t".repeat(emitted.indent), emitted.statement))
            .collect();
        match ending {
            LineEnding::Terminated => lines.iter().map(|line| format!("{line}\n")).collect(),
            LineEnding::Separated => lines.join("\n"),
        }
    }
}
