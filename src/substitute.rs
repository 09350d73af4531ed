//! Template substitution engine.
//!
//! A template is parsed once into tokens: its lines, and the insertion points
//! (markers) found on them. Every generated block is placed right after the
//! line holding its marker. The marker line itself is kept, so the output can
//! always be diffed against the template.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::constants::MARKER_PATTERN;
use crate::generator::Artifact;

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MARKER_PATTERN).expect("marker pattern is a valid regex"));

/// Problems with the insertion points of a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    /// The marker of a generator does not appear in the template.
    #[error("marker '{marker}' for generator '{generator}' not found")]
    Missing { marker: String, generator: String },

    /// The marker appears more than once, the insertion point is ambiguous.
    #[error("marker '{marker}' appears more than once (lines {})", join_lines(.lines))]
    Duplicate { marker: String, lines: Vec<usize> },

    /// The template asks for a block no generator produced.
    #[error("marker '{marker}' on line {line} is not produced by any generator")]
    Unconsumed { marker: String, line: usize },
}

fn join_lines(lines: &[usize]) -> String {
    lines.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// A piece of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// One line of the template, line ending included.
    Text(&'a str),
    /// An insertion point found on the preceding line.
    Anchor { marker: &'a str, line: usize },
}

/// A template split into text and insertion points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> Template<'a> {
    /// Splits `text` into lines and finds every marker on them.
    pub fn parse(text: &'a str) -> Self {
        let mut tokens = Vec::new();
        for (index, line) in text.split_inclusive('\n').enumerate() {
            tokens.push(Token::Text(line));
            for found in MARKER_RE.find_iter(line) {
                tokens.push(Token::Anchor { marker: found.as_str(), line: index + 1 });
            }
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Every insertion point with its 1-based line number, in file order.
    pub fn anchors(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.tokens.iter().filter_map(|token| match token {
            Token::Anchor { marker, line } => Some((*marker, *line)),
            Token::Text(_) => None,
        })
    }

    /// Checks that every artifact has exactly one insertion point and that
    /// every insertion point belongs to an artifact.
    pub fn validate(&self, artifacts: &[Artifact]) -> Result<(), MarkerError> {
        for artifact in artifacts {
            let lines: Vec<usize> = self
                .anchors()
                .filter(|(marker, _)| *marker == artifact.marker)
                .map(|(_, line)| line)
                .collect();
            match lines.len() {
                0 => {
                    return Err(MarkerError::Missing {
                        marker: artifact.marker.to_string(),
                        generator: artifact.generator.to_string(),
                    })
                }
                1 => {}
                _ => {
                    return Err(MarkerError::Duplicate {
                        marker: artifact.marker.to_string(),
                        lines,
                    })
                }
            }
        }

        if let Some((marker, line)) =
            self.anchors().find(|(marker, _)| !artifacts.iter().any(|a| a.marker == *marker))
        {
            return Err(MarkerError::Unconsumed { marker: marker.to_string(), line });
        }
        Ok(())
    }

    /// Renders the template with every artifact inserted after its marker line.
    pub fn render(&self, artifacts: &[Artifact]) -> Result<String, MarkerError> {
        self.validate(artifacts)?;

        let mut out = String::new();
        let mut pending: Vec<&str> = Vec::new();
        for token in &self.tokens {
            match token {
                Token::Text(text) => {
                    flush_line(&mut out, &pending, artifacts);
                    pending.clear();
                    out.push_str(text);
                }
                Token::Anchor { marker, .. } => pending.push(*marker),
            }
        }
        flush_line(&mut out, &pending, artifacts);
        Ok(out)
    }
}

/// Inserts the blocks of the anchors found on one line, in artifact order.
fn flush_line(out: &mut String, markers: &[&str], artifacts: &[Artifact]) {
    for artifact in artifacts.iter().filter(|a| markers.contains(&a.marker)) {
        insert_block(out, &artifact.code);
    }
}

fn insert_block(out: &mut String, code: &str) {
    if code.is_empty() {
        return;
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(code);
    if !code.ends_with('\n') {
        out.push('\n');
    }
}

/// Splices every artifact into `template`.
///
/// # Errors
/// * `MarkerError::Missing` if an artifact's marker is not in the template
/// * `MarkerError::Duplicate` if an artifact's marker appears more than once
/// * `MarkerError::Unconsumed` if the template holds a marker no artifact fills
pub fn substitute(template: &str, artifacts: &[Artifact]) -> Result<String, MarkerError> {
    Template::parse(template).render(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(marker: &'static str, code: &str) -> Artifact {
        Artifact { generator: "test", marker, code: code.to_string() }
    }

    const TEMPLATE: &str = "#include \"utils.h\"\n\
void serialize(data_t *data, bson_t **bson_document)\n\
{\n\
\t// {{GENERATE_BSON}}\n\
}\n";

    #[test]
    fn test_parse_tokens() {
        let template = Template::parse(TEMPLATE);
        let anchors: Vec<(&str, usize)> = template.anchors().collect();
        assert_eq!(anchors, vec![("{{GENERATE_BSON}}", 4)]);
        assert_eq!(template.tokens().len(), 6);
    }

    #[test]
    fn test_inserts_after_marker_line() {
        let out = substitute(TEMPLATE, &[artifact("{{GENERATE_BSON}}", "\tcall();\n")]).unwrap();
        assert_eq!(
            out,
            "#include \"utils.h\"\n\
void serialize(data_t *data, bson_t **bson_document)\n\
{\n\
\t// {{GENERATE_BSON}}\n\
\tcall();\n\
}\n"
        );
    }

    #[test]
    fn test_block_without_trailing_newline() {
        let out = substitute("// {{GENERATE_X}}\nend\n", &[artifact("{{GENERATE_X}}", "a();")]).unwrap();
        assert_eq!(out, "// {{GENERATE_X}}\na();\nend\n");
    }

    #[test]
    fn test_marker_on_last_line_without_newline() {
        let out = substitute("// {{GENERATE_X}}", &[artifact("{{GENERATE_X}}", "a();")]).unwrap();
        assert_eq!(out, "// {{GENERATE_X}}\na();\n");
    }

    #[test]
    fn test_empty_code_is_inserted_as_nothing() {
        let out = substitute(TEMPLATE, &[artifact("{{GENERATE_BSON}}", "")]).unwrap();
        assert_eq!(out, TEMPLATE);
    }

    #[test]
    fn test_missing_marker() {
        let err = substitute("int main() {}\n", &[artifact("{{GENERATE_BSON}}", "x")]).unwrap_err();
        assert_eq!(
            err,
            MarkerError::Missing { marker: "{{GENERATE_BSON}}".to_string(), generator: "test".to_string() }
        );
        assert!(err.to_string().contains("{{GENERATE_BSON}}"));
    }

    #[test]
    fn test_duplicate_marker() {
        let text = "// {{GENERATE_BSON}}\nx\n// {{GENERATE_BSON}}\n";
        let err = substitute(text, &[artifact("{{GENERATE_BSON}}", "x")]).unwrap_err();
        assert_eq!(
            err,
            MarkerError::Duplicate { marker: "{{GENERATE_BSON}}".to_string(), lines: vec![1, 3] }
        );
        assert_eq!(err.to_string(), "marker '{{GENERATE_BSON}}' appears more than once (lines 1, 3)");
    }

    #[test]
    fn test_unconsumed_marker() {
        let text = "// {{GENERATE_BSON}}\n// {{GENERATE_SQL}}\n";
        let err = substitute(text, &[artifact("{{GENERATE_BSON}}", "x")]).unwrap_err();
        assert_eq!(err, MarkerError::Unconsumed { marker: "{{GENERATE_SQL}}".to_string(), line: 2 });
    }

    #[test]
    fn test_two_markers_keep_their_blocks_apart() {
        let text = "a\n// {{GENERATE_A}}\nb\n// {{GENERATE_B}}\nc\n";
        let out = substitute(
            text,
            &[artifact("{{GENERATE_B}}", "second();\n"), artifact("{{GENERATE_A}}", "first();\n")],
        )
        .unwrap();
        assert_eq!(out, "a\n// {{GENERATE_A}}\nfirst();\nb\n// {{GENERATE_B}}\nsecond();\nc\n");
    }

    #[test]
    fn test_shared_line_blocks_follow_artifact_order() {
        let out = substitute(
            "// {{GENERATE_B}} {{GENERATE_A}}\nend\n",
            &[artifact("{{GENERATE_A}}", "a();\n"), artifact("{{GENERATE_B}}", "b();\n")],
        )
        .unwrap();
        assert_eq!(out, "// {{GENERATE_B}} {{GENERATE_A}}\na();\nb();\nend\n");
    }

    #[test]
    fn test_substitution_is_deterministic() {
        let artifacts = [artifact("{{GENERATE_BSON}}", "\tcall();\n")];
        assert_eq!(substitute(TEMPLATE, &artifacts), substitute(TEMPLATE, &artifacts));
    }

    #[test]
    fn test_crlf_lines_are_preserved() {
        let out = substitute("a\r\n// {{GENERATE_X}}\r\nb\r\n", &[artifact("{{GENERATE_X}}", "x();\n")])
            .unwrap();
        assert_eq!(out, "a\r\n// {{GENERATE_X}}\r\nx();\nb\r\n");
    }
}
