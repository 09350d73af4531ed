//! Template discovery and per-file splicing.
//!
//! Every `name.template.ext` file under the source directory gets the
//! generated blocks spliced in and is written to `name.ext` next to it.
//! Templates are independent: a broken one does not stop the others, and a
//! file is only written once its whole content has been produced.

use globset::GlobSet;
use log::{debug, error};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::TEMPLATE_INFIX;
use crate::error::{Error, Result};
use crate::generator::Artifact;
use crate::substitute::substitute;

/// What happens to the output of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// The output does not exist yet
    Create,
    /// The output exists with different content
    Update,
    /// The output already has the generated content
    Unchanged,
}

impl FileAction {
    /// Label printed for the action, phrased for a check run when `check` is set.
    pub fn describe(&self, check: bool) -> &'static str {
        match (self, check) {
            (FileAction::Create, false) => "Created",
            (FileAction::Update, false) => "Updated",
            (FileAction::Create, true) => "Would create",
            (FileAction::Update, true) => "Would update",
            (FileAction::Unchanged, _) => "Unchanged",
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe(false))
    }
}

/// Result of processing one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// Template the content was generated from
    pub source: PathBuf,
    /// File the content belongs to
    pub target: PathBuf,
    /// Template with the generated blocks spliced in
    pub content: String,
    pub action: FileAction,
}

/// Outcome of a run over a list of templates.
#[derive(Debug, Default)]
pub struct Summary {
    /// Templates that were generated, in processing order
    pub processed: Vec<ProcessResult>,
    /// Templates that failed, with the reason
    pub failures: Vec<(PathBuf, Error)>,
    /// Outputs that differ from the generated content (check runs only)
    pub stale: usize,
}

/// Checks whether a file name carries the template infix, e.g. `utils.template.c`.
pub fn is_template_file(file_name: &str) -> bool {
    let parts: Vec<&str> = file_name.split('.').collect();
    parts.len() > 2
        && !parts[0].is_empty()
        && parts[1..parts.len() - 1].iter().any(|part| *part == TEMPLATE_INFIX)
}

/// Output path of a template: the template path with its infix removed.
///
/// # Returns
/// * `Option<PathBuf>` - `None` if the path is not a template
pub fn resolve_target_path<P: AsRef<Path>>(template: P) -> Option<PathBuf> {
    let template = template.as_ref();
    let file_name = template.file_name()?.to_str()?;
    if !is_template_file(file_name) {
        return None;
    }

    let parts: Vec<&str> = file_name.split('.').collect();
    let last = parts.len() - 1;
    let infix = parts[1..last].iter().position(|part| *part == TEMPLATE_INFIX)? + 1;
    let target_name = parts
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != infix)
        .map(|(_, part)| *part)
        .collect::<Vec<_>>()
        .join(".");
    Some(template.with_file_name(target_name))
}

/// Ensures the source directory exists.
///
/// # Errors
/// * `Error::SourceDirectoryNotFound` if it does not exist or is not a directory
pub fn ensure_source_dir<P: AsRef<Path>>(source_dir: P) -> Result<PathBuf> {
    let source_dir = source_dir.as_ref();
    if !source_dir.is_dir() {
        return Err(Error::SourceDirectoryNotFound {
            source_dir: source_dir.display().to_string(),
        });
    }
    Ok(source_dir.to_path_buf())
}

/// Splices a fixed set of artifacts into the templates of a source directory.
pub struct Processor<'a> {
    source_root: &'a Path,
    artifacts: &'a [Artifact],
    ignored_set: &'a GlobSet,
}

impl<'a> Processor<'a> {
    pub fn new(source_root: &'a Path, artifacts: &'a [Artifact], ignored_set: &'a GlobSet) -> Self {
        Self { source_root, artifacts, ignored_set }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path.strip_prefix(self.source_root)
            .map(|relative| self.ignored_set.is_match(relative))
            .unwrap_or(false)
    }

    /// Lists the templates under the source directory, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut templates = Vec::new();
        for entry in WalkDir::new(self.source_root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::WalkError {
                path: self.source_root.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if self.is_ignored(path) {
                debug!("Skipping ignored file {}", path.display());
                continue;
            }
            if entry.file_name().to_str().is_some_and(is_template_file) {
                debug!("Found template {}", path.display());
                templates.push(path.to_path_buf());
            }
        }
        Ok(templates)
    }

    /// Generates the content for one template without writing it.
    ///
    /// # Errors
    /// * `Error::MarkerError` if the template's markers do not match the artifacts
    /// * `Error::IoError` if the template or its current output cannot be read
    pub fn process<P: AsRef<Path>>(&self, template: P) -> Result<ProcessResult> {
        let template = template.as_ref();
        let target = resolve_target_path(template).ok_or_else(|| Error::ConfigError(format!(
            "'{}' is not a template file",
            template.display()
        )))?;

        let text = fs::read_to_string(template)?;
        let content = substitute(&text, self.artifacts).map_err(|source| Error::MarkerError {
            template: template.display().to_string(),
            source,
        })?;

        let action = if !target.exists() {
            FileAction::Create
        } else if fs::read_to_string(&target)? == content {
            FileAction::Unchanged
        } else {
            FileAction::Update
        };

        Ok(ProcessResult { source: template.to_path_buf(), target, content, action })
    }

    /// Writes a processed template to its target unless it is already up to date.
    pub fn apply(&self, result: &ProcessResult) -> Result<()> {
        if result.action == FileAction::Unchanged {
            return Ok(());
        }
        debug!("Writing file: {}", result.target.display());
        fs::write(&result.target, &result.content).map_err(Error::IoError)
    }

    /// Processes every template, writing outputs unless `check` is set.
    ///
    /// A failing template is logged and recorded, the remaining ones still run.
    pub fn run(&self, templates: &[PathBuf], check: bool) -> Summary {
        let mut summary = Summary::default();
        for template in templates {
            let outcome = self.process(template).and_then(|result| {
                if !check {
                    self.apply(&result)?;
                }
                Ok(result)
            });
            match outcome {
                Ok(result) => {
                    if check && result.action != FileAction::Unchanged {
                        summary.stale += 1;
                    }
                    summary.processed.push(result);
                }
                Err(e) => {
                    error!("{}: {e}", template.display());
                    summary.failures.push((template.clone(), e));
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_actions() {
        assert_eq!(FileAction::Create.describe(true), "Would create");
        assert_eq!(FileAction::Update.to_string(), "Updated");
        assert_eq!(FileAction::Unchanged.describe(true), "Unchanged");
    }

    #[test]
    fn test_infix_in_the_middle_only() {
        assert!(is_template_file("a.template.b.c"));
        assert_eq!(
            resolve_target_path("dir/a.template.b.c"),
            Some(PathBuf::from("dir/a.b.c"))
        );
    }
}
