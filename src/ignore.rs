//! Exclusion patterns for template discovery.
//! Combines built-in patterns, the `.splicegenignore` file of the source
//! directory and the `exclude` list of the project configuration.

use crate::constants::{DEFAULT_IGNORE_PATTERNS, IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

fn add_pattern(builder: &mut GlobSetBuilder, pattern: &str) -> Result<()> {
    let glob = Glob::new(pattern)
        .map_err(|e| Error::IgnoreError(format!("invalid pattern '{pattern}': {e}")))?;
    builder.add(glob);
    Ok(())
}

/// Builds the set of glob patterns that excludes paths from template discovery.
///
/// # Arguments
/// * `ignore_path` - Path to the `.splicegenignore` file
/// * `extra` - Additional patterns, usually from the configuration file
///
/// # Returns
/// * `Result<GlobSet>` - Compiled patterns, matched against paths relative to the source directory
///
/// # Notes
/// - A missing ignore file only leaves the defaults and `extra`
/// - Blank lines and lines starting with `#` are skipped
pub fn parse_ignore_file<P: AsRef<Path>>(ignore_path: P, extra: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_IGNORE_PATTERNS {
        add_pattern(&mut builder, pattern)?;
    }

    if let Ok(contents) = read_to_string(ignore_path.as_ref()) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            add_pattern(&mut builder, line)?;
        }
    } else {
        debug!("{IGNORE_FILE} does not exist");
    }

    for pattern in extra {
        add_pattern(&mut builder, pattern)?;
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_extra_pattern() {
        let result = parse_ignore_file("/nonexistent/.splicegenignore", &["a[".to_string()]);
        assert!(matches!(result, Err(Error::IgnoreError(_))));
    }
}
