//! Common constants used throughout splicegen.

/// Supported project configuration file names, tried in order
pub const CONFIG_FILES: [&str; 3] = ["splicegen.json", "splicegen.yml", "splicegen.yaml"];

/// Ignore file name, one glob per line
pub const IGNORE_FILE: &str = ".splicegenignore";

/// Structure model file looked up in the source directory by default
pub const DEFAULT_STRUCTURE_MODEL: &str = "structure.model.json";

/// Config model file looked up in the source directory by default
pub const DEFAULT_CONFIG_MODEL: &str = "config.model.json";

/// File name part that marks a template, `utils.template.c` renders to `utils.c`
pub const TEMPLATE_INFIX: &str = "template";

/// Shape of every insertion point a template may contain
pub const MARKER_PATTERN: &str = r"\{\{GENERATE_[A-Z0-9_]+\}\}";

/// Patterns that are never scanned for templates
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = ["**/.git/**", "**/node_modules/**", "**/target/**"];
