//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# ktindent configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/.gradle/**",
]

# Respect .gitignore files
respect_gitignore = true

# Abort when a file does not parse cleanly
fail_on_parse_error = false

# Properties applied to every file
[properties]
indent_size = 4
continuation_indent_size = 4

# Properties for matching files, later entries win
# [[overrides]]
# files = ["**/*.kts"]
# properties = { continuation_indent_size = 8 }

[rules.indent]
enabled = true
# severity = "warning"  # Override default severity
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("ktindent.toml"), force)?;

    println!("Created ktindent.toml");
    println!("\nNext steps:");
    println!("  1. Edit ktindent.toml to set indent sizes");
    println!("  2. Run: ktindent check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktindent_core::Config;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.is_rule_enabled("indent"));
        assert_eq!(
            config.properties_for(Path::new("Main.kt")).get("indent_size"),
            Some("4")
        );
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ktindent.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
