//! Compose command - Build a collector config from configured destinations
//!
//! Reads the destination list from the conduit config, merges it into the
//! base collector document, and writes the result as YAML.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use conduit_compose::Composer;
use conduit_config::{AppConfig, ConfigDocument};

/// Base document bundled into the binary
const DEFAULT_BASE: &str = include_str!("../../configs/base.yaml");

/// Config file tried when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "configs/conduit.toml";

/// Compose command arguments
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Path to configuration file (defaults to configs/conduit.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base collector document. Overrides [base] path.
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Write the composed document here instead of stdout. Overrides [output] path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Load the conduit config
///
/// An explicitly given path must exist. Without one, the default path is
/// used when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            AppConfig::from_file(path).context("failed to load configuration")
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                AppConfig::from_file(default).context("failed to load configuration")
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

/// Run the compose command
pub fn run(args: ComposeArgs, config: AppConfig) -> Result<()> {
    let base_path = args.base.or_else(|| config.base.path.clone());
    let output_path = args.output.or_else(|| config.output.path.clone());

    let yaml = compose(base_path.as_deref(), &config)?;

    match output_path {
        Some(path) => {
            fs::write(&path, &yaml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote collector config");
        }
        None => {
            io::stdout()
                .write_all(yaml.as_bytes())
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Compose the configured destinations into YAML
fn compose(base_path: Option<&Path>, config: &AppConfig) -> Result<String> {
    let base = match base_path {
        Some(path) => ConfigDocument::from_file(path).context("failed to load base document")?,
        None => ConfigDocument::from_yaml_str(DEFAULT_BASE).context("invalid bundled base document")?,
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base = %base_path.map(|p| p.display().to_string()).unwrap_or_else(|| "(bundled)".to_string()),
        destinations = config.destinations.len(),
        active = config.active_destinations().count(),
        "composing collector config"
    );

    let composer = Composer::builtin().context("failed to build destination registry")?;
    let doc = composer
        .compose(&base, &config.destinations)
        .context("composition failed")?;

    doc.to_yaml_string().context("failed to serialize collector config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[[destinations]]
id = "jaeger-local"
type = "jaeger"
signals = ["traces"]
data = { JAEGER_URL = "jaeger:4317" }
"#;

    #[test]
    fn test_bundled_base_parses() {
        let base = ConfigDocument::from_yaml_str(DEFAULT_BASE).unwrap();
        assert!(base.receivers().contains_key("otlp"));
        assert!(base.processors().contains_key("batch"));
        assert!(base.pipelines().is_empty());
    }

    #[test]
    fn test_compose_with_bundled_base() {
        let config = AppConfig::from_str(CONFIG).unwrap();
        let yaml = compose(None, &config).unwrap();

        assert!(yaml.contains("otlp/jaeger"));
        assert!(yaml.contains("traces/jaeger"));
        assert!(yaml.contains("health_check"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("collector.yaml");
        let config = AppConfig::from_str(CONFIG).unwrap();

        let args = ComposeArgs {
            config: None,
            base: None,
            output: Some(output.clone()),
        };
        run(args, config).unwrap();

        let written = ConfigDocument::from_file(&output).unwrap();
        assert!(written.exporter("otlp/jaeger").is_some());
    }

    #[test]
    fn test_base_from_file() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.yaml");
        fs::write(&base, "receivers: {otlp: {}}\nprocessors: {batch: {}}\n").unwrap();

        let config = AppConfig::from_str(CONFIG).unwrap();
        let yaml = compose(Some(&base), &config).unwrap();
        assert!(!yaml.contains("health_check"));
        assert!(yaml.contains("otlp/jaeger"));
    }

    #[test]
    fn test_composition_error_surfaces() {
        let config = AppConfig::from_str(
            "[[destinations]]\nid = \"x\"\ntype = \"splunk\"\nsignals = [\"logs\"]\n",
        )
        .unwrap();
        let err = compose(None, &config).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown destination type 'splunk'"));
    }

    #[test]
    fn test_explicit_missing_config() {
        let err = load_config(Some(Path::new("/nonexistent/conduit.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
