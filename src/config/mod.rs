use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::cli::Args;
use crate::emit::{FORMATS, Visibility};

/// Config file looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "pcidb.yml";
/// Database path used when neither the command line nor the config names one.
pub const DEFAULT_INPUT: &str = "pci.ids";

/// Contents of `pcidb.yml`. Every key is optional.
///
/// ```yaml
/// input: vendor/pci.ids
/// output: src/pci_db.rs
/// format: rust
/// visibility: pub(crate)
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub visibility: Option<String>,
    /// Directory of the loaded file; relative paths above resolve against it.
    #[serde(skip)]
    config_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.config_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Load config from the given path, or look for `pcidb.yml` in the current
/// directory. A missing default file yields an empty config; a missing
/// explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if !default.exists() {
                return Ok(FileConfig::default());
            }
            default.to_path_buf()
        }
    };

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let mut config: FileConfig = if contents.trim().is_empty() {
        FileConfig::default()
    } else {
        serde_yml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", config_path.display()))?
    };
    config.config_dir = Some(
        config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    );
    Ok(config)
}

/// Effective settings for one run: command line over config file over
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    /// `None` writes to stdout.
    pub output: Option<PathBuf>,
    pub format: String,
    pub visibility: Visibility,
    pub check: bool,
}

impl Settings {
    pub fn resolve(args: &Args, config: &FileConfig) -> Result<Self> {
        let input = match (&args.input, &config.input) {
            (Some(p), _) => p.clone(),
            (None, Some(p)) => config.resolve_path(p),
            (None, None) => PathBuf::from(DEFAULT_INPUT),
        };

        let output = match (&args.output, &config.output) {
            (Some(p), _) => Some(p.clone()),
            (None, Some(p)) => Some(config.resolve_path(p)),
            (None, None) => None,
        };

        let format = args
            .format
            .clone()
            .or_else(|| config.format.clone())
            .unwrap_or_else(|| "rust".to_string());
        if !FORMATS.contains(&format.as_str()) {
            bail!(
                "unknown format {format:?} (expected one of: {})",
                FORMATS.join(", ")
            );
        }

        let visibility = match args.visibility.as_deref().or(config.visibility.as_deref()) {
            None => Visibility::default(),
            Some(v) => Visibility::from_str(v).with_context(|| {
                format!("unknown visibility {v:?} (expected pub, pub(crate) or private)")
            })?,
        };

        if args.check && output.is_none() {
            bail!("--check needs an output file (-o or `output` in the config)");
        }

        Ok(Settings {
            input,
            output,
            format,
            visibility,
            check: args.check,
        })
    }
}
