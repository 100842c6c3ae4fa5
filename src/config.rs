use crate::activity::intensity::{ShadingMode, Thresholds};
use crate::cli::{CommonArgs, ConfigAction};
use crate::error::{CommitMapError, Result};
use anyhow::Context;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".githelperrc";

/// Key-value settings shared with the other repo helper tools. Keys this tool does
/// not know about are kept and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repo_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_thresholds: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_shading: Option<ShadingMode>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// A missing file is an empty record.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no settings at {}", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Like `load`, but an unreadable or malformed file is logged and treated as empty.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("ignoring settings at {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        fs::write(path, text)?;
        debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// Persist `root` into the file at `path`, keeping every other key. A file that
    /// does not parse is left untouched and reported as an error. Returns whether the
    /// file was written.
    pub fn remember_root(path: &Path, root: &Path) -> Result<bool> {
        let mut settings = Self::load(path)?;
        if !settings.set_root(root) {
            return Ok(false);
        }
        settings.save(path)?;
        Ok(true)
    }

    pub fn thresholds(&self) -> Result<Thresholds> {
        match &self.heatmap_thresholds {
            Some(bounds) => Thresholds::new(bounds.clone()),
            None => Ok(Thresholds::default()),
        }
    }

    /// Store `root` as the repository base. Returns whether the value changed.
    pub fn set_root(&mut self, root: &Path) -> bool {
        let root = root.to_string_lossy().into_owned();
        if self.local_repo_base.as_deref() == Some(root.as_str()) {
            return false;
        }
        self.local_repo_base = Some(root);
        true
    }
}

fn settings_path(common: &CommonArgs) -> anyhow::Result<PathBuf> {
    common
        .config
        .clone()
        .or_else(Settings::default_path)
        .context("Could not determine the home directory; pass --config <FILE>")
}

pub fn exec(common: &CommonArgs, action: ConfigAction) -> anyhow::Result<()> {
    let path = settings_path(common)?;
    let mut settings = Settings::load(&path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    match action {
        ConfigAction::Show => {
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&settings)?);
            return Ok(());
        }
        ConfigAction::SetRoot { path: root } => {
            if !root.is_dir() {
                anyhow::bail!("{} is not a directory", root.display());
            }
            settings.set_root(&root);
        }
        ConfigAction::SetThresholds { list } => {
            let thresholds = parse_threshold_list(&list).context("Invalid threshold list")?;
            settings.heatmap_thresholds = Some(thresholds.upper_bounds().to_vec());
        }
        ConfigAction::SetShading { mode } => {
            settings.heatmap_shading = Some(mode);
        }
    }

    settings
        .save(&path)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    info!("updated {}", path.display());
    Ok(())
}

/// Parse a comma separated bound list such as `0,5,10,15,20`.
pub fn parse_threshold_list(input: &str) -> Result<Thresholds> {
    let bounds = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|e| CommitMapError::Config(format!("invalid bound '{s}': {e}")))
        })
        .collect::<Result<Vec<u32>>>()?;
    Thresholds::new(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("rc")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn keeps_foreign_keys_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rc");
        fs::write(&path, r#"{"server": "example.com", "port": "22", "local_repo_base": "/old"}"#)
            .unwrap();

        let mut settings = Settings::load(&path).unwrap();
        assert!(settings.set_root(Path::new("/new")));
        assert!(!settings.set_root(Path::new("/new")));
        settings.save(&path).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["server"], "example.com");
        assert_eq!(raw["port"], "22");
        assert_eq!(raw["local_repo_base"], "/new");
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rc");
        fs::write(&path, "{not json").unwrap();
        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn remember_root_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rc");
        fs::write(&path, r#"{"server": "example.com", "port": "22"}"#).unwrap();

        assert!(Settings::remember_root(&path, Path::new("/repos")).unwrap());
        assert!(!Settings::remember_root(&path, Path::new("/repos")).unwrap());

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["server"], "example.com");
        assert_eq!(raw["local_repo_base"], "/repos");
    }

    #[test]
    fn remember_root_leaves_unparsable_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rc");
        let original = r#"{"server":"example.com","port":"22","heatmap_shading":"Fixed"}"#;
        fs::write(&path, original).unwrap();

        // Reading still works, with defaults.
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        assert!(Settings::remember_root(&path, Path::new("/repos")).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn remember_root_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rc");
        assert!(Settings::remember_root(&path, Path::new("/repos")).unwrap());
        assert_eq!(
            Settings::load(&path).unwrap().local_repo_base.as_deref(),
            Some("/repos")
        );
    }

    #[test]
    fn thresholds_from_settings() {
        let mut settings = Settings::default();
        assert_eq!(settings.thresholds().unwrap(), Thresholds::default());

        settings.heatmap_thresholds = Some(vec![0, 2, 4]);
        assert_eq!(settings.thresholds().unwrap().levels(), 4);

        settings.heatmap_thresholds = Some(vec![3, 1]);
        assert!(settings.thresholds().is_err());
    }

    #[test]
    fn threshold_list_parsing() {
        assert_eq!(parse_threshold_list("0, 3,9").unwrap().upper_bounds(), &[0, 3, 9]);
        assert!(parse_threshold_list("0,x").is_err());
        assert!(parse_threshold_list("").is_err());
    }
}
