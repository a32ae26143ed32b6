use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Shortest refresh interval accepted from the command line or config file.
pub const MIN_INTERVAL_SECS: f64 = 0.5;
/// Longest accepted refresh interval: one day.
pub const MAX_INTERVAL_SECS: f64 = 86_400.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub devices: DevicesConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Seconds between polls
    pub refresh_interval_secs: f64,
    /// Show NFS/CIFS/sshfs mounts alongside local filesystems
    pub include_network_fs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    /// Devices to leave out of I/O collection: exact names, or prefixes ending in "*"
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color theme: default, nord, mono
    pub theme: String,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { refresh_interval_secs: 2.0, include_network_fs: false }
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["loop*".into(), "ram*".into(), "zram*".into(), "sr*".into(), "fd*".into()],
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { theme: "default".into() }
    }
}

impl DevicesConfig {
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|pat| {
            if let Some(p) = pat.strip_suffix('*') { name.starts_with(p) }
            else { pat == name }
        })
    }
}

/// Clamp a requested interval into `MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS`.
/// Non-finite values fall back to the minimum.
pub fn clamp_interval(secs: f64) -> f64 {
    if !secs.is_finite() {
        warn!("refresh interval {}s is not a number of seconds, using the {}s minimum", secs, MIN_INTERVAL_SECS);
        MIN_INTERVAL_SECS
    } else if secs < MIN_INTERVAL_SECS {
        warn!("refresh interval {}s is below the {}s minimum, using the minimum", secs, MIN_INTERVAL_SECS);
        MIN_INTERVAL_SECS
    } else if secs > MAX_INTERVAL_SECS {
        warn!("refresh interval {}s is above the {}s maximum, using the maximum", secs, MAX_INTERVAL_SECS);
        MAX_INTERVAL_SECS
    } else {
        secs
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load the user's config file, writing defaults on first run.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                if let Err(e) = try_write_defaults(&path) {
                    debug!("could not write default config to {}: {}", path.display(), e);
                }
                Config::default()
            }
            None => Config::default(),
        }
    }

    /// Load from an explicit path; a missing or malformed file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        match try_load(path) {
            Ok(c)  => c,
            Err(e) => {
                warn!("ignoring config {}: {:#}", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("diskmon").join("diskmon.toml"))
    }

    pub fn refresh_interval_secs(&self) -> f64 {
        clamp_interval(self.general.refresh_interval_secs)
    }
}

fn try_load(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    Config::from_toml_str(&text)
}

fn try_write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# diskmon configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
