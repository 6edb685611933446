//! Page content and effect configuration
//!
//! The page is a fixed, hand-authored tree of sections; its content and the
//! tunable effect parameters live in a JSON config. Loading follows the same
//! shape as theme loading: try the user config file first, fall back to the
//! embedded defaults. A missing or unparseable file is never an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One skill entry with a gauge level in percent (0-100)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

/// One project card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One stat card; `value` keeps its authored rendering (`"42+"`, `"3.50"`, ...)
/// so the counter animation can reproduce the exact format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

/// Contact section configuration (the mail handoff target)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub recipient: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_subject() -> String {
    "Portfolio contact".to_string()
}

/// Tunable effect parameters. Timings are milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Tick cadence of the background rain
    #[serde(default = "default_rain_interval")]
    pub rain_interval_ms: u64,
    /// Probability that a column past the bottom resets on a given tick
    #[serde(default = "default_rain_reset")]
    pub rain_reset_probability: f64,
    /// Delay before a resize rebuilds the rain columns
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
    /// Disable all decorative animation (typing text renders fully)
    #[serde(default)]
    pub reduced_motion: bool,
}

fn default_rain_interval() -> u64 {
    50
}

fn default_rain_reset() -> f64 {
    0.025
}

fn default_resize_debounce() -> u64 {
    250
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            rain_interval_ms: default_rain_interval(),
            rain_reset_probability: default_rain_reset(),
            resize_debounce_ms: default_resize_debounce(),
            reduced_motion: false,
        }
    }
}

/// The whole page: identity, sections, and effect tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    pub tagline: String,
    /// Strings cycled by the hero typing effect
    pub typed_lines: Vec<String>,
    pub about: Vec<String>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub stats: Vec<Stat>,
    pub achievements: Vec<String>,
    pub contact: ContactConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "Rae Calloway".to_string(),
            tagline: "systems programmer & terminal enthusiast".to_string(),
            typed_lines: vec![
                "I build fast, reliable software.".to_string(),
                "I care about developer tools.".to_string(),
                "I live in the terminal.".to_string(),
            ],
            about: vec![
                "Backend and infrastructure engineer with a soft spot for".to_string(),
                "text interfaces. I like small binaries, explicit state,".to_string(),
                "and code that explains itself.".to_string(),
            ],
            skills: vec![
                Skill { name: "Rust".to_string(), level: 90 },
                Skill { name: "Distributed systems".to_string(), level: 80 },
                Skill { name: "Linux".to_string(), level: 85 },
                Skill { name: "SQL".to_string(), level: 70 },
            ],
            projects: vec![
                Project {
                    name: "latchkey".to_string(),
                    description: "A zero-config secrets broker for dev machines".to_string(),
                    tags: vec!["rust".to_string(), "security".to_string()],
                },
                Project {
                    name: "plotline".to_string(),
                    description: "Streaming log visualizer for the terminal".to_string(),
                    tags: vec!["tui".to_string(), "observability".to_string()],
                },
                Project {
                    name: "ferrycmd".to_string(),
                    description: "Declarative SSH task runner".to_string(),
                    tags: vec!["cli".to_string(), "automation".to_string()],
                },
            ],
            stats: vec![
                Stat { label: "Projects shipped".to_string(), value: "42+".to_string() },
                Stat { label: "Years writing code".to_string(), value: "12".to_string() },
                Stat { label: "Coffee per day (L)".to_string(), value: "1.50".to_string() },
            ],
            achievements: vec![
                "Spoke at three systems conferences".to_string(),
                "Maintainer of two crates with >1M downloads".to_string(),
                "Once debugged a kernel panic from a train".to_string(),
            ],
            contact: ContactConfig {
                recipient: "rae@example.dev".to_string(),
                subject: default_subject(),
            },
            effects: EffectsConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load the user config if present, otherwise the embedded defaults.
    ///
    /// An explicit `--config` path that fails to load is reported; the
    /// default location failing to load is not (first run has no file).
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Self::default(),
            },
        };

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                if explicit.is_some() {
                    tracing::warn!("{}", err);
                } else {
                    tracing::debug!("no user config at {}: {}", path.display(), err);
                }
                Self::default()
            }
        }
    }

    /// Default config file location under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("termfolio").join("config.json"))
    }
}
