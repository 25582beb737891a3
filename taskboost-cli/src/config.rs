use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use taskboost_core::dashboard::DEFAULT_LEADERBOARD_LIMIT;
use taskboost_core::{CURRENT_USER_ID, DEFAULT_REWARD};

use crate::state::{ensure_taskboost_home, taskboost_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dashboard: DashboardSection,
    pub tasks: TasksSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// User whose profile card is shown.
    pub current_user: String,
    pub target_rewards: u64,
    /// Free text, shown as-is.
    pub upcoming_payout: String,
    pub leaderboard_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksSection {
    pub default_reward: u32,
    /// JSON file with `tasks` and `users` to use instead of the demo data.
    pub seed_file: Option<PathBuf>,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            current_user: CURRENT_USER_ID.to_string(),
            target_rewards: 2500,
            upcoming_payout: "April 30, 2025".to_string(),
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

impl Default for TasksSection {
    fn default() -> Self {
        Self {
            default_reward: DEFAULT_REWARD,
            seed_file: None,
        }
    }
}

/// Where the config lives. Does not create anything.
pub fn config_path() -> Result<PathBuf> {
    Ok(taskboost_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Defaults when `p` is missing; the file system is left untouched.
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        tracing::debug!(path = %p.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_taskboost_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config(cfg: &Config) -> Result<()> {
    print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("[dashboard]\ntarget_rewards = 4000\n").unwrap();
        assert_eq!(cfg.dashboard.target_rewards, 4000);
        assert_eq!(cfg.dashboard.current_user, "1");
        assert_eq!(cfg.dashboard.leaderboard_limit, 5);
        assert_eq!(cfg.tasks.default_reward, 50);
        assert_eq!(cfg.tasks.seed_file, None);
    }

    #[test]
    fn missing_file_gives_defaults_without_creating_dirs() {
        let dir = std::env::temp_dir().join(format!("taskboost-no-home-{}", std::process::id()));
        let p = dir.join("config.toml");

        assert_eq!(load_config_from(&p).unwrap(), Config::default());
        assert!(!dir.exists());
    }

    #[test]
    fn reads_existing_file() {
        let dir = std::env::temp_dir().join(format!("taskboost-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join("config.toml");
        fs::write(&p, "[tasks]\ndefault_reward = 75\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        assert_eq!(cfg.tasks.default_reward, 75);
        assert_eq!(cfg.dashboard, DashboardSection::default());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, Config::default());
    }
}
