use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use taskboost_core::Seed;
use tracing::debug;

pub fn taskboost_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".taskboost"))
}

pub fn ensure_taskboost_home() -> Result<PathBuf> {
    let dir = taskboost_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Tasks and users for a session: the seed file when configured, else the demo data.
pub fn load_seed(seed_file: Option<&Path>) -> Result<Seed> {
    let Some(path) = seed_file else {
        debug!("using built-in demo data");
        return Ok(Seed::mock());
    };

    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let seed: Seed =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    debug!(
        path = %path.display(),
        tasks = seed.tasks.len(),
        users = seed.users.len(),
        "loaded seed file"
    );
    Ok(seed)
}
