//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use techmart_catalog::search::{HomeSearch, SearchHandoff};
use techmart_client::ApiClient;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["techmart.toml", ".techmart.toml", "techmart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file, then apply environment overrides.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config: config.with_env_overrides(),
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let path = find_config_file(start)?;
        CliConfig::load(path.to_str()?).ok()
    }

    /// Build an API client from the loaded config.
    pub fn client(&self) -> ApiClient {
        let client = ApiClient::new(self.config.api.base_url.as_str());
        match &self.config.api.token {
            Some(token) => client.with_token(token.as_str()),
            None => client,
        }
    }

    /// Local state directory (`.techmart/` under the working directory).
    pub fn state_dir(&self) -> Result<PathBuf> {
        let dir = self.cwd.join(".techmart");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(dir)
    }

    fn handoff_path(&self) -> Result<PathBuf> {
        Ok(self.state_dir()?.join("search.json"))
    }

    /// Store a homepage search for the next `browse`.
    pub fn put_search(&self, search: HomeSearch) -> Result<()> {
        let path = self.handoff_path()?;
        let mut handoff = read_handoff(&path)?;
        handoff.put(search);
        std::fs::write(&path, handoff.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Take the pending search, if any. The slot is cleared on disk.
    pub fn take_search(&self) -> Result<Option<HomeSearch>> {
        let path = self.handoff_path()?;
        let mut handoff = read_handoff(&path)?;
        let pending = handoff.take();
        if pending.is_some() {
            std::fs::write(&path, handoff.to_json()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(pending)
    }

    /// Look at the pending search without consuming it.
    pub fn peek_search(&self) -> Result<Option<HomeSearch>> {
        let handoff = read_handoff(&self.handoff_path()?)?;
        Ok(handoff.peek().cloned())
    }
}

/// Walk up from `start` looking for a config file.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn read_handoff(path: &Path) -> Result<SearchHandoff> {
    if !path.exists() {
        return Ok(SearchHandoff::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    SearchHandoff::from_json(&content)
        .with_context(|| format!("Corrupt search hand-off: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn context_in(cwd: &Path) -> Context {
        Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: cwd.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("techmart.toml"), "[api]\n").unwrap();

        assert_eq!(find_config_file(&nested), Some(root.join("techmart.toml")));
    }

    #[test]
    fn test_search_handoff_is_read_once() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        ctx.put_search(HomeSearch {
            brand: Some("Asus".into()),
            ..Default::default()
        })
        .unwrap();

        assert!(ctx.peek_search().unwrap().is_some());
        let taken = ctx.take_search().unwrap().unwrap();
        assert_eq!(taken.brand.as_deref(), Some("Asus"));
        assert!(ctx.take_search().unwrap().is_none());
    }

    #[test]
    fn test_client_uses_config() {
        let dir = tempdir().unwrap();
        let mut ctx = context_in(dir.path());
        ctx.config.api.base_url = "http://shop/api".into();
        ctx.config.api.token = Some("t0k".into());
        let client = ctx.client();
        assert_eq!(client.base_url(), "http://shop/api");
        assert_eq!(
            client.get("products").header_value("Authorization"),
            Some("Bearer t0k")
        );
    }
}
