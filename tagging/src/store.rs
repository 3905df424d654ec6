// Copyright (c) 2024 Botho Foundation

//! JSON persistence of a deployment.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::Deployment;

impl Deployment {
    /// Save the deployment to `path`.
    ///
    /// Writes a sibling temp file first and renames it over `path`, so a
    /// crash never leaves a truncated state file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_vec_pretty(self).context("Failed to serialize deployment state")?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write state to {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move state into {}", path.display()))?;

        debug!(path = %path.display(), calls = self.calls_applied(), "Deployment saved");
        Ok(())
    }

    /// Load a deployment saved with [`Deployment::save`].
    ///
    /// Host entropy is reseeded from the OS; the ledger invariants are
    /// checked before the state is handed out.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read(path)
            .with_context(|| format!("Failed to read state from {}", path.display()))?;

        let deployment: Deployment = serde_json::from_slice(&contents)
            .with_context(|| format!("Failed to parse state from {}", path.display()))?;

        deployment
            .tags()
            .check_invariants()
            .with_context(|| format!("Corrupt state in {}", path.display()))?;

        debug!(path = %path.display(), calls = deployment.calls_applied(), "Deployment loaded");
        Ok(deployment)
    }
}
