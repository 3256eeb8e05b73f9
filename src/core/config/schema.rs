//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: provider names must be
//! known forges and hosts must be non-empty. Hosts and capability tables
//! are matched ignoring case, so keys differing only in case are rejected.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::forge::{valid_forge_names, CapabilityKind, CapabilitySet};

/// forgekit configuration file.
///
/// # Example
///
/// ```toml
/// default_base_branch = "main"
///
/// [hosts]
/// "git.example.com" = "gitlab"
///
/// [capabilities.azure]
/// prs = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeConfig {
    /// Base branch used when the caller has none (default: "main")
    pub default_base_branch: Option<String>,

    /// Self-hosted domains mapped to a provider name
    pub hosts: BTreeMap<String, String>,

    /// Per-provider capability overrides, keyed by provider name
    pub capabilities: BTreeMap<String, CapabilityOverrides>,
}

impl ForgeConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.default_base_branch {
            if base.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "default_base_branch cannot be empty".to_string(),
                ));
            }
        }

        for (host, forge) in &self.hosts {
            if host.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "host alias cannot be empty".to_string(),
                ));
            }
            validate_forge_name(forge, &format!("host '{}'", host))?;
        }
        reject_duplicate_keys(self.hosts.keys(), "hosts")?;

        for forge in self.capabilities.keys() {
            validate_forge_name(forge, "capabilities table")?;
        }
        reject_duplicate_keys(self.capabilities.keys(), "capabilities")?;

        Ok(())
    }
}

fn reject_duplicate_keys<'a>(
    keys: impl Iterator<Item = &'a String>,
    table: &str,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for key in keys {
        let normalized = key.trim().trim_end_matches('.').to_lowercase();
        if !seen.insert(normalized) {
            return Err(ConfigError::InvalidValue(format!(
                "duplicate key '{}' in [{}] (keys are case-insensitive)",
                key, table
            )));
        }
    }
    Ok(())
}

fn validate_forge_name(forge: &str, context: &str) -> Result<(), ConfigError> {
    let valid_forges = valid_forge_names();
    let lowered = forge.to_lowercase();
    if !valid_forges.iter().any(|name| *name == lowered) {
        return Err(ConfigError::InvalidValue(format!(
            "invalid forge '{}' in {}, must be one of: {}",
            forge,
            context,
            valid_forges.join(", ")
        )));
    }
    Ok(())
}

/// Capability switches for one provider.
///
/// Unset entries keep the provider's default.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CapabilityOverrides {
    /// Branch and pull request listing
    pub list: Option<bool>,
    /// Issue tracking
    pub issues: Option<bool>,
    /// Pull request management
    pub prs: Option<bool>,
    /// Repository metadata
    pub repo: Option<bool>,
    /// CI check monitoring
    pub checks: Option<bool>,
}

impl CapabilityOverrides {
    /// Check if no capability is overridden.
    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, value)| value.is_none())
    }

    /// Apply the overrides to a capability set.
    pub fn apply(&self, capabilities: &mut CapabilitySet) {
        for (kind, value) in self.entries() {
            match value {
                Some(true) => capabilities.insert(kind),
                Some(false) => {
                    capabilities.remove(&kind);
                }
                None => {}
            }
        }
    }

    fn entries(&self) -> [(CapabilityKind, Option<bool>); 5] {
        [
            (CapabilityKind::List, self.list),
            (CapabilityKind::Issues, self.issues),
            (CapabilityKind::PullRequests, self.prs),
            (CapabilityKind::Repo, self.repo),
            (CapabilityKind::Checks, self.checks),
        ]
    }
}
