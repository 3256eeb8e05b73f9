//! forge::factory
//!
//! Forge selection and creation.
//!
//! # Design
//!
//! This module is the single place where a repository host is mapped to a
//! provider. Callers use [`create_forge()`] or a [`ForgeFactory`] instead of
//! constructing provider types directly.
//!
//! # Provider Detection
//!
//! The repository host is matched against the built-in domains:
//! - `github.com` → GitHub
//! - `gitlab.com` → GitLab
//! - `bitbucket.org` → Bitbucket
//! - `dev.azure.com` → Azure DevOps
//!
//! A factory built from configuration also knows self-hosted aliases.
//! Hosts matching neither fail with [`ForgeError::UnsupportedHost`]; there
//! is no fallback provider.
//!
//! # Example
//!
//! ```
//! use forgekit::core::types::{ForgeArguments, RepoInfo};
//! use forgekit::forge::{ForgeFactory, ForgeName, ForgeProvider};
//!
//! let factory = ForgeFactory::new().with_alias("git.example.com", ForgeName::GitLab);
//!
//! let repo = RepoInfo::new("git.example.com", "team", "app");
//! let forge = factory.build(ForgeArguments::new(repo, "main")).unwrap();
//! assert_eq!(forge.name(), ForgeName::GitLab);
//!
//! // Or explicitly specify provider
//! let repo = RepoInfo::new("code.internal", "team", "app");
//! let forge = factory
//!     .build_with_override(ForgeArguments::new(repo, "main"), Some("github"))
//!     .unwrap();
//! assert_eq!(forge.name(), ForgeName::GitHub);
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use super::capability::CapabilitySet;
use super::traits::{Forge, ForgeError};
use super::{azure, bitbucket, github, gitlab};
use crate::core::config::Config;
use crate::core::types::{ForgeArguments, RepoInfo, TypeError};

/// Supported forge providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForgeName {
    /// GitHub
    GitHub,
    /// GitLab
    GitLab,
    /// Bitbucket Cloud
    Bitbucket,
    /// Azure DevOps
    Azure,
}

impl ForgeName {
    /// Get all providers.
    ///
    /// # Example
    ///
    /// ```
    /// use forgekit::forge::ForgeName;
    ///
    /// assert_eq!(ForgeName::all().len(), 4);
    /// assert!(ForgeName::all().contains(&ForgeName::Azure));
    /// ```
    pub fn all() -> &'static [ForgeName] {
        &[
            ForgeName::GitHub,
            ForgeName::GitLab,
            ForgeName::Bitbucket,
            ForgeName::Azure,
        ]
    }

    /// Get the provider name as a string.
    ///
    /// This matches the name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            ForgeName::GitHub => "github",
            ForgeName::GitLab => "gitlab",
            ForgeName::Bitbucket => "bitbucket",
            ForgeName::Azure => "azure",
        }
    }

    /// Parse a provider from a string, ignoring case.
    ///
    /// # Example
    ///
    /// ```
    /// use forgekit::forge::ForgeName;
    ///
    /// assert_eq!(ForgeName::parse("Azure"), Some(ForgeName::Azure));
    /// assert_eq!(ForgeName::parse("gitea"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "github" => Some(ForgeName::GitHub),
            "gitlab" => Some(ForgeName::GitLab),
            "bitbucket" => Some(ForgeName::Bitbucket),
            "azure" => Some(ForgeName::Azure),
            _ => None,
        }
    }

    /// Built-in domain of the provider.
    pub fn domain(&self) -> &'static str {
        match self {
            ForgeName::GitHub => github::GITHUB_DOMAIN,
            ForgeName::GitLab => gitlab::GITLAB_DOMAIN,
            ForgeName::Bitbucket => bitbucket::BITBUCKET_DOMAIN,
            ForgeName::Azure => azure::AZURE_DOMAIN,
        }
    }

    /// Provider whose built-in domain is `host`.
    pub fn from_domain(host: &str) -> Option<Self> {
        let host = normalize_host(host);
        Self::all()
            .iter()
            .copied()
            .find(|name| name.domain() == host)
    }

    /// Capabilities the provider supports out of the box.
    pub fn default_capabilities(&self) -> CapabilitySet {
        match self {
            ForgeName::GitHub => CapabilitySet::with(github::DEFAULT_CAPABILITIES),
            ForgeName::GitLab => CapabilitySet::with(gitlab::DEFAULT_CAPABILITIES),
            ForgeName::Bitbucket => CapabilitySet::with(bitbucket::DEFAULT_CAPABILITIES),
            ForgeName::Azure => CapabilitySet::with(azure::DEFAULT_CAPABILITIES),
        }
    }

    /// Check if repositories on this provider live under an organization.
    pub fn requires_organization(&self) -> bool {
        matches!(self, ForgeName::Azure)
    }
}

impl std::fmt::Display for ForgeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a provider was chosen, for logging.
#[derive(Debug, Clone, Copy)]
enum Selection {
    Domain,
    Alias,
    Override,
}

impl Selection {
    fn as_str(&self) -> &'static str {
        match self {
            Selection::Domain => "domain",
            Selection::Alias => "alias",
            Selection::Override => "override",
        }
    }
}

/// Builds forges from repository configuration.
///
/// Holds host aliases, per-provider capability tables and the default
/// base branch. The built-in domains always take precedence over aliases.
#[derive(Debug, Clone)]
pub struct ForgeFactory {
    aliases: HashMap<String, ForgeName>,
    capabilities: HashMap<ForgeName, CapabilitySet>,
    default_base_branch: String,
}

impl Default for ForgeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ForgeFactory {
    /// Create a factory with no aliases and the default capability tables.
    pub fn new() -> Self {
        Self {
            aliases: HashMap::new(),
            capabilities: ForgeName::all()
                .iter()
                .map(|name| (*name, name.default_capabilities()))
                .collect(),
            default_base_branch: "main".to_string(),
        }
    }

    /// Create a factory from loaded configuration.
    ///
    /// Applies host aliases, capability overrides and the default base
    /// branch.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::UnknownProvider` if the configuration names an
    /// unknown provider. Configuration loaded through [`Config`] has
    /// already been validated, so this only happens for hand-built values.
    pub fn from_config(config: &Config) -> Result<Self, ForgeError> {
        let mut factory = Self::new();
        factory.default_base_branch = config.default_base_branch().to_string();

        for (host, provider) in config.host_aliases() {
            factory = factory.with_alias(host, resolve_provider(provider)?);
        }

        for (provider, overrides) in config.capability_overrides() {
            let name = resolve_provider(provider)?;
            if overrides.is_empty() {
                continue;
            }
            let mut caps = factory.capabilities_for(name);
            overrides.apply(&mut caps);
            let keys: Vec<&str> = caps.iter().map(|c| c.key()).collect();
            debug!(forge = %name, capabilities = ?keys, "capability table overridden by config");
            factory = factory.with_capabilities(name, caps);
        }

        Ok(factory)
    }

    /// Map a self-hosted domain to a provider.
    ///
    /// Aliases for a built-in domain are ignored; the built-in mapping
    /// wins.
    pub fn with_alias(mut self, host: &str, name: ForgeName) -> Self {
        let host = normalize_host(host);
        if let Some(builtin) = ForgeName::from_domain(&host) {
            warn!(
                host = %host,
                alias = %name,
                builtin = %builtin,
                "host alias shadowed by built-in domain, ignoring"
            );
            return self;
        }
        self.aliases.insert(host, name);
        self
    }

    /// Replace the capability table of a provider.
    pub fn with_capabilities(mut self, name: ForgeName, capabilities: CapabilitySet) -> Self {
        self.capabilities.insert(name, capabilities);
        self
    }

    /// Base branch for arguments built by [`ForgeFactory::arguments`].
    pub fn default_base_branch(&self) -> &str {
        &self.default_base_branch
    }

    /// Arguments for `repo` compared against the default base branch.
    pub fn arguments(&self, repo: RepoInfo) -> ForgeArguments {
        ForgeArguments::new(repo, self.default_base_branch.as_str())
    }

    /// Provider serving `host`, by built-in domain or alias.
    pub fn detect(&self, host: &str) -> Option<ForgeName> {
        self.detect_with_source(host).map(|(name, _)| name)
    }

    fn detect_with_source(&self, host: &str) -> Option<(ForgeName, Selection)> {
        if let Some(name) = ForgeName::from_domain(host) {
            return Some((name, Selection::Domain));
        }
        self.aliases
            .get(&normalize_host(host))
            .map(|name| (*name, Selection::Alias))
    }

    /// Effective capability table of a provider.
    pub fn capabilities_for(&self, name: ForgeName) -> CapabilitySet {
        self.capabilities
            .get(&name)
            .cloned()
            .unwrap_or_else(|| name.default_capabilities())
    }

    /// Build the forge serving the repository host.
    ///
    /// # Errors
    ///
    /// - `ForgeError::InvalidRepo` if the repository info is unusable
    /// - `ForgeError::UnsupportedHost` if no provider serves the host
    pub fn build(&self, args: ForgeArguments) -> Result<Forge, ForgeError> {
        self.build_with_override(args, None)
    }

    /// Build a forge, optionally forcing the provider by name.
    ///
    /// # Errors
    ///
    /// - `ForgeError::InvalidRepo` if the repository info is unusable
    /// - `ForgeError::UnknownProvider` if the override names no provider
    /// - `ForgeError::UnsupportedHost` if there is no override and no
    ///   provider serves the host
    pub fn build_with_override(
        &self,
        args: ForgeArguments,
        provider_override: Option<&str>,
    ) -> Result<Forge, ForgeError> {
        args.repo.validate()?;

        let (name, selection) = match provider_override {
            Some(provider) => (resolve_provider(provider)?, Selection::Override),
            None => self.detect_with_source(args.repo.host()).ok_or_else(|| {
                ForgeError::UnsupportedHost {
                    host: args.repo.host().to_string(),
                    supported: available_providers_string(),
                }
            })?,
        };

        if name.requires_organization() && args.repo.organization().is_none() {
            return Err(TypeError::MissingOrganization {
                host: args.repo.host().to_string(),
            }
            .into());
        }

        debug!(
            host = args.repo.host(),
            forge = %name,
            selected_by = selection.as_str(),
            "forge selected"
        );

        let capabilities = self.capabilities_for(name);
        Ok(Forge::new(name, args, capabilities))
    }
}

/// Create a forge with the built-in domains and default capabilities.
///
/// # Errors
///
/// See [`ForgeFactory::build`].
///
/// # Example
///
/// ```
/// use forgekit::core::types::{ForgeArguments, RepoInfo};
/// use forgekit::forge::{create_forge, ForgeError};
///
/// let repo = RepoInfo::new("git.example.com", "team", "app");
/// let result = create_forge(ForgeArguments::new(repo, "main"));
/// assert!(matches!(result, Err(ForgeError::UnsupportedHost { .. })));
/// ```
pub fn create_forge(args: ForgeArguments) -> Result<Forge, ForgeError> {
    ForgeFactory::new().build(args)
}

/// Detect the provider of a built-in domain.
///
/// # Example
///
/// ```
/// use forgekit::forge::{detect_forge, ForgeName};
///
/// assert_eq!(detect_forge("GitHub.com"), Some(ForgeName::GitHub));
/// assert_eq!(detect_forge("git.example.com"), None);
/// ```
pub fn detect_forge(host: &str) -> Option<ForgeName> {
    ForgeName::from_domain(host)
}

/// Resolve a provider name to a ForgeName.
fn resolve_provider(name: &str) -> Result<ForgeName, ForgeError> {
    ForgeName::parse(name).ok_or_else(|| ForgeError::UnknownProvider {
        name: name.to_string(),
        available: available_providers_string(),
    })
}

/// Get a comma-separated string of available providers.
pub(crate) fn available_providers_string() -> String {
    valid_forge_names().join(", ")
}

/// Get list of valid forge names for configuration validation.
pub fn valid_forge_names() -> Vec<&'static str> {
    ForgeName::all().iter().map(|name| name.name()).collect()
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_lowercase()
}
