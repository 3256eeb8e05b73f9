//! forge::traits
//!
//! The forge interface and the closed set of its implementations.
//!
//! # Design
//!
//! [`ForgeProvider`] is the contract every hosting provider satisfies:
//! branch handles and commit URLs are always available because they are
//! pure string construction, while the five service accessors answer with
//! a [`Capability`] so callers can branch on support without treating it
//! as an error.
//!
//! [`Forge`] is the tagged variant over the supported providers. The
//! factory returns it, and it implements `ForgeProvider` by delegating to
//! the variant it holds.
//!
//! # Thread Safety
//!
//! Forges are immutable after construction and `Send + Sync`; any number
//! of readers may query one concurrently.

use thiserror::Error;

use super::azure::AzureDevOps;
use super::bitbucket::Bitbucket;
use super::branch::ForgeBranch;
use super::capability::{Capability, CapabilitySet};
use super::factory::ForgeName;
use super::github::GitHub;
use super::gitlab::GitLab;
use super::services::{ChecksMonitor, ForgeRepoService, IssueService, ListService, PrService};
use crate::core::types::{ForgeArguments, TypeError};

/// Errors from forge selection.
///
/// Capability absence is not an error; see
/// [`Capability::Absent`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForgeError {
    /// The repository host matches no known forge or configured alias.
    #[error("unsupported forge host '{host}'. Supported forges: {supported}")]
    UnsupportedHost {
        /// Host that failed to match
        host: String,
        /// Comma-separated provider names
        supported: String,
    },

    /// A provider name (override or config) is not a known forge.
    #[error("unknown forge provider '{name}'. Available providers: {available}")]
    UnknownProvider {
        /// Name that failed to parse
        name: String,
        /// Comma-separated provider names
        available: String,
    },

    /// The repository info is unusable for URL construction.
    #[error("invalid repository: {0}")]
    InvalidRepo(#[from] TypeError),
}

/// The contract every hosting provider implements.
///
/// # Example
///
/// ```
/// use forgekit::core::types::{ForgeArguments, RepoInfo};
/// use forgekit::forge::{create_forge, ForgeName, ForgeProvider};
///
/// let repo = RepoInfo::new("dev.azure.com", "owner1", "repo1").with_organization("org1");
/// let forge = create_forge(ForgeArguments::new(repo, "main")).unwrap();
///
/// assert_eq!(forge.name(), ForgeName::Azure);
/// assert_eq!(
///     forge.commit_url("abc123"),
///     "https://dev.azure.com/org1/owner1/_git/repo1/commit/abc123"
/// );
/// assert!(forge.pr_service().is_absent());
/// ```
pub trait ForgeProvider: Send + Sync {
    /// Provider tag; always the tag the factory selected.
    fn name(&self) -> ForgeName;

    /// Configuration the forge was built from.
    fn arguments(&self) -> &ForgeArguments;

    /// Web URL of the repository.
    fn base_url(&self) -> &str;

    /// Capabilities this forge configuration supports.
    fn capabilities(&self) -> &CapabilitySet;

    /// Web URL of a commit. The id is not validated.
    fn commit_url(&self, id: &str) -> String;

    /// Branch listing, if supported.
    fn list_service(&self) -> Capability<ListService>;

    /// Issue tracking, if supported.
    fn issue_service(&self) -> Capability<IssueService>;

    /// Pull request management, if supported.
    fn pr_service(&self) -> Capability<PrService>;

    /// Repository metadata, if supported.
    fn repo_service(&self) -> Capability<ForgeRepoService>;

    /// CI check monitoring for `source_branch`, if supported.
    fn checks_monitor(&self, source_branch: &str) -> Capability<ChecksMonitor>;

    /// Handle for `name` compared against the configured base branch.
    fn branch(&self, name: &str) -> ForgeBranch {
        let args = self.arguments();
        ForgeBranch::new(
            self.name(),
            name,
            args.base_branch.as_str(),
            self.base_url(),
            args.fork.clone(),
        )
    }
}

/// A forge for one of the supported providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Forge {
    /// GitHub and GitHub Enterprise
    GitHub(GitHub),
    /// GitLab and self-hosted GitLab
    GitLab(GitLab),
    /// Bitbucket Cloud
    Bitbucket(Bitbucket),
    /// Azure DevOps
    Azure(AzureDevOps),
}

impl Forge {
    /// Build the provider for `name`.
    ///
    /// The variant always matches `name`, so `forge.name() == name`.
    pub fn new(name: ForgeName, args: ForgeArguments, capabilities: CapabilitySet) -> Self {
        match name {
            ForgeName::GitHub => Forge::GitHub(GitHub::new(args).with_capabilities(capabilities)),
            ForgeName::GitLab => Forge::GitLab(GitLab::new(args).with_capabilities(capabilities)),
            ForgeName::Bitbucket => {
                Forge::Bitbucket(Bitbucket::new(args).with_capabilities(capabilities))
            }
            ForgeName::Azure => {
                Forge::Azure(AzureDevOps::new(args).with_capabilities(capabilities))
            }
        }
    }

    /// The provider held by this variant.
    pub fn provider(&self) -> &dyn ForgeProvider {
        match self {
            Forge::GitHub(forge) => forge,
            Forge::GitLab(forge) => forge,
            Forge::Bitbucket(forge) => forge,
            Forge::Azure(forge) => forge,
        }
    }
}

impl ForgeProvider for Forge {
    fn name(&self) -> ForgeName {
        self.provider().name()
    }

    fn arguments(&self) -> &ForgeArguments {
        self.provider().arguments()
    }

    fn base_url(&self) -> &str {
        self.provider().base_url()
    }

    fn capabilities(&self) -> &CapabilitySet {
        self.provider().capabilities()
    }

    fn commit_url(&self, id: &str) -> String {
        self.provider().commit_url(id)
    }

    fn list_service(&self) -> Capability<ListService> {
        self.provider().list_service()
    }

    fn issue_service(&self) -> Capability<IssueService> {
        self.provider().issue_service()
    }

    fn pr_service(&self) -> Capability<PrService> {
        self.provider().pr_service()
    }

    fn repo_service(&self) -> Capability<ForgeRepoService> {
        self.provider().repo_service()
    }

    fn checks_monitor(&self, source_branch: &str) -> Capability<ChecksMonitor> {
        self.provider().checks_monitor(source_branch)
    }

    fn branch(&self, name: &str) -> ForgeBranch {
        self.provider().branch(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RepoInfo;

    fn args_for(name: ForgeName) -> ForgeArguments {
        let repo = RepoInfo::new(name.domain(), "owner1", "repo1").with_organization("org1");
        ForgeArguments::new(repo, "main")
    }

    #[test]
    fn variant_matches_requested_name() {
        for name in ForgeName::all() {
            let forge = Forge::new(*name, args_for(*name), CapabilitySet::new());
            assert_eq!(forge.name(), *name);
            assert_eq!(forge.provider().name(), *name);
        }
    }

    #[test]
    fn capabilities_are_those_given() {
        let caps = CapabilitySet::all();
        let forge = Forge::new(ForgeName::Azure, args_for(ForgeName::Azure), caps.clone());
        assert_eq!(forge.capabilities(), &caps);
        assert!(forge.pr_service().is_supported());
    }

    #[test]
    fn empty_capabilities_make_every_service_absent() {
        for name in ForgeName::all() {
            let forge = Forge::new(*name, args_for(*name), CapabilitySet::new());
            assert!(forge.list_service().is_absent());
            assert!(forge.issue_service().is_absent());
            assert!(forge.pr_service().is_absent());
            assert!(forge.repo_service().is_absent());
            assert!(forge.checks_monitor("feature").is_absent());
        }
    }

    #[test]
    fn branch_carries_configuration() {
        let args = args_for(ForgeName::GitHub).with_fork("me");
        let forge = Forge::new(ForgeName::GitHub, args, CapabilitySet::new());
        let branch = forge.branch("feature");

        assert_eq!(branch.forge(), ForgeName::GitHub);
        assert_eq!(branch.base_branch(), "main");
        assert_eq!(branch.base_url(), forge.base_url());
        assert_eq!(branch.fork(), Some("me"));
    }

    #[test]
    fn forge_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Forge>();
    }

    #[test]
    fn forge_error_display() {
        assert_eq!(
            ForgeError::UnsupportedHost {
                host: "git.example.com".into(),
                supported: "github, gitlab".into(),
            }
            .to_string(),
            "unsupported forge host 'git.example.com'. Supported forges: github, gitlab"
        );
        assert_eq!(
            ForgeError::UnknownProvider {
                name: "gitea".into(),
                available: "github".into(),
            }
            .to_string(),
            "unknown forge provider 'gitea'. Available providers: github"
        );
        assert_eq!(
            ForgeError::from(TypeError::EmptyField("owner")).to_string(),
            "invalid repository: repository owner cannot be empty"
        );
    }
}
