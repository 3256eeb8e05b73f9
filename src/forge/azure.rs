//! forge::azure
//!
//! Azure DevOps forge.
//!
//! # URL Grammar
//!
//! - Repository: `https://{host}/{organization}/{project}/_git/{name}`
//! - Commit: `{repo}/commit/{id}`
//! - Compare: `{repo}/branchCompare?baseVersion=GB{base}&targetVersion=GB{[fork:]branch}`
//! - Pull request: `{repo}/pullrequest/{number}`
//!
//! The repository owner is the Azure project. Azure DevOps repositories
//! always sit under an organization; the factory rejects repository info
//! without one before a forge is built.
//!
//! The host is `dev.azure.com` for Azure DevOps Services. Azure DevOps
//! Server instances reached through an alias or override keep their own
//! host, with the collection in the organization position.
//!
//! # Capabilities
//!
//! API-backed services are disabled until OAuth support for Azure DevOps
//! exists; every service accessor returns [`Capability::Absent`] unless the
//! capability table is overridden. URL construction needs no API access and
//! is always available.

use super::branch::{encode_component, ForgeBranch};
use super::capability::{Capability, CapabilityKind, CapabilitySet};
use super::factory::ForgeName;
use super::services::{
    ChecksMonitor, ForgeRepoService, IssueService, ListService, PrService, ServiceScope,
};
use super::traits::ForgeProvider;
use crate::core::types::ForgeArguments;

/// Azure DevOps domain.
pub const AZURE_DOMAIN: &str = "dev.azure.com";

/// Capabilities Azure DevOps supports out of the box.
pub const DEFAULT_CAPABILITIES: [CapabilityKind; 0] = [];

/// Azure DevOps forge.
///
/// # Example
///
/// ```
/// use forgekit::core::types::{ForgeArguments, RepoInfo};
/// use forgekit::forge::azure::AzureDevOps;
/// use forgekit::forge::ForgeProvider;
///
/// let repo = RepoInfo::new("dev.azure.com", "owner1", "repo1").with_organization("org1");
/// let forge = AzureDevOps::new(ForgeArguments::new(repo, "main"));
///
/// assert_eq!(forge.base_url(), "https://dev.azure.com/org1/owner1/_git/repo1");
/// assert!(forge.checks_monitor("main").is_absent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureDevOps {
    args: ForgeArguments,
    project_url: String,
    base_url: String,
    api_url: String,
    capabilities: CapabilitySet,
}

impl AzureDevOps {
    /// Create an Azure DevOps forge with the default capabilities.
    ///
    /// The repository must carry an organization; without one the
    /// organization segment is left empty.
    pub fn new(args: ForgeArguments) -> Self {
        let repo = &args.repo;
        let project_url = format!(
            "https://{}/{}/{}",
            repo.host(),
            repo.organization().unwrap_or_default(),
            repo.owner()
        );
        let base_url = format!("{}/_git/{}", project_url, repo.name());
        let api_url = format!("{}/_apis", project_url);

        Self {
            args,
            project_url,
            base_url,
            api_url,
            capabilities: CapabilitySet::with(DEFAULT_CAPABILITIES),
        }
    }

    /// Replace the capability table.
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Web URL of the Azure project holding the repository.
    pub fn project_url(&self) -> &str {
        &self.project_url
    }

    /// Root of the project's REST API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn repo_api_url(&self) -> String {
        format!("{}/git/repositories/{}", self.api_url, self.args.repo.name())
    }

    fn scope(&self) -> ServiceScope {
        ServiceScope::new(ForgeName::Azure, &self.args, &self.base_url, &self.api_url)
    }
}

/// Comparison URL for an Azure DevOps branch.
///
/// Versions are prefixed with `GB` (git branch).
pub(crate) fn compare_url(branch: &ForgeBranch) -> String {
    format!(
        "{}/branchCompare?baseVersion={}&targetVersion={}",
        branch.base_url(),
        encode_component(&format!("GB{}", branch.base_branch())),
        encode_component(&format!("GB{}", branch.qualified_name()))
    )
}

impl ForgeProvider for AzureDevOps {
    fn name(&self) -> ForgeName {
        ForgeName::Azure
    }

    fn arguments(&self) -> &ForgeArguments {
        &self.args
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    fn commit_url(&self, id: &str) -> String {
        format!("{}/commit/{}", self.base_url, id)
    }

    fn list_service(&self) -> Capability<ListService> {
        self.capabilities
            .negotiate(ForgeName::Azure, CapabilityKind::List, || {
                let repo_api = self.repo_api_url();
                ListService::new(
                    self.scope(),
                    format!("{}/pullrequests", repo_api),
                    format!("{}/refs?filter=heads/", repo_api),
                )
            })
    }

    fn issue_service(&self) -> Capability<IssueService> {
        self.capabilities
            .negotiate(ForgeName::Azure, CapabilityKind::Issues, || {
                IssueService::new(
                    self.scope(),
                    format!("{}/_workitems/edit/", self.project_url),
                    format!("{}/_workitems/create/Issue", self.project_url),
                    format!("{}/wit/workitems", self.api_url),
                )
            })
    }

    fn pr_service(&self) -> Capability<PrService> {
        self.capabilities
            .negotiate(ForgeName::Azure, CapabilityKind::PullRequests, || {
                PrService::new(
                    self.scope(),
                    format!("{}/pullrequest/", self.base_url),
                    format!("{}/pullrequests", self.repo_api_url()),
                )
            })
    }

    fn repo_service(&self) -> Capability<ForgeRepoService> {
        self.capabilities
            .negotiate(ForgeName::Azure, CapabilityKind::Repo, || {
                ForgeRepoService::new(self.scope(), self.repo_api_url())
            })
    }

    fn checks_monitor(&self, source_branch: &str) -> Capability<ChecksMonitor> {
        self.capabilities
            .negotiate(ForgeName::Azure, CapabilityKind::Checks, || {
                ChecksMonitor::new(
                    self.scope(),
                    source_branch,
                    format!(
                        "{}/build/builds?branchName={}",
                        self.api_url,
                        encode_component(&format!("refs/heads/{}", source_branch))
                    ),
                )
            })
    }
}
