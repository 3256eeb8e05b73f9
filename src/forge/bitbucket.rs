//! forge::bitbucket
//!
//! Bitbucket Cloud forge.
//!
//! # URL Grammar
//!
//! - Repository: `https://{host}/{owner}/{name}`
//! - Commit: `{repo}/commits/{id}`
//! - Compare: `{repo}/branch/{[fork:]branch}?dest={base}`
//! - Pull request: `{repo}/pull-requests/{number}`
//!
//! The Cloud REST API lives at `https://api.bitbucket.org/2.0`. Self-hosted
//! (Data Center) instances reached through an alias or override use
//! `https://{host}/rest/api/latest` with its `projects/{owner}/repos/{name}`
//! resource layout.
//!
//! No services are enabled by default; Bitbucket is URL construction only
//! until a collaborator for its API exists.

use super::branch::{encode_component, ForgeBranch};
use super::capability::{Capability, CapabilityKind, CapabilitySet};
use super::factory::ForgeName;
use super::services::{
    ChecksMonitor, ForgeRepoService, IssueService, ListService, PrService, ServiceScope,
};
use super::traits::ForgeProvider;
use crate::core::types::ForgeArguments;

/// Bitbucket Cloud domain.
pub const BITBUCKET_DOMAIN: &str = "bitbucket.org";

/// API root for Bitbucket Cloud.
const BITBUCKET_CLOUD_API: &str = "https://api.bitbucket.org/2.0";

/// Capabilities Bitbucket supports out of the box.
pub const DEFAULT_CAPABILITIES: [CapabilityKind; 0] = [];

/// Bitbucket forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitbucket {
    args: ForgeArguments,
    base_url: String,
    api_url: String,
    capabilities: CapabilitySet,
}

impl Bitbucket {
    /// Create a Bitbucket forge with the default capabilities.
    pub fn new(args: ForgeArguments) -> Self {
        let repo = &args.repo;
        let base_url = format!("https://{}/{}/{}", repo.host(), repo.owner(), repo.name());
        let api_url = if repo.host() == BITBUCKET_DOMAIN {
            BITBUCKET_CLOUD_API.to_string()
        } else {
            format!("https://{}/rest/api/latest", repo.host())
        };

        Self {
            args,
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

    /// Root of the REST API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn is_cloud(&self) -> bool {
        self.args.repo.host() == BITBUCKET_DOMAIN
    }

    fn repo_api_url(&self) -> String {
        let repo = &self.args.repo;
        if self.is_cloud() {
            format!(
                "{}/repositories/{}/{}",
                self.api_url,
                repo.owner(),
                repo.name()
            )
        } else {
            format!(
                "{}/projects/{}/repos/{}",
                self.api_url,
                repo.owner(),
                repo.name()
            )
        }
    }

    fn pulls_api_url(&self) -> String {
        let collection = if self.is_cloud() {
            "pullrequests"
        } else {
            "pull-requests"
        };
        format!("{}/{}", self.repo_api_url(), collection)
    }

    fn scope(&self) -> ServiceScope {
        ServiceScope::new(
            ForgeName::Bitbucket,
            &self.args,
            &self.base_url,
            &self.api_url,
        )
    }
}

/// Comparison URL for a Bitbucket branch.
pub(crate) fn compare_url(branch: &ForgeBranch) -> String {
    format!(
        "{}/branch/{}?dest={}",
        branch.base_url(),
        branch.qualified_path(),
        encode_component(branch.base_branch())
    )
}

impl ForgeProvider for Bitbucket {
    fn name(&self) -> ForgeName {
        ForgeName::Bitbucket
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
        format!("{}/commits/{}", self.base_url, id)
    }

    fn list_service(&self) -> Capability<ListService> {
        self.capabilities
            .negotiate(ForgeName::Bitbucket, CapabilityKind::List, || {
                let branches = if self.is_cloud() {
                    "refs/branches"
                } else {
                    "branches"
                };
                ListService::new(
                    self.scope(),
                    self.pulls_api_url(),
                    format!("{}/{}", self.repo_api_url(), branches),
                )
            })
    }

    fn issue_service(&self) -> Capability<IssueService> {
        self.capabilities
            .negotiate(ForgeName::Bitbucket, CapabilityKind::Issues, || {
                IssueService::new(
                    self.scope(),
                    format!("{}/issues/", self.base_url),
                    format!("{}/issues/new", self.base_url),
                    format!("{}/issues", self.repo_api_url()),
                )
            })
    }

    fn pr_service(&self) -> Capability<PrService> {
        self.capabilities
            .negotiate(ForgeName::Bitbucket, CapabilityKind::PullRequests, || {
                PrService::new(
                    self.scope(),
                    format!("{}/pull-requests/", self.base_url),
                    self.pulls_api_url(),
                )
            })
    }

    fn repo_service(&self) -> Capability<ForgeRepoService> {
        self.capabilities
            .negotiate(ForgeName::Bitbucket, CapabilityKind::Repo, || {
                ForgeRepoService::new(self.scope(), self.repo_api_url())
            })
    }

    fn checks_monitor(&self, source_branch: &str) -> Capability<ChecksMonitor> {
        self.capabilities
            .negotiate(ForgeName::Bitbucket, CapabilityKind::Checks, || {
                ChecksMonitor::new(
                    self.scope(),
                    source_branch,
                    if self.is_cloud() {
                        format!(
                            "{}/commit/{}/statuses",
                            self.repo_api_url(),
                            encode_component(source_branch)
                        )
                    } else {
                        format!(
                            "{}/commits/{}/builds",
                            self.repo_api_url(),
                            encode_component(source_branch)
                        )
                    },
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RepoInfo;

    fn args() -> ForgeArguments {
        ForgeArguments::new(RepoInfo::new("bitbucket.org", "team", "repo"), "main")
    }

    #[test]
    fn commit_url_uses_plural_segment() {
        assert_eq!(
            Bitbucket::new(args()).commit_url("abc"),
            "https://bitbucket.org/team/repo/commits/abc"
        );
    }

    #[test]
    fn compare_url_puts_base_in_query() {
        insta::assert_snapshot!(
            Bitbucket::new(args()).branch("feature/x").url(),
            @"https://bitbucket.org/team/repo/branch/feature/x?dest=main"
        );
    }

    #[test]
    fn compare_url_escapes_base_branch() {
        let forge = Bitbucket::new(ForgeArguments::new(
            RepoInfo::new("bitbucket.org", "team", "repo"),
            "release/1.0",
        ));
        assert_eq!(
            forge.branch("fix").url(),
            "https://bitbucket.org/team/repo/branch/fix?dest=release%2F1.0"
        );
    }

    #[test]
    fn compare_url_fork() {
        let forge = Bitbucket::new(args().with_fork("me"));
        assert_eq!(
            forge.branch("fix").url(),
            "https://bitbucket.org/team/repo/branch/me:fix?dest=main"
        );
    }

    #[test]
    fn no_services_by_default() {
        let forge = Bitbucket::new(args());
        assert!(forge.capabilities().is_empty());
        assert!(forge.list_service().is_absent());
        assert!(forge.issue_service().is_absent());
        assert!(forge.pr_service().is_absent());
        assert!(forge.repo_service().is_absent());
        assert!(forge.checks_monitor("main").is_absent());
    }

    #[test]
    fn enabled_services_use_cloud_api() {
        let forge = Bitbucket::new(args()).with_capabilities(CapabilitySet::all());
        assert_eq!(forge.api_url(), "https://api.bitbucket.org/2.0");

        let pr = forge.pr_service().supported().unwrap();
        assert_eq!(
            pr.pull_request_url(1),
            "https://bitbucket.org/team/repo/pull-requests/1"
        );
        let repo = forge.repo_service().supported().unwrap();
        assert_eq!(
            repo.repo_api_url(),
            "https://api.bitbucket.org/2.0/repositories/team/repo"
        );
        let list = forge.list_service().supported().unwrap();
        assert_eq!(
            list.pulls_api_url(),
            "https://api.bitbucket.org/2.0/repositories/team/repo/pullrequests"
        );
    }

    #[test]
    fn self_hosted_uses_own_host() {
        let forge = Bitbucket::new(ForgeArguments::new(
            RepoInfo::new("bitbucket.example.com", "PROJ", "repo"),
            "main",
        ))
        .with_capabilities(CapabilitySet::all());

        assert_eq!(forge.base_url(), "https://bitbucket.example.com/PROJ/repo");
        assert_eq!(forge.api_url(), "https://bitbucket.example.com/rest/api/latest");

        let repo = forge.repo_service().supported().unwrap();
        assert_eq!(
            repo.repo_api_url(),
            "https://bitbucket.example.com/rest/api/latest/projects/PROJ/repos/repo"
        );
        let pr = forge.pr_service().supported().unwrap();
        assert_eq!(
            pr.pulls_api_url(),
            "https://bitbucket.example.com/rest/api/latest/projects/PROJ/repos/repo/pull-requests"
        );
        let checks = forge.checks_monitor("main").supported().unwrap();
        assert_eq!(
            checks.checks_api_url(),
            "https://bitbucket.example.com/rest/api/latest/projects/PROJ/repos/repo/commits/main/builds"
        );
    }
}
