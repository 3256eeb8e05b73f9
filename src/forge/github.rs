//! forge::github
//!
//! GitHub forge.
//!
//! # URL Grammar
//!
//! - Repository: `https://{host}/{owner}/{name}`
//! - Commit: `{repo}/commit/{id}`
//! - Compare: `{repo}/compare/{base}...{[fork:]branch}`
//! - Pull request: `{repo}/pull/{number}`
//!
//! The REST API lives at `https://api.github.com` for github.com and at
//! `https://{host}/api/v3` for GitHub Enterprise hosts.
//!
//! GitHub supports every capability.

use super::branch::{encode_component, encode_path, ForgeBranch};
use super::capability::{Capability, CapabilityKind, CapabilitySet};
use super::factory::ForgeName;
use super::services::{
    ChecksMonitor, ForgeRepoService, IssueService, ListService, PrService, ServiceScope,
};
use super::traits::ForgeProvider;
use crate::core::types::ForgeArguments;

/// Public GitHub domain.
pub const GITHUB_DOMAIN: &str = "github.com";

/// API root for github.com.
const GITHUB_API: &str = "https://api.github.com";

/// Capabilities GitHub supports out of the box.
pub const DEFAULT_CAPABILITIES: [CapabilityKind; 5] = CapabilityKind::ALL;

/// GitHub forge.
///
/// # Example
///
/// ```
/// use forgekit::core::types::{ForgeArguments, RepoInfo};
/// use forgekit::forge::github::GitHub;
/// use forgekit::forge::ForgeProvider;
///
/// let repo = RepoInfo::new("github.com", "octocat", "hello-world");
/// let forge = GitHub::new(ForgeArguments::new(repo, "main"));
///
/// assert_eq!(forge.base_url(), "https://github.com/octocat/hello-world");
/// assert_eq!(forge.api_url(), "https://api.github.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHub {
    args: ForgeArguments,
    base_url: String,
    api_url: String,
    capabilities: CapabilitySet,
}

impl GitHub {
    /// Create a GitHub forge with the default capabilities.
    pub fn new(args: ForgeArguments) -> Self {
        let repo = &args.repo;
        let base_url = format!("https://{}/{}/{}", repo.host(), repo.owner(), repo.name());
        let api_url = if repo.host() == GITHUB_DOMAIN {
            GITHUB_API.to_string()
        } else {
            format!("https://{}/api/v3", repo.host())
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

    fn repo_api_url(&self) -> String {
        let repo = &self.args.repo;
        format!("{}/repos/{}/{}", self.api_url, repo.owner(), repo.name())
    }

    fn scope(&self) -> ServiceScope {
        ServiceScope::new(ForgeName::GitHub, &self.args, &self.base_url, &self.api_url)
    }
}

/// Comparison URL for a GitHub branch.
pub(crate) fn compare_url(branch: &ForgeBranch) -> String {
    format!(
        "{}/compare/{}...{}",
        branch.base_url(),
        encode_path(branch.base_branch()),
        branch.qualified_path()
    )
}

impl ForgeProvider for GitHub {
    fn name(&self) -> ForgeName {
        ForgeName::GitHub
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
            .negotiate(ForgeName::GitHub, CapabilityKind::List, || {
                let repo_api = self.repo_api_url();
                ListService::new(
                    self.scope(),
                    format!("{}/pulls", repo_api),
                    format!("{}/branches", repo_api),
                )
            })
    }

    fn issue_service(&self) -> Capability<IssueService> {
        self.capabilities
            .negotiate(ForgeName::GitHub, CapabilityKind::Issues, || {
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
            .negotiate(ForgeName::GitHub, CapabilityKind::PullRequests, || {
                PrService::new(
                    self.scope(),
                    format!("{}/pull/", self.base_url),
                    format!("{}/pulls", self.repo_api_url()),
                )
            })
    }

    fn repo_service(&self) -> Capability<ForgeRepoService> {
        self.capabilities
            .negotiate(ForgeName::GitHub, CapabilityKind::Repo, || {
                ForgeRepoService::new(self.scope(), self.repo_api_url())
            })
    }

    fn checks_monitor(&self, source_branch: &str) -> Capability<ChecksMonitor> {
        self.capabilities
            .negotiate(ForgeName::GitHub, CapabilityKind::Checks, || {
                ChecksMonitor::new(
                    self.scope(),
                    source_branch,
                    format!(
                        "{}/commits/{}/check-runs",
                        self.repo_api_url(),
                        encode_component(source_branch)
                    ),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RepoInfo;

    fn forge() -> GitHub {
        GitHub::new(ForgeArguments::new(
            RepoInfo::new("github.com", "octocat", "hello-world"),
            "main",
        ))
    }

    mod urls {
        use super::*;

        #[test]
        fn base_url() {
            assert_eq!(forge().base_url(), "https://github.com/octocat/hello-world");
        }

        #[test]
        fn commit_url() {
            assert_eq!(
                forge().commit_url("abc123"),
                "https://github.com/octocat/hello-world/commit/abc123"
            );
        }

        #[test]
        fn compare_url_plain() {
            insta::assert_snapshot!(
                forge().branch("feature/login").url(),
                @"https://github.com/octocat/hello-world/compare/main...feature/login"
            );
        }

        #[test]
        fn compare_url_fork() {
            let forge = GitHub::new(
                ForgeArguments::new(RepoInfo::new("github.com", "octocat", "hello-world"), "main")
                    .with_fork("someone"),
            );
            insta::assert_snapshot!(
                forge.branch("feature").url(),
                @"https://github.com/octocat/hello-world/compare/main...someone:feature"
            );
        }

        #[test]
        fn enterprise_host() {
            let forge = GitHub::new(ForgeArguments::new(
                RepoInfo::new("github.example.com", "team", "app"),
                "main",
            ));
            assert_eq!(forge.base_url(), "https://github.example.com/team/app");
            assert_eq!(forge.api_url(), "https://github.example.com/api/v3");
        }
    }

    mod services {
        use super::*;

        #[test]
        fn all_capabilities_supported_by_default() {
            let forge = forge();
            assert!(forge.list_service().is_supported());
            assert!(forge.issue_service().is_supported());
            assert!(forge.pr_service().is_supported());
            assert!(forge.repo_service().is_supported());
            assert!(forge.checks_monitor("main").is_supported());
        }

        #[test]
        fn pr_service_urls() {
            let pr = forge().pr_service().supported().unwrap();
            assert_eq!(
                pr.pull_request_url(12),
                "https://github.com/octocat/hello-world/pull/12"
            );
            assert_eq!(
                pr.pulls_api_url(),
                "https://api.github.com/repos/octocat/hello-world/pulls"
            );
            assert_eq!(pr.scope().forge(), ForgeName::GitHub);
        }

        #[test]
        fn issue_service_urls() {
            let issues = forge().issue_service().supported().unwrap();
            assert_eq!(
                issues.issue_url(3),
                "https://github.com/octocat/hello-world/issues/3"
            );
            assert_eq!(
                issues.new_issue_url(),
                "https://github.com/octocat/hello-world/issues/new"
            );
            assert_eq!(
                issues.issues_api_url(),
                "https://api.github.com/repos/octocat/hello-world/issues"
            );
        }

        #[test]
        fn list_and_repo_service_urls() {
            let forge = forge();
            let list = forge.list_service().supported().unwrap();
            assert_eq!(
                list.branches_api_url(),
                "https://api.github.com/repos/octocat/hello-world/branches"
            );
            let repo = forge.repo_service().supported().unwrap();
            assert_eq!(
                repo.repo_api_url(),
                "https://api.github.com/repos/octocat/hello-world"
            );
        }

        #[test]
        fn checks_monitor_escapes_branch() {
            let checks = forge().checks_monitor("feature/x").supported().unwrap();
            assert_eq!(checks.source_branch(), "feature/x");
            assert_eq!(
                checks.checks_api_url(),
                "https://api.github.com/repos/octocat/hello-world/commits/feature%2Fx/check-runs"
            );
        }

        #[test]
        fn disabled_capability_is_absent() {
            let forge = forge().with_capabilities(CapabilitySet::with([CapabilityKind::Repo]));
            assert!(forge.pr_service().is_absent());
            assert!(forge.repo_service().is_supported());
        }
    }
}
