//! forge::gitlab
//!
//! GitLab forge.
//!
//! # URL Grammar
//!
//! - Repository: `https://{host}/{owner}/{name}`, where the owner may be a
//!   nested group path (`group/subgroup`)
//! - Commit: `{repo}/-/commit/{id}`
//! - Compare: `{repo}/-/compare/{base}...{[fork:]branch}`
//! - Merge request: `{repo}/-/merge_requests/{number}`
//!
//! The REST API lives at `https://{host}/api/v4`; projects are addressed
//! by their escaped full path.
//!
//! Issue tracking and pipeline monitoring are not enabled by default.

use super::branch::{encode_component, encode_path, ForgeBranch};
use super::capability::{Capability, CapabilityKind, CapabilitySet};
use super::factory::ForgeName;
use super::services::{
    ChecksMonitor, ForgeRepoService, IssueService, ListService, PrService, ServiceScope,
};
use super::traits::ForgeProvider;
use crate::core::types::ForgeArguments;

/// Public GitLab domain.
pub const GITLAB_DOMAIN: &str = "gitlab.com";

/// Capabilities GitLab supports out of the box.
pub const DEFAULT_CAPABILITIES: [CapabilityKind; 3] = [
    CapabilityKind::List,
    CapabilityKind::PullRequests,
    CapabilityKind::Repo,
];

/// GitLab forge.
///
/// # Example
///
/// ```
/// use forgekit::core::types::{ForgeArguments, RepoInfo};
/// use forgekit::forge::gitlab::GitLab;
/// use forgekit::forge::ForgeProvider;
///
/// let repo = RepoInfo::new("gitlab.com", "group/subgroup", "project");
/// let forge = GitLab::new(ForgeArguments::new(repo, "main"));
///
/// assert_eq!(forge.base_url(), "https://gitlab.com/group/subgroup/project");
/// assert_eq!(forge.project_id(), "group%2Fsubgroup%2Fproject");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLab {
    args: ForgeArguments,
    base_url: String,
    api_url: String,
    capabilities: CapabilitySet,
}

impl GitLab {
    /// Create a GitLab forge with the default capabilities.
    pub fn new(args: ForgeArguments) -> Self {
        let repo = &args.repo;
        let base_url = format!("https://{}/{}/{}", repo.host(), repo.owner(), repo.name());
        let api_url = format!("https://{}/api/v4", repo.host());

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

    /// Project identifier used by the API: the escaped `owner/name` path.
    pub fn project_id(&self) -> String {
        let repo = &self.args.repo;
        encode_component(&format!("{}/{}", repo.owner(), repo.name()))
    }

    fn repo_api_url(&self) -> String {
        format!("{}/projects/{}", self.api_url, self.project_id())
    }

    fn scope(&self) -> ServiceScope {
        ServiceScope::new(ForgeName::GitLab, &self.args, &self.base_url, &self.api_url)
    }
}

/// Comparison URL for a GitLab branch.
pub(crate) fn compare_url(branch: &ForgeBranch) -> String {
    format!(
        "{}/-/compare/{}...{}",
        branch.base_url(),
        encode_path(branch.base_branch()),
        branch.qualified_path()
    )
}

impl ForgeProvider for GitLab {
    fn name(&self) -> ForgeName {
        ForgeName::GitLab
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
        format!("{}/-/commit/{}", self.base_url, id)
    }

    fn list_service(&self) -> Capability<ListService> {
        self.capabilities
            .negotiate(ForgeName::GitLab, CapabilityKind::List, || {
                let repo_api = self.repo_api_url();
                ListService::new(
                    self.scope(),
                    format!("{}/merge_requests", repo_api),
                    format!("{}/repository/branches", repo_api),
                )
            })
    }

    fn issue_service(&self) -> Capability<IssueService> {
        self.capabilities
            .negotiate(ForgeName::GitLab, CapabilityKind::Issues, || {
                IssueService::new(
                    self.scope(),
                    format!("{}/-/issues/", self.base_url),
                    format!("{}/-/issues/new", self.base_url),
                    format!("{}/issues", self.repo_api_url()),
                )
            })
    }

    fn pr_service(&self) -> Capability<PrService> {
        self.capabilities
            .negotiate(ForgeName::GitLab, CapabilityKind::PullRequests, || {
                PrService::new(
                    self.scope(),
                    format!("{}/-/merge_requests/", self.base_url),
                    format!("{}/merge_requests", self.repo_api_url()),
                )
            })
    }

    fn repo_service(&self) -> Capability<ForgeRepoService> {
        self.capabilities
            .negotiate(ForgeName::GitLab, CapabilityKind::Repo, || {
                ForgeRepoService::new(self.scope(), self.repo_api_url())
            })
    }

    fn checks_monitor(&self, source_branch: &str) -> Capability<ChecksMonitor> {
        self.capabilities
            .negotiate(ForgeName::GitLab, CapabilityKind::Checks, || {
                ChecksMonitor::new(
                    self.scope(),
                    source_branch,
                    format!(
                        "{}/pipelines?ref={}",
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

    fn forge() -> GitLab {
        GitLab::new(ForgeArguments::new(
            RepoInfo::new("gitlab.com", "mygroup", "myproject"),
            "main",
        ))
    }

    mod urls {
        use super::*;

        #[test]
        fn commit_url_uses_dash_segment() {
            assert_eq!(
                forge().commit_url("deadbeef"),
                "https://gitlab.com/mygroup/myproject/-/commit/deadbeef"
            );
        }

        #[test]
        fn compare_url() {
            insta::assert_snapshot!(
                forge().branch("feature/a").url(),
                @"https://gitlab.com/mygroup/myproject/-/compare/main...feature/a"
            );
        }

        #[test]
        fn nested_groups() {
            let forge = GitLab::new(ForgeArguments::new(
                RepoInfo::new("gitlab.com", "a/b/c", "project"),
                "main",
            ));
            assert_eq!(forge.base_url(), "https://gitlab.com/a/b/c/project");
            assert_eq!(forge.project_id(), "a%2Fb%2Fc%2Fproject");
        }

        #[test]
        fn self_hosted_api() {
            let forge = GitLab::new(ForgeArguments::new(
                RepoInfo::new("git.example.com", "team", "app"),
                "main",
            ));
            assert_eq!(forge.api_url(), "https://git.example.com/api/v4");
        }
    }

    mod services {
        use super::*;

        #[test]
        fn default_capabilities() {
            let forge = forge();
            assert!(forge.list_service().is_supported());
            assert!(forge.pr_service().is_supported());
            assert!(forge.repo_service().is_supported());
            assert!(forge.issue_service().is_absent());
            assert!(forge.checks_monitor("main").is_absent());
        }

        #[test]
        fn merge_request_urls() {
            let pr = forge().pr_service().supported().unwrap();
            assert_eq!(
                pr.pull_request_url(5),
                "https://gitlab.com/mygroup/myproject/-/merge_requests/5"
            );
            assert_eq!(
                pr.pulls_api_url(),
                "https://gitlab.com/api/v4/projects/mygroup%2Fmyproject/merge_requests"
            );
        }

        #[test]
        fn enabled_checks_monitor_uses_pipelines() {
            let forge = forge().with_capabilities(CapabilitySet::all());
            let checks = forge.checks_monitor("feature/x").supported().unwrap();
            assert_eq!(
                checks.checks_api_url(),
                "https://gitlab.com/api/v4/projects/mygroup%2Fmyproject/pipelines?ref=feature%2Fx"
            );
        }

        #[test]
        fn enabled_issue_service_urls() {
            let forge = forge().with_capabilities(CapabilitySet::all());
            let issues = forge.issue_service().supported().unwrap();
            assert_eq!(
                issues.issue_url(9),
                "https://gitlab.com/mygroup/myproject/-/issues/9"
            );
        }
    }
}
