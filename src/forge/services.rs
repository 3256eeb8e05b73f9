//! forge::services
//!
//! Service handles returned by supported capabilities.
//!
//! # Design
//!
//! A handle is the boundary toward a networked collaborator (a PR client,
//! an issue tracker, a CI poller). It carries the [`ServiceScope`] it was
//! built for and the provider-specific web and API URLs the collaborator
//! needs. Handles perform no I/O; the wire protocol of each service lives
//! with the collaborator.
//!
//! Every handle is built whole by its provider, so a caller holding one
//! never sees a partially configured service.

use crate::core::types::{ForgeArguments, RepoInfo};

use super::factory::ForgeName;

/// Configuration a service handle is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceScope {
    forge: ForgeName,
    args: ForgeArguments,
    web_url: String,
    api_url: String,
}

impl ServiceScope {
    pub(crate) fn new(
        forge: ForgeName,
        args: &ForgeArguments,
        web_url: &str,
        api_url: &str,
    ) -> Self {
        Self {
            forge,
            args: args.clone(),
            web_url: web_url.to_string(),
            api_url: api_url.to_string(),
        }
    }

    /// Forge the service talks to.
    pub fn forge(&self) -> ForgeName {
        self.forge
    }

    /// Repository the service is scoped to.
    pub fn repo(&self) -> &RepoInfo {
        &self.args.repo
    }

    /// Base branch of the forge configuration.
    pub fn base_branch(&self) -> &str {
        &self.args.base_branch
    }

    /// Fork owner of the forge configuration.
    pub fn fork(&self) -> Option<&str> {
        self.args.fork.as_deref()
    }

    /// Web URL of the repository.
    pub fn web_url(&self) -> &str {
        &self.web_url
    }

    /// Root of the provider's REST API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Pull request management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrService {
    scope: ServiceScope,
    pull_request_prefix: String,
    pulls_api_url: String,
}

impl PrService {
    pub(crate) fn new(scope: ServiceScope, pull_request_prefix: String, pulls_api_url: String) -> Self {
        Self {
            scope,
            pull_request_prefix,
            pulls_api_url,
        }
    }

    /// Scope of this handle.
    pub fn scope(&self) -> &ServiceScope {
        &self.scope
    }

    /// Web URL of pull request `number`.
    pub fn pull_request_url(&self, number: u64) -> String {
        format!("{}{}", self.pull_request_prefix, number)
    }

    /// API collection for pull requests.
    pub fn pulls_api_url(&self) -> &str {
        &self.pulls_api_url
    }
}

/// Issue tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueService {
    scope: ServiceScope,
    issue_prefix: String,
    new_issue_url: String,
    issues_api_url: String,
}

impl IssueService {
    pub(crate) fn new(
        scope: ServiceScope,
        issue_prefix: String,
        new_issue_url: String,
        issues_api_url: String,
    ) -> Self {
        Self {
            scope,
            issue_prefix,
            new_issue_url,
            issues_api_url,
        }
    }

    /// Scope of this handle.
    pub fn scope(&self) -> &ServiceScope {
        &self.scope
    }

    /// Web URL of issue `number`.
    pub fn issue_url(&self, number: u64) -> String {
        format!("{}{}", self.issue_prefix, number)
    }

    /// Web URL of the new-issue form.
    pub fn new_issue_url(&self) -> &str {
        &self.new_issue_url
    }

    /// API collection for issues.
    pub fn issues_api_url(&self) -> &str {
        &self.issues_api_url
    }
}

/// Listing of branches and pull requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListService {
    scope: ServiceScope,
    pulls_api_url: String,
    branches_api_url: String,
}

impl ListService {
    pub(crate) fn new(scope: ServiceScope, pulls_api_url: String, branches_api_url: String) -> Self {
        Self {
            scope,
            pulls_api_url,
            branches_api_url,
        }
    }

    /// Scope of this handle.
    pub fn scope(&self) -> &ServiceScope {
        &self.scope
    }

    /// API collection listing pull requests.
    pub fn pulls_api_url(&self) -> &str {
        &self.pulls_api_url
    }

    /// API collection listing branches.
    pub fn branches_api_url(&self) -> &str {
        &self.branches_api_url
    }
}

/// Repository metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeRepoService {
    scope: ServiceScope,
    repo_api_url: String,
}

impl ForgeRepoService {
    pub(crate) fn new(scope: ServiceScope, repo_api_url: String) -> Self {
        Self {
            scope,
            repo_api_url,
        }
    }

    /// Scope of this handle.
    pub fn scope(&self) -> &ServiceScope {
        &self.scope
    }

    /// API resource describing the repository.
    pub fn repo_api_url(&self) -> &str {
        &self.repo_api_url
    }
}

/// CI check monitoring for one source branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksMonitor {
    scope: ServiceScope,
    source_branch: String,
    checks_api_url: String,
}

impl ChecksMonitor {
    pub(crate) fn new(scope: ServiceScope, source_branch: &str, checks_api_url: String) -> Self {
        Self {
            scope,
            source_branch: source_branch.to_string(),
            checks_api_url,
        }
    }

    /// Scope of this handle.
    pub fn scope(&self) -> &ServiceScope {
        &self.scope
    }

    /// Branch whose checks are monitored.
    pub fn source_branch(&self) -> &str {
        &self.source_branch
    }

    /// API resource reporting checks for the source branch.
    pub fn checks_api_url(&self) -> &str {
        &self.checks_api_url
    }
}
