//! core::types
//!
//! Value types describing a remote repository and the configuration a
//! forge is built from.
//!
//! # Types
//!
//! - [`RepoInfo`] - Host, optional organization, owner and name of a remote
//! - [`ForgeArguments`] - Repository plus base branch and fork qualifier
//!
//! # Validation
//!
//! `RepoInfo` is immutable once constructed. [`RepoInfo::validate`] checks
//! the fields every forge relies on; the forge factory runs it before
//! selecting a provider, so URL construction downstream never has to.
//!
//! # Examples
//!
//! ```
//! use forgekit::core::types::{ForgeArguments, RepoInfo};
//!
//! let repo = RepoInfo::new("GitHub.com", "octocat", "hello-world");
//! assert_eq!(repo.host(), "github.com");
//! assert!(repo.validate().is_ok());
//!
//! let args = ForgeArguments::new(repo, "main").with_fork("someone");
//! assert_eq!(args.fork.as_deref(), Some("someone"));
//!
//! assert!(RepoInfo::new("github.com", "", "hello-world").validate().is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("repository {0} cannot be empty")]
    EmptyField(&'static str),

    #[error("repository {field} cannot contain '{character}'")]
    InvalidCharacter {
        field: &'static str,
        character: char,
    },

    #[error("repositories on {host} require an organization")]
    MissingOrganization { host: String },

    #[error("repository name '{0}' cannot end in '.git'")]
    GitSuffix(String),
}

/// A remote repository on one hosting provider.
///
/// The host is normalized to lowercase without a trailing dot. Some
/// providers (Azure DevOps) scope repositories under an organization;
/// others leave it unset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RepoInfoFields")]
pub struct RepoInfo {
    host: String,
    organization: Option<String>,
    owner: String,
    name: String,
}

impl RepoInfo {
    /// Create repository info without an organization.
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: normalize_host(&host.into()),
            organization: None,
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Set the organization the repository belongs to.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Hostname of the forge (e.g. `github.com`).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Organization, for providers that have one.
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Owner: user, group (possibly nested, `a/b`), or Azure project.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check that every field is usable in a URL path.
    ///
    /// # Errors
    ///
    /// - `TypeError::EmptyField` if host, owner, name or a present
    ///   organization is empty
    /// - `TypeError::InvalidCharacter` if a field contains whitespace, or
    ///   a field other than `owner` contains `/`
    /// - `TypeError::GitSuffix` if the name ends in `.git`, which remote
    ///   parsing would strip
    pub fn validate(&self) -> Result<(), TypeError> {
        check_field("host", &self.host, false)?;
        if let Some(org) = &self.organization {
            check_field("organization", org, false)?;
        }
        // Owners may be nested GitLab groups.
        check_field("owner", &self.owner, true)?;
        check_field("name", &self.name, false)?;
        if self.name.ends_with(".git") {
            return Err(TypeError::GitSuffix(self.name.clone()));
        }

        if self.owner.starts_with('/') || self.owner.ends_with('/') || self.owner.contains("//") {
            return Err(TypeError::InvalidCharacter {
                field: "owner",
                character: '/',
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for RepoInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.organization {
            Some(org) => write!(f, "{}/{}/{}/{}", self.host, org, self.owner, self.name),
            None => write!(f, "{}/{}/{}", self.host, self.owner, self.name),
        }
    }
}

/// Wire form of [`RepoInfo`]; deserialization goes through the
/// constructor so the host is normalized.
#[derive(Deserialize)]
struct RepoInfoFields {
    host: String,
    #[serde(default)]
    organization: Option<String>,
    owner: String,
    name: String,
}

impl From<RepoInfoFields> for RepoInfo {
    fn from(fields: RepoInfoFields) -> Self {
        let repo = RepoInfo::new(fields.host, fields.owner, fields.name);
        match fields.organization {
            Some(org) => repo.with_organization(org),
            None => repo,
        }
    }
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}

fn check_field(field: &'static str, value: &str, allow_slash: bool) -> Result<(), TypeError> {
    if value.is_empty() {
        return Err(TypeError::EmptyField(field));
    }
    if let Some(character) = value
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || (!allow_slash && *c == '/'))
    {
        return Err(TypeError::InvalidCharacter { field, character });
    }
    Ok(())
}

/// Configuration bundle a forge is constructed from.
///
/// When `fork` is set, branches live on a fork owned by that user and
/// generated URLs qualify them as `fork:branch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeArguments {
    /// The repository the forge serves
    pub repo: RepoInfo,
    /// Branch that comparisons are made against
    pub base_branch: String,
    /// Owner of the fork holding the branches, if any
    pub fork: Option<String>,
}

impl ForgeArguments {
    /// Create arguments for branches on the canonical repository.
    pub fn new(repo: RepoInfo, base_branch: impl Into<String>) -> Self {
        Self {
            repo,
            base_branch: base_branch.into(),
            fork: None,
        }
    }

    /// Qualify branches with the given fork owner.
    pub fn with_fork(mut self, fork: impl Into<String>) -> Self {
        self.fork = Some(fork.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod repo_info {
        use super::*;

        #[test]
        fn host_is_normalized() {
            let repo = RepoInfo::new(" GitLab.COM. ", "group", "project");
            assert_eq!(repo.host(), "gitlab.com");
        }

        #[test]
        fn organization_defaults_to_none() {
            let repo = RepoInfo::new("github.com", "octocat", "hello-world");
            assert!(repo.organization().is_none());
        }

        #[test]
        fn with_organization_sets_it() {
            let repo = RepoInfo::new("dev.azure.com", "project", "repo").with_organization("org");
            assert_eq!(repo.organization(), Some("org"));
        }

        #[test]
        fn display_includes_organization_when_present() {
            let plain = RepoInfo::new("github.com", "octocat", "hello-world");
            assert_eq!(plain.to_string(), "github.com/octocat/hello-world");

            let azure = RepoInfo::new("dev.azure.com", "project", "repo").with_organization("org");
            assert_eq!(azure.to_string(), "dev.azure.com/org/project/repo");
        }

        #[test]
        fn serde_roundtrip() {
            let repo = RepoInfo::new("dev.azure.com", "project", "repo").with_organization("org");
            let json = serde_json::to_string(&repo).unwrap();
            let parsed: RepoInfo = serde_json::from_str(&json).unwrap();
            assert_eq!(repo, parsed);
        }

        #[test]
        fn deserialize_normalizes_host() {
            let repo: RepoInfo = serde_json::from_str(
                r#"{"host":"GitHub.com.","owner":"octocat","name":"hello"}"#,
            )
            .unwrap();
            assert_eq!(repo.host(), "github.com");
            assert_eq!(repo.organization(), None);
            assert_eq!(repo, RepoInfo::new("github.com", "octocat", "hello"));
        }
    }

    mod validate {
        use super::*;

        #[test]
        fn accepts_plain_repo() {
            assert!(RepoInfo::new("github.com", "octocat", "hello-world")
                .validate()
                .is_ok());
        }

        #[test]
        fn accepts_nested_owner() {
            assert!(RepoInfo::new("gitlab.com", "a/b/c", "project")
                .validate()
                .is_ok());
        }

        #[test]
        fn rejects_empty_fields() {
            assert_eq!(
                RepoInfo::new("", "o", "n").validate(),
                Err(TypeError::EmptyField("host"))
            );
            assert_eq!(
                RepoInfo::new("github.com", "", "n").validate(),
                Err(TypeError::EmptyField("owner"))
            );
            assert_eq!(
                RepoInfo::new("github.com", "o", "").validate(),
                Err(TypeError::EmptyField("name"))
            );
            assert_eq!(
                RepoInfo::new("dev.azure.com", "o", "n")
                    .with_organization("")
                    .validate(),
                Err(TypeError::EmptyField("organization"))
            );
        }

        #[test]
        fn rejects_slash_in_name() {
            assert_eq!(
                RepoInfo::new("github.com", "o", "a/b").validate(),
                Err(TypeError::InvalidCharacter {
                    field: "name",
                    character: '/'
                })
            );
        }

        #[test]
        fn rejects_malformed_nested_owner() {
            for owner in ["/a", "a/", "a//b"] {
                assert!(
                    RepoInfo::new("gitlab.com", owner, "p").validate().is_err(),
                    "owner {owner:?} should be rejected"
                );
            }
        }

        #[test]
        fn rejects_git_suffix_in_name() {
            assert_eq!(
                RepoInfo::new("github.com", "o", "site.git").validate(),
                Err(TypeError::GitSuffix("site.git".to_string()))
            );
            assert!(RepoInfo::new("github.com", "o", "site.github.io")
                .validate()
                .is_ok());
        }

        #[test]
        fn rejects_whitespace() {
            assert!(RepoInfo::new("github.com", "octo cat", "n")
                .validate()
                .is_err());
        }
    }

    mod forge_arguments {
        use super::*;

        #[test]
        fn new_has_no_fork() {
            let args = ForgeArguments::new(RepoInfo::new("github.com", "o", "n"), "main");
            assert_eq!(args.base_branch, "main");
            assert!(args.fork.is_none());
        }

        #[test]
        fn with_fork_sets_qualifier() {
            let args =
                ForgeArguments::new(RepoInfo::new("github.com", "o", "n"), "main").with_fork("me");
            assert_eq!(args.fork.as_deref(), Some("me"));
        }
    }
}
