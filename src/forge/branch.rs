//! forge::branch
//!
//! Branch handles and comparison URLs.
//!
//! # Design
//!
//! A [`ForgeBranch`] pairs a branch with the base branch it is compared
//! against on one forge. Building it and rendering its URL are pure string
//! operations; nothing here touches the network.
//!
//! When the branch lives on a fork, its name is qualified as
//! `fork:branch` in the generated URL. Each provider module owns its
//! comparison grammar; this module dispatches on the forge tag.
//!
//! # Encoding
//!
//! Branch names may contain `/` and characters that are significant in
//! URLs. In path positions each `/`-separated component is escaped and
//! the separators are kept; query values are escaped whole.

use url::form_urlencoded::byte_serialize;

use super::factory::ForgeName;
use super::{azure, bitbucket, github, gitlab};

/// A branch compared against a base branch on one forge.
///
/// # Example
///
/// ```
/// use forgekit::core::types::{ForgeArguments, RepoInfo};
/// use forgekit::forge::{create_forge, ForgeProvider};
///
/// let repo = RepoInfo::new("github.com", "octocat", "hello-world");
/// let forge = create_forge(ForgeArguments::new(repo, "main")).unwrap();
///
/// let branch = forge.branch("feature/login");
/// assert_eq!(
///     branch.url(),
///     "https://github.com/octocat/hello-world/compare/main...feature/login"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForgeBranch {
    forge: ForgeName,
    name: String,
    base_branch: String,
    base_url: String,
    fork: Option<String>,
}

impl ForgeBranch {
    /// Create a branch handle.
    pub fn new(
        forge: ForgeName,
        name: impl Into<String>,
        base_branch: impl Into<String>,
        base_url: impl Into<String>,
        fork: Option<String>,
    ) -> Self {
        Self {
            forge,
            name: name.into(),
            base_branch: base_branch.into(),
            base_url: base_url.into(),
            fork,
        }
    }

    /// Forge the branch belongs to.
    pub fn forge(&self) -> ForgeName {
        self.forge
    }

    /// Branch name, unqualified.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Branch the comparison is made against.
    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    /// Web URL of the repository.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fork owner, when the branch lives on a fork.
    pub fn fork(&self) -> Option<&str> {
        self.fork.as_deref()
    }

    /// Branch name as it appears in comparisons (`fork:name` on forks).
    pub fn qualified_name(&self) -> String {
        match &self.fork {
            Some(fork) => format!("{}:{}", fork, self.name),
            None => self.name.clone(),
        }
    }

    /// Comparison URL: this branch against the base branch.
    pub fn url(&self) -> String {
        match self.forge {
            ForgeName::GitHub => github::compare_url(self),
            ForgeName::GitLab => gitlab::compare_url(self),
            ForgeName::Bitbucket => bitbucket::compare_url(self),
            ForgeName::Azure => azure::compare_url(self),
        }
    }

    /// Qualified name escaped for a path position.
    pub(crate) fn qualified_path(&self) -> String {
        match &self.fork {
            Some(fork) => format!("{}:{}", encode_path(fork), encode_path(&self.name)),
            None => encode_path(&self.name),
        }
    }
}

impl std::fmt::Display for ForgeBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

/// Escape a value for a single path segment or query value.
pub(crate) fn encode_component(value: &str) -> String {
    // Form encoding writes spaces as '+', which paths read literally.
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Escape a value for a path position, keeping `/` separators.
pub(crate) fn encode_path(value: &str) -> String {
    value
        .split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}
