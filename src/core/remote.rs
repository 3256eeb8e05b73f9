//! core::remote
//!
//! Parse git remote URLs into [`RepoInfo`].
//!
//! # Accepted Forms
//!
//! - scp-like SSH: `git@github.com:owner/repo.git`
//! - `ssh://git@host[:port]/owner/repo.git`
//! - `https://[user@]host/owner/repo[.git]`
//! - Nested groups: `git@gitlab.com:group/subgroup/project.git`
//! - Azure DevOps: `https://[org@]dev.azure.com/org/project/_git/repo`
//!   and `git@ssh.dev.azure.com:v3/org/project/repo`
//! - Legacy Azure DevOps: `https://org.visualstudio.com/project/_git/repo`
//! - Azure DevOps Server: `https://host/collection/project/_git/repo`
//!   (host kept)
//!
//! Azure DevOps hosts are normalized to `dev.azure.com` so that the forge
//! factory sees a single domain.
//!
//! # Example
//!
//! ```
//! use forgekit::core::remote::parse_remote_url;
//!
//! let repo = parse_remote_url("git@gitlab.com:group/subgroup/project.git").unwrap();
//! assert_eq!(repo.host(), "gitlab.com");
//! assert_eq!(repo.owner(), "group/subgroup");
//! assert_eq!(repo.name(), "project");
//!
//! let azure = parse_remote_url("git@ssh.dev.azure.com:v3/org/project/repo").unwrap();
//! assert_eq!(azure.host(), "dev.azure.com");
//! assert_eq!(azure.organization(), Some("org"));
//! ```

use thiserror::Error;
use url::Url;

use super::types::RepoInfo;
use crate::forge::azure::AZURE_DOMAIN;

/// SSH host used by Azure DevOps remotes.
const AZURE_SSH_HOST: &str = "ssh.dev.azure.com";

/// SSH host used by legacy Visual Studio Team Services remotes.
const LEGACY_AZURE_SSH_HOST: &str = "vs-ssh.visualstudio.com";

/// Suffix of legacy Visual Studio Team Services web hosts.
const LEGACY_AZURE_SUFFIX: &str = ".visualstudio.com";

/// Path segment separating project from repository in Azure URLs.
const AZURE_GIT_SEGMENT: &str = "_git";

/// Errors from remote URL parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteUrlError {
    #[error("remote URL is empty")]
    Empty,

    #[error("unsupported remote URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("malformed remote URL '{url}': {reason}")]
    Malformed { url: String, reason: String },
}

fn malformed(url: &str, reason: impl Into<String>) -> RemoteUrlError {
    RemoteUrlError::Malformed {
        url: url.to_string(),
        reason: reason.into(),
    }
}

/// Parse a git remote URL into repository info.
///
/// # Errors
///
/// - `RemoteUrlError::Empty` for blank input
/// - `RemoteUrlError::UnsupportedScheme` for schemes other than
///   http(s), ssh and git
/// - `RemoteUrlError::Malformed` when the host or the owner/name path
///   cannot be extracted
pub fn parse_remote_url(remote: &str) -> Result<RepoInfo, RemoteUrlError> {
    let remote = remote.trim();
    if remote.is_empty() {
        return Err(RemoteUrlError::Empty);
    }

    let (host, path) = split_remote(remote)?;
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match host.as_str() {
        AZURE_DOMAIN => parse_azure_path(remote, AZURE_DOMAIN, &segments),
        AZURE_SSH_HOST | LEGACY_AZURE_SSH_HOST => parse_azure_ssh_path(remote, &segments),
        h if h.ends_with(LEGACY_AZURE_SUFFIX) => {
            let organization = &h[..h.len() - LEGACY_AZURE_SUFFIX.len()];
            parse_legacy_azure_path(remote, organization, &segments)
        }
        _ if segments.get(2) == Some(&AZURE_GIT_SEGMENT) => {
            parse_azure_path(remote, &host, &segments)
        }
        _ => parse_owner_path(remote, &host, &segments),
    }
}

/// Split a remote into lowercase host and raw path.
fn split_remote(remote: &str) -> Result<(String, String), RemoteUrlError> {
    if remote.contains("://") {
        let url = Url::parse(remote).map_err(|e| malformed(remote, e.to_string()))?;
        match url.scheme() {
            "https" | "http" | "ssh" | "git" | "git+ssh" | "ssh+git" => {}
            other => return Err(RemoteUrlError::UnsupportedScheme(other.to_string())),
        }
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| malformed(remote, "missing host"))?;
        return Ok((host.to_ascii_lowercase(), url.path().to_string()));
    }

    // scp-like: [user@]host:path
    let (authority, path) = remote
        .split_once(':')
        .ok_or_else(|| malformed(remote, "expected a URL or 'host:path'"))?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    if host.is_empty() {
        return Err(malformed(remote, "missing host"));
    }
    Ok((host.to_ascii_lowercase(), path.to_string()))
}

fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(".git").unwrap_or(name)
}

/// `owner/.../name`: every segment but the last is the owner.
fn parse_owner_path(remote: &str, host: &str, segments: &[&str]) -> Result<RepoInfo, RemoteUrlError> {
    let (name, owner) = match segments.split_last() {
        Some((name, owner)) if !owner.is_empty() => (strip_git_suffix(name), owner.join("/")),
        _ => return Err(malformed(remote, "expected 'owner/name' path")),
    };
    if name.is_empty() {
        return Err(malformed(remote, "repository name is empty"));
    }
    Ok(RepoInfo::new(host, owner, name))
}

/// `org/project/_git/repo`, or `org/_git/repo` when project and repo share a name.
fn parse_azure_path(
    remote: &str,
    host: &str,
    segments: &[&str],
) -> Result<RepoInfo, RemoteUrlError> {
    let git_at = segments.iter().position(|s| *s == AZURE_GIT_SEGMENT);
    let (organization, project, repo) = match (git_at, segments) {
        (Some(2), [org, project, _, repo, ..]) => (*org, *project, *repo),
        (Some(1), [org, _, repo, ..]) => (*org, *repo, *repo),
        _ => {
            return Err(malformed(
                remote,
                "expected 'organization/project/_git/repository' path",
            ))
        }
    };
    Ok(RepoInfo::new(host, project, strip_git_suffix(repo)).with_organization(organization))
}

/// `v3/org/project/repo`.
fn parse_azure_ssh_path(remote: &str, segments: &[&str]) -> Result<RepoInfo, RemoteUrlError> {
    match segments {
        ["v3", org, project, repo] => {
            Ok(RepoInfo::new(AZURE_DOMAIN, *project, strip_git_suffix(repo)).with_organization(*org))
        }
        _ => Err(malformed(
            remote,
            "expected 'v3/organization/project/repository' path",
        )),
    }
}

/// `[collection/]project/_git/repo` under `{org}.visualstudio.com`.
fn parse_legacy_azure_path(
    remote: &str,
    organization: &str,
    segments: &[&str],
) -> Result<RepoInfo, RemoteUrlError> {
    let git_at = segments
        .iter()
        .position(|s| *s == AZURE_GIT_SEGMENT)
        .filter(|at| *at > 0);
    match git_at.and_then(|at| Some((segments[at - 1], *segments.get(at + 1)?))) {
        Some((project, repo)) if !organization.is_empty() => {
            Ok(RepoInfo::new(AZURE_DOMAIN, project, strip_git_suffix(repo))
                .with_organization(organization))
        }
        _ => Err(malformed(remote, "expected 'project/_git/repository' path")),
    }
}
