//! forge
//!
//! Abstraction for git hosting providers (GitHub, GitLab, Bitbucket, Azure
//! DevOps).
//!
//! # Architecture
//!
//! The [`ForgeProvider`] trait defines what every provider offers. Callers
//! use the [`create_forge`] factory function or a [`ForgeFactory`] rather
//! than constructing provider types directly.
//!
//! - Branch handles and commit URLs are always available
//! - Optional services are negotiated through [`Capability`]
//! - Nothing in this module performs I/O
//!
//! # Modules
//!
//! - [`github`]: GitHub and GitHub Enterprise
//! - [`gitlab`]: GitLab and self-hosted GitLab
//! - [`bitbucket`]: Bitbucket Cloud
//! - [`azure`]: Azure DevOps
//! - `factory`: Forge selection and creation
//! - `capability`: Capability negotiation
//! - `services`: Service handles returned by supported capabilities
//!
//! # Example
//!
//! ```
//! use forgekit::core::types::{ForgeArguments, RepoInfo};
//! use forgekit::forge::{create_forge, Capability, ForgeProvider};
//!
//! let repo = RepoInfo::new("gitlab.com", "group", "project");
//! let forge = create_forge(ForgeArguments::new(repo, "main"))?;
//!
//! match forge.pr_service() {
//!     Capability::Supported(prs) => println!("MR 1: {}", prs.pull_request_url(1)),
//!     Capability::Absent => println!("{} has no pull request support", forge.name()),
//! }
//! # Ok::<(), forgekit::forge::ForgeError>(())
//! ```

pub mod azure;
pub mod bitbucket;
mod branch;
mod capability;
mod factory;
pub mod github;
pub mod gitlab;
mod services;
mod traits;

pub use branch::ForgeBranch;
pub use capability::{Capability, CapabilityKind, CapabilitySet};
pub use factory::{create_forge, detect_forge, valid_forge_names, ForgeFactory, ForgeName};
pub use services::{
    ChecksMonitor, ForgeRepoService, IssueService, ListService, PrService, ServiceScope,
};
pub use traits::{Forge, ForgeError, ForgeProvider};
