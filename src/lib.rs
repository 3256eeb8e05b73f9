//! forgekit - capability negotiation for git hosting providers
//!
//! forgekit maps a remote repository to the hosting provider that serves
//! it and answers two kinds of questions about that provider: which web
//! URLs identify a commit or a branch comparison, and which optional
//! services (pull requests, issues, listings, repository metadata, CI
//! checks) it supports.
//!
//! # Architecture
//!
//! - [`core`] - Repository types, remote URL parsing, configuration
//! - [`forge`] - Provider selection, URL grammars, capability negotiation
//!
//! # Guarantees
//!
//! 1. A forge's name always equals the provider the factory selected
//! 2. Capability absence is a value, never an error
//! 3. URL construction is pure and total over validated input
//! 4. Forges are immutable and safe to share across threads
//!
//! # Example
//!
//! ```
//! use forgekit::core::remote::parse_remote_url;
//! use forgekit::core::types::ForgeArguments;
//! use forgekit::forge::{create_forge, ForgeProvider};
//!
//! let repo = parse_remote_url("git@ssh.dev.azure.com:v3/org1/owner1/repo1").unwrap();
//! let forge = create_forge(ForgeArguments::new(repo, "main")).unwrap();
//!
//! assert_eq!(
//!     forge.commit_url("abc123"),
//!     "https://dev.azure.com/org1/owner1/_git/repo1/commit/abc123"
//! );
//! assert!(forge.pr_service().is_absent());
//! ```

pub mod core;
pub mod forge;
