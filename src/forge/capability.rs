//! forge::capability
//!
//! Capability negotiation between callers and forges.
//!
//! # Architecture
//!
//! A forge either supports a capability or it does not; there is no
//! partial support. Callers probe support through the accessor for that
//! capability, which answers with [`Capability::Supported`] carrying a
//! service handle or [`Capability::Absent`].
//!
//! Absence is a provider-level fact, not a failure: it does not depend on
//! authentication or network state and retrying will not change it.
//!
//! The set of supported capabilities is data ([`CapabilitySet`]) seeded
//! from each provider's defaults, so configuration can enable support that
//! a provider gains later without changing the forge interface.
//!
//! # Example
//!
//! ```
//! use forgekit::forge::{Capability, CapabilityKind, CapabilitySet};
//!
//! let caps = CapabilitySet::with([CapabilityKind::PullRequests]);
//!
//! assert!(caps.has(&CapabilityKind::PullRequests));
//! assert!(!caps.has(&CapabilityKind::Issues));
//!
//! let missing = caps.missing(&[CapabilityKind::PullRequests, CapabilityKind::Checks]);
//! assert_eq!(missing, vec![CapabilityKind::Checks]);
//!
//! let absent: Capability<u32> = Capability::Absent;
//! assert!(absent.is_absent());
//! ```

use std::collections::HashSet;

use tracing::trace;

use super::factory::ForgeName;

/// Result of asking a forge for an optional service.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability<T> {
    /// The forge supports the capability; here is its handle.
    Supported(T),
    /// The forge does not support the capability.
    Absent,
}

impl<T> Capability<T> {
    /// Check if the capability is supported.
    pub fn is_supported(&self) -> bool {
        matches!(self, Capability::Supported(_))
    }

    /// Check if the capability is absent.
    pub fn is_absent(&self) -> bool {
        matches!(self, Capability::Absent)
    }

    /// Convert into the handle, if supported.
    pub fn supported(self) -> Option<T> {
        match self {
            Capability::Supported(handle) => Some(handle),
            Capability::Absent => None,
        }
    }

    /// Borrow the handle.
    pub fn as_supported_ref(&self) -> Capability<&T> {
        match self {
            Capability::Supported(handle) => Capability::Supported(handle),
            Capability::Absent => Capability::Absent,
        }
    }

    /// Map the handle, keeping absence.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Capability<U> {
        match self {
            Capability::Supported(handle) => Capability::Supported(f(handle)),
            Capability::Absent => Capability::Absent,
        }
    }

    /// Convert into a `Result`, turning absence into `err`.
    ///
    /// For callers whose own contract makes the capability mandatory.
    pub fn ok_or<E>(self, err: E) -> Result<T, E> {
        match self {
            Capability::Supported(handle) => Ok(handle),
            Capability::Absent => Err(err),
        }
    }
}

impl<T> From<Capability<T>> for Option<T> {
    fn from(capability: Capability<T>) -> Self {
        capability.supported()
    }
}

/// An optional service a forge may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    /// Listing branches and pull requests.
    List,
    /// Issue tracking.
    Issues,
    /// Pull request management.
    PullRequests,
    /// Repository metadata.
    Repo,
    /// CI check monitoring.
    Checks,
}

impl CapabilityKind {
    /// Every capability kind.
    pub const ALL: [CapabilityKind; 5] = [
        CapabilityKind::List,
        CapabilityKind::Issues,
        CapabilityKind::PullRequests,
        CapabilityKind::Repo,
        CapabilityKind::Checks,
    ];

    /// Key used in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            CapabilityKind::List => "list",
            CapabilityKind::Issues => "issues",
            CapabilityKind::PullRequests => "prs",
            CapabilityKind::Repo => "repo",
            CapabilityKind::Checks => "checks",
        }
    }

    /// Get a human-readable description of the capability.
    ///
    /// # Example
    ///
    /// ```
    /// use forgekit::forge::CapabilityKind;
    ///
    /// assert_eq!(CapabilityKind::PullRequests.description(), "pull request management");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            CapabilityKind::List => "branch and pull request listing",
            CapabilityKind::Issues => "issue tracking",
            CapabilityKind::PullRequests => "pull request management",
            CapabilityKind::Repo => "repository metadata",
            CapabilityKind::Checks => "CI check monitoring",
        }
    }
}

impl std::fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The capabilities one forge configuration supports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: HashSet<CapabilityKind>,
}

impl CapabilitySet {
    /// Create an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set containing every capability.
    pub fn all() -> Self {
        Self::with(CapabilityKind::ALL)
    }

    /// Create a capability set with the given capabilities.
    pub fn with<I: IntoIterator<Item = CapabilityKind>>(iter: I) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }

    /// Insert a capability into the set.
    pub fn insert(&mut self, cap: CapabilityKind) {
        self.capabilities.insert(cap);
    }

    /// Remove a capability from the set.
    pub fn remove(&mut self, cap: &CapabilityKind) -> bool {
        self.capabilities.remove(cap)
    }

    /// Check if a capability is present.
    pub fn has(&self, cap: &CapabilityKind) -> bool {
        self.capabilities.contains(cap)
    }

    /// Check if all given capabilities are present.
    ///
    /// Returns true if the slice is empty.
    pub fn has_all(&self, caps: &[CapabilityKind]) -> bool {
        caps.iter().all(|c| self.capabilities.contains(c))
    }

    /// Get the capabilities that are missing from the required set.
    pub fn missing(&self, required: &[CapabilityKind]) -> Vec<CapabilityKind> {
        required
            .iter()
            .filter(|c| !self.capabilities.contains(c))
            .copied()
            .collect()
    }

    /// Get the number of capabilities in the set.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Iterate over the capabilities in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = CapabilityKind> + '_ {
        CapabilityKind::ALL
            .into_iter()
            .filter(|c| self.capabilities.contains(c))
    }

    /// Answer a capability query for `forge`.
    ///
    /// `build` runs only when the capability is present, so an absent
    /// capability never constructs a handle.
    pub fn negotiate<T>(
        &self,
        forge: ForgeName,
        cap: CapabilityKind,
        build: impl FnOnce() -> T,
    ) -> Capability<T> {
        let supported = self.has(&cap);
        trace!(forge = %forge, capability = cap.key(), supported, "capability negotiated");
        if supported {
            Capability::Supported(build())
        } else {
            Capability::Absent
        }
    }
}

impl FromIterator<CapabilityKind> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = CapabilityKind>>(iter: T) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod capability {
        use super::*;

        #[test]
        fn supported_and_absent_are_distinguishable() {
            let supported = Capability::Supported(7);
            let absent: Capability<i32> = Capability::Absent;

            assert!(supported.is_supported());
            assert!(!supported.is_absent());
            assert!(absent.is_absent());
            assert!(!absent.is_supported());
        }

        #[test]
        fn supported_converts_to_option() {
            assert_eq!(Capability::Supported("x").supported(), Some("x"));
            assert_eq!(Capability::<&str>::Absent.supported(), None);

            let opt: Option<u8> = Capability::Supported(1).into();
            assert_eq!(opt, Some(1));
        }

        #[test]
        fn map_keeps_absence() {
            assert_eq!(Capability::Supported(2).map(|n| n * 2), Capability::Supported(4));
            assert_eq!(Capability::<i32>::Absent.map(|n| n * 2), Capability::Absent);
        }

        #[test]
        fn as_supported_ref_borrows() {
            let cap = Capability::Supported(String::from("handle"));
            assert_eq!(
                cap.as_supported_ref().map(|s| s.len()),
                Capability::Supported(6)
            );
            assert!(cap.is_supported());

            let absent: Capability<String> = Capability::Absent;
            assert!(absent.as_supported_ref().is_absent());
        }

        #[test]
        fn ok_or_turns_absence_into_error() {
            assert_eq!(Capability::Supported(1).ok_or("absent"), Ok(1));
            assert_eq!(Capability::<i32>::Absent.ok_or("absent"), Err("absent"));
        }
    }

    mod capability_kind {
        use super::*;

        #[test]
        fn all_variants_have_descriptions_and_keys() {
            for cap in CapabilityKind::ALL {
                assert!(!cap.description().is_empty());
                assert!(!cap.key().is_empty());
            }
        }

        #[test]
        fn keys_are_unique() {
            let keys: HashSet<_> = CapabilityKind::ALL.iter().map(|c| c.key()).collect();
            assert_eq!(keys.len(), CapabilityKind::ALL.len());
        }

        #[test]
        fn display_uses_description() {
            let cap = CapabilityKind::Checks;
            assert_eq!(format!("{}", cap), cap.description());
        }
    }

    mod capability_set {
        use super::*;

        #[test]
        fn new_is_empty() {
            let caps = CapabilitySet::new();
            assert!(caps.is_empty());
            assert_eq!(caps.len(), 0);
        }

        #[test]
        fn all_contains_every_kind() {
            let caps = CapabilitySet::all();
            assert_eq!(caps.len(), CapabilityKind::ALL.len());
            assert!(caps.has_all(&CapabilityKind::ALL));
        }

        #[test]
        fn insert_deduplicates() {
            let mut caps = CapabilitySet::new();
            caps.insert(CapabilityKind::Repo);
            caps.insert(CapabilityKind::Repo);
            assert_eq!(caps.len(), 1);
        }

        #[test]
        fn remove_reports_presence() {
            let mut caps = CapabilitySet::with([CapabilityKind::Repo]);
            assert!(caps.remove(&CapabilityKind::Repo));
            assert!(!caps.remove(&CapabilityKind::Repo));
        }

        #[test]
        fn has_all_with_empty_required() {
            assert!(CapabilitySet::new().has_all(&[]));
        }

        #[test]
        fn missing_returns_absent_capabilities() {
            let caps = CapabilitySet::with([CapabilityKind::List]);
            let missing = caps.missing(&[
                CapabilityKind::List,
                CapabilityKind::Issues,
                CapabilityKind::Checks,
            ]);
            assert_eq!(missing, vec![CapabilityKind::Issues, CapabilityKind::Checks]);
        }

        #[test]
        fn iter_is_ordered() {
            let caps: CapabilitySet = [CapabilityKind::Checks, CapabilityKind::List]
                .into_iter()
                .collect();
            assert_eq!(
                caps.iter().collect::<Vec<_>>(),
                vec![CapabilityKind::List, CapabilityKind::Checks]
            );
        }

        #[test]
        fn negotiate_builds_only_when_supported() {
            let caps = CapabilitySet::with([CapabilityKind::Repo]);
            let mut built = 0;

            let repo = caps.negotiate(ForgeName::GitHub, CapabilityKind::Repo, || {
                built += 1;
                "repo"
            });
            assert_eq!(repo, Capability::Supported("repo"));

            let issues = caps.negotiate(ForgeName::GitHub, CapabilityKind::Issues, || {
                built += 1;
                "issues"
            });
            assert_eq!(issues, Capability::Absent);
            assert_eq!(built, 1);
        }
    }
}
