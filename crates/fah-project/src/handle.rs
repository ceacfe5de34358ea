//! Project identity and part handles

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use fah_core::Part;

static NEXT_PROJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Project`](crate::Project)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProjectId(u64);

impl ProjectId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PROJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A registered part, typed by its kind
///
/// Handles are only created by the project that registered the part, so a
/// handle's owner is fixed for its whole life. Resolving a handle against a
/// different project yields nothing.
pub struct Handle<T> {
    owner: ProjectId,
    slot: usize,
    _kind: PhantomData<fn() -> T>,
}

/// A handle to a part of any kind
pub type PartHandle = Handle<Part>;

impl<T> Handle<T> {
    pub(crate) fn new(owner: ProjectId, slot: usize) -> Self {
        Self {
            owner,
            slot,
            _kind: PhantomData,
        }
    }

    /// The project that registered this part
    pub fn owner(&self) -> ProjectId {
        self.owner
    }

    /// Arena slot of the part inside its project
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Forget the concrete kind
    pub fn erase(self) -> PartHandle {
        Handle::new(self.owner, self.slot)
    }
}

// Manual impls: derives would put bounds on `T`.

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.slot == other.slot
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.slot.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("owner", &self.owner)
            .field("slot", &self.slot)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fah_core::Device;

    #[test]
    fn test_project_ids_are_unique() {
        let a = ProjectId::next();
        let b = ProjectId::next();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with('P'));
    }

    #[test]
    fn test_erase_keeps_identity() {
        let owner = ProjectId::next();
        let handle: Handle<Device> = Handle::new(owner, 3);
        let erased = handle.erase();
        assert_eq!(erased.owner(), owner);
        assert_eq!(erased.slot(), 3);
        assert_eq!(erased, Handle::<Part>::new(owner, 3));
    }
}
