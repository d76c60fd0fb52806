//! Session Store Port - Authoritative registry of live recruitment sessions.
//!
//! The store is synchronous: every operation completes without awaiting, so
//! a validate-and-mutate pass through [`SessionStore::modify`] can never
//! interleave with another transition on the same session.

use crate::domain::foundation::SessionId;
use crate::domain::recruitment::Session;

/// Port for storing sessions keyed by their panel message.
///
/// Absence is a normal outcome (restart, or a race with close) and is
/// reported as `None`/`false`, never as an error.
pub trait SessionStore: Send + Sync {
    /// Returns a copy of the session, if registered.
    fn get(&self, id: SessionId) -> Option<Session>;

    /// Registers or replaces the session under `id`.
    fn put(&self, id: SessionId, session: Session);

    /// Removes the session and returns it, if it was registered.
    fn remove(&self, id: SessionId) -> Option<Session>;

    fn contains(&self, id: SessionId) -> bool;

    /// Number of live sessions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` against the stored session while holding exclusive access
    /// to it.
    ///
    /// Returns `false` without calling `f` when `id` is not registered.
    fn modify(&self, id: SessionId, f: &mut dyn FnMut(&mut Session)) -> bool;
}

/// Typed convenience over [`SessionStore::modify`].
pub trait SessionStoreExt: SessionStore {
    /// Applies `f` to the stored session atomically and returns its result,
    /// or `None` when the session does not exist.
    fn update<R, F>(&self, id: SessionId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut f = Some(f);
        let mut outcome = None;
        self.modify(id, &mut |session| {
            if let Some(f) = f.take() {
                outcome = Some(f(session));
            }
        });
        outcome
    }
}

impl<T: SessionStore + ?Sized> SessionStoreExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_store_is_object_safe_and_send_sync() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
        fn _assert_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_send_sync::<std::sync::Arc<dyn SessionStore>>();
    }
}
