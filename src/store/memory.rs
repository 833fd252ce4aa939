//! Thread-safe in-memory [`CredentialStore`] implementation for short-lived processes and tests.

// self
use crate::{
	_prelude::*,
	auth::CredentialPair,
	store::{CredentialStore, StoreError},
};

/// Process-local credential storage; cloned handles share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<Option<CredentialPair>>>);
impl MemoryStore {
	/// Creates a store pre-seeded with `pair`.
	pub fn with_credentials(pair: CredentialPair) -> Self {
		Self(Arc::new(RwLock::new(Some(pair))))
	}
}
impl CredentialStore for MemoryStore {
	fn load(&self) -> Option<CredentialPair> {
		self.0.read().clone()
	}

	fn save(&self, pair: &CredentialPair) -> Result<(), StoreError> {
		*self.0.write() = Some(pair.clone());

		Ok(())
	}

	fn clear(&self) -> Result<(), StoreError> {
		self.0.write().take();

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn save_overwrites_the_whole_pair() {
		let store = MemoryStore::with_credentials(CredentialPair::new("old-a", "old-r"));

		store.save(&CredentialPair::new("new-a", "new-r")).expect("Save should succeed.");

		assert_eq!(store.load(), Some(CredentialPair::new("new-a", "new-r")));
	}

	#[test]
	fn clones_share_state_and_clear_removes_both() {
		let store = MemoryStore::with_credentials(CredentialPair::new("a", "r"));
		let view = store.clone();

		store.clear().expect("Clear should succeed.");

		assert!(view.load().is_none());
		assert!(view.access_token().is_none());
		assert!(view.refresh_token().is_none());
	}
}
