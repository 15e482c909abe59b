use crate::ports::{FolloweeStore, StoreError};
use parking_lot::RwLock;
use shared_types::UserId;
use std::collections::{BTreeSet, HashMap};

/// In-memory followee sets.
#[derive(Default)]
pub struct InMemoryFolloweeStore {
    sets: RwLock<HashMap<UserId, BTreeSet<UserId>>>,
}

impl InMemoryFolloweeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FolloweeStore for InMemoryFolloweeStore {
    fn add(&self, user: UserId, followee: UserId) -> Result<bool, StoreError> {
        Ok(self.sets.write().entry(user).or_default().insert(followee))
    }

    fn remove(&self, user: UserId, followee: UserId) -> Result<bool, StoreError> {
        let mut sets = self.sets.write();
        let Some(set) = sets.get_mut(&user) else {
            return Ok(false);
        };
        let removed = set.remove(&followee);
        if set.is_empty() {
            sets.remove(&user);
        }
        Ok(removed)
    }

    fn followees(&self, user: UserId) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .sets
            .read()
            .get(&user)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default())
    }

    fn all(&self) -> Result<Vec<(UserId, UserId)>, StoreError> {
        Ok(self
            .sets
            .read()
            .iter()
            .flat_map(|(user, set)| set.iter().map(move |f| (*user, *f)))
            .collect())
    }
}
