use serde::{Deserialize, Serialize};
use shared_types::UserId;

/// Directory entry for a user known to the post authority.
///
/// Authors are registered the first time they post; the profile service can
/// also register users up front with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Entry created implicitly for a first-time author.
    pub fn anonymous(id: UserId) -> Self {
        Self::new(id, "")
    }
}
