//! User profile model for storage.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore under `users/{uid}`.
///
/// The uid itself is the document ID and is issued by the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Email address used at registration
    pub email: String,
    /// When the account was registered
    pub created_at: String,
}
