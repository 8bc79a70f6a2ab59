//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

use crate::error::AppError;
use crate::models::{PlanRecord, UserProfile};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Sub-collection of a user document
    pub const PLANS: &str = "plans";
}

/// Profile and plan-history storage, keyed by identity uid.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Write the profile document for a newly registered user.
    async fn create_profile(&self, uid: &str, profile: &UserProfile) -> Result<(), AppError>;

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError>;

    /// Append a plan to the user's `plans` sub-collection.
    async fn add_plan(&self, uid: &str, plan: &PlanRecord) -> Result<(), AppError>;

    /// Most recent plans first.
    async fn list_plans(&self, uid: &str, limit: u32) -> Result<Vec<PlanRecord>, AppError>;
}
