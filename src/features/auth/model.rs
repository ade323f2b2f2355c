use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller identity resolved by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Owner id every resume read and write is scoped to
    pub user_id: String,
}
