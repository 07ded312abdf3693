use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct OnlineUsersQuery {
    /// Comma-separated user ids.
    #[validate(length(min = 1, max = 3700, message = "Between 1 and 100 user ids"))]
    pub user_ids: String,
}

impl OnlineUsersQuery {
    pub fn ids(&self) -> Vec<String> {
        self.user_ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OnlineUsersResponse {
    pub user_ids: Vec<String>,
}
