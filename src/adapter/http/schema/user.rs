use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_email::Email;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::ValidPassword;
use crate::application::dto::user::UserDTO;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "asha_rao",
    "email": "asha@example.com",
    "password": "Password123!",
    "role": "freelancer",
    "full_name": "Asha Rao"
}))]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[schema(value_type = String)]
    pub email: Email,
    #[validate(nested)]
    pub password: ValidPassword,
    #[schema(example = "freelancer")]
    pub role: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(length(max = 50, message = "At most 50 skills"))]
    pub skills: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub hourly_rate: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[schema(example = "client")]
    pub role: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub hourly_rate: Option<i64>,
    pub rating: f64,
    pub rating_count: i32,
    pub total_earnings: i64,
    pub total_spent: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserDTO> for UserResponse {
    fn from(user: UserDTO) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            full_name: user.full_name,
            bio: user.bio,
            skills: user.skills,
            hourly_rate: user.hourly_rate,
            rating: user.rating,
            rating_count: user.rating_count,
            total_earnings: user.total_earnings,
            total_spent: user.total_spent,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;
    use validator::Validate;

    use crate::adapter::http::schema::user::{CreateUserRequest, UpdateProfileRequest};

    #[rstest]
    fn test_weak_password_is_rejected() {
        let request: CreateUserRequest = serde_json::from_value(json!({
            "username": "asha_rao",
            "email": "asha@example.com",
            "password": "password",
            "role": "freelancer"
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[rstest]
    fn test_malformed_email_fails_to_parse() {
        let result = serde_json::from_value::<CreateUserRequest>(json!({
            "username": "asha_rao",
            "email": "not-an-email",
            "password": "Password123!",
            "role": "freelancer"
        }));

        assert!(result.is_err());
    }

    #[rstest]
    #[case(json!({"hourly_rate": -1}), false)]
    #[case(json!({"hourly_rate": 1500, "skills": ["rust", "sql"]}), true)]
    #[case(json!({}), true)]
    fn test_profile_update_validation(#[case] body: serde_json::Value, #[case] ok: bool) {
        let request: UpdateProfileRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.validate().is_ok(), ok);
    }
}
