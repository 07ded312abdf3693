use chrono::{DateTime, Utc};

use crate::domain::entities::user::User;

#[derive(Debug)]
pub struct CreateUserDTO {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub full_name: Option<String>,
}

#[derive(Debug)]
pub struct UpdateProfileDTO {
    pub user_id: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub hourly_rate: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct UserDTO {
    pub id: String,
    pub username: String,
    pub email: String,
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

impl From<User> for UserDTO {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value.to_string(),
            username: user.username,
            email: user.email,
            role: user.role.as_str().to_string(),
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
