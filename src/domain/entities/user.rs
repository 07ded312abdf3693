use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::application::app_error::AppError;
use crate::domain::entities::id::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Client,
    Freelancer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "client",
            UserRole::Freelancer => "freelancer",
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(UserRole::Client),
            "freelancer" => Ok(UserRole::Freelancer),
            other => Err(AppError::Validation(format!("Unknown user role `{}`", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Id<User>,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
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

impl User {
    pub fn new(username: String, email: String, password: String, role: UserRole, full_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            username,
            email,
            password,
            role,
            full_name,
            bio: None,
            skills: Vec::new(),
            hourly_rate: None,
            rating: 0.0,
            rating_count: 0,
            total_earnings: 0,
            total_spent: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_client(&self) -> bool {
        self.role == UserRole::Client
    }

    pub fn is_freelancer(&self) -> bool {
        self.role == UserRole::Freelancer
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::domain::entities::user::{User, UserRole};

    #[rstest]
    #[case("client", UserRole::Client)]
    #[case("Freelancer", UserRole::Freelancer)]
    fn test_parse_role(#[case] raw: &str, #[case] expected: UserRole) {
        assert_eq!(raw.parse::<UserRole>().unwrap(), expected);
    }

    #[rstest]
    fn test_parse_unknown_role() {
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[rstest]
    fn test_new_user_has_zeroed_counters() {
        let user = User::new(
            "freelancer".to_string(),
            "f@example.com".to_string(),
            "hash".to_string(),
            UserRole::Freelancer,
            None,
        );
        assert!(user.is_freelancer());
        assert!(!user.is_client());
        assert_eq!(user.total_earnings, 0);
        assert_eq!(user.rating_count, 0);
    }
}
