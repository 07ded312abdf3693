use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{id::Id, user::User};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Id<Session>,
    pub user_id: Id<User>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub remember_me: bool,
}

impl Session {
    pub fn new(user_id: Id<User>, remember_me: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            user_id,
            created_at: now,
            last_activity: now,
            remember_me,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, max_lifetime: Duration, idle_timeout: Duration) -> bool {
        now - self.created_at > max_lifetime || now - self.last_activity > idle_timeout
    }
}
