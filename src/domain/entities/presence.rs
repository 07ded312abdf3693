use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Debug, Clone)]
pub struct Presence {
    pub user_id: Id<User>,
    pub last_seen_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Presence {
    pub fn heartbeat(user_id: Id<User>, now: DateTime<Utc>, ttl_seconds: i64) -> Self {
        Self {
            user_id,
            last_seen_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    pub fn is_online(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
