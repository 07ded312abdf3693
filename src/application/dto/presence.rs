#[derive(Debug, Clone)]
pub struct HeartbeatDTO {
    pub user_id: String,
    pub ttl: i64,
}

#[derive(Debug, Clone)]
pub struct OnlineUsersDTO {
    pub user_ids: Vec<String>,
}
