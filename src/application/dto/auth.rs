#[derive(Debug)]
pub struct LoginDTO {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    pub presence_ttl: i64,
}

#[derive(Debug, Clone)]
pub struct GetSessionIdDTO {
    pub session_id: String,
    pub remember_me: bool,
}
