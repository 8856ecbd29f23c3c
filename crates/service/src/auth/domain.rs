/// Domain user (business view). Deliberately not serializable: the hash
/// must never cross a wire boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub pass_hash: String,
    pub is_admin: bool,
}

/// Registered client application holding its own signing secret.
#[derive(Debug, Clone)]
pub struct App {
    pub id: i64,
    pub name: String,
    pub secret: String,
}
