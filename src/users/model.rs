use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Role tag that grants the right to delete other accounts.
pub const ROLE_ADMIN: &str = "admin";

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub roles: Vec<String>, // role tags, e.g. "admin"
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, never exposed in JSON
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "James".into(),
            last_name: "Milner".into(),
            email: "james.milner@email.com".into(),
            phone: "+375331234567".into(),
            roles: Vec::new(),
            password_hash: "$argon2id$fake-hash".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn has_role_matches_exact_tag() {
        let mut user = sample_user();
        assert!(!user.has_role(ROLE_ADMIN));

        user.roles.push(ROLE_ADMIN.to_string());
        assert!(user.has_role(ROLE_ADMIN));
        assert!(!user.has_role("moderator"));
    }

    #[test]
    fn serialization_never_contains_the_hash() {
        let user = sample_user();
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("fake-hash"));
    }
}
