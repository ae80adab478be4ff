use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::model::User;

/// Request body for user registration. All fields are required at the wire
/// level; their contents are checked by the validator before persistence.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Partial-update body. Omitted fields stay untouched; an empty string also
/// leaves the field unchanged, so clearing a field to empty is unsupported.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// Client-facing view of a user; the credential never appears here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub roles: Vec<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            roles: user.roles,
        }
    }
}

/// Plain acknowledgement body, e.g. `{"status": "User registered!"}`.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
}
