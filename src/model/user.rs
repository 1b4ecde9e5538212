use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A local user account, with attributes imported from the identity provider at first login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: String,
    pub created_at: NaiveDateTime,
}
