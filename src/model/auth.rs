use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::user::UserDto;

/// An active login session. Tokens are never part of the DTO.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionDto {
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    /// Whether this is the session the request was made with
    pub current: bool,
}

/// Everything a page needs on load: a fresh login link plus the current session, if any.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BootstrapDto {
    /// Provider the authorization URL was issued for
    pub provider: String,
    /// URL to send the user to for "login with provider"
    pub authorization_url: String,
    pub session: Option<SessionDto>,
    pub user: Option<UserDto>,
}
