//! Database model type aliases matching those in the main heimdall crate.

/// Type alias for the user database model.
pub type UserModel = entity::auth_user::Model;

/// Type alias for the key database model.
pub type KeyModel = entity::auth_key::Model;

/// Type alias for the login session database model.
pub type SessionModel = entity::auth_session::Model;
