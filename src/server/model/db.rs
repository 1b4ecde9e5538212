//! Database model type aliases.
//!
//! Short names for the SeaORM models generated in the `entity` crate, used throughout the
//! data, service and controller layers.

/// Type alias for the user database model.
///
/// Attributes are copied from the provider profile when the user first logs in and are never
/// updated afterwards.
pub type UserModel = entity::auth_user::Model;

/// Type alias for the key database model.
///
/// A key anchors a user to one provider identity, its ID being `{provider}:{provider_user_id}`.
pub type KeyModel = entity::auth_key::Model;

/// Type alias for the login session database model.
///
/// The session ID is the opaque token carried by the session cookie.
pub type SessionModel = entity::auth_session::Model;
