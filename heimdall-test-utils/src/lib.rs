//! Test environment for Heimdall.
//!
//! Tests describe their environment with a [`TestBuilder`] (tables, fixtures, mock GitHub and
//! Discord endpoints) and receive a [`TestContext`] holding an in-memory SQLite database, a
//! browser session backed by a memory store, and the mock server.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::*,
        fixtures::{discord::factory as discord_factory, github::factory},
        TestBuilder, TestContext, TestError,
    };
}
