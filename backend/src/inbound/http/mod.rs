//! HTTP inbound adapter exposing the users REST endpoints.

pub mod diagnostics;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;
