//! Domain primitives, ports, and the user service.
//!
//! Purpose: define the user aggregate and the transport-agnostic error type
//! shared by the HTTP and persistence adapters. Nothing in this module knows
//! about Actix or Diesel.
//!
//! Public surface:
//! - Error (alias to `error::Error`): domain failure with a stable code.
//! - ErrorCode (alias to `error::ErrorCode`): failure category.
//! - User, UserDraft, UserId, UserName, EmailAddress: the user aggregate.
//! - UserService: implements the driving ports over a `UserRepository`.

pub mod error;
pub mod ports;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::user::{EmailAddress, User, UserDraft, UserId, UserName, UserValidationError};
pub use self::user_service::{EMAIL_CONFLICT_MESSAGE, USER_NOT_FOUND_MESSAGE, UserService};
