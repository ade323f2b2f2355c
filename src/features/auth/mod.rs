//! Bearer token verification.
//!
//! Tokens are minted by the external account service. This module only checks
//! them and turns the `userId` claim into an [`model::AuthenticatedUser`].

mod validator;

pub mod model;

pub use validator::JwtValidator;
