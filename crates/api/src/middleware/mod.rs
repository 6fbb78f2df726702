//! Request extractors.
//!
//! - [`session::MaybeUser`] -- Resolves the signed-in user, if any, from the
//!   session cookie or a Bearer token.

pub mod session;
