//! HTTP session layer for the todo service.
//!
//! This library resolves bearer tokens into a request [`ctx::Ctx`], guards
//! protected routes, and exposes the sign-up and sign-in flows that mint
//! tokens.

pub mod account;
pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod prelude;
pub mod routes;
pub mod state;
pub mod store;
