//! # API Module
//!
//! HTTP handlers for the short-lived loopback listener that receives the
//! OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - Answers the browser redirect coming back from Spotify's
//!   authorization page. A request carrying a `code` query parameter yields
//!   `200 OK`; anything else (an `error` parameter, no parameters at all, a
//!   malformed query) yields `400 Bad Request`. Either way the outcome is
//!   handed to the waiting authorization flow through a one-shot channel.
//!
//! The handler is mounted as the router fallback, so the redirect is accepted
//! on whatever path the registered redirect URI uses.
//!
//! ## Related Modules
//!
//! - [`crate::server`] - Runs the listener for exactly one request
//! - [`crate::spotify::auth`] - Drives the PKCE flow around it

mod callback;

pub use callback::{CallbackSender, callback};
