//! Interactive Session
//!
//! A line-delimited JSON driver that plays the presentation layer: it owns
//! a `FormState`, feeds it user interactions and reports what to render.

pub mod protocol;
pub mod server;

pub use protocol::{FieldView, Request, Response};
pub use server::{run_session, serve, Session};
