//! Authentication module for the bookstore server
//!
//! Registration and login, JWT issuance and verification, the server-held
//! session store, and the gate in front of the customer routes.

pub mod handlers;
pub mod middleware;
mod service;
mod session;

pub use middleware::session_gate;
pub use service::{AuthService, Claims, Identity};
pub use session::{SessionCredential, SessionStore};
