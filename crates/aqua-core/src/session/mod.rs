//! Session domain module.
//!
//! - `store`: Durable slot holding the current session identifier

mod store;

pub use store::SessionStore;
