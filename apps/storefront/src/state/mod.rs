//! # State Types
//!
//! Shared state handles for the storefront shell. The catalog itself needs
//! no wrapper: it is immutable after load and travels as `Arc<Catalog>`.

mod session;

pub use session::SessionHandle;
