//! Mirror node access.
//!
//! - [`MirrorTransport`]: raw GET of a path, with 404 reported as `NotFound`
//! - [`HttpTransport`]: the reqwest implementation
//! - [`MirrorNode`]: typed endpoint methods used by the probes
//! - [`models`]: response shapes

mod client;
pub mod models;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::MirrorNode;
pub use transport::{HttpTransport, MirrorSettings, MirrorTransport};
