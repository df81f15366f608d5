//! Request core: authenticated JSON transport and error normalization.

mod client;
mod error;

#[cfg(test)]
pub use client::MockSendRequest;
pub use client::{HttpClient, SendRequest};
pub use error::ApiError;
