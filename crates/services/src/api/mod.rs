mod client;
mod endpoint;
mod fetch;
mod resources;

pub use client::{AUTH_HEADER, ApiClient};
pub use endpoint::Endpoint;
pub use fetch::{fetch_all, fetch_pair};
