pub mod client;
pub mod errors;

pub use client::GitHubClient;
pub use errors::GitHubError;
