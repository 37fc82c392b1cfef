// crates/network/src/lib.rs
//! Blocking HTTP plumbing shared by the store connectors

mod client;
mod error;

pub use client::{Client, ClientConfig};
pub use error::{NetworkError, NetworkResult};
pub use reqwest::Method;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let client = Client::new().expect("Failed to create client");
        let _: ClientConfig = client.config().clone();
        let _: Method = Method::PATCH;
    }
}
