use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::DataError;

pub fn build_http_client(timeout: Duration) -> Result<Client, DataError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("wc23_tactics/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(DataError::Client)
}
