use async_trait::async_trait;
use log::debug;

use crate::error::*;

#[async_trait]
pub trait IpSource {
    async fn current_ip(&self) -> Result<String, Error>;
}

/// Plain-text IP endpoint like ipify. The whole response body is the
/// address, returned verbatim.
pub struct IpApi {
    url: String,
}

impl IpApi {
    pub fn new(url: String) -> Self {
        IpApi { url }
    }
}

#[async_trait]
impl IpSource for IpApi {
    async fn current_ip(&self) -> Result<String, Error> {
        debug!("GET {}", self.url);
        let response = reqwest::get(&self.url).await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Http { status, body });
        }
        Ok(body)
    }
}
