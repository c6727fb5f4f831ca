use async_trait::async_trait;
use color_eyre::Result;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::*;
use crate::error::*;

const API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Every Cloudflare payload arrives wrapped in `{"result": ...}`.
#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
}

#[derive(Deserialize, Debug)]
pub struct TokenStatus {
    pub status: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UpdatePayload {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
}

impl UpdatePayload {
    /// Same record, new address. Type, name and ttl are kept as-is.
    pub fn for_record(record: &DnsRecord, ip: String) -> Self {
        UpdatePayload {
            record_type: record.record_type.clone(),
            name: record.name.clone(),
            content: ip,
            ttl: record.ttl,
        }
    }
}

/// The four Cloudflare calls the updater makes, in pipeline order.
#[async_trait]
pub trait DnsProvider {
    async fn verify_token(&self) -> Result<TokenStatus, Error>;
    async fn zones_by_name(&self, domain: &str) -> Result<Vec<Zone>, Error>;
    async fn records_by_name(&self, zone_id: &str, record: &str) -> Result<Vec<DnsRecord>, Error>;
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &UpdatePayload,
    ) -> Result<(), Error>;
}

pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new(params: &Params) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(params.auth_headers()?)
            .build()?;
        Ok(Client { http })
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Http { status, body });
        }
        decode_envelope(&body)
    }

    async fn put<B: Serialize + Sync>(&self, url: &str, body: &B) -> Result<(), Error> {
        debug!("PUT {url}");
        let response = self.http.put(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http { status, body });
        }
        Ok(())
    }
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    Ok(envelope.result)
}

#[async_trait]
impl DnsProvider for Client {
    async fn verify_token(&self) -> Result<TokenStatus, Error> {
        self.fetch(&format!("{API_BASE}/user/tokens/verify")).await
    }

    async fn zones_by_name(&self, domain: &str) -> Result<Vec<Zone>, Error> {
        self.fetch(&format!("{API_BASE}/zones?name={domain}")).await
    }

    async fn records_by_name(&self, zone_id: &str, record: &str) -> Result<Vec<DnsRecord>, Error> {
        self.fetch(&format!("{API_BASE}/zones/{zone_id}/dns_records?name={record}"))
            .await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &UpdatePayload,
    ) -> Result<(), Error> {
        self.put(
            &format!("{API_BASE}/zones/{zone_id}/dns_records/{record_id}"),
            payload,
        )
        .await
    }
}
