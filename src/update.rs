use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;

use crate::client::*;
use crate::config::*;
use crate::error::*;
use crate::ip::*;

/// Walks the whole pipeline: verify credentials, resolve the zone and
/// record ids, discover the current IP, write the record. Every step needs
/// the previous one's result, so the order is fixed and any failure aborts
/// the run.
pub async fn run<P, S>(provider: &P, ip_source: &S, params: &Params) -> Result<()>
where
    P: DnsProvider + Sync,
    S: IpSource + Sync,
{
    let token = provider
        .verify_token()
        .await
        .wrap_err("credential validation failed")?;
    info!("API key validated, token status: {}", token.status);

    let zones = provider
        .zones_by_name(&params.domain)
        .await
        .wrap_err("zone lookup failed")?;
    let zone = zones
        .into_iter()
        .next()
        .ok_or_else(|| Error::ZoneNotFound(params.domain.clone()))?;
    info!("zone {}: id {}", zone.name, zone.id);

    let records = provider
        .records_by_name(&zone.id, &params.record)
        .await
        .wrap_err("record lookup failed")?;
    let record = records
        .into_iter()
        .next()
        .ok_or_else(|| Error::RecordNotFound(params.record.clone()))?;
    info!(
        "record {}: id {}, currently {}",
        record.name, record.id, record.content
    );

    let ip = ip_source
        .current_ip()
        .await
        .wrap_err("IP discovery failed")?;
    info!("current IP: {ip}");

    // The record is written on every run, even when the IP hasn't changed.
    let payload = UpdatePayload::for_record(&record, ip);
    provider
        .update_record(&zone.id, &record.id, &payload)
        .await
        .wrap_err("update failed")?;
    info!("{} now points at {}", record.name, payload.content);

    Ok(())
}
