//! recurring trigger for referral reward settlement: sweep the distinct
//! referrers with outstanding referrals and post one settlement request per
//! referrer to the api service
use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use tracing::{error, info};

use common::http::token_auth::create_service_jwt;
use models::general::get_pg_pool_connect;
use models::referral::ReferralEntity;

#[tokio::main]
async fn main() {
    common::log::init_logger();
    let url = format!(
        "{}/reward-referrals",
        common::env::CONF.settle_api_base_uri
    );
    let interval = Duration::from_secs(common::env::CONF.settle_interval_secs);
    let http_cli = reqwest::Client::new();

    loop {
        if let Err(err) = settle_sweep(&http_cli, &url).await {
            //a failed sweep is retried wholesale on the next tick, the
            //settlement job tolerates duplicate invocations
            error!("settlement sweep failed: {}", err);
        }
        tokio::time::sleep(interval).await;
    }
}

async fn settle_sweep(http_cli: &reqwest::Client, url: &str) -> Result<()> {
    let mut db_cli = get_pg_pool_connect().await?;
    let referrers = ReferralEntity::outstanding_referrers(&mut db_cli).await?;
    info!("settlement sweep over {} referrers", referrers.len());

    let token = create_service_jwt("scheduler");
    for referrer_id in referrers {
        let send_res = http_cli
            .post(url)
            .bearer_auth(&token)
            .json(&json!({ "referrerId": referrer_id }))
            .send()
            .await;
        match send_res {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                info!("referrer {}: {} {}", referrer_id, status, body);
            }
            Err(err) => {
                error!("referrer {}: settle request failed {}", referrer_id, err);
            }
        }
    }
    Ok(())
}
