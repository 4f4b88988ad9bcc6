use anyhow::{anyhow, Result};

use crate::PgLocalCli;

pub async fn get_pg_pool_connect() -> Result<PgLocalCli<'static>> {
    let conn = crate::PG_POOL
        .get()
        .await
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(conn.into())
}

pub async fn table_clear(table_name: &str) -> Result<()> {
    let sql = format!("truncate table {} restart identity", table_name);
    let mut cli = get_pg_pool_connect().await?;
    cli.execute(sql.as_str()).await?;
    Ok(())
}

//test helper, wipes every table the settlement job touches
pub async fn table_all_clear() {
    table_clear("referrals").await.unwrap();
    table_clear("deposits").await.unwrap();
    table_clear("wallets").await.unwrap();
    table_clear("wallet_transactions").await.unwrap();
}
