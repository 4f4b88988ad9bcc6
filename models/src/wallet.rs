use std::fmt;

use async_trait::async_trait;
use common::data_structures::wallet::Wallet;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::{PgLocalCli, PsqlOp};
use anyhow::Result;

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct WalletEntity {
    pub wallet: Wallet,
    pub updated_at: String,
    pub created_at: String,
}

impl WalletEntity {
    pub fn into_inner(self) -> Wallet {
        self.wallet
    }

    pub fn new_with_specified(user_id: u32, balance: u64) -> Self {
        WalletEntity {
            wallet: Wallet { user_id, balance },
            updated_at: "".to_string(),
            created_at: "".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum WalletUpdater {
    //in-database increment, the balance is shared with deposit and payout
    //flows so a read-modify-write from this process would lose updates
    CreditBalance(u64),
}

impl fmt::Display for WalletUpdater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            WalletUpdater::CreditBalance(amount) => {
                format!("balance=balance+{}", amount)
            }
        };
        write!(f, "{}", description)
    }
}

#[derive(Clone, Debug)]
pub enum WalletFilter<'b> {
    ByUserId(&'b u32),
}

impl fmt::Display for WalletFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            WalletFilter::ByUserId(user_id) => format!("user_id={} ", user_id),
        };
        write!(f, "{}", description)
    }
}

#[async_trait]
impl PsqlOp for WalletEntity {
    type UpdaterContent<'a> = WalletUpdater;
    type FilterContent<'b> = WalletFilter<'b>;

    async fn find(
        filter: Self::FilterContent<'_>,
        cli: &mut PgLocalCli<'_>,
    ) -> Result<Vec<WalletEntity>> {
        let sql = format!(
            "select \
            user_id,\
            balance,\
         cast(updated_at as text), \
         cast(created_at as text) \
         from wallets where {}",
            filter
        );
        let execute_res = cli.query(sql.as_str()).await?;
        debug!("get_wallet: raw sql {}", sql);
        let gen_view = |row: &Row| -> Result<WalletEntity> {
            Ok(WalletEntity {
                wallet: Wallet {
                    user_id: row.get::<usize, i64>(0) as u32,
                    balance: row.get::<usize, i64>(1) as u64,
                },
                updated_at: row.get(2),
                created_at: row.get(3),
            })
        };

        execute_res.iter().map(gen_view).collect()
    }

    async fn update(
        new_value: Self::UpdaterContent<'_>,
        filter: Self::FilterContent<'_>,
        cli: &mut PgLocalCli<'_>,
    ) -> Result<u64> {
        let sql = format!(
            "update wallets set {} ,updated_at=CURRENT_TIMESTAMP where {}",
            new_value, filter
        );
        debug!("start update wallets {} ", sql);
        let execute_res = cli.execute(sql.as_str()).await?;
        debug!("success update wallets {} rows", execute_res);
        Ok(execute_res)
    }

    async fn insert(&self, cli: &mut PgLocalCli<'_>) -> Result<()> {
        let Wallet { user_id, balance } = &self.wallet;

        let sql = format!(
            "insert into wallets (\
                user_id,\
                balance\
         ) values ({},{});",
            user_id, balance
        );
        debug!("row sql {} rows", sql);
        let _execute_res = cli.execute(sql.as_str()).await?;
        Ok(())
    }
}
