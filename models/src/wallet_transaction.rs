use std::fmt;

use async_trait::async_trait;
use common::data_structures::wallet_transaction::{TxStatus, TxType, WalletTransaction};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::{PgLocalCli, PsqlOp};
use anyhow::Result;

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct WalletTransactionEntity {
    pub transaction: WalletTransaction,
    pub created_at: String,
}

impl WalletTransactionEntity {
    pub fn into_inner(self) -> WalletTransaction {
        self.transaction
    }

    pub fn new_with_specified(user_id: u32, tx_type: TxType, amount: u64, status: TxStatus) -> Self {
        WalletTransactionEntity {
            transaction: WalletTransaction {
                user_id,
                tx_type,
                amount,
                status,
            },
            created_at: "".to_string(),
        }
    }
}

//no variants: the ledger is append-only, nothing may build an update
#[derive(Debug)]
pub enum WalletTransactionUpdater {}

impl fmt::Display for WalletTransactionUpdater {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

#[derive(Clone, Debug)]
pub enum WalletTransactionFilter<'b> {
    ByUserTxType(&'b u32, TxType),
}

impl fmt::Display for WalletTransactionFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            WalletTransactionFilter::ByUserTxType(user_id, tx_type) => {
                format!("user_id={} and tx_type='{}' ", user_id, tx_type)
            }
        };
        write!(f, "{}", description)
    }
}

#[async_trait]
impl PsqlOp for WalletTransactionEntity {
    type UpdaterContent<'a> = WalletTransactionUpdater;
    type FilterContent<'b> = WalletTransactionFilter<'b>;

    async fn find(
        filter: Self::FilterContent<'_>,
        cli: &mut PgLocalCli<'_>,
    ) -> Result<Vec<WalletTransactionEntity>> {
        let sql = format!(
            "select \
            user_id,\
            tx_type,\
            amount,\
            status,\
         cast(created_at as text) \
         from wallet_transactions where {}",
            filter
        );
        let execute_res = cli.query(sql.as_str()).await?;
        debug!("get_wallet_transaction: raw sql {}", sql);
        let gen_view = |row: &Row| -> Result<WalletTransactionEntity> {
            Ok(WalletTransactionEntity {
                transaction: WalletTransaction {
                    user_id: row.get::<usize, i64>(0) as u32,
                    tx_type: row.get::<usize, String>(1).parse()?,
                    amount: row.get::<usize, i64>(2) as u64,
                    status: row.get::<usize, String>(3).parse()?,
                },
                created_at: row.get(4),
            })
        };

        execute_res.iter().map(gen_view).collect()
    }

    async fn update(
        new_value: Self::UpdaterContent<'_>,
        _filter: Self::FilterContent<'_>,
        _cli: &mut PgLocalCli<'_>,
    ) -> Result<u64> {
        match new_value {}
    }

    async fn insert(&self, cli: &mut PgLocalCli<'_>) -> Result<()> {
        let WalletTransaction {
            user_id,
            tx_type,
            amount,
            status,
        } = &self.transaction;

        let sql = format!(
            "insert into wallet_transactions (\
                user_id,\
                tx_type,\
                amount,\
                status\
         ) values ({},'{}',{},'{}');",
            user_id, tx_type, amount, status
        );
        debug!("row sql {} rows", sql);
        let _execute_res = cli.execute(sql.as_str()).await?;
        Ok(())
    }
}
