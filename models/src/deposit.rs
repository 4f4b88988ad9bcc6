use std::fmt;

use async_trait::async_trait;
use common::data_structures::deposit::{Deposit, DepositStatus};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::{PgLocalCli, PsqlOp};
use anyhow::Result;

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct DepositEntity {
    pub deposit: Deposit,
    pub updated_at: String,
    pub created_at: String,
}

impl DepositEntity {
    pub fn into_inner(self) -> Deposit {
        self.deposit
    }

    pub fn new_with_specified(user_id: u32, amount: u64, status: DepositStatus) -> Self {
        DepositEntity {
            deposit: Deposit {
                user_id,
                amount,
                status,
            },
            updated_at: "".to_string(),
            created_at: "".to_string(),
        }
    }

    //qualifying total for one referred user, empty result counts as zero;
    //sum(bigint) comes back numeric from postgres, hence the cast
    pub async fn sum_completed(user_id: u32, cli: &mut PgLocalCli<'_>) -> Result<u64> {
        let sql = format!(
            "select cast(coalesce(sum(amount),0) as bigint) \
             from deposits where user_id={} and status='completed'",
            user_id
        );
        let execute_res = cli.query(sql.as_str()).await?;
        debug!("sum_completed: raw sql {}", sql);
        let total = execute_res
            .first()
            .map(|row| row.get::<usize, i64>(0))
            .unwrap_or(0);
        Ok(total as u64)
    }
}

//no variants: deposit status is owned by the deposit flow, the
//settlement side only reads
#[derive(Debug)]
pub enum DepositUpdater {}

impl fmt::Display for DepositUpdater {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

#[derive(Clone, Debug)]
pub enum DepositFilter<'b> {
    ByUser(&'b u32),
}

impl fmt::Display for DepositFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            DepositFilter::ByUser(user_id) => format!("user_id={} ", user_id),
        };
        write!(f, "{}", description)
    }
}

#[async_trait]
impl PsqlOp for DepositEntity {
    type UpdaterContent<'a> = DepositUpdater;
    type FilterContent<'b> = DepositFilter<'b>;

    async fn find(
        filter: Self::FilterContent<'_>,
        cli: &mut PgLocalCli<'_>,
    ) -> Result<Vec<DepositEntity>> {
        let sql = format!(
            "select \
            user_id,\
            amount,\
            status,\
         cast(updated_at as text), \
         cast(created_at as text) \
         from deposits where {}",
            filter
        );
        let execute_res = cli.query(sql.as_str()).await?;
        debug!("get_deposit: raw sql {}", sql);
        let gen_view = |row: &Row| -> Result<DepositEntity> {
            Ok(DepositEntity {
                deposit: Deposit {
                    user_id: row.get::<usize, i64>(0) as u32,
                    amount: row.get::<usize, i64>(1) as u64,
                    status: row.get::<usize, String>(2).parse()?,
                },
                updated_at: row.get(3),
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
        let Deposit {
            user_id,
            amount,
            status,
        } = &self.deposit;

        let sql = format!(
            "insert into deposits (\
                user_id,\
                amount,\
                status\
         ) values ({},{},'{}');",
            user_id, amount, status
        );
        debug!("row sql {} rows", sql);
        let _execute_res = cli.execute(sql.as_str()).await?;
        Ok(())
    }
}
