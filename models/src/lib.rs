//! encapsulation of some postgresql interface for easy call
pub mod deposit;
pub mod general;
pub mod referral;
pub mod wallet;
pub mod wallet_transaction;

#[macro_use]
extern crate tracing;
#[macro_use]
extern crate lazy_static;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;
use deadpool::managed::Object;
use deadpool_postgres::Manager;
use deadpool_postgres::Pool;
use deadpool_postgres::Transaction;
use deadpool_postgres::{Config, ManagerConfig, RecyclingMethod};
use std::fmt::Display;
use tokio_postgres::NoTls;
use tokio_postgres::Row;

type LocalConn = Object<Manager>;

lazy_static! {
    static ref PG_POOL: Pool = connect_pool().unwrap();
}

pub enum PgLocalCli<'a> {
    Conn(LocalConn),
    Trans(Transaction<'a>),
}

impl PgLocalCli<'_> {
    pub async fn execute(&mut self, sql: &str) -> Result<u64> {
        let line = match self {
            PgLocalCli::Conn(c) => c.execute(sql, &[]).await?,
            PgLocalCli::Trans(t) => t.execute(sql, &[]).await?,
        };
        Ok(line)
    }
    pub async fn query(&mut self, sql: &str) -> Result<Vec<Row>> {
        let row = match self {
            PgLocalCli::Conn(c) => c.query(sql, &[]).await?,
            PgLocalCli::Trans(t) => t.query(sql, &[]).await?,
        };
        Ok(row)
    }
    pub async fn commit(self) -> Result<()> {
        match self {
            PgLocalCli::Conn(_c) => {
                panic!("it's not a trans")
            }
            PgLocalCli::Trans(t) => Ok(t.commit().await?),
        }
    }
    pub async fn rollback(self) -> Result<()> {
        match self {
            PgLocalCli::Conn(_c) => {
                panic!("it's not a trans")
            }
            PgLocalCli::Trans(t) => Ok(t.rollback().await?),
        }
    }

    pub async fn begin(&mut self) -> Result<PgLocalCli<'_>> {
        match self {
            PgLocalCli::Conn(c) => {
                let trans = c.transaction().await?;
                Ok(PgLocalCli::Trans(trans))
            }
            PgLocalCli::Trans(_t) => {
                panic!("It is already a trans")
            }
        }
    }
}

impl<'a> From<LocalConn> for PgLocalCli<'a> {
    fn from(value: LocalConn) -> Self {
        Self::Conn(value)
    }
}

impl<'a> From<Transaction<'a>> for PgLocalCli<'a> {
    fn from(value: Transaction<'a>) -> Self {
        Self::Trans(value)
    }
}

fn connect_pool() -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.dbname = Some(common::env::CONF.database.dbname.clone());
    cfg.user = Some(common::env::CONF.database.user.clone());
    cfg.password = Some(common::env::CONF.database.password.clone());
    cfg.host = Some(common::env::CONF.database.host.clone());
    cfg.port = Some(common::env::CONF.database.port as u16);

    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    let pool = cfg
        .create_pool(None, NoTls)
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(pool)
}

#[async_trait]
pub trait PsqlOp {
    type UpdaterContent<'a>: Display + Send;
    type FilterContent<'b>: Display + Send;

    async fn find(filter: Self::FilterContent<'_>, cli: &mut PgLocalCli<'_>) -> Result<Vec<Self>>
    where
        Self: Sized + Send;
    async fn find_single(filter: Self::FilterContent<'_>, cli: &mut PgLocalCli<'_>) -> Result<Self>
    where
        Self: Sized + Send,
    {
        let mut get_res: Vec<Self> = Self::find(filter, cli).await?;
        let data_len = get_res.len();
        if data_len == 0 {
            let error_info = "DBError::DataNotFound: data isn't existed";
            error!("{}", error_info);
            Err(anyhow!(error_info.to_string()))
        } else if data_len > 1 {
            let error_info = "DBError::RepeatedData: data is repeated";
            error!("{}", error_info);
            Err(anyhow!(error_info.to_string()))
        } else {
            Ok(get_res.pop().unwrap())
        }
    }

    async fn update(
        new_value: Self::UpdaterContent<'_>,
        filter: Self::FilterContent<'_>,
        cli: &mut PgLocalCli<'_>,
    ) -> Result<u64>;

    async fn update_single(
        new_value: Self::UpdaterContent<'_>,
        filter: Self::FilterContent<'_>,
        cli: &mut PgLocalCli<'_>,
    ) -> Result<()>
    where
        Self: Sized + Send,
    {
        let row_num = Self::update(new_value, filter, cli).await?;
        if row_num == 0 {
            let error_info = "DBError::DataNotFound: data isn't existed";
            error!("{}", error_info);
            Err(anyhow!(error_info.to_string()))
        } else if row_num > 1 {
            let error_info = "DBError::RepeatedData: data is repeated";
            error!("{}", error_info);
            Err(anyhow!(error_info.to_string()))
        } else {
            Ok(())
        }
    }

    async fn insert(&self, cli: &mut PgLocalCli<'_>) -> Result<()>;
}
