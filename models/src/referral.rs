use std::fmt;

use async_trait::async_trait;
use common::data_structures::referral::{Referral, ReferralStatus};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::{PgLocalCli, PsqlOp};
use anyhow::Result;

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct ReferralEntity {
    pub referral: Referral,
    pub updated_at: String,
    pub created_at: String,
}

impl ReferralEntity {
    pub fn into_inner(self) -> Referral {
        self.referral
    }

    pub fn new_with_specified(referrer_id: u32, referred_id: u32) -> Self {
        ReferralEntity {
            referral: Referral {
                id: 0,
                referrer_id,
                referred_id,
                status: ReferralStatus::Pending,
            },
            updated_at: "".to_string(),
            created_at: "".to_string(),
        }
    }

    //distinct referrer ids that still have pending or qualified rows,
    //the scheduler's work list
    pub async fn outstanding_referrers(cli: &mut PgLocalCli<'_>) -> Result<Vec<u32>> {
        let sql = "select distinct referrer_id from referrals \
             where status in ('pending','qualified')";
        let execute_res = cli.query(sql).await?;
        debug!("outstanding_referrers: raw sql {}", sql);
        Ok(execute_res
            .iter()
            .map(|row| row.get::<usize, i64>(0) as u32)
            .collect())
    }
}

#[derive(Debug)]
pub enum ReferralUpdater {
    Status(ReferralStatus),
}

impl fmt::Display for ReferralUpdater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            ReferralUpdater::Status(status) => {
                format!("status='{}'", status)
            }
        };
        write!(f, "{}", description)
    }
}

#[derive(Clone, Debug)]
pub enum ReferralFilter<'b> {
    //pending or qualified rows for one referrer
    ByReferrerOutstanding(&'b u32),
    //guard predicates: rendering the expected current status into the
    //where clause makes the transition a compare-and-swap, the returned
    //row count tells a racer whether it won
    ByIdNotRewarded(&'b u32),
    ByIdPending(&'b u32),
}

impl fmt::Display for ReferralFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            ReferralFilter::ByReferrerOutstanding(referrer_id) => format!(
                "referrer_id={} and status in ('pending','qualified') ",
                referrer_id
            ),
            ReferralFilter::ByIdNotRewarded(id) => {
                format!("id={} and status in ('pending','qualified') ", id)
            }
            ReferralFilter::ByIdPending(id) => {
                format!("id={} and status='pending' ", id)
            }
        };
        write!(f, "{}", description)
    }
}

#[async_trait]
impl PsqlOp for ReferralEntity {
    type UpdaterContent<'a> = ReferralUpdater;
    type FilterContent<'b> = ReferralFilter<'b>;

    async fn find(
        filter: Self::FilterContent<'_>,
        cli: &mut PgLocalCli<'_>,
    ) -> Result<Vec<ReferralEntity>> {
        let sql = format!(
            "select \
            id,\
            referrer_id,\
            referred_id,\
            status,\
         cast(updated_at as text), \
         cast(created_at as text) \
         from referrals where {}",
            filter
        );
        let execute_res = cli.query(sql.as_str()).await?;
        debug!("get_referral: raw sql {}", sql);
        let gen_view = |row: &Row| -> Result<ReferralEntity> {
            Ok(ReferralEntity {
                referral: Referral {
                    id: row.get::<usize, i64>(0) as u32,
                    referrer_id: row.get::<usize, i64>(1) as u32,
                    referred_id: row.get::<usize, i64>(2) as u32,
                    status: row.get::<usize, String>(3).parse()?,
                },
                updated_at: row.get(4),
                created_at: row.get(5),
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
            "update referrals set {} ,updated_at=CURRENT_TIMESTAMP where {}",
            new_value, filter
        );
        debug!("start update referrals {} ", sql);
        let execute_res = cli.execute(sql.as_str()).await?;
        debug!("success update referrals {} rows", execute_res);
        Ok(execute_res)
    }

    async fn insert(&self, cli: &mut PgLocalCli<'_>) -> Result<()> {
        let Referral {
            id: _,
            referrer_id,
            referred_id,
            status,
        } = &self.referral;

        let sql = format!(
            "insert into referrals (\
                referrer_id,\
                referred_id,\
                status\
         ) values ({},{},'{}');",
            referrer_id, referred_id, status
        );
        debug!("row sql {} rows", sql);
        let _execute_res = cli.execute(sql.as_str()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::general::get_pg_pool_connect;
    use common::log::init_logger;
    use std::env;

    #[tokio::test]
    #[ignore = "needs a provisioned test database"]
    async fn test_db_referral_guarded_transition() {
        env::set_var("CONFIG", "../config_test.toml");
        init_logger();
        crate::general::table_all_clear().await;
        let mut db_cli: PgLocalCli = get_pg_pool_connect().await.unwrap();

        let referral = ReferralEntity::new_with_specified(1, 2);
        referral.insert(&mut db_cli).await.unwrap();

        let found =
            ReferralEntity::find(ReferralFilter::ByReferrerOutstanding(&1), &mut db_cli)
                .await
                .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].referral.status, ReferralStatus::Pending);
        let id = found[0].referral.id;

        //pending -> qualified only fires while the row is still pending
        let updated = ReferralEntity::update(
            ReferralUpdater::Status(ReferralStatus::Qualified),
            ReferralFilter::ByIdPending(&id),
            &mut db_cli,
        )
        .await
        .unwrap();
        assert_eq!(updated, 1);
        let updated = ReferralEntity::update(
            ReferralUpdater::Status(ReferralStatus::Qualified),
            ReferralFilter::ByIdPending(&id),
            &mut db_cli,
        )
        .await
        .unwrap();
        assert_eq!(updated, 0);

        //first rewarded transition wins, the rerun loses on the guard
        let updated = ReferralEntity::update(
            ReferralUpdater::Status(ReferralStatus::Rewarded),
            ReferralFilter::ByIdNotRewarded(&id),
            &mut db_cli,
        )
        .await
        .unwrap();
        assert_eq!(updated, 1);
        let updated = ReferralEntity::update(
            ReferralUpdater::Status(ReferralStatus::Rewarded),
            ReferralFilter::ByIdNotRewarded(&id),
            &mut db_cli,
        )
        .await
        .unwrap();
        assert_eq!(updated, 0);

        //rewarded rows drop out of the outstanding scan
        let found =
            ReferralEntity::find(ReferralFilter::ByReferrerOutstanding(&1), &mut db_cli)
                .await
                .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_filter_render() {
        assert_eq!(
            ReferralFilter::ByReferrerOutstanding(&7).to_string(),
            "referrer_id=7 and status in ('pending','qualified') "
        );
        assert_eq!(
            ReferralFilter::ByIdNotRewarded(&3).to_string(),
            "id=3 and status in ('pending','qualified') "
        );
        assert_eq!(
            ReferralUpdater::Status(ReferralStatus::Rewarded).to_string(),
            "status='rewarded'"
        );
    }
}
