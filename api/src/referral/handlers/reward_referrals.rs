use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use common::data_structures::referral::{Referral, ReferralStatus};
use common::data_structures::wallet_transaction::{TxStatus, TxType};
use common::error_code::{BackendError, BackendRes};
use common::http::token_auth;
use models::deposit::DepositEntity;
use models::general::get_pg_pool_connect;
use models::referral::{ReferralEntity, ReferralFilter, ReferralUpdater};
use models::wallet::{WalletEntity, WalletFilter, WalletUpdater};
use models::wallet_transaction::WalletTransactionEntity;
use models::{PgLocalCli, PsqlOp};

#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RewardReferralsRequest {
    pub referrer_id: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RewardReferralsResponse {
    pub rewards_given: u32,
    pub failed_referrals: Vec<u32>,
}

//threshold and amount travel as a value so the decision logic never
//reads ambient config
#[derive(Debug, Clone, Copy)]
pub struct RewardRule {
    pub threshold: u64,
    pub amount: u64,
}

impl RewardRule {
    fn from_conf() -> Self {
        Self {
            threshold: common::env::CONF.reward_threshold,
            amount: common::env::CONF.reward_amount,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum SettleAction {
    Grant,
    Qualify,
    Noop,
}

//grant takes precedence: a pending referral whose total already clears
//the threshold jumps straight to rewarded
pub fn evaluate(status: ReferralStatus, deposit_total: u64, rule: &RewardRule) -> SettleAction {
    if deposit_total >= rule.threshold && status != ReferralStatus::Rewarded {
        SettleAction::Grant
    } else if deposit_total > 0 && status == ReferralStatus::Pending {
        SettleAction::Qualify
    } else {
        SettleAction::Noop
    }
}

pub async fn req(
    req: HttpRequest,
    request_data: RewardReferralsRequest,
) -> BackendRes<RewardReferralsResponse> {
    let caller = token_auth::validate_service_credentials(&req)?;
    let RewardReferralsRequest { referrer_id } = request_data;
    debug!("settle referrer {} on behalf of {}", referrer_id, caller);

    let rule = RewardRule::from_conf();
    let mut db_cli = get_pg_pool_connect()
        .await
        .map_err(|err| BackendError::DBError(err.to_string()))?;

    //the list fetch failing is fatal, nothing can be evaluated safely
    let referrals = ReferralEntity::find(
        ReferralFilter::ByReferrerOutstanding(&referrer_id),
        &mut db_cli,
    )
    .await
    .map_err(|err| BackendError::DBError(err.to_string()))?;

    let mut rewards_given = 0u32;
    let mut failed_referrals = vec![];
    for entity in referrals {
        let referral = entity.into_inner();
        match settle_one(&referral, &rule, &mut db_cli).await {
            Ok(true) => rewards_given += 1,
            Ok(false) => {}
            //one bad referral must not block the rest
            Err(err) => {
                error!("settle referral {} failed: {}", referral.id, err);
                failed_referrals.push(referral.id);
            }
        }
    }
    info!(
        "referrer {}: {} rewarded, {} failed",
        referrer_id,
        rewards_given,
        failed_referrals.len()
    );
    Ok(Some(RewardReferralsResponse {
        rewards_given,
        failed_referrals,
    }))
}

//returns whether this call granted the reward
async fn settle_one(
    referral: &Referral,
    rule: &RewardRule,
    db_cli: &mut PgLocalCli<'_>,
) -> anyhow::Result<bool> {
    let total = DepositEntity::sum_completed(referral.referred_id, db_cli).await?;

    match evaluate(referral.status, total, rule) {
        SettleAction::Grant => {
            //status flip, wallet credit and ledger row land or roll back
            //together
            let mut trans = db_cli.begin().await?;
            let updated = ReferralEntity::update(
                ReferralUpdater::Status(ReferralStatus::Rewarded),
                ReferralFilter::ByIdNotRewarded(&referral.id),
                &mut trans,
            )
            .await?;
            if updated != 1 {
                //a concurrent invocation won the race on this row
                trans.rollback().await?;
                warn!("referral {} already rewarded elsewhere", referral.id);
                return Ok(false);
            }
            WalletEntity::update_single(
                WalletUpdater::CreditBalance(rule.amount),
                WalletFilter::ByUserId(&referral.referrer_id),
                &mut trans,
            )
            .await?;
            WalletTransactionEntity::new_with_specified(
                referral.referrer_id,
                TxType::Reward,
                rule.amount,
                TxStatus::Completed,
            )
            .insert(&mut trans)
            .await?;
            trans.commit().await?;
            info!(
                "referral {} rewarded, referrer {} credited {}",
                referral.id, referral.referrer_id, rule.amount
            );
            Ok(true)
        }
        SettleAction::Qualify => {
            //guarded so a stale read can never move the status backward
            let updated = ReferralEntity::update(
                ReferralUpdater::Status(ReferralStatus::Qualified),
                ReferralFilter::ByIdPending(&referral.id),
                db_cli,
            )
            .await?;
            if updated == 0 {
                debug!("referral {} advanced past pending elsewhere", referral.id);
            }
            Ok(false)
        }
        SettleAction::Noop => Ok(false),
    }
}
