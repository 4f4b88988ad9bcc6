//! referral reward settlement http surface
pub mod handlers;

use actix_web::{post, web, HttpRequest, Responder};

use crate::referral::handlers::reward_referrals::RewardReferralsRequest;
use crate::utils::respond::gen_extra_respond;
use common::log::generate_trace_id;

/**
* @api {post} /reward-referrals settle referral rewards for one referrer
* @apiVersion 0.0.1
* @apiName RewardReferrals
* @apiGroup Referral
* @apiBody {Number} referrerId   user id of the referrer to settle
* @apiHeader {String} Authorization  service access token
* @apiExample {curl} Example usage:
*   curl -X POST http://127.0.0.1:8069/reward-referrals
*   -d '{ "referrerId": 1 }'
*   -H "Content-Type: application/json" -H 'Authorization:Bearer <service jwt>'
* @apiSuccess {String=0,1,3,5} status_code         status code.
* @apiSuccess {String} msg status message
* @apiSuccess {Object} data                        settlement summary.
* @apiSuccess {Number} data.rewardsGiven       referrals moved to rewarded in this call
* @apiSuccess {Number[]} data.failedReferrals  referral ids skipped on upstream failure
* @apiSampleRequest http://127.0.0.1:8069/reward-referrals
*/
#[tracing::instrument(skip_all,fields(trace_id = generate_trace_id()))]
#[post("/reward-referrals")]
async fn reward_referrals(
    req: HttpRequest,
    request_data: web::Json<RewardReferralsRequest>,
) -> impl Responder {
    gen_extra_respond(handlers::reward_referrals::req(req, request_data.into_inner()).await)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(reward_referrals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::respond::BackendRespond;

    use std::env;

    use actix_web::http::header;
    use actix_web::{test, App};
    use serde_json::json;

    use common::data_structures::deposit::DepositStatus;
    use common::data_structures::referral::ReferralStatus;
    use common::data_structures::wallet_transaction::TxType;
    use common::http::token_auth::create_service_jwt;
    use handlers::reward_referrals::RewardReferralsResponse;
    use models::deposit::DepositEntity;
    use models::general::get_pg_pool_connect;
    use models::referral::{ReferralEntity, ReferralFilter};
    use models::wallet::{WalletEntity, WalletFilter};
    use models::wallet_transaction::{WalletTransactionEntity, WalletTransactionFilter};
    use models::{PgLocalCli, PsqlOp};

    #[actix_web::test]
    async fn test_reward_referrals_requires_service_token() {
        let service =
            test::init_service(App::new().configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/reward-referrals")
            .insert_header(header::ContentType::json())
            .set_payload(json!({ "referrerId": 1 }).to_string())
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/reward-referrals")
            .insert_header(header::ContentType::json())
            .insert_header((header::AUTHORIZATION, "bearer not-a-jwt"))
            .set_payload(json!({ "referrerId": 1 }).to_string())
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    #[ignore = "needs a provisioned test database"]
    async fn test_reward_referrals_braced() {
        env::set_var("CONFIG", "../config_test.toml");
        common::log::init_logger();
        models::general::table_all_clear().await;
        let mut db_cli: PgLocalCli = get_pg_pool_connect().await.unwrap();

        //referrer 1: referred user 2 clears the threshold, user 3 does not
        ReferralEntity::new_with_specified(1, 2)
            .insert(&mut db_cli)
            .await
            .unwrap();
        ReferralEntity::new_with_specified(1, 3)
            .insert(&mut db_cli)
            .await
            .unwrap();
        WalletEntity::new_with_specified(1, 0)
            .insert(&mut db_cli)
            .await
            .unwrap();
        for (user, amount, status) in [
            (2u32, 60_000u64, DepositStatus::Completed),
            (2, 40_000, DepositStatus::Completed),
            (2, 5_000, DepositStatus::Pending),
            (3, 50_000, DepositStatus::Completed),
        ] {
            DepositEntity::new_with_specified(user, amount, status)
                .insert(&mut db_cli)
                .await
                .unwrap();
        }

        let service =
            test::init_service(App::new().configure(configure_routes)).await;
        let token = create_service_jwt("testcase");

        let settle = |payload: String, token: String| {
            test::TestRequest::post()
                .uri("/reward-referrals")
                .insert_header(header::ContentType::json())
                .insert_header((header::AUTHORIZATION, format!("bearer {}", token)))
                .set_payload(payload)
                .to_request()
        };

        let req = settle(json!({ "referrerId": 1 }).to_string(), token.clone());
        let res: BackendRespond<RewardReferralsResponse> =
            test::call_and_read_body_json(&service, req).await;
        assert_eq!(res.status_code, 0);
        assert_eq!(res.data.rewards_given, 1);
        assert!(res.data.failed_referrals.is_empty());

        //referrer wallet credited exactly once with the reward amount
        let wallet = WalletEntity::find_single(WalletFilter::ByUserId(&1), &mut db_cli)
            .await
            .unwrap();
        assert_eq!(wallet.wallet.balance, 1_000);

        //exactly one reward row in the ledger
        let ledger = WalletTransactionEntity::find(
            WalletTransactionFilter::ByUserTxType(&1, TxType::Reward),
            &mut db_cli,
        )
        .await
        .unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].transaction.amount, 1_000);

        //the sub-threshold referral advanced to qualified only
        let below = ReferralEntity::find(ReferralFilter::ByReferrerOutstanding(&1), &mut db_cli)
            .await
            .unwrap();
        assert_eq!(below.len(), 1);
        assert_eq!(below[0].referral.referred_id, 3);
        assert_eq!(below[0].referral.status, ReferralStatus::Qualified);

        //rerun is a no-op for the rewarded row, no double credit
        let req = settle(json!({ "referrerId": 1 }).to_string(), token);
        let res: BackendRespond<RewardReferralsResponse> =
            test::call_and_read_body_json(&service, req).await;
        assert_eq!(res.data.rewards_given, 0);
        let wallet = WalletEntity::find_single(WalletFilter::ByUserId(&1), &mut db_cli)
            .await
            .unwrap();
        assert_eq!(wallet.wallet.balance, 1_000);
    }

    #[actix_web::test]
    #[ignore = "needs a provisioned test database"]
    async fn test_reward_referrals_isolates_failed_grant() {
        env::set_var("CONFIG", "../config_test.toml");
        common::log::init_logger();
        models::general::table_all_clear().await;
        let mut db_cli: PgLocalCli = get_pg_pool_connect().await.unwrap();

        //referrer 5 has no wallet row, so the grant for referred user 6
        //fails mid-transaction; referred user 7 must still be processed
        ReferralEntity::new_with_specified(5, 6)
            .insert(&mut db_cli)
            .await
            .unwrap();
        ReferralEntity::new_with_specified(5, 7)
            .insert(&mut db_cli)
            .await
            .unwrap();
        DepositEntity::new_with_specified(6, 150_000, DepositStatus::Completed)
            .insert(&mut db_cli)
            .await
            .unwrap();
        DepositEntity::new_with_specified(7, 30_000, DepositStatus::Completed)
            .insert(&mut db_cli)
            .await
            .unwrap();

        let service =
            test::init_service(App::new().configure(configure_routes)).await;
        let token = create_service_jwt("testcase");
        let req = test::TestRequest::post()
            .uri("/reward-referrals")
            .insert_header(header::ContentType::json())
            .insert_header((header::AUTHORIZATION, format!("bearer {}", token)))
            .set_payload(json!({ "referrerId": 5 }).to_string())
            .to_request();
        let res: BackendRespond<RewardReferralsResponse> =
            test::call_and_read_body_json(&service, req).await;
        assert_eq!(res.status_code, 0);
        assert_eq!(res.data.rewards_given, 0);

        let outstanding =
            ReferralEntity::find(ReferralFilter::ByReferrerOutstanding(&5), &mut db_cli)
                .await
                .unwrap();
        assert_eq!(outstanding.len(), 2);

        //the failed grant rolled back wholesale: the row never reached
        //rewarded and its id is reported back
        let failed = outstanding
            .iter()
            .find(|entity| entity.referral.referred_id == 6)
            .unwrap();
        assert_eq!(failed.referral.status, ReferralStatus::Pending);
        assert_eq!(res.data.failed_referrals, vec![failed.referral.id]);

        //no ledger row survived the rollback
        let ledger = WalletTransactionEntity::find(
            WalletTransactionFilter::ByUserTxType(&5, TxType::Reward),
            &mut db_cli,
        )
        .await
        .unwrap();
        assert!(ledger.is_empty());

        //the healthy referral in the same invocation still advanced
        let other = outstanding
            .iter()
            .find(|entity| entity.referral.referred_id == 7)
            .unwrap();
        assert_eq!(other.referral.status, ReferralStatus::Qualified);
    }
}
