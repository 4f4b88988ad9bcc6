pub mod deposit;
pub mod referral;
pub mod wallet;
pub mod wallet_transaction;
