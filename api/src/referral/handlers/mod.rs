pub mod reward_referrals;
