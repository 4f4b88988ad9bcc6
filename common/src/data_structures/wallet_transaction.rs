use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, EnumString, Display, PartialEq)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Deposit,
    Payout,
    Reward,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, EnumString, Display, PartialEq)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Completed,
    Failed,
}

//ledger rows are append-only, nothing updates or deletes them
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WalletTransaction {
    pub user_id: u32,
    pub tx_type: TxType,
    pub amount: u64,
    pub status: TxStatus,
}
