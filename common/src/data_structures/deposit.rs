use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, EnumString, Display, PartialEq)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Pending,
    Completed,
    Failed,
}

//amount is minor units, no floats anywhere on the money path
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Deposit {
    pub user_id: u32,
    pub amount: u64,
    pub status: DepositStatus,
}
