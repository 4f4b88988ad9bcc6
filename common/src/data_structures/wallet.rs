use serde_derive::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Wallet {
    pub user_id: u32,
    pub balance: u64,
}
