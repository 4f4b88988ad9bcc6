use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

//status only ever moves forward: pending -> qualified -> rewarded,
//variant order matters for the PartialOrd derive
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, EnumString, Display, PartialEq, Eq, PartialOrd,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    Pending,
    Qualified,
    Rewarded,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Referral {
    pub id: u32,
    pub referrer_id: u32,
    pub referred_id: u32,
    pub status: ReferralStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_text_casing() {
        assert_eq!(ReferralStatus::Pending.to_string(), "pending");
        assert_eq!(
            ReferralStatus::from_str("rewarded").unwrap(),
            ReferralStatus::Rewarded
        );
    }

    #[test]
    fn test_status_is_ordered() {
        assert!(ReferralStatus::Pending < ReferralStatus::Qualified);
        assert!(ReferralStatus::Qualified < ReferralStatus::Rewarded);
    }
}
