//! Transaction intents produced by completed wizards

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Channel a wizard submits through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Incoming BaridiMob transfer, verified manually
    Baridimob,
    /// Outgoing bank (RIB) withdrawal
    Bank,
    /// Wallet-to-wallet instant transfer
    Internal,
    /// Funds moved onto the wallet card
    Card,
    /// Physical card delivery request
    Delivery,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baridimob => write!(f, "baridimob"),
            Self::Bank => write!(f, "bank"),
            Self::Internal => write!(f, "internal"),
            Self::Card => write!(f, "card"),
            Self::Delivery => write!(f, "delivery"),
        }
    }
}

/// Validated input of a completed wizard, handed to the submission adapter
/// and not retained afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    /// Always positive
    pub amount: Money,
    pub method: Channel,
    /// Transaction number, RIB, recipient handle or address, per channel
    pub reference: String,
}
