//! Multi-currency balances
//!
//! `BalanceRecord` is what the backend stores and may be missing fields;
//! `Balance` is always fully populated.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;

/// Currencies held by a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Dzd,
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    /// Every supported currency, display order
    pub const ALL: [Currency; 4] = [Currency::Dzd, Currency::Eur, Currency::Usd, Currency::Gbp];

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Dzd => "دج",
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
        }
    }

    /// Lowercase code used in storage and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dzd => "dzd",
            Self::Eur => "eur",
            Self::Usd => "usd",
            Self::Gbp => "gbp",
        }
    }

    /// Parse a currency code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dzd" | "da" | "دج" => Some(Self::Dzd),
            "eur" | "€" => Some(Self::Eur),
            "usd" | "$" => Some(Self::Usd),
            "gbp" | "£" => Some(Self::Gbp),
            _ => None,
        }
    }

    /// Format an amount in this currency: dinars take a suffix symbol,
    /// foreign currencies a prefix symbol
    pub fn format(&self, amount: Money) -> String {
        match self {
            Self::Dzd => amount.format_with_suffix(self.symbol()),
            _ => amount.format_with_prefix(self.symbol()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().to_uppercase())
    }
}

/// Balance as persisted by the backend; any field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dzd: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eur: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gbp: Option<Money>,
}

impl BalanceRecord {
    /// Get a currency field as stored
    pub fn get(&self, currency: Currency) -> Option<Money> {
        match currency {
            Currency::Dzd => self.dzd,
            Currency::Eur => self.eur,
            Currency::Usd => self.usd,
            Currency::Gbp => self.gbp,
        }
    }
}

impl From<Balance> for BalanceRecord {
    fn from(balance: Balance) -> Self {
        Self {
            dzd: Some(balance.dzd),
            eur: Some(balance.eur),
            usd: Some(balance.usd),
            gbp: Some(balance.gbp),
        }
    }
}

/// A fully populated balance snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub dzd: Money,
    pub eur: Money,
    pub usd: Money,
    pub gbp: Money,
}

impl Balance {
    /// All-zero balance
    pub const fn zero() -> Self {
        Self {
            dzd: Money::zero(),
            eur: Money::zero(),
            usd: Money::zero(),
            gbp: Money::zero(),
        }
    }

    /// Amount held in a currency
    pub fn get(&self, currency: Currency) -> Money {
        match currency {
            Currency::Dzd => self.dzd,
            Currency::Eur => self.eur,
            Currency::Usd => self.usd,
            Currency::Gbp => self.gbp,
        }
    }

    /// Copy of this balance with one currency replaced
    pub fn with(mut self, currency: Currency, amount: Money) -> Self {
        match currency {
            Currency::Dzd => self.dzd = amount,
            Currency::Eur => self.eur = amount,
            Currency::Usd => self.usd = amount,
            Currency::Gbp => self.gbp = amount,
        }
        self
    }

    /// Copy of this balance with `amount` added to one currency, or `None`
    /// if the total no longer fits
    pub fn credit(self, currency: Currency, amount: Money) -> Option<Self> {
        let total = self.get(currency).checked_add(amount)?;
        Some(self.with(currency, total))
    }

    /// Copy of this balance with `amount` taken from one currency
    pub fn debit(self, currency: Currency, amount: Money) -> Self {
        let current = self.get(currency);
        self.with(currency, current - amount)
    }

    /// Whether every currency is zero
    pub fn is_zero(&self) -> bool {
        Currency::ALL.iter().all(|c| self.get(*c).is_zero())
    }
}
