//! User settings for the wallet
//!
//! Manages flow limits, timing preferences and the recharge account details.
//! Every field has a serde default so older config files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::WalletPaths;
use crate::error::WalletError;
use crate::models::Money;

/// Amount and reference limits enforced by the wizards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletLimits {
    /// Smallest accepted recharge
    pub recharge_minimum: Money,
    /// Smallest accepted withdrawal
    pub withdraw_minimum: Money,
    /// Smallest accepted instant transfer
    pub transfer_minimum: Money,
    /// Minimum length of a BaridiMob transaction number
    pub recharge_reference_min_len: usize,
    /// Minimum length of a withdrawal RIB
    pub withdraw_rib_min_len: usize,
    /// Minimum length of an instant-transfer recipient
    pub recipient_min_len: usize,
    /// Daily card spending limit shown on the card view
    pub card_daily_limit: Money,
    /// Bonus credited as a percentage of the dinar balance
    pub bonus_percent: i64,
}

impl Default for WalletLimits {
    fn default() -> Self {
        Self {
            recharge_minimum: Money::from_units(1000),
            withdraw_minimum: Money::from_units(1000),
            transfer_minimum: Money::from_units(100),
            recharge_reference_min_len: 6,
            withdraw_rib_min_len: 16,
            recipient_min_len: 3,
            card_daily_limit: Money::from_units(50_000),
            bonus_percent: 5,
        }
    }
}

/// Account that recharges are sent to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RechargeAccount {
    /// RIB the user sends BaridiMob payments to
    pub rib: String,
    /// Beneficiary name shown next to the RIB
    pub beneficiary: String,
}

impl Default for RechargeAccount {
    fn default() -> Self {
        Self {
            rib: "0079999900272354667".to_string(),
            beneficiary: "NETLIFY DIGITAL SERVICES".to_string(),
        }
    }
}

/// User settings for the wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub limits: WalletLimits,

    #[serde(default)]
    pub recharge_account: RechargeAccount,

    /// Seconds a wrong-code error stays on the activation dialog
    #[serde(default = "default_cvv_error_secs")]
    pub cvv_error_secs: u64,

    /// Seconds a toast stays on screen
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,

    /// How many recent transactions the dashboard loads
    #[serde(default = "default_recent_limit")]
    pub recent_transactions_limit: usize,

    /// Code printed on the back of issued cards, checked on activation
    #[serde(default = "default_activation_code")]
    pub activation_code: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_cvv_error_secs() -> u64 {
    3
}

fn default_toast_secs() -> u64 {
    3
}

fn default_recent_limit() -> usize {
    5
}

fn default_activation_code() -> String {
    "123".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            limits: WalletLimits::default(),
            recharge_account: RechargeAccount::default(),
            cvv_error_secs: default_cvv_error_secs(),
            toast_secs: default_toast_secs(),
            recent_transactions_limit: default_recent_limit(),
            activation_code: default_activation_code(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &WalletPaths) -> Result<Self, WalletError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| WalletError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                WalletError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WalletPaths) -> Result<(), WalletError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| WalletError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| WalletError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
