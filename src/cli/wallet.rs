//! Wallet CLI commands
//!
//! Balance, history, and the three money-moving wizards (recharge, withdraw,
//! instant transfer), run non-interactively from command-line arguments.
//! Direct credits, savings and conversions go straight to the service.

use clap::Subcommand;

use crate::config::{Settings, WalletPaths};
use crate::display::{format_balance_summary, format_transaction_history};
use crate::error::WalletResult;
use crate::services::{
    BalanceService, NotificationService, SavingsGoal, SubmissionService, SystemNotifier,
    WalletBackend,
};
use crate::wizard::{field, Flow, Wizard};

use super::{fill_wizard, parse_amount, parse_currency, print_outcome};

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Show the wallet balance in every currency
    Balance,
    /// Show recent transactions
    History {
        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Record a BaridiMob recharge for verification
    Recharge {
        /// Amount in dinars (e.g., "5000")
        amount: String,
        /// Transaction number from the BaridiMob receipt
        reference: String,
    },
    /// Withdraw dinars to a bank account
    Withdraw {
        /// Amount in dinars
        amount: String,
        /// Destination bank account (RIB)
        rib: String,
    },
    /// Send dinars to another wallet instantly
    Transfer {
        /// Recipient email or wallet handle
        recipient: String,
        /// Amount in dinars
        amount: String,
    },
    /// Claim the balance bonus
    Bonus,
    /// Credit dinars to the wallet
    Add {
        /// Amount in dinars
        amount: String,
    },
    /// Move dinars into savings
    Save {
        /// Amount in dinars
        amount: String,
        /// Put the amount into an investment instead
        #[arg(long)]
        invest: bool,
    },
    /// Credit an investment return
    InvestReturn {
        /// Amount in dinars
        amount: String,
    },
    /// Exchange between dinars and euros
    Convert {
        /// Currency to sell (dzd or eur)
        from: String,
        /// Currency to buy (dzd or eur)
        to: String,
        /// Amount sold
        amount: String,
        /// Amount received
        received: String,
    },
    /// Show the notification inbox
    Notifications,
}

/// Handle a wallet command
pub fn handle_wallet_command(
    backend: &dyn WalletBackend,
    system: &dyn SystemNotifier,
    settings: &Settings,
    cmd: WalletCommands,
) -> WalletResult<()> {
    let balances = BalanceService::new(backend);
    let submissions = SubmissionService::new(backend, system, settings);

    match cmd {
        WalletCommands::Balance => {
            print!(
                "{}",
                format_balance_summary(&balances.current(), balances.is_loading())
            );
            let unread = NotificationService::new(backend, system).unread_count();
            if unread > 0 {
                println!("Notifications: {}", unread);
            }
        }

        WalletCommands::History { limit } => {
            let limit = limit.unwrap_or(settings.recent_transactions_limit);
            let transactions = backend.recent_transactions(limit)?;
            print!("{}", format_transaction_history(&transactions));
        }

        WalletCommands::Recharge { amount, reference } => {
            let config = Flow::Recharge.config(settings, &balances.current());
            let mut wizard = Wizard::new(config);
            fill_wizard(
                &mut wizard,
                &[(field::AMOUNT, amount.as_str()), (field::REFERENCE, reference.as_str())],
            )?;
            let outcome = wizard.submit(|intent| submissions.recharge(&intent))?;
            print_outcome(&outcome);
        }

        WalletCommands::Withdraw { amount, rib } => {
            let config = Flow::Withdraw.config(settings, &balances.current());
            let mut wizard = Wizard::new(config);
            fill_wizard(
                &mut wizard,
                &[(field::AMOUNT, amount.as_str()), (field::RIB, rib.as_str())],
            )?;
            let outcome = wizard.submit(|intent| submissions.withdraw(&intent))?;
            print_outcome(&outcome);
        }

        WalletCommands::Transfer { recipient, amount } => {
            let config = Flow::InstantTransfer.config(settings, &balances.current());
            let mut wizard = Wizard::new(config);
            fill_wizard(
                &mut wizard,
                &[(field::RECIPIENT, recipient.as_str()), (field::AMOUNT, amount.as_str())],
            )?;
            let outcome = wizard.submit(|intent| submissions.instant_transfer(&intent))?;
            print_outcome(&outcome);
        }

        WalletCommands::Bonus => {
            let outcome = submissions.claim_bonus()?;
            print_outcome(&outcome);
        }

        WalletCommands::Add { amount } => {
            let outcome = submissions.add_money(parse_amount(&amount)?)?;
            print_outcome(&outcome);
        }

        WalletCommands::Save { amount, invest } => {
            let goal = if invest {
                SavingsGoal::Investment
            } else {
                SavingsGoal::Savings
            };
            let outcome = submissions.savings_deposit(parse_amount(&amount)?, goal)?;
            print_outcome(&outcome);
        }

        WalletCommands::InvestReturn { amount } => {
            let outcome = submissions.investment_return(parse_amount(&amount)?)?;
            print_outcome(&outcome);
        }

        WalletCommands::Convert {
            from,
            to,
            amount,
            received,
        } => {
            let outcome = submissions.convert_currency(
                parse_currency(&from)?,
                parse_currency(&to)?,
                parse_amount(&amount)?,
                parse_amount(&received)?,
            )?;
            print_outcome(&outcome);
        }

        WalletCommands::Notifications => {
            let notifications = backend.notifications()?;
            if notifications.is_empty() {
                println!("لا توجد إشعارات");
            }
            for notification in notifications {
                println!(
                    "[{}] {}",
                    notification.created_at.format("%Y-%m-%d %H:%M"),
                    notification.title
                );
                println!("  {}", notification.message);
            }
        }
    }

    Ok(())
}

/// Print the resolved paths and effective settings
pub fn handle_config_command(paths: &WalletPaths, settings: &Settings) -> WalletResult<()> {
    println!("Dinar Wallet Configuration");
    println!("==========================");
    println!();
    println!("Paths:");
    println!("  Base directory: {}", paths.base_dir().display());
    println!("  Settings file:  {}", paths.settings_file().display());
    println!("  Data directory: {}", paths.data_dir().display());
    println!("  Log file:       {}", paths.log_file().display());
    println!();
    println!("Settings:");
    print!("{}", serde_json::to_string_pretty(settings)?);
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BalanceRecord, Money, TransactionKind, TransactionStatus};
    use crate::services::{MemoryBackend, RecordingNotifier};

    fn funded_backend(dzd: i64) -> MemoryBackend {
        MemoryBackend::with_balance(BalanceRecord {
            dzd: Some(Money::from_units(dzd)),
            ..Default::default()
        })
    }

    #[test]
    fn test_recharge_records_pending_transaction() {
        let backend = funded_backend(0);
        let system = RecordingNotifier::new();
        let settings = Settings::default();

        handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Recharge {
                amount: "5000".into(),
                reference: "AB12345".into(),
            },
        )
        .unwrap();

        let txns = backend.all_transactions();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].kind, TransactionKind::Recharge);
        assert_eq!(txns[0].status, TransactionStatus::Pending);
        assert_eq!(system.sent().len(), 1);
    }

    #[test]
    fn test_recharge_below_minimum_writes_nothing() {
        let backend = funded_backend(0);
        let system = RecordingNotifier::new();
        let settings = Settings::default();

        let err = handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Recharge {
                amount: "500".into(),
                reference: "AB12345".into(),
            },
        )
        .unwrap_err();

        assert!(err.is_validation());
        assert!(backend.all_transactions().is_empty());
        assert!(system.sent().is_empty());
    }

    #[test]
    fn test_transfer_respects_available_balance() {
        let backend = funded_backend(1_000);
        let system = RecordingNotifier::new();
        let settings = Settings::default();

        let err = handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Transfer {
                recipient: "amina@example.com".into(),
                amount: "2000".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());

        handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Transfer {
                recipient: "amina@example.com".into(),
                amount: "400".into(),
            },
        )
        .unwrap();

        let balance = BalanceService::new(&backend).current();
        assert_eq!(balance.dzd, Money::from_units(600));
        let txns = backend.all_transactions();
        assert_eq!(txns[0].kind, TransactionKind::InstantTransferSent);
        assert_eq!(txns[0].recipient.as_deref(), Some("amina@example.com"));
    }

    #[test]
    fn test_withdraw_requires_full_rib() {
        let backend = funded_backend(10_000);
        let system = RecordingNotifier::new();
        let settings = Settings::default();

        let err = handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Withdraw {
                amount: "2000".into(),
                rib: "0079".into(),
            },
        )
        .unwrap_err();

        assert!(err.to_string().contains("رقم الحساب البنكي غير صحيح"));
        assert_eq!(BalanceService::new(&backend).current().dzd, Money::from_units(10_000));
    }

    #[test]
    fn test_add_credits_dinars() {
        let backend = funded_backend(1_000);
        let system = RecordingNotifier::new();
        let settings = Settings::default();

        handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Add {
                amount: "2,500".into(),
            },
        )
        .unwrap();

        assert_eq!(BalanceService::new(&backend).current().dzd, Money::from_units(3_500));
        let txns = backend.all_transactions();
        assert_eq!(txns[0].kind, TransactionKind::Recharge);
        assert_eq!(txns[0].status, TransactionStatus::Completed);

        let err = handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Add {
                amount: "lots".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_save_and_invest_return() {
        let backend = funded_backend(5_000);
        let system = RecordingNotifier::new();
        let settings = Settings::default();

        handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Save {
                amount: "2000".into(),
                invest: true,
            },
        )
        .unwrap();
        handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::InvestReturn {
                amount: "150".into(),
            },
        )
        .unwrap();

        assert_eq!(BalanceService::new(&backend).current().dzd, Money::from_units(3_150));
        let kinds: Vec<_> = backend.all_transactions().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TransactionKind::Investment, TransactionKind::Investment]);

        let err = handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Save {
                amount: "10000".into(),
                invest: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::WalletError::InsufficientFunds { .. }));
    }

    #[test]
    fn test_convert_moves_between_currencies() {
        let backend = funded_backend(30_000);
        let system = RecordingNotifier::new();
        let settings = Settings::default();

        handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Convert {
                from: "dzd".into(),
                to: "eur".into(),
                amount: "15000".into(),
                received: "100".into(),
            },
        )
        .unwrap();

        let balance = BalanceService::new(&backend).current();
        assert_eq!(balance.dzd, Money::from_units(15_000));
        assert_eq!(balance.eur, Money::from_units(100));

        let err = handle_wallet_command(
            &backend,
            &system,
            &settings,
            WalletCommands::Convert {
                from: "dzd".into(),
                to: "yen".into(),
                amount: "1".into(),
                received: "1".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
