//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the wizard engine and the service layer.

pub mod card;
pub mod wallet;

pub use card::{handle_card_command, CardCommands};
pub use wallet::{handle_config_command, handle_wallet_command, WalletCommands};

use crate::error::{WalletError, WalletResult};
use crate::models::{Currency, Money};
use crate::services::SubmissionOutcome;
use crate::validation::INVALID_AMOUNT;
use crate::wizard::Wizard;

/// Walk a wizard to its final step with values supplied up front
///
/// Each step takes whichever of `values` it names, then must validate
/// before the next one is shown. Hints of steps without fields are printed
/// since they carry instructions the user needs.
pub(crate) fn fill_wizard(wizard: &mut Wizard, values: &[(&str, &str)]) -> WalletResult<()> {
    loop {
        let Some(spec) = wizard.current_spec().cloned() else {
            return Err(WalletError::InvalidStep(format!(
                "step {} does not exist",
                wizard.current_step()
            )));
        };

        if spec.fields.is_empty() {
            println!("{}", spec.title);
            for line in &spec.hint {
                println!("  {}", line);
            }
        }

        for field in &spec.fields {
            if let Some((_, value)) = values.iter().find(|(name, _)| *name == field.name) {
                wizard.update_field(field.name, *value);
            }
        }

        if wizard.is_final_step() {
            return Ok(());
        }
        if !wizard.go_to_next_step() {
            let message = wizard.step_error().unwrap_or("Invalid input").to_string();
            return Err(WalletError::Validation(message));
        }
    }
}

/// Parse an amount argument for actions that skip the wizards
pub(crate) fn parse_amount(input: &str) -> WalletResult<Money> {
    Money::parse(input).map_err(|_| WalletError::Validation(INVALID_AMOUNT.into()))
}

/// Parse a currency argument
pub(crate) fn parse_currency(input: &str) -> WalletResult<Currency> {
    Currency::parse(input).ok_or_else(|| {
        WalletError::Validation(format!(
            "Invalid currency: '{}'. Valid currencies: dzd, eur, usd, gbp",
            input
        ))
    })
}

/// Print the notification and any warnings of a submitted action
pub(crate) fn print_outcome(outcome: &SubmissionOutcome) {
    if let Some(notification) = &outcome.notification {
        println!("{}", notification.title);
        println!("  {}", notification.message);
    }
    if let Some(txn) = &outcome.transaction {
        println!("  Transaction: {} ({})", txn.id, txn.status);
    }
    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::Balance;
    use crate::wizard::{field, Flow};

    #[test]
    fn test_fill_wizard_reaches_final_step() {
        let settings = Settings::default();
        let mut wizard = Wizard::new(Flow::Recharge.config(&settings, &Balance::zero()));

        fill_wizard(&mut wizard, &[(field::AMOUNT, "5000"), (field::REFERENCE, "AB12345")])
            .unwrap();

        assert!(wizard.is_final_step());
        assert!(wizard.can_submit());
    }

    #[test]
    fn test_fill_wizard_stops_on_first_invalid_step() {
        let settings = Settings::default();
        let mut wizard = Wizard::new(Flow::Recharge.config(&settings, &Balance::zero()));

        let err = fill_wizard(&mut wizard, &[(field::AMOUNT, "500"), (field::REFERENCE, "AB12345")])
            .unwrap_err();

        assert!(err.to_string().contains("الحد الأدنى: 1000 دج"));
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(parse_amount("2,500").unwrap(), Money::from_units(2500));
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert_eq!(parse_currency("EUR").unwrap(), Currency::Eur);
        assert!(parse_currency("btc").unwrap_err().is_validation());
    }
}
