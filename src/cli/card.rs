//! Card CLI commands

use std::time::{Duration, Instant};

use clap::Subcommand;

use crate::activation::{ActivationOutcome, ActivationState};
use crate::config::Settings;
use crate::display::format_card_details;
use crate::error::{WalletError, WalletResult};
use crate::models::card::physical_card;
use crate::models::Card;
use crate::services::{BalanceService, SubmissionService, SystemNotifier, WalletBackend};
use crate::validation::CVV_LEN;
use crate::wizard::flows::country_name;
use crate::wizard::{field, Flow, Wizard};

use super::{fill_wizard, parse_currency, print_outcome};

/// Card subcommands
#[derive(Subcommand)]
pub enum CardCommands {
    /// Show the wallet card
    Show {
        /// Show the full card number
        #[arg(long)]
        reveal: bool,
    },
    /// Activate the card with the code printed on its back
    Activate {
        /// 3-digit security code
        cvv: String,
    },
    /// Move funds from the wallet onto the card
    Charge {
        /// Amount to move
        amount: String,
        /// Wallet currency to charge from (dzd, eur, usd, gbp)
        #[arg(short, long, default_value = "dzd")]
        currency: String,
    },
    /// Freeze the card
    Freeze,
    /// Unfreeze the card
    Unfreeze,
    /// Order a physical card
    Request {
        /// Delivery country (algeria, tunisia, morocco, egypt, saudi, uae)
        country: String,
        /// Full delivery address
        address: String,
    },
}

/// Handle a card command
pub fn handle_card_command(
    backend: &dyn WalletBackend,
    system: &dyn SystemNotifier,
    settings: &Settings,
    cmd: CardCommands,
) -> WalletResult<()> {
    let submissions = SubmissionService::new(backend, system, settings);

    match cmd {
        CardCommands::Show { reveal } => {
            let card = current_card(backend)?;
            print!(
                "{}",
                format_card_details(&card, settings.limits.card_daily_limit, reveal)
            );
        }

        CardCommands::Activate { cvv } => {
            let card = current_card(backend)?;
            let mut activation = ActivationState::new(
                &settings.activation_code,
                Duration::from_secs(settings.cvv_error_secs),
            );
            activation.set_input(&cvv);
            if !activation.can_activate() {
                return Err(WalletError::Validation(format!(
                    "رمز CVV يجب أن يتكون من {} أرقام",
                    CVV_LEN
                )));
            }

            match activation.try_activate(Instant::now()) {
                ActivationOutcome::Activated => {
                    let outcome = submissions.activate_card(&card)?;
                    print_outcome(&outcome);
                }
                ActivationOutcome::Rejected | ActivationOutcome::Incomplete => {
                    let message = activation.error().unwrap_or_default().to_string();
                    return Err(WalletError::Validation(message));
                }
            }
        }

        CardCommands::Charge { amount, currency } => {
            let currency = parse_currency(&currency)?;
            let card = current_card(backend)?;

            let balance = BalanceService::new(backend).current();
            let mut wizard = Wizard::new(Flow::CardCharge(currency).config(settings, &balance));
            fill_wizard(&mut wizard, &[(field::AMOUNT, amount.as_str())])?;
            let outcome =
                wizard.submit(|intent| submissions.charge_card(&card, intent.amount, currency))?;
            print_outcome(&outcome);
        }

        CardCommands::Freeze => set_frozen(backend, &submissions, true)?,

        CardCommands::Unfreeze => set_frozen(backend, &submissions, false)?,

        CardCommands::Request { country, address } => {
            let cards = backend.cards()?;
            if physical_card(&cards).is_some() {
                return Err(WalletError::Validation("لديك بطاقة بالفعل".into()));
            }

            let balance = BalanceService::new(backend).current();
            let mut wizard = Wizard::new(Flow::CardRequest.config(settings, &balance));
            fill_wizard(
                &mut wizard,
                &[
                    (field::COUNTRY, country.as_str()),
                    (field::ADDRESS, address.as_str()),
                ],
            )?;
            let outcome = wizard.submit_form(|values| {
                let country = values.get(field::COUNTRY).map(String::as_str).unwrap_or("");
                let address = values.get(field::ADDRESS).map(String::as_str).unwrap_or("");
                submissions.request_card(country, address)
            })?;
            if let Some(name) = country_name(&country) {
                println!("Delivery to: {}", name);
            }
            print_outcome(&outcome);
        }
    }

    Ok(())
}

fn set_frozen(
    backend: &dyn WalletBackend,
    submissions: &SubmissionService<'_>,
    frozen: bool,
) -> WalletResult<()> {
    let card = current_card(backend)?;
    if card.is_frozen == frozen {
        println!("Card is already {}", card.status_label());
        return Ok(());
    }
    let outcome = submissions.set_card_frozen(&card, frozen)?;
    print_outcome(&outcome);
    Ok(())
}

/// The card commands act on; a missing card is a not-found error
fn current_card(backend: &dyn WalletBackend) -> WalletResult<Card> {
    let cards = backend.cards()?;
    physical_card(&cards)
        .cloned()
        .ok_or_else(|| WalletError::card_not_found("physical card"))
}
