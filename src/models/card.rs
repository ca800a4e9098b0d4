//! Payment card model and card-number helpers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::balance::Currency;
use super::ids::CardId;
use super::money::Money;

/// Physical or virtual card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    #[default]
    Solid,
    Virtual,
}

/// A wallet card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub card_number: String,
    #[serde(default)]
    pub card_type: CardType,
    #[serde(default)]
    pub is_frozen: bool,
    #[serde(default)]
    pub is_activated: bool,
    /// Funds loaded onto the card
    #[serde(default)]
    pub balance: Money,
    #[serde(default)]
    pub currency: Currency,
}

impl Card {
    /// A new, inactive physical card with a generated number
    pub fn new_solid() -> Self {
        Self {
            id: CardId::new(),
            card_number: generate_card_number(),
            card_type: CardType::Solid,
            is_frozen: false,
            is_activated: false,
            balance: Money::zero(),
            currency: Currency::Dzd,
        }
    }

    /// Status label shown on the card view
    pub fn status_label(&self) -> &'static str {
        if self.is_frozen {
            "مجمدة"
        } else if self.is_activated {
            "نشطة"
        } else {
            "غير مفعلة"
        }
    }
}

/// Pick the card the dashboard shows: first physical card, else the first card
pub fn physical_card(cards: &[Card]) -> Option<&Card> {
    cards
        .iter()
        .find(|c| c.card_type == CardType::Solid)
        .or_else(|| cards.first())
}

/// Generate a 16-digit Visa-style number from a random UUID
pub fn generate_card_number() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    let mut number = String::from("4");
    for byte in bytes.iter().take(15) {
        number.push(char::from(b'0' + byte % 10));
    }
    number
}

/// Mask all but the last four digits: `**** **** **** 1234`
pub fn mask_card_number(number: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return "**** **** **** ****".to_string();
    }
    format!("**** **** **** {}", &digits[digits.len() - 4..])
}

/// Group a card number into blocks of four
pub fn group_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
