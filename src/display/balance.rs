//! Balance and card display formatting

use crate::models::card::{group_card_number, mask_card_number};
use crate::models::{Balance, Card, CardType, Currency, Money};

/// Multi-line balance summary, dinars first
pub fn format_balance_summary(balance: &Balance, loading: bool) -> String {
    if loading {
        return "الرصيد: ...\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("الرصيد الرئيسي: {}\n", Currency::Dzd.format(balance.dzd)));
    for currency in [Currency::Eur, Currency::Usd, Currency::Gbp] {
        output.push_str(&format!(
            "  {:<4} {}\n",
            currency.code(),
            currency.format(balance.get(currency))
        ));
    }
    output
}

/// Card details; the full number is shown only when `reveal` is set
pub fn format_card_details(card: &Card, daily_limit: Money, reveal: bool) -> String {
    let number = if reveal {
        group_card_number(&card.card_number)
    } else {
        mask_card_number(&card.card_number)
    };
    let card_type = match card.card_type {
        CardType::Solid => "بطاقة فعلية",
        CardType::Virtual => "بطاقة افتراضية",
    };

    let mut output = String::new();
    output.push_str(&format!("{}  {}\n", card_type, number));
    output.push_str(&format!("الحالة:       {}\n", card.status_label()));
    output.push_str(&format!("رصيد البطاقة: {}\n", card.currency.format(card.balance)));
    output.push_str(&format!("الحد اليومي:  {}\n", Currency::Dzd.format(daily_limit)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_summary() {
        let balance = Balance::zero()
            .with(Currency::Dzd, Money::from_units(12_500))
            .with(Currency::Eur, Money::from_cents(4_050));
        let summary = format_balance_summary(&balance, false);

        assert!(summary.contains("12,500 دج"));
        assert!(summary.contains("€40.50"));
        assert!(summary.contains("£0"));
    }

    #[test]
    fn test_balance_summary_while_loading() {
        let summary = format_balance_summary(&Balance::zero(), true);
        assert!(summary.contains("..."));
        assert!(!summary.contains("دج"));
    }

    #[test]
    fn test_card_details_masked_by_default() {
        let mut card = Card::new_solid();
        card.card_number = "4123456789012345".into();

        let masked = format_card_details(&card, Money::from_units(50_000), false);
        assert!(masked.contains("**** **** **** 2345"));
        assert!(masked.contains("غير مفعلة"));
        assert!(masked.contains("50,000 دج"));

        let revealed = format_card_details(&card, Money::from_units(50_000), true);
        assert!(revealed.contains("4123 4567 8901 2345"));
    }
}
