//! Concrete wizard configurations for each wallet flow

use crate::config::Settings;
use crate::models::{Balance, Channel, Currency};
use crate::validation::{plain_amount, AmountPolicy, ReferencePolicy, INVALID_AMOUNT};

use super::engine::{FieldRule, FieldSpec, StepSpec, WizardConfig};

/// Field names shared by the flows
pub mod field {
    pub const AMOUNT: &str = "amount";
    pub const REFERENCE: &str = "reference";
    pub const RIB: &str = "rib";
    pub const RECIPIENT: &str = "recipient";
    pub const COUNTRY: &str = "country";
    pub const ADDRESS: &str = "address";
}

/// Countries a physical card can be delivered to: (code, display name)
pub const DELIVERY_COUNTRIES: [(&str, &str); 6] = [
    ("algeria", "الجزائر"),
    ("tunisia", "تونس"),
    ("morocco", "المغرب"),
    ("egypt", "مصر"),
    ("saudi", "السعودية"),
    ("uae", "الإمارات"),
];

/// Which flow a wizard runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Recharge,
    Withdraw,
    InstantTransfer,
    CardCharge(Currency),
    CardRequest,
}

impl Flow {
    /// Build the configuration against the current settings and balance
    pub fn config(self, settings: &Settings, balance: &Balance) -> WizardConfig {
        match self {
            Self::Recharge => recharge(settings),
            Self::Withdraw => withdraw(settings, balance),
            Self::InstantTransfer => instant_transfer(settings, balance),
            Self::CardCharge(currency) => card_charge(balance, currency),
            Self::CardRequest => card_request(),
        }
    }
}

fn amount_field(label: &str, policy: AmountPolicy) -> FieldSpec {
    FieldSpec {
        name: field::AMOUNT,
        label: label.to_string(),
        placeholder: "0".to_string(),
        rule: FieldRule::Amount(policy),
    }
}

/// BaridiMob recharge: amount, payment instructions, transaction number
pub fn recharge(settings: &Settings) -> WizardConfig {
    let limits = &settings.limits;
    let account = &settings.recharge_account;
    let minimum = limits.recharge_minimum;

    WizardConfig {
        title: "شحن المحفظة".to_string(),
        steps: vec![
            StepSpec {
                title: "أدخل المبلغ".to_string(),
                hint: vec![format!("الحد الأدنى للشحن {} دج", plain_amount(minimum))],
                fields: vec![amount_field(
                    "المبلغ (دج)",
                    AmountPolicy::at_least(
                        minimum,
                        format!("الحد الأدنى: {} دج", plain_amount(minimum)),
                    ),
                )],
            },
            StepSpec {
                title: "تعليمات الدفع".to_string(),
                hint: vec![
                    "أرسل المبلغ عبر بريدي موب إلى الحساب التالي:".to_string(),
                    format!("RIB: {}", account.rib),
                    format!("المستفيد: {}", account.beneficiary),
                ],
                fields: vec![],
            },
            StepSpec {
                title: "تأكيد المعاملة".to_string(),
                hint: vec!["أدخل رقم المعاملة الظاهر في إيصال بريدي موب".to_string()],
                fields: vec![FieldSpec {
                    name: field::REFERENCE,
                    label: "رقم المعاملة".to_string(),
                    placeholder: "ABC123".to_string(),
                    rule: FieldRule::Reference(ReferencePolicy {
                        min_len: limits.recharge_reference_min_len,
                        empty_message: "يرجى إدخال رقم المعاملة".to_string(),
                        too_short_message: "رقم المعاملة غير صحيح".to_string(),
                    }),
                }],
            },
        ],
        method: Channel::Baridimob,
        amount_field: Some(field::AMOUNT),
        reference_field: Some(field::REFERENCE),
    }
}

/// Bank withdrawal: amount, then destination RIB
pub fn withdraw(settings: &Settings, balance: &Balance) -> WizardConfig {
    let limits = &settings.limits;
    let minimum = limits.withdraw_minimum;

    WizardConfig {
        title: "سحب الأموال".to_string(),
        steps: vec![
            StepSpec {
                title: "مبلغ السحب".to_string(),
                hint: vec![format!("الرصيد المتاح: {}", Currency::Dzd.format(balance.dzd))],
                fields: vec![amount_field(
                    "المبلغ (دج)",
                    AmountPolicy::at_least(
                        minimum,
                        format!("الحد الأدنى للسحب هو {} دج", plain_amount(minimum)),
                    )
                    .at_most(balance.dzd),
                )],
            },
            StepSpec {
                title: "الحساب البنكي".to_string(),
                hint: vec!["سيتم تحويل المبلغ خلال 24 ساعة".to_string()],
                fields: vec![FieldSpec {
                    name: field::RIB,
                    label: "رقم الحساب البنكي (RIB)".to_string(),
                    placeholder: "00799999...".to_string(),
                    rule: FieldRule::Reference(ReferencePolicy {
                        min_len: limits.withdraw_rib_min_len,
                        empty_message: "يرجى إدخال رقم الحساب البنكي (RIB)".to_string(),
                        too_short_message: "رقم الحساب البنكي غير صحيح".to_string(),
                    }),
                }],
            },
        ],
        method: Channel::Bank,
        amount_field: Some(field::AMOUNT),
        reference_field: Some(field::RIB),
    }
}

/// Wallet-to-wallet transfer: recipient, then amount
pub fn instant_transfer(settings: &Settings, balance: &Balance) -> WizardConfig {
    let limits = &settings.limits;
    let minimum = limits.transfer_minimum;

    WizardConfig {
        title: "تحويل فوري".to_string(),
        steps: vec![
            StepSpec {
                title: "المستلم".to_string(),
                hint: vec!["البريد الإلكتروني أو معرف المحفظة".to_string()],
                fields: vec![FieldSpec {
                    name: field::RECIPIENT,
                    label: "المستلم".to_string(),
                    placeholder: "user@example.com".to_string(),
                    rule: FieldRule::Reference(ReferencePolicy {
                        min_len: limits.recipient_min_len,
                        empty_message: "يرجى إدخال المستلم".to_string(),
                        too_short_message: "معرف المستلم غير صحيح".to_string(),
                    }),
                }],
            },
            StepSpec {
                title: "مبلغ التحويل".to_string(),
                hint: vec![format!("الرصيد المتاح: {}", Currency::Dzd.format(balance.dzd))],
                fields: vec![amount_field(
                    "المبلغ (دج)",
                    AmountPolicy::at_least(
                        minimum,
                        format!("الحد الأدنى للتحويل هو {} دج", plain_amount(minimum)),
                    )
                    .at_most(balance.dzd),
                )],
            },
        ],
        method: Channel::Internal,
        amount_field: Some(field::AMOUNT),
        reference_field: Some(field::RECIPIENT),
    }
}

/// Move funds from one wallet currency onto the card
pub fn card_charge(balance: &Balance, currency: Currency) -> WizardConfig {
    let available = balance.get(currency);

    WizardConfig {
        title: "شحن البطاقة".to_string(),
        steps: vec![StepSpec {
            title: format!("شحن من رصيد {}", currency.code()),
            hint: vec![format!("الرصيد المتاح: {}", currency.format(available))],
            fields: vec![amount_field(
                &format!("المبلغ ({})", currency.symbol()),
                AmountPolicy {
                    minimum: None,
                    maximum: Some(available),
                    below_minimum: INVALID_AMOUNT.to_string(),
                },
            )],
        }],
        method: Channel::Card,
        amount_field: Some(field::AMOUNT),
        reference_field: None,
    }
}

/// Physical card delivery request
pub fn card_request() -> WizardConfig {
    WizardConfig {
        title: "طلب بطاقة".to_string(),
        steps: vec![StepSpec {
            title: "عنوان التوصيل".to_string(),
            hint: vec!["سيتم توصيل البطاقة خلال 20-35 يوم عمل إلى العنوان المحدد".to_string()],
            fields: vec![
                FieldSpec {
                    name: field::COUNTRY,
                    label: "البلد".to_string(),
                    placeholder: "algeria".to_string(),
                    rule: FieldRule::OneOf {
                        options: DELIVERY_COUNTRIES
                            .iter()
                            .map(|(code, _)| code.to_string())
                            .collect(),
                        message: "يرجى اختيار البلد".to_string(),
                    },
                },
                FieldSpec {
                    name: field::ADDRESS,
                    label: "العنوان الكامل".to_string(),
                    placeholder: "أدخل العنوان الكامل للتوصيل...".to_string(),
                    rule: FieldRule::Required {
                        message: "يرجى إدخال العنوان الكامل".to_string(),
                    },
                },
            ],
        }],
        method: Channel::Delivery,
        amount_field: None,
        reference_field: Some(field::ADDRESS),
    }
}

/// Display name for a delivery country code
pub fn country_name(code: &str) -> Option<&'static str> {
    DELIVERY_COUNTRIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code.trim()))
        .map(|(_, name)| *name)
}
