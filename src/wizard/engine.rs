//! Step wizard state machine
//!
//! A [`Wizard`] walks an ordered list of [`StepSpec`]s. Forward navigation is
//! gated on the current step validating; backward navigation never is. The
//! final step submits a [`TransactionIntent`] built from the collected fields.

use std::collections::BTreeMap;

use crate::error::{WalletError, WalletResult};
use crate::models::{Channel, TransactionIntent};
use crate::validation::{
    parse_amount, validate_amount, validate_choice, validate_reference, validate_required,
    AmountPolicy, ReferencePolicy, ValidationResult,
};

/// Field values keyed by field name
pub type FieldValues = BTreeMap<String, String>;

/// How a field is validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    Amount(AmountPolicy),
    Reference(ReferencePolicy),
    Required { message: String },
    OneOf { options: Vec<String>, message: String },
}

impl FieldRule {
    pub fn validate(&self, value: &str) -> ValidationResult {
        match self {
            Self::Amount(policy) => validate_amount(value, policy),
            Self::Reference(policy) => validate_reference(value, policy),
            Self::Required { message } => validate_required(value, message),
            Self::OneOf { options, message } => validate_choice(value, options, message),
        }
    }
}

/// One input on a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: String,
    pub placeholder: String,
    pub rule: FieldRule,
}

/// One page of a wizard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepSpec {
    pub title: String,
    /// Instruction lines shown under the title
    pub hint: Vec<String>,
    /// Steps without fields always validate
    pub fields: Vec<FieldSpec>,
}

/// Everything that distinguishes one flow from another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    pub title: String,
    pub steps: Vec<StepSpec>,
    pub method: Channel,
    /// Field holding the intent amount; `None` for forms that move no money
    pub amount_field: Option<&'static str>,
    /// Field copied into the intent reference
    pub reference_field: Option<&'static str>,
}

impl WizardConfig {
    pub fn total_steps(&self) -> usize {
        self.steps.len().max(1)
    }

    fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }
}

/// Mutable progress through a wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    /// 1-based
    pub current_step: usize,
    pub fields: FieldValues,
    pub errors: FieldValues,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: 1,
            fields: FieldValues::new(),
            errors: FieldValues::new(),
        }
    }
}

/// A configured wizard and its state
#[derive(Debug, Clone)]
pub struct Wizard {
    config: WizardConfig,
    state: WizardState,
}

impl Wizard {
    /// Start at step 1 with every field empty
    pub fn new(config: WizardConfig) -> Self {
        Self {
            config,
            state: WizardState::default(),
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.config.total_steps()
    }

    pub fn is_final_step(&self) -> bool {
        self.state.current_step == self.total_steps()
    }

    /// Spec of the step currently shown
    pub fn current_spec(&self) -> Option<&StepSpec> {
        self.config.steps.get(self.state.current_step - 1)
    }

    /// Current value of a field, empty if never set
    pub fn field(&self, name: &str) -> &str {
        self.state.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Current error on a field, if any
    pub fn error(&self, name: &str) -> Option<&str> {
        self.state.errors.get(name).map(String::as_str)
    }

    /// First error on the current step, in field order
    pub fn step_error(&self) -> Option<&str> {
        self.current_spec()?
            .fields
            .iter()
            .find_map(|f| self.error(f.name))
    }

    /// Set a field value and clear that field's error
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) {
        self.state.fields.insert(name.to_string(), value.into());
        self.state.errors.remove(name);
    }

    /// Validate the current step and advance if it passes
    pub fn go_to_next_step(&mut self) -> bool {
        let step = self.state.current_step;
        if !self.validate_step(step) {
            return false;
        }
        if step < self.total_steps() {
            self.state.current_step = step + 1;
        }
        true
    }

    /// Go back one step without touching errors
    pub fn go_to_previous_step(&mut self) {
        if self.state.current_step > 1 {
            self.state.current_step -= 1;
        }
    }

    /// Back to step 1 with all fields and errors cleared
    pub fn reset(&mut self) {
        self.state = WizardState::default();
    }

    /// Whether the final action would pass validation right now
    pub fn can_submit(&self) -> bool {
        self.is_final_step()
            && self.config.fields().all(|f| {
                !self.state.errors.contains_key(f.name)
                    && f.rule.validate(self.field(f.name)).is_valid
            })
    }

    /// Re-validate every step, build the intent and hand it to `callback`
    ///
    /// The wizard resets only when the callback succeeds. On failure the step
    /// and field values are kept so the action can be retried.
    pub fn submit<T, F>(&mut self, callback: F) -> WalletResult<T>
    where
        F: FnOnce(TransactionIntent) -> WalletResult<T>,
    {
        self.finish(|wizard| {
            let intent = wizard.build_intent()?;
            callback(intent)
        })
    }

    /// Like [`Wizard::submit`] for forms that carry no amount
    pub fn submit_form<T, F>(&mut self, callback: F) -> WalletResult<T>
    where
        F: FnOnce(&FieldValues) -> WalletResult<T>,
    {
        self.finish(|wizard| callback(&wizard.state.fields))
    }

    fn finish<T, F>(&mut self, run: F) -> WalletResult<T>
    where
        F: FnOnce(&Self) -> WalletResult<T>,
    {
        if !self.is_final_step() {
            return Err(WalletError::InvalidStep(format!(
                "submit called on step {} of {}",
                self.state.current_step,
                self.total_steps()
            )));
        }

        let mut first_error = None;
        for step in 1..=self.total_steps() {
            if !self.validate_step(step) && first_error.is_none() {
                first_error = self.first_error_on(step);
            }
        }
        if let Some(message) = first_error {
            return Err(WalletError::Validation(message));
        }

        let value = run(self)?;
        self.reset();
        Ok(value)
    }

    fn build_intent(&self) -> WalletResult<TransactionIntent> {
        let amount_field = self.config.amount_field.ok_or_else(|| {
            WalletError::Validation(format!("{} has no amount field", self.config.title))
        })?;

        let amount = parse_amount(self.field(amount_field)).ok_or_else(|| {
            WalletError::Validation(format!("{} is not a positive amount", amount_field))
        })?;

        let reference = self
            .config
            .reference_field
            .map(|name| self.field(name).trim().to_string())
            .unwrap_or_default();

        Ok(TransactionIntent {
            amount,
            method: self.config.method,
            reference,
        })
    }

    /// Validate every field of a step, recording errors; true if all pass
    fn validate_step(&mut self, step: usize) -> bool {
        let Some(spec) = self.config.steps.get(step - 1) else {
            return true;
        };

        let mut valid = true;
        for field in &spec.fields {
            let value = self
                .state
                .fields
                .get(field.name)
                .map(String::as_str)
                .unwrap_or("");
            let result = field.rule.validate(value);
            if result.is_valid {
                self.state.errors.remove(field.name);
            } else {
                self.state.errors.insert(field.name.to_string(), result.message);
                valid = false;
            }
        }
        valid
    }

    fn first_error_on(&self, step: usize) -> Option<String> {
        self.config
            .steps
            .get(step - 1)?
            .fields
            .iter()
            .find_map(|f| self.state.errors.get(f.name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use std::cell::Cell;

    fn two_step_config() -> WizardConfig {
        WizardConfig {
            title: "test".into(),
            steps: vec![
                StepSpec {
                    title: "amount".into(),
                    hint: vec![],
                    fields: vec![FieldSpec {
                        name: "amount",
                        label: "amount".into(),
                        placeholder: String::new(),
                        rule: FieldRule::Amount(AmountPolicy::at_least(
                            Money::from_units(1000),
                            "too small",
                        )),
                    }],
                },
                StepSpec {
                    title: "reference".into(),
                    hint: vec![],
                    fields: vec![FieldSpec {
                        name: "reference",
                        label: "reference".into(),
                        placeholder: String::new(),
                        rule: FieldRule::Reference(ReferencePolicy {
                            min_len: 6,
                            empty_message: "empty".into(),
                            too_short_message: "short".into(),
                        }),
                    }],
                },
            ],
            method: Channel::Bank,
            amount_field: Some("amount"),
            reference_field: Some("reference"),
        }
    }

    #[test]
    fn test_starts_at_step_one() {
        let wizard = Wizard::new(two_step_config());
        assert_eq!(wizard.current_step(), 1);
        assert!(wizard.state().fields.is_empty());
        assert!(!wizard.is_final_step());
    }

    #[test]
    fn test_invalid_step_blocks_navigation() {
        let mut wizard = Wizard::new(two_step_config());
        wizard.update_field("amount", "10");

        assert!(!wizard.go_to_next_step());
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.error("amount"), Some("too small"));
        assert_eq!(wizard.step_error(), Some("too small"));
    }

    #[test]
    fn test_editing_clears_field_error() {
        let mut wizard = Wizard::new(two_step_config());
        assert!(!wizard.go_to_next_step());
        assert!(wizard.error("amount").is_some());

        wizard.update_field("amount", "1");
        assert!(wizard.error("amount").is_none());
    }

    #[test]
    fn test_back_is_unconditional_and_keeps_errors() {
        let mut wizard = Wizard::new(two_step_config());
        wizard.update_field("amount", "2000");
        assert!(wizard.go_to_next_step());
        assert!(!wizard.go_to_next_step());
        assert_eq!(wizard.error("reference"), Some("empty"));

        wizard.go_to_previous_step();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.error("reference"), Some("empty"));

        wizard.go_to_previous_step();
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn test_next_is_capped_at_final_step() {
        let mut wizard = Wizard::new(two_step_config());
        wizard.update_field("amount", "2000");
        wizard.update_field("reference", "ABCDEF");
        assert!(wizard.go_to_next_step());
        assert!(wizard.go_to_next_step());
        assert_eq!(wizard.current_step(), 2);
    }

    #[test]
    fn test_submit_before_final_step_is_rejected() {
        let mut wizard = Wizard::new(two_step_config());
        wizard.update_field("amount", "2000");

        let err = wizard.submit(|_| Ok(())).unwrap_err();
        assert!(matches!(err, WalletError::InvalidStep(_)));
    }

    #[test]
    fn test_submit_revalidates_earlier_steps() {
        let mut wizard = Wizard::new(two_step_config());
        wizard.update_field("amount", "2000");
        assert!(wizard.go_to_next_step());
        wizard.update_field("amount", "5");
        wizard.update_field("reference", "ABCDEF");

        assert!(!wizard.can_submit());
        let calls = Cell::new(0);
        let err = wizard
            .submit(|_| {
                calls.set(calls.get() + 1);
                Ok(())
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(calls.get(), 0);
        assert_eq!(wizard.error("amount"), Some("too small"));
    }

    #[test]
    fn test_successful_submit_resets() {
        let mut wizard = Wizard::new(two_step_config());
        wizard.update_field("amount", "2000");
        assert!(wizard.go_to_next_step());
        wizard.update_field("reference", "  ABC123  ");
        assert!(wizard.can_submit());

        let intent = wizard.submit(Ok).unwrap();
        assert_eq!(intent.amount, Money::from_units(2000));
        assert_eq!(intent.method, Channel::Bank);
        assert_eq!(intent.reference, "ABC123");

        assert_eq!(wizard.state(), &WizardState::default());
    }

    #[test]
    fn test_failed_callback_keeps_state() {
        let mut wizard = Wizard::new(two_step_config());
        wizard.update_field("amount", "2000");
        assert!(wizard.go_to_next_step());
        wizard.update_field("reference", "ABC123");

        let err = wizard
            .submit(|_| Err::<(), _>(WalletError::backend("submit_balance", "offline")))
            .unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(wizard.current_step(), 2);
        assert_eq!(wizard.field("reference"), "ABC123");
    }

    #[test]
    fn test_submit_form_without_amount() {
        let mut config = two_step_config();
        config.steps.remove(0);
        config.amount_field = None;
        let mut wizard = Wizard::new(config);
        wizard.update_field("reference", "ABCDEF");

        let reference = wizard
            .submit_form(|fields| Ok(fields.get("reference").cloned()))
            .unwrap();
        assert_eq!(reference.as_deref(), Some("ABCDEF"));

        let err = Wizard::new(wizard.config().clone()).submit(Ok).unwrap_err();
        assert!(err.is_validation());
    }
}
