//! Multi-step transaction wizards
//!
//! One engine drives every flow; the flows only differ in their
//! [`WizardConfig`].

pub mod engine;
pub mod flows;

pub use engine::{FieldRule, FieldSpec, FieldValues, StepSpec, Wizard, WizardConfig, WizardState};
pub use flows::{field, Flow};
