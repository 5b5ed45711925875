//! Onboarding wizard form sanitization and validation.
//!
//! Step 1 collects the delivery address; step 2 collects cut, quantity,
//! frequency, and budget preferences. Step-1 validation runs when the
//! user advances; step-2 validation runs at submit time.

use rust_decimal::Decimal;
use serde::Deserialize;

use steer_core::{DeliveryFrequency, UserId};

use super::{FieldErrors, sanitize, sanitize_optional};
use crate::models::{CutSelection, DeliveryAddress, Preferences};

/// Minimum postal code length accepted by step 1.
const MIN_POSTAL_CODE_LENGTH: usize = 5;

/// Raw step-1 (delivery address) submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressForm {
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub delivery_instructions: String,
}

impl AddressForm {
    /// Strip `<` and `>` from every field.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            address_line1: sanitize(&self.address_line1),
            address_line2: sanitize(&self.address_line2),
            city: sanitize(&self.city),
            state: sanitize(&self.state),
            postal_code: sanitize(&self.postal_code),
            delivery_instructions: sanitize(&self.delivery_instructions),
        }
    }

    /// Re-fill the form from an address retained in the session, for when
    /// the user steps back from the preferences step.
    #[must_use]
    pub fn from_address(address: &DeliveryAddress) -> Self {
        Self {
            address_line1: address.address_line1.clone(),
            address_line2: address.address_line2.clone().unwrap_or_default(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            delivery_instructions: address.delivery_instructions.clone().unwrap_or_default(),
        }
    }

    /// Validate the address step, accumulating all errors.
    ///
    /// # Errors
    ///
    /// Returns per-field errors; the address is only built when every rule
    /// passes.
    pub fn validate(&self) -> Result<DeliveryAddress, FieldErrors> {
        let mut errors = FieldErrors::new();

        let address_line1 = self.address_line1.trim();
        if address_line1.is_empty() {
            errors.push("address_line1", "Address is required.");
        }

        let city = self.city.trim();
        if city.is_empty() {
            errors.push("city", "City is required.");
        }

        let state = self.state.trim();
        if state.is_empty() {
            errors.push("state", "State is required.");
        }

        let postal_code = self.postal_code.trim();
        if postal_code.len() < MIN_POSTAL_CODE_LENGTH {
            errors.push("postal_code", "Valid postal code is required.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DeliveryAddress {
            address_line1: address_line1.to_owned(),
            address_line2: sanitize_optional(&self.address_line2),
            city: city.to_owned(),
            state: state.to_owned(),
            postal_code: postal_code.to_owned(),
            delivery_instructions: sanitize_optional(&self.delivery_instructions),
        })
    }
}

/// Raw step-2 (preferences) submission.
///
/// Checkboxes arrive as present-or-absent fields; the stepper UI floors
/// quantity at 1 but the server re-checks everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesForm {
    #[serde(default)]
    pub ribeye: Option<String>,
    #[serde(default)]
    pub ground_beef: Option<String>,
    #[serde(default)]
    pub filet_mignon: Option<String>,
    #[serde(default)]
    pub brisket: Option<String>,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub monthly_budget: String,
    /// One-time token issued when the step was rendered.
    #[serde(default)]
    pub form_token: String,
}

impl PreferencesForm {
    /// The cut selection as posted.
    #[must_use]
    pub const fn cuts(&self) -> CutSelection {
        CutSelection {
            ribeye: self.ribeye.is_some(),
            ground_beef: self.ground_beef.is_some(),
            filet_mignon: self.filet_mignon.is_some(),
            brisket: self.brisket.is_some(),
        }
    }

    /// Validate the preferences step, accumulating all errors.
    ///
    /// # Errors
    ///
    /// Returns per-field errors; the preferences are only built when every
    /// rule passes.
    pub fn validate(&self, user_id: UserId) -> Result<Preferences, FieldErrors> {
        let mut errors = FieldErrors::new();

        let cuts = self.cuts();
        if !cuts.any() {
            errors.push("cuts", "Select at least one cut of beef.");
        }

        let quantity = self.quantity.trim().parse::<i32>().ok().filter(|q| *q >= 1);
        if quantity.is_none() {
            errors.push("quantity", "Please select a valid quantity.");
        }

        let frequency = self.frequency.parse::<DeliveryFrequency>().ok();
        if frequency.is_none() {
            errors.push("frequency", "Please select a delivery frequency.");
        }

        let monthly_budget = self
            .monthly_budget
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|b| *b >= Decimal::ONE);
        if monthly_budget.is_none() {
            errors.push("monthly_budget", "Please enter your monthly budget.");
        }

        match (quantity, frequency, monthly_budget) {
            (Some(quantity), Some(frequency), Some(monthly_budget)) if errors.is_empty() => {
                Ok(Preferences {
                    user_id,
                    cuts,
                    quantity,
                    frequency,
                    monthly_budget,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use steer_core::UserId;

    fn user() -> UserId {
        "6f5902ac-23e8-4f4e-9f0b-5de9a0b2f8a1".parse().unwrap()
    }

    fn valid_address() -> AddressForm {
        AddressForm {
            address_line1: "123 Beef Lane".to_owned(),
            address_line2: "Apt 4B".to_owned(),
            city: "Steakville".to_owned(),
            state: "TX".to_owned(),
            postal_code: "78701".to_owned(),
            delivery_instructions: String::new(),
        }
    }

    fn valid_preferences() -> PreferencesForm {
        PreferencesForm {
            ribeye: Some("on".to_owned()),
            ground_beef: None,
            filet_mignon: None,
            brisket: Some("on".to_owned()),
            quantity: "3".to_owned(),
            frequency: "weekly".to_owned(),
            monthly_budget: "50".to_owned(),
            form_token: String::new(),
        }
    }

    #[test]
    fn test_address_valid() {
        let address = valid_address().validate().unwrap();
        assert_eq!(address.address_line1, "123 Beef Lane");
        assert_eq!(address.address_line2.as_deref(), Some("Apt 4B"));
        assert_eq!(address.delivery_instructions, None);
    }

    #[test]
    fn test_address_requires_line1_city_state() {
        let form = AddressForm {
            postal_code: "78701".to_owned(),
            ..AddressForm::default()
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.has("address_line1"));
        assert!(errors.has("city"));
        assert!(errors.has("state"));
        assert!(!errors.has("postal_code"));
    }

    #[test]
    fn test_address_short_postal_code_blocks_step() {
        let mut form = valid_address();
        form.postal_code = "1234".to_owned();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has("postal_code"));
    }

    #[test]
    fn test_address_round_trips_through_refill() {
        let address = valid_address().validate().unwrap();
        let refilled = AddressForm::from_address(&address);
        assert_eq!(refilled.validate().unwrap(), address);
    }

    #[test]
    fn test_preferences_valid() {
        let prefs = valid_preferences().validate(user()).unwrap();
        assert!(prefs.cuts.ribeye);
        assert!(prefs.cuts.brisket);
        assert!(!prefs.cuts.ground_beef);
        assert_eq!(prefs.quantity, 3);
        assert_eq!(prefs.frequency, DeliveryFrequency::Weekly);
        assert_eq!(prefs.monthly_budget, Decimal::from(50));
    }

    #[test]
    fn test_preferences_require_at_least_one_cut() {
        let form = PreferencesForm {
            ribeye: None,
            brisket: None,
            ..valid_preferences()
        };

        let errors = form.validate(user()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.msg("cuts"), "Select at least one cut of beef.");
    }

    #[test]
    fn test_preferences_quantity_floor() {
        for bad in ["0", "-1", "", "many"] {
            let mut form = valid_preferences();
            form.quantity = bad.to_owned();

            let errors = form.validate(user()).unwrap_err();
            assert!(errors.has("quantity"), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_preferences_frequency_enumerated() {
        for freq in ["weekly", "bi-weekly", "monthly"] {
            let mut form = valid_preferences();
            form.frequency = freq.to_owned();
            assert!(form.validate(user()).is_ok(), "rejected {freq:?}");
        }

        let mut form = valid_preferences();
        form.frequency = "daily".to_owned();
        assert!(form.validate(user()).unwrap_err().has("frequency"));
    }

    #[test]
    fn test_preferences_budget_must_be_positive_number() {
        for bad in ["", "0", "0.5", "-10", "free"] {
            let mut form = valid_preferences();
            form.monthly_budget = bad.to_owned();

            let errors = form.validate(user()).unwrap_err();
            assert!(errors.has("monthly_budget"), "accepted {bad:?}");
        }

        let mut form = valid_preferences();
        form.monthly_budget = "49.99".to_owned();
        let prefs = form.validate(user()).unwrap();
        assert_eq!(prefs.monthly_budget, "49.99".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_preferences_errors_accumulate() {
        let form = PreferencesForm::default();

        let errors = form.validate(user()).unwrap_err();
        assert!(errors.has("cuts"));
        assert!(errors.has("quantity"));
        assert!(errors.has("frequency"));
        assert!(errors.has("monthly_budget"));
    }
}
