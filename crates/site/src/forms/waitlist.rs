//! Waitlist form sanitization and validation.

use serde::Deserialize;

use steer_core::{Email, RoleDetails, SignupRole, ZipCode};

use super::{FieldErrors, sanitize, sanitize_optional};
use crate::models::WaitlistEntry;

/// Raw waitlist submission as posted by the browser.
///
/// Every field is optional on the wire; validation decides what is
/// actually required. The struct doubles as the template's value source
/// when the form is re-rendered with errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitlistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub zip_code: String,
    /// `customer` or `farmer`; an absent selector means customer.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub comments: String,
    /// Required when role is customer.
    #[serde(default)]
    pub monthly_beef_pounds: String,
    /// Required when role is farmer.
    #[serde(default)]
    pub monthly_cattle_sold: String,
    /// One-time token issued when the form was rendered.
    #[serde(default)]
    pub form_token: String,
}

impl WaitlistForm {
    /// Strip `<` and `>` from every free-text field before the values
    /// enter form state.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize(&self.name),
            email: sanitize(&self.email),
            zip_code: sanitize(&self.zip_code),
            role: sanitize(&self.role),
            comments: sanitize(&self.comments),
            monthly_beef_pounds: sanitize(&self.monthly_beef_pounds),
            monthly_cattle_sold: sanitize(&self.monthly_cattle_sold),
            form_token: self.form_token.clone(),
        }
    }

    /// The role the form was submitted under; defaults to customer, which
    /// is also the UI default.
    #[must_use]
    pub fn selected_role(&self) -> SignupRole {
        self.role.parse().unwrap_or_default()
    }

    /// Validate every field, accumulating all errors.
    ///
    /// # Errors
    ///
    /// Returns the full set of field errors; the entry is only built when
    /// every rule passes.
    pub fn validate(&self) -> Result<WaitlistEntry, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Please enter your name.");
        }

        let email = match Email::parse(self.email.trim()) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.push("email", "Please enter a valid email address.");
                None
            }
        };

        let zip_code = match ZipCode::parse(self.zip_code.trim()) {
            Ok(zip) => Some(zip),
            Err(_) => {
                errors.push("zip_code", "Please enter a valid ZIP code (12345 or 12345-6789).");
                None
            }
        };

        let role = if self.role.is_empty() {
            SignupRole::default()
        } else {
            match self.role.parse::<SignupRole>() {
                Ok(role) => role,
                Err(_) => {
                    errors.push("role", "Please choose customer or farmer.");
                    SignupRole::default()
                }
            }
        };

        // The role decides which count field is required; the other is
        // never consulted, so it can never leak into the entry.
        let details = match role {
            SignupRole::Customer => parse_count(&self.monthly_beef_pounds).map_or_else(
                || {
                    errors.push(
                        "monthly_beef_pounds",
                        "Please enter how many pounds of beef you buy per month.",
                    );
                    None
                },
                |monthly_beef_pounds| {
                    Some(RoleDetails::Customer {
                        monthly_beef_pounds,
                    })
                },
            ),
            SignupRole::Farmer => parse_count(&self.monthly_cattle_sold).map_or_else(
                || {
                    errors.push(
                        "monthly_cattle_sold",
                        "Please enter how many cattle you sell per month.",
                    );
                    None
                },
                |monthly_cattle_sold| {
                    Some(RoleDetails::Farmer {
                        monthly_cattle_sold,
                    })
                },
            ),
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // A None here always has a matching error recorded above.
        match (email, zip_code, details) {
            (Some(email), Some(zip_code), Some(details)) => Ok(WaitlistEntry {
                email,
                name: name.to_owned(),
                zip_code,
                comments: sanitize_optional(&self.comments),
                details,
            }),
            _ => Err(errors),
        }
    }
}

/// Parse a role-specific monthly count: a positive integer, rejecting
/// non-numeric input and zero.
fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n >= 1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn customer_form() -> WaitlistForm {
        WaitlistForm {
            name: "Ada Farmer".to_owned(),
            email: "ada@example.com".to_owned(),
            zip_code: "78701".to_owned(),
            role: "customer".to_owned(),
            comments: String::new(),
            monthly_beef_pounds: "12".to_owned(),
            monthly_cattle_sold: String::new(),
            form_token: String::new(),
        }
    }

    fn farmer_form() -> WaitlistForm {
        WaitlistForm {
            role: "farmer".to_owned(),
            monthly_cattle_sold: "5".to_owned(),
            monthly_beef_pounds: String::new(),
            ..customer_form()
        }
    }

    #[test]
    fn test_valid_customer() {
        let entry = customer_form().validate().unwrap();
        assert_eq!(entry.role(), SignupRole::Customer);
        assert_eq!(
            entry.details,
            RoleDetails::Customer {
                monthly_beef_pounds: 12
            }
        );
        assert_eq!(entry.comments, None);
    }

    #[test]
    fn test_valid_farmer_never_carries_customer_count() {
        let mut form = farmer_form();
        // Even a stray posted value for the other role's field is ignored
        form.monthly_beef_pounds = "999".to_owned();

        let entry = form.validate().unwrap();
        assert_eq!(
            entry.details,
            RoleDetails::Farmer {
                monthly_cattle_sold: 5
            }
        );
    }

    #[test]
    fn test_farmer_requires_cattle_count() {
        for missing in ["", "0", "-3", "cows", "2.5"] {
            let mut form = farmer_form();
            form.monthly_cattle_sold = missing.to_owned();

            let errors = form.validate().unwrap_err();
            assert!(errors.has("monthly_cattle_sold"), "accepted {missing:?}");
        }
    }

    #[test]
    fn test_customer_requires_pounds_count() {
        for missing in ["", "0", "lots"] {
            let mut form = customer_form();
            form.monthly_beef_pounds = missing.to_owned();

            let errors = form.validate().unwrap_err();
            assert!(errors.has("monthly_beef_pounds"), "accepted {missing:?}");
        }
    }

    #[test]
    fn test_invalid_email_is_field_specific() {
        let mut form = customer_form();
        form.email = "not-an-email".to_owned();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has("email"));
        assert_eq!(errors.msg("email"), "Please enter a valid email address.");
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let form = WaitlistForm {
            role: "customer".to_owned(),
            ..WaitlistForm::default()
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("email"));
        assert!(errors.has("zip_code"));
        assert!(errors.has("monthly_beef_pounds"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_name_whitespace_only_rejected() {
        let mut form = customer_form();
        form.name = "   ".to_owned();

        let errors = form.validate().unwrap_err();
        assert!(errors.has("name"));
    }

    #[test]
    fn test_zip_plus_four_accepted_four_digit_rejected() {
        let mut form = customer_form();
        form.zip_code = "78701-1234".to_owned();
        assert!(form.validate().is_ok());

        form.zip_code = "1234".to_owned();
        assert!(form.validate().unwrap_err().has("zip_code"));
    }

    #[test]
    fn test_empty_role_defaults_to_customer() {
        let mut form = customer_form();
        form.role = String::new();

        let entry = form.validate().unwrap();
        assert_eq!(entry.role(), SignupRole::Customer);
    }

    #[test]
    fn test_sanitized_strips_markup() {
        let form = WaitlistForm {
            name: "<b>Ada</b>".to_owned(),
            comments: "call me <soon>".to_owned(),
            ..customer_form()
        };

        let clean = form.sanitized();
        assert_eq!(clean.name, "bAda/b");
        assert_eq!(clean.comments, "call me soon");
    }

    #[test]
    fn test_comments_preserved_when_present() {
        let mut form = farmer_form();
        form.comments = " grass-fed herd ".to_owned();

        let entry = form.validate().unwrap();
        assert_eq!(entry.comments.as_deref(), Some("grass-fed herd"));
    }
}
