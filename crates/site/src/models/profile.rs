//! Member profile and preference domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use steer_core::{DeliveryFrequency, UserId};

/// A delivery address collected during onboarding.
///
/// Serializable because step-1 values are retained in the session until
/// the wizard's final submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub delivery_instructions: Option<String>,
}

/// A member profile (domain type).
///
/// Keyed by the identity the auth provider issued for the user.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Identity of the owning user.
    pub id: UserId,
    /// Where deliveries go.
    pub address: DeliveryAddress,
    /// False until the onboarding wizard's final step succeeds; gates all
    /// member routes.
    pub onboarding_completed: bool,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Which cuts of beef a member wants in their deliveries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutSelection {
    pub ribeye: bool,
    pub ground_beef: bool,
    pub filet_mignon: bool,
    pub brisket: bool,
}

impl CutSelection {
    /// Display names of the cuts, in menu order, paired with selection state.
    pub const MENU: [(&'static str, &'static str); 4] = [
        ("ribeye", "Premium Ribeye Steak"),
        ("ground_beef", "Ground Beef Bundle"),
        ("filet_mignon", "Filet Mignon"),
        ("brisket", "Beef Brisket"),
    ];

    /// True if at least one cut is selected.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.ribeye || self.ground_beef || self.filet_mignon || self.brisket
    }

    /// Whether the named cut is selected; unknown names are unselected.
    #[must_use]
    pub fn is_selected(&self, field: &str) -> bool {
        match field {
            "ribeye" => self.ribeye,
            "ground_beef" => self.ground_beef,
            "filet_mignon" => self.filet_mignon,
            "brisket" => self.brisket,
            _ => false,
        }
    }

    /// Display names of the selected cuts, in menu order.
    #[must_use]
    pub fn selected_labels(&self) -> Vec<&'static str> {
        Self::MENU
            .iter()
            .filter(|(field, _)| self.is_selected(field))
            .map(|(_, label)| *label)
            .collect()
    }
}

/// Delivery preferences collected during onboarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Identity of the owning user.
    pub user_id: UserId,
    /// Preferred cuts; at least one is selected.
    pub cuts: CutSelection,
    /// Pounds of beef per delivery, at least 1.
    pub quantity: i32,
    /// How often to deliver.
    pub frequency: DeliveryFrequency,
    /// Monthly spend ceiling in dollars, at least 1.
    pub monthly_budget: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_selection_any() {
        assert!(!CutSelection::default().any());
        let one = CutSelection {
            brisket: true,
            ..CutSelection::default()
        };
        assert!(one.any());
    }

    #[test]
    fn test_selected_labels_in_menu_order() {
        let cuts = CutSelection {
            ribeye: true,
            brisket: true,
            ..CutSelection::default()
        };
        assert_eq!(
            cuts.selected_labels(),
            vec!["Premium Ribeye Steak", "Beef Brisket"]
        );
    }

    #[test]
    fn test_unknown_field_is_unselected() {
        let cuts = CutSelection {
            ribeye: true,
            ground_beef: true,
            filet_mignon: true,
            brisket: true,
        };
        assert!(!cuts.is_selected("tomahawk"));
    }
}
