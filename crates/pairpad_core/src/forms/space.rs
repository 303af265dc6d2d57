//! crates/pairpad_core/src/forms/space.rs
//!
//! Listing a new living space: basics, location, details, house rules.

use crate::coliving::{HouseRulesDraft, LivingSpaceDraft, SpaceType};
use crate::validation::{require, FieldErrors};
use crate::wizard::{MultiStepForm, Step, WizardError};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceForm {
    pub name: String,
    pub space_type: SpaceType,
    pub description: String,

    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,

    pub total_bedrooms: u32,
    pub total_bathrooms: Decimal,
    pub total_rent: Decimal,
    pub utilities_included: bool,
    pub furnished: bool,
    pub parking_available: bool,
    pub available_from: Option<NaiveDate>,
    pub lease_duration_months: Option<u32>,
    pub is_public: bool,

    pub smoking_allowed: bool,
    pub pets_allowed: bool,
    pub guests_allowed: bool,
    pub max_consecutive_guest_nights: i32,
    pub quiet_hours_start: Option<String>,
    pub quiet_hours_end: Option<String>,
    pub additional_rules: String,
}

impl Default for SpaceForm {
    fn default() -> Self {
        let rules = HouseRulesDraft::default();
        Self {
            name: String::new(),
            space_type: SpaceType::default(),
            description: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: "USA".to_string(),
            total_bedrooms: 1,
            total_bathrooms: Decimal::ONE,
            total_rent: Decimal::ZERO,
            utilities_included: false,
            furnished: false,
            parking_available: false,
            available_from: None,
            lease_duration_months: Some(12),
            is_public: true,
            smoking_allowed: rules.smoking_allowed,
            pets_allowed: rules.pets_allowed,
            guests_allowed: rules.guests_allowed,
            max_consecutive_guest_nights: rules.max_consecutive_guest_nights as i32,
            quiet_hours_start: None,
            quiet_hours_end: None,
            additional_rules: String::new(),
        }
    }
}

impl SpaceForm {
    pub fn to_draft(&self) -> LivingSpaceDraft {
        LivingSpaceDraft {
            name: self.name.trim().to_string(),
            space_type: self.space_type,
            description: self.description.clone(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            country: self.country.clone(),
            total_bedrooms: self.total_bedrooms,
            total_bathrooms: self.total_bathrooms,
            total_rent: self.total_rent,
            utilities_included: self.utilities_included,
            furnished: self.furnished,
            parking_available: self.parking_available,
            available_from: self.available_from,
            lease_duration_months: self.lease_duration_months,
            is_public: self.is_public,
            house_rules: Some(HouseRulesDraft {
                smoking_allowed: self.smoking_allowed,
                pets_allowed: self.pets_allowed,
                guests_allowed: self.guests_allowed,
                quiet_hours_start: self.quiet_hours_start.clone(),
                quiet_hours_end: self.quiet_hours_end.clone(),
                additional_rules: self.additional_rules.clone(),
                max_consecutive_guest_nights: self.max_consecutive_guest_nights.max(0) as u32,
                ..HouseRulesDraft::default()
            }),
        }
    }
}

fn basics_step(form: &SpaceForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", &form.name, "Space name is required");
    errors
}

fn location_step(form: &SpaceForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "address", &form.address, "Address is required");
    require(&mut errors, "city", &form.city, "City is required");
    errors
}

fn details_step(form: &SpaceForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.total_bedrooms < 1 {
        errors.insert("total_bedrooms", "At least one bedroom is required");
    }
    if form.total_bathrooms < Decimal::ONE {
        errors.insert("total_bathrooms", "At least one bathroom is required");
    }
    if form.total_rent <= Decimal::ZERO {
        errors.insert("total_rent", "Rent must be greater than zero");
    }
    errors
}

fn rules_step(form: &SpaceForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.max_consecutive_guest_nights < 0 {
        errors.insert(
            "max_consecutive_guest_nights",
            "Guest nights cannot be negative",
        );
    }
    errors
}

pub fn steps() -> Vec<Step<SpaceForm>> {
    vec![
        Step {
            name: "basics",
            fields: &["name", "space_type", "description"],
            validate: basics_step,
        },
        Step {
            name: "location",
            fields: &["address", "city", "state", "zip_code", "country"],
            validate: location_step,
        },
        Step {
            name: "details",
            fields: &[
                "total_bedrooms",
                "total_bathrooms",
                "total_rent",
                "utilities_included",
                "furnished",
                "parking_available",
                "available_from",
                "lease_duration_months",
                "is_public",
            ],
            validate: details_step,
        },
        Step {
            name: "house_rules",
            fields: &[
                "smoking_allowed",
                "pets_allowed",
                "guests_allowed",
                "max_consecutive_guest_nights",
                "quiet_hours_start",
                "quiet_hours_end",
                "additional_rules",
            ],
            validate: rules_step,
        },
    ]
}

pub fn wizard() -> Result<MultiStepForm<SpaceForm>, WizardError> {
    MultiStepForm::new(steps(), SpaceForm::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn each_step_gates_its_own_fields() {
        let mut form = wizard().unwrap();
        assert!(form.advance().is_err());
        assert!(form.errors().contains("name"));

        form.edit("name", |d| d.name = "Maple St Loft".into());
        assert_eq!(form.advance(), Ok(2));
        assert!(form.advance().is_err());
        assert!(form.errors().contains("address"));
        assert!(form.errors().contains("city"));

        form.edit("address", |d| {
            d.address = "12 Maple St".into();
            d.city = "Austin".into();
        });
        assert_eq!(form.advance(), Ok(3));

        assert!(form.advance().is_err());
        assert_eq!(form.errors().get("total_rent"), Some("Rent must be greater than zero"));
    }

    #[test]
    fn half_bathrooms_below_one_are_rejected() {
        let form = SpaceForm {
            total_bathrooms: Decimal::from_str("0.5").unwrap(),
            total_rent: Decimal::from(1800),
            ..SpaceForm::default()
        };
        let errors = details_step(&form);
        assert!(errors.contains("total_bathrooms"));
        assert!(!errors.contains("total_rent"));
    }

    #[test]
    fn negative_guest_nights_are_rejected() {
        let form = SpaceForm {
            max_consecutive_guest_nights: -1,
            ..SpaceForm::default()
        };
        assert!(rules_step(&form).contains("max_consecutive_guest_nights"));
        assert!(rules_step(&SpaceForm::default()).is_empty());
    }

    #[test]
    fn draft_embeds_house_rules() {
        let form = SpaceForm {
            name: " Loft ".into(),
            pets_allowed: true,
            max_consecutive_guest_nights: 5,
            ..SpaceForm::default()
        };
        let draft = form.to_draft();
        assert_eq!(draft.name, "Loft");
        let rules = draft.house_rules.unwrap();
        assert!(rules.pets_allowed);
        assert_eq!(rules.max_consecutive_guest_nights, 5);
        assert!(rules.shared_chores_rotation);
    }
}
