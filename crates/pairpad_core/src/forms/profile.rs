//! crates/pairpad_core/src/forms/profile.rs
//!
//! Profile editing, split into four tabs: personal, location, lifestyle and profile.

use crate::domain::{
    Gender, GuestsPreference, LeaseDuration, PetsPreference, ProfileUpdate, SmokingPreference,
    User,
};
use crate::validation::{check_adult, check_budget, FieldErrors};
use crate::wizard::{MultiStepForm, Step, WizardError};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    /// The date ages are computed against.
    pub today: NaiveDate,

    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone_number: String,
    pub occupation: String,
    pub education: String,

    pub current_city: String,
    pub preferred_city: String,
    pub budget_min: Option<u32>,
    pub budget_max: Option<u32>,
    pub move_in_date: Option<NaiveDate>,
    pub lease_duration: Option<LeaseDuration>,

    pub smoking_preference: SmokingPreference,
    pub pets_preference: PetsPreference,
    pub guests_preference: GuestsPreference,
    pub cleanliness_level: u8,
    pub social_level: u8,
    pub quiet_hours: bool,

    pub bio: String,
    pub interests: String,
}

impl ProfileForm {
    /// Pre-fills the form from the cached user.
    pub fn from_user(user: &User, today: NaiveDate) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            today,
            first_name: text(&user.first_name),
            last_name: text(&user.last_name),
            date_of_birth: user.date_of_birth,
            gender: user.gender,
            phone_number: text(&user.phone_number),
            occupation: text(&user.occupation),
            education: text(&user.education),
            current_city: text(&user.current_city),
            preferred_city: text(&user.preferred_city),
            budget_min: user.budget_min,
            budget_max: user.budget_max,
            move_in_date: user.move_in_date,
            lease_duration: user.lease_duration,
            smoking_preference: user.smoking_preference.unwrap_or_default(),
            pets_preference: user.pets_preference.unwrap_or_default(),
            guests_preference: user.guests_preference.unwrap_or_default(),
            cleanliness_level: user.cleanliness_level.unwrap_or(50),
            social_level: user.social_level.unwrap_or(50),
            quiet_hours: user.quiet_hours.unwrap_or(false),
            bio: text(&user.bio),
            interests: text(&user.interests),
        }
    }

    /// Runs every cross-field check at once, as the save button does.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_budget(&mut errors, self.budget_min, self.budget_max);
        check_adult(&mut errors, self.date_of_birth, self.today);
        errors
    }

    /// The full update sent on save. Empty dates and budgets are sent as `null`.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            date_of_birth: Some(self.date_of_birth),
            gender: self.gender,
            phone_number: Some(self.phone_number.clone()),
            occupation: Some(self.occupation.clone()),
            education: Some(self.education.clone()),
            current_city: Some(self.current_city.clone()),
            preferred_city: Some(self.preferred_city.clone()),
            budget_min: Some(self.budget_min),
            budget_max: Some(self.budget_max),
            move_in_date: Some(self.move_in_date),
            lease_duration: self.lease_duration,
            smoking_preference: Some(self.smoking_preference),
            pets_preference: Some(self.pets_preference),
            guests_preference: Some(self.guests_preference),
            cleanliness_level: Some(self.cleanliness_level),
            social_level: Some(self.social_level),
            quiet_hours: Some(self.quiet_hours),
            bio: Some(self.bio.clone()),
            interests: Some(self.interests.clone()),
            personality_profile: None,
        }
    }
}

fn personal_tab(form: &ProfileForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_adult(&mut errors, form.date_of_birth, form.today);
    errors
}

fn location_tab(form: &ProfileForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_budget(&mut errors, form.budget_min, form.budget_max);
    errors
}

fn lifestyle_tab(form: &ProfileForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.cleanliness_level > 100 {
        errors.insert("cleanliness_level", "Cleanliness level must be between 0 and 100");
    }
    if form.social_level > 100 {
        errors.insert("social_level", "Social level must be between 0 and 100");
    }
    errors
}

fn profile_tab(_: &ProfileForm) -> FieldErrors {
    FieldErrors::new()
}

pub fn steps() -> Vec<Step<ProfileForm>> {
    vec![
        Step {
            name: "personal",
            fields: &[
                "first_name",
                "last_name",
                "date_of_birth",
                "gender",
                "phone_number",
                "occupation",
                "education",
            ],
            validate: personal_tab,
        },
        Step {
            name: "location",
            fields: &[
                "current_city",
                "preferred_city",
                "budget_min",
                "budget_max",
                "move_in_date",
                "lease_duration",
            ],
            validate: location_tab,
        },
        Step {
            name: "lifestyle",
            fields: &[
                "smoking_preference",
                "pets_preference",
                "guests_preference",
                "cleanliness_level",
                "social_level",
                "quiet_hours",
            ],
            validate: lifestyle_tab,
        },
        Step {
            name: "profile",
            fields: &["bio", "interests"],
            validate: profile_tab,
        },
    ]
}

pub fn wizard(user: &User, today: NaiveDate) -> Result<MultiStepForm<ProfileForm>, WizardError> {
    MultiStepForm::new(steps(), ProfileForm::from_user(user, today))
}
