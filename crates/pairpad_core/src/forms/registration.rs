//! crates/pairpad_core/src/forms/registration.rs
//!
//! The two-step sign-up form: account credentials, then role.

use crate::domain::{Registration, Role};
use crate::validation::{is_valid_email, require, FieldErrors, MIN_PASSWORD_LEN};
use crate::wizard::{MultiStepForm, Step, WizardError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
}

fn account_step(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    require(&mut errors, "email", &form.email, "Email is required");
    if !errors.contains("email") && !is_valid_email(&form.email) {
        errors.insert("email", "Please enter a valid email address");
    }

    require(&mut errors, "username", &form.username, "Username is required");

    if form.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", "Password must be at least 8 characters");
    }

    if form.password != form.confirm_password {
        errors.insert("confirm_password", "Passwords do not match");
    }
    errors
}

fn role_step(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match form.role {
        Some(Role::Student) | Some(Role::Professional) => {}
        Some(_) => errors.insert("role", "Please choose student or professional"),
        None => errors.insert("role", "Please choose a role"),
    }
    errors
}

pub fn steps() -> Vec<Step<RegistrationForm>> {
    vec![
        Step {
            name: "account",
            fields: &["email", "username", "password", "confirm_password"],
            validate: account_step,
        },
        Step {
            name: "role",
            fields: &["role"],
            validate: role_step,
        },
    ]
}

pub fn wizard() -> Result<MultiStepForm<RegistrationForm>, WizardError> {
    MultiStepForm::new(steps(), RegistrationForm::default())
}

impl RegistrationForm {
    /// Builds the request body. The backend expects the confirmation under
    /// `password_confirm`.
    pub fn to_registration(&self) -> Option<Registration> {
        let role = self.role?;
        Some(Registration {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            password_confirm: self.password.clone(),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegistrationForm {
        RegistrationForm {
            email: "ana@example.com".into(),
            username: "ana".into(),
            password: "hunter2hunter2".into(),
            confirm_password: "hunter2hunter2".into(),
            role: Some(Role::Student),
        }
    }

    #[test]
    fn empty_account_step_stays_on_step_one() {
        let mut form = wizard().unwrap();
        assert_eq!(form.advance(), Err(WizardError::StepIncomplete(1)));

        assert_eq!(form.current_step(), 1);
        assert!(form.errors().contains("email"));
        assert!(form.errors().contains("username"));
        assert!(form.errors().contains("password"));
    }

    #[test]
    fn short_password_and_mismatch_are_reported() {
        let mut errors = account_step(&RegistrationForm {
            password: "short".into(),
            confirm_password: "shorter".into(),
            ..filled()
        });
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        errors.remove("password");
        errors.remove("confirm_password");
        assert!(errors.is_empty());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let errors = account_step(&RegistrationForm {
            email: "not-an-email".into(),
            ..filled()
        });
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn only_student_and_professional_can_sign_up() {
        assert!(role_step(&filled()).is_empty());
        let admin = RegistrationForm {
            role: Some(Role::Admin),
            ..filled()
        };
        assert!(role_step(&admin).contains("role"));
        let none = RegistrationForm { role: None, ..filled() };
        assert!(role_step(&none).contains("role"));
    }

    #[test]
    fn complete_form_reaches_submission() {
        let mut form = wizard().unwrap();
        let data = filled();
        form.edit("email", |d| *d = data.clone());
        assert_eq!(form.advance(), Ok(2));

        let payload = form.begin_submit().unwrap().to_registration().unwrap();
        assert_eq!(payload.password_confirm, payload.password);
        assert_eq!(payload.role, Role::Student);
    }
}
