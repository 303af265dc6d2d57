//! crates/pairpad_core/src/wizard.rs
//!
//! A generic multi-step form.
//!
//! Registration, the personality assessment, profile editing and living-space
//! creation all follow the same contract: numbered steps, a validator per step that
//! gates "Next", an unconditional "Previous", and a single submission from the final
//! step. Each concrete form only supplies its data type and its list of steps.

use crate::validation::{FieldErrors, GENERAL};

/// A single step: its name, the fields it owns, and the predicate gating "Next".
pub struct Step<F> {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub validate: fn(&F) -> FieldErrors,
}

impl<F> Clone for Step<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for Step<F> {}

impl<F> std::fmt::Debug for Step<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Editing,
    Submitting,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("A form needs at least one step")]
    NoSteps,
    #[error("Step {0} has validation errors")]
    StepIncomplete(usize),
    #[error("Already on the final step")]
    AlreadyAtFinalStep,
    #[error("Submission is only possible from the final step")]
    NotAtFinalStep,
    #[error("A submission is already in flight")]
    SubmissionInFlight,
    #[error("The form has already been submitted")]
    AlreadyCompleted,
}

/// The state of one multi-step form: data, current step (1-based) and errors.
#[derive(Debug, Clone)]
pub struct MultiStepForm<F> {
    steps: Vec<Step<F>>,
    data: F,
    current: usize,
    errors: FieldErrors,
    state: WizardState,
}

impl<F> MultiStepForm<F> {
    /// Starts a form on step 1.
    pub fn new(steps: Vec<Step<F>>, data: F) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Self {
            steps,
            data,
            current: 1,
            errors: FieldErrors::new(),
            state: WizardState::Editing,
        })
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn step_name(&self) -> &'static str {
        self.steps[self.current - 1].name
    }

    pub fn is_final_step(&self) -> bool {
        self.current == self.steps.len()
    }

    pub fn data(&self) -> &F {
        &self.data
    }

    pub fn into_data(self) -> F {
        self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Edits the form data. The error shown for `field`, if any, is cleared.
    pub fn edit(&mut self, field: &str, change: impl FnOnce(&mut F)) {
        change(&mut self.data);
        self.errors.remove(field);
    }

    /// Moves to the next step if the current step validates.
    ///
    /// On failure the step does not change and the step's errors replace the
    /// current error set.
    pub fn advance(&mut self) -> Result<usize, WizardError> {
        if self.is_final_step() {
            return Err(WizardError::AlreadyAtFinalStep);
        }

        let errors = (self.steps[self.current - 1].validate)(&self.data);
        if !errors.is_empty() {
            self.errors = errors;
            return Err(WizardError::StepIncomplete(self.current));
        }

        self.errors.clear();
        self.current += 1;
        Ok(self.current)
    }

    /// Moves to the previous step unconditionally and clears errors.
    pub fn back(&mut self) -> usize {
        self.current = self.current.saturating_sub(1).max(1);
        self.errors.clear();
        self.current
    }

    /// Validates every step, returning the first failing step and its errors.
    pub fn validate_all(&self) -> Result<(), (usize, FieldErrors)> {
        for (index, step) in self.steps.iter().enumerate() {
            let errors = (step.validate)(&self.data);
            if !errors.is_empty() {
                return Err((index + 1, errors));
            }
        }
        Ok(())
    }

    /// Starts the submission from the final step.
    ///
    /// All steps are re-validated; if one fails the form jumps to it and shows its
    /// errors. On success the form enters the submitting state and hands out the
    /// data to send.
    pub fn begin_submit(&mut self) -> Result<&F, WizardError> {
        match self.state {
            WizardState::Submitting => return Err(WizardError::SubmissionInFlight),
            WizardState::Completed => return Err(WizardError::AlreadyCompleted),
            WizardState::Editing => {}
        }
        if !self.is_final_step() {
            return Err(WizardError::NotAtFinalStep);
        }

        if let Err((step, errors)) = self.validate_all() {
            self.current = step;
            self.errors = errors;
            return Err(WizardError::StepIncomplete(step));
        }

        self.errors.clear();
        self.state = WizardState::Submitting;
        Ok(&self.data)
    }

    /// Records a failed submission: the form stays on the final step with a
    /// general error.
    pub fn fail_submit(&mut self, message: impl Into<String>) {
        self.state = WizardState::Editing;
        self.errors.clear();
        self.errors.insert(GENERAL, message);
    }

    /// Records a failed submission that the backend attributed to specific fields.
    ///
    /// The form moves to the earliest step owning one of the fields; fields no
    /// step owns leave the form on the final step.
    pub fn fail_submit_with_fields(&mut self, message: impl Into<String>, fields: FieldErrors) {
        self.fail_submit(message);
        let owning_step = fields
            .fields()
            .filter_map(|(field, _)| self.step_owning(field))
            .min();
        if let Some(step) = owning_step {
            self.current = step;
        }
        self.errors.extend(fields);
    }

    pub fn complete(&mut self) {
        self.state = WizardState::Completed;
    }

    pub fn is_completed(&self) -> bool {
        self.state == WizardState::Completed
    }

    fn step_owning(&self, field: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|step| step.fields.contains(&field))
            .map(|index| index + 1)
    }
}
