//! services/client/src/state/personality.rs
//!
//! The in-progress assessment and the onboarding checklist.

use pairpad_core::domain::{
    CommunicationStyle, LifestylePreferences, OnboardingProgress, PersonalityProfile, RecordId,
};
use std::collections::BTreeMap;

/// Answers collected so far. Every field is optional so partial drafts merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentDraft {
    pub answers: BTreeMap<RecordId, u8>,
    pub lifestyle: Option<LifestylePreferences>,
    pub communication_style: Option<CommunicationStyle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalityStore {
    pub draft: AssessmentDraft,
    pub profile: Option<PersonalityProfile>,
    pub is_completed: bool,
}

impl PersonalityStore {
    /// Merges `draft` into the stored one. Answers are added; set fields win.
    pub fn update(&mut self, draft: AssessmentDraft) {
        self.draft.answers.extend(draft.answers);
        if draft.lifestyle.is_some() {
            self.draft.lifestyle = draft.lifestyle;
        }
        if draft.communication_style.is_some() {
            self.draft.communication_style = draft.communication_style;
        }
    }

    pub fn complete(&mut self, profile: PersonalityProfile) {
        self.profile = Some(profile);
        self.is_completed = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnboardingStore {
    pub progress: Option<OnboardingProgress>,
}

impl OnboardingStore {
    pub fn set_progress(&mut self, progress: OnboardingProgress) {
        self.progress = Some(progress);
    }

    pub fn set_current_step(&mut self, step: &str) {
        if let Some(progress) = self.progress.as_mut() {
            progress.current_step = Some(step.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_merges_answers_and_keeps_unset_fields() {
        let mut store = PersonalityStore::default();
        store.update(AssessmentDraft {
            answers: BTreeMap::from([(RecordId(1), 4)]),
            communication_style: Some(CommunicationStyle::Direct),
            ..Default::default()
        });
        store.update(AssessmentDraft {
            answers: BTreeMap::from([(RecordId(2), 2), (RecordId(1), 5)]),
            ..Default::default()
        });

        assert_eq!(store.draft.answers.get(&RecordId(1)), Some(&5));
        assert_eq!(store.draft.answers.len(), 2);
        assert_eq!(store.draft.communication_style, Some(CommunicationStyle::Direct));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut store = PersonalityStore::default();
        store.update(AssessmentDraft {
            answers: BTreeMap::from([(RecordId(1), 4)]),
            ..Default::default()
        });
        store.is_completed = true;
        store.reset();
        assert_eq!(store, PersonalityStore::default());
    }
}
