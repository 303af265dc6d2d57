//! crates/pairpad_core/src/forms/assessment.rs
//!
//! The three-step personality and lifestyle questionnaire.
//!
//! Questions come from the backend when it has any; otherwise the built-in bank
//! below is used. Scoring happens server-side, the client only collects answers.

use crate::domain::{blank_as_none, CommunicationStyle, LifestylePreferences, RecordId};
use crate::validation::FieldErrors;
use crate::wizard::{MultiStepForm, Step, WizardError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answer recorded for a question the user skipped.
pub const DEFAULT_RESPONSE: u8 = 3;
/// Multiplier turning a 1-5 lifestyle answer into a 0-100 level.
pub const LIFESTYLE_SCALE: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BigFiveTrait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub id: RecordId,
    #[serde(rename = "question_text", alias = "question")]
    pub text: String,
    #[serde(default, rename = "trait", deserialize_with = "blank_as_none")]
    pub big_five: Option<BigFiveTrait>,
    #[serde(default, alias = "reverse")]
    pub reverse_scored: bool,
}

const BUILTIN_QUESTIONS: [(i64, BigFiveTrait, &str, bool); 15] = [
    (1, BigFiveTrait::Openness, "I enjoy trying new and unusual experiences", false),
    (2, BigFiveTrait::Openness, "I prefer routine and familiar activities", true),
    (3, BigFiveTrait::Openness, "I appreciate art, music, and creative expression", false),
    (4, BigFiveTrait::Conscientiousness, "I am always prepared and organized", false),
    (5, BigFiveTrait::Conscientiousness, "I often leave things until the last minute", true),
    (6, BigFiveTrait::Conscientiousness, "I pay attention to details", false),
    (7, BigFiveTrait::Extraversion, "I enjoy being around people and social gatherings", false),
    (8, BigFiveTrait::Extraversion, "I prefer spending time alone rather than with others", true),
    (9, BigFiveTrait::Extraversion, "I feel energized by social interactions", false),
    (10, BigFiveTrait::Agreeableness, "I try to be helpful and considerate to others", false),
    (11, BigFiveTrait::Agreeableness, "I often put my needs before others", true),
    (12, BigFiveTrait::Agreeableness, "I trust others easily", false),
    (13, BigFiveTrait::Neuroticism, "I often feel anxious or stressed", false),
    (14, BigFiveTrait::Neuroticism, "I remain calm under pressure", true),
    (15, BigFiveTrait::Neuroticism, "I worry about things frequently", false),
];

/// The lifestyle section: two 1-5 scales followed by three yes/no questions.
pub const LIFESTYLE_QUESTIONS: [(&str, &str); 5] = [
    ("cleanliness", "How important is cleanliness to you?"),
    ("social_level", "How social do you like your living environment?"),
    ("quiet_hours", "Do you prefer quiet hours after 10 PM?"),
    ("pets", "Are you comfortable living with pets?"),
    ("smoking", "Do you smoke or are you okay with smoking indoors?"),
];

pub fn builtin_questions() -> Vec<AssessmentQuestion> {
    BUILTIN_QUESTIONS
        .iter()
        .map(|&(id, big_five, text, reverse_scored)| AssessmentQuestion {
            id: RecordId(id),
            text: text.to_string(),
            big_five: Some(big_five),
            reverse_scored,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentForm {
    pub questions: Vec<AssessmentQuestion>,
    /// Answers on the 1-5 agreement scale, keyed by question id.
    pub answers: BTreeMap<RecordId, u8>,
    pub cleanliness: Option<u8>,
    pub social_level: Option<u8>,
    pub quiet_hours: Option<bool>,
    pub pets: Option<bool>,
    pub smoking: Option<bool>,
    pub communication_style: Option<CommunicationStyle>,
}

impl AssessmentForm {
    /// Starts a questionnaire over the backend's questions, or the built-in bank
    /// when the backend has none.
    pub fn new(server_questions: Vec<AssessmentQuestion>) -> Self {
        let questions = if server_questions.is_empty() {
            builtin_questions()
        } else {
            server_questions
        };
        Self {
            questions,
            answers: BTreeMap::new(),
            cleanliness: None,
            social_level: None,
            quiet_hours: None,
            pets: None,
            smoking: None,
            communication_style: Some(CommunicationStyle::default()),
        }
    }

    pub fn answer(&mut self, question: RecordId, value: u8) {
        self.answers.insert(question, value);
    }

    pub fn unanswered(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| !self.answers.get(&q.id).is_some_and(|v| (1..=5).contains(v)))
            .count()
    }

    /// Builds the request body for `POST /personality/submit/`.
    pub fn submission(&self) -> AssessmentSubmission {
        let responses = self
            .questions
            .iter()
            .map(|q| ResponseEntry {
                question: q.id,
                response_value: self.answers.get(&q.id).copied().unwrap_or(DEFAULT_RESPONSE),
                response_boolean: None,
                response_text: String::new(),
            })
            .collect();

        let scale = |answer: Option<u8>| answer.map(|v| v.min(5) * LIFESTYLE_SCALE).unwrap_or(50);

        AssessmentSubmission {
            responses,
            lifestyle_preferences: LifestylePreferences {
                cleanliness: scale(self.cleanliness),
                social_level: scale(self.social_level),
                quiet_hours: self.quiet_hours.unwrap_or(false),
                pets: self.pets.unwrap_or(false),
                smoking: self.smoking.unwrap_or(false),
            },
            communication_style: self.communication_style.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEntry {
    pub question: RecordId,
    pub response_value: u8,
    pub response_boolean: Option<bool>,
    pub response_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSubmission {
    pub responses: Vec<ResponseEntry>,
    pub lifestyle_preferences: LifestylePreferences,
    pub communication_style: CommunicationStyle,
}

//=========================================================================================
// Steps
//=========================================================================================

fn personality_step(form: &AssessmentForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let missing = form.unanswered();
    if missing > 0 {
        errors.insert(
            "responses",
            format!("Please answer all questions ({} remaining)", missing),
        );
    }
    errors
}

fn lifestyle_step(form: &AssessmentForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, value) in [("cleanliness", form.cleanliness), ("social_level", form.social_level)] {
        if !value.is_some_and(|v| (1..=5).contains(&v)) {
            errors.insert(field, "Please pick a value from 1 to 5");
        }
    }
    for (field, value) in [
        ("quiet_hours", form.quiet_hours),
        ("pets", form.pets),
        ("smoking", form.smoking),
    ] {
        if value.is_none() {
            errors.insert(field, "Please answer yes or no");
        }
    }
    errors
}

fn communication_step(form: &AssessmentForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.communication_style.is_none() {
        errors.insert("communication_style", "Please choose a communication style");
    }
    errors
}

pub fn steps() -> Vec<Step<AssessmentForm>> {
    vec![
        Step {
            name: "personality",
            fields: &["responses"],
            validate: personality_step,
        },
        Step {
            name: "lifestyle",
            fields: &["cleanliness", "social_level", "quiet_hours", "pets", "smoking"],
            validate: lifestyle_step,
        },
        Step {
            name: "communication",
            fields: &["communication_style"],
            validate: communication_step,
        },
    ]
}

pub fn wizard(
    server_questions: Vec<AssessmentQuestion>,
) -> Result<MultiStepForm<AssessmentForm>, WizardError> {
    MultiStepForm::new(steps(), AssessmentForm::new(server_questions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_bank_covers_each_trait_three_times() {
        let questions = builtin_questions();
        assert_eq!(questions.len(), 15);
        for big_five in [
            BigFiveTrait::Openness,
            BigFiveTrait::Conscientiousness,
            BigFiveTrait::Extraversion,
            BigFiveTrait::Agreeableness,
            BigFiveTrait::Neuroticism,
        ] {
            let count = questions.iter().filter(|q| q.big_five == Some(big_five)).count();
            assert_eq!(count, 3);
        }
        assert_eq!(questions.iter().filter(|q| q.reverse_scored).count(), 5);
    }

    #[test]
    fn server_questions_replace_the_builtin_bank() {
        let server: Vec<AssessmentQuestion> = serde_json::from_value(json!([
            { "id": 101, "question_text": "I like plants", "trait": "openness",
              "question_type": "scale", "reverse_scored": false, "order": 1 }
        ]))
        .unwrap();
        let form = AssessmentForm::new(server);
        assert_eq!(form.questions.len(), 1);
        assert_eq!(form.questions[0].id, RecordId(101));
    }

    #[test]
    fn unanswered_questions_block_the_first_step() {
        let mut form = wizard(vec![]).unwrap();
        assert!(form.advance().is_err());
        assert_eq!(
            form.errors().get("responses"),
            Some("Please answer all questions (15 remaining)")
        );

        form.edit("responses", |d| {
            for id in 1..=15 {
                d.answer(RecordId(id), 4);
            }
        });
        assert_eq!(form.advance(), Ok(2));
    }

    #[test]
    fn lifestyle_step_requires_every_answer() {
        let mut form = AssessmentForm::new(vec![]);
        form.cleanliness = Some(6);
        form.pets = Some(true);
        let errors = lifestyle_step(&form);
        assert!(errors.contains("cleanliness"));
        assert!(errors.contains("social_level"));
        assert!(errors.contains("quiet_hours"));
        assert!(!errors.contains("pets"));
        assert!(errors.contains("smoking"));
    }

    #[test]
    fn submission_scales_lifestyle_and_defaults_skipped_answers() {
        let mut form = AssessmentForm::new(vec![]);
        form.answer(RecordId(1), 5);
        form.cleanliness = Some(4);
        form.quiet_hours = Some(true);

        let submission = form.submission();
        assert_eq!(submission.responses.len(), 15);
        assert_eq!(submission.responses[0].response_value, 5);
        assert_eq!(submission.responses[1].response_value, DEFAULT_RESPONSE);
        assert_eq!(submission.lifestyle_preferences.cleanliness, 80);
        assert_eq!(submission.lifestyle_preferences.social_level, 50);
        assert!(submission.lifestyle_preferences.quiet_hours);
        assert_eq!(submission.communication_style, CommunicationStyle::Diplomatic);

        let body = serde_json::to_value(&submission).unwrap();
        assert_eq!(body["lifestyle_preferences"]["socialLevel"], 50);
        assert_eq!(body["communication_style"], "diplomatic");
    }
}
