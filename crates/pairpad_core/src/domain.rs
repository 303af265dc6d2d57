//! crates/pairpad_core/src/domain.rs
//!
//! Defines the core records exchanged with the PairPad backend: users, personality
//! profiles, matches, messages and onboarding progress.
//!
//! The backend mixes camelCase and snake_case keys and sometimes sends primary keys
//! as strings, so the serde attributes here accept both spellings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Identifiers and serde helpers
//=========================================================================================

/// A backend primary key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Ok(RecordId(value)),
            Raw::Text(text) => text
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid record id '{}'", text))),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(RecordId)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId(value)
    }
}

/// Treats `null`, a missing key and a blank string as `None`.
///
/// Django serializes unset `CharField` choices as `""`, which would otherwise
/// fail to decode into the enums below.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(de::Error::custom),
    }
}

fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

//=========================================================================================
// Personality
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    Direct,
    #[default]
    Diplomatic,
    Casual,
    Formal,
}

impl FromStr for CommunicationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "diplomatic" => Ok(Self::Diplomatic),
            "casual" => Ok(Self::Casual),
            "formal" => Ok(Self::Formal),
            other => Err(format!("unknown communication style '{}'", other)),
        }
    }
}

/// Lifestyle answers embedded in a personality profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLifestyle", rename_all = "camelCase")]
pub struct LifestylePreferences {
    pub cleanliness: u8,
    pub social_level: u8,
    pub quiet_hours: bool,
    pub pets: bool,
    pub smoking: bool,
}

impl Default for LifestylePreferences {
    fn default() -> Self {
        Self {
            cleanliness: 50,
            social_level: 50,
            quiet_hours: false,
            pets: false,
            smoking: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLifestyle {
    #[serde(default = "half", alias = "cleanliness_level")]
    cleanliness: i64,
    #[serde(default = "half", alias = "social_level")]
    social_level: i64,
    #[serde(default, alias = "quiet_hours")]
    quiet_hours: bool,
    #[serde(default, alias = "pets_allowed")]
    pets: bool,
    #[serde(default, alias = "smoking_allowed")]
    smoking: bool,
}

fn half() -> i64 {
    50
}

impl From<RawLifestyle> for LifestylePreferences {
    fn from(raw: RawLifestyle) -> Self {
        Self {
            cleanliness: clamp_percent(raw.cleanliness),
            social_level: clamp_percent(raw.social_level),
            quiet_hours: raw.quiet_hours,
            pets: raw.pets,
            smoking: raw.smoking,
        }
    }
}

/// The five Big-Five trait scores, each in [0,100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraitVector {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
}

impl TraitVector {
    pub fn new(
        openness: u8,
        conscientiousness: u8,
        extraversion: u8,
        agreeableness: u8,
        neuroticism: u8,
    ) -> Self {
        Self {
            openness,
            conscientiousness,
            extraversion,
            agreeableness,
            neuroticism,
        }
    }

    /// All five traits set to the same value.
    pub fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub fn as_array(&self) -> [u8; 5] {
        [
            self.openness,
            self.conscientiousness,
            self.extraversion,
            self.agreeableness,
            self.neuroticism,
        ]
    }
}

/// A user's personality profile as produced by the assessment.
///
/// Numeric fields are clamped to [0,100] whenever a profile is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPersonalityProfile")]
pub struct PersonalityProfile {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
    #[serde(rename = "lifestylePreferences")]
    pub lifestyle_preferences: LifestylePreferences,
    #[serde(rename = "communicationStyle")]
    pub communication_style: CommunicationStyle,
}

#[derive(Deserialize)]
struct RawPersonalityProfile {
    #[serde(default = "half")]
    openness: i64,
    #[serde(default = "half")]
    conscientiousness: i64,
    #[serde(default = "half")]
    extraversion: i64,
    #[serde(default = "half")]
    agreeableness: i64,
    #[serde(default = "half")]
    neuroticism: i64,
    #[serde(default, rename = "lifestylePreferences", alias = "lifestyle_preferences")]
    lifestyle_preferences: Option<LifestylePreferences>,
    #[serde(
        default,
        rename = "communicationStyle",
        alias = "communication_style",
        deserialize_with = "blank_as_none"
    )]
    communication_style: Option<CommunicationStyle>,
}

impl From<RawPersonalityProfile> for PersonalityProfile {
    fn from(raw: RawPersonalityProfile) -> Self {
        Self {
            openness: clamp_percent(raw.openness),
            conscientiousness: clamp_percent(raw.conscientiousness),
            extraversion: clamp_percent(raw.extraversion),
            agreeableness: clamp_percent(raw.agreeableness),
            neuroticism: clamp_percent(raw.neuroticism),
            lifestyle_preferences: raw.lifestyle_preferences.unwrap_or_default(),
            communication_style: raw.communication_style.unwrap_or_default(),
        }
    }
}

impl PersonalityProfile {
    pub fn traits(&self) -> TraitVector {
        TraitVector {
            openness: self.openness,
            conscientiousness: self.conscientiousness,
            extraversion: self.extraversion,
            agreeableness: self.agreeableness,
            neuroticism: self.neuroticism,
        }
    }

    /// Returns a copy with every numeric field forced into [0,100].
    pub fn clamped(&self) -> Self {
        let clamp = |v: u8| v.min(100);
        Self {
            openness: clamp(self.openness),
            conscientiousness: clamp(self.conscientiousness),
            extraversion: clamp(self.extraversion),
            agreeableness: clamp(self.agreeableness),
            neuroticism: clamp(self.neuroticism),
            lifestyle_preferences: LifestylePreferences {
                cleanliness: clamp(self.lifestyle_preferences.cleanliness),
                social_level: clamp(self.lifestyle_preferences.social_level),
                ..self.lifestyle_preferences
            },
            communication_style: self.communication_style,
        }
    }
}

//=========================================================================================
// Users
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Professional,
    Admin,
    Coordinator,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "professional" => Ok(Self::Professional),
            "admin" => Ok(Self::Admin),
            "coordinator" => Ok(Self::Coordinator),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaseDuration {
    #[serde(rename = "3_months")]
    ThreeMonths,
    #[serde(rename = "6_months")]
    SixMonths,
    #[serde(rename = "12_months")]
    TwelveMonths,
    #[serde(rename = "18_months")]
    EighteenMonths,
    #[serde(rename = "24_months")]
    TwentyFourMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingPreference {
    #[default]
    NoPreference,
    Smoker,
    NonSmoker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetsPreference {
    #[default]
    NoPreference,
    HasPets,
    NoPets,
    LovesPets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestsPreference {
    Rarely,
    #[default]
    Occasionally,
    Frequently,
    NoGuests,
}

/// Weighted score components returned by the backend's matching algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub lifestyle: u8,
    pub basic_lifestyle: u8,
    pub personality: u8,
    pub communication: u8,
    pub location: u8,
}

/// A PairPad account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub username: String,
    pub role: Role,
    #[serde(
        default,
        rename = "personalityProfile",
        alias = "personality_profile",
        skip_serializing_if = "Option::is_none"
    )]
    pub personality_profile: Option<PersonalityProfile>,
    #[serde(default, rename = "verificationStatus", alias = "verification_status")]
    pub verification_status: VerificationStatus,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "updatedAt", alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,

    // Personal information
    #[serde(default, deserialize_with = "blank_as_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub last_name: Option<String>,
    #[serde(default, rename = "fullName", alias = "full_name", deserialize_with = "blank_as_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone_number: Option<String>,

    // Professional information
    #[serde(default, deserialize_with = "blank_as_none")]
    pub occupation: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub education: Option<String>,

    // Location & housing preferences
    #[serde(default, deserialize_with = "blank_as_none")]
    pub current_city: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub preferred_city: Option<String>,
    #[serde(default)]
    pub budget_min: Option<u32>,
    #[serde(default)]
    pub budget_max: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub lease_duration: Option<LeaseDuration>,

    // Lifestyle preferences
    #[serde(default, deserialize_with = "blank_as_none")]
    pub smoking_preference: Option<SmokingPreference>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub pets_preference: Option<PetsPreference>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub guests_preference: Option<GuestsPreference>,
    #[serde(default)]
    pub cleanliness_level: Option<u8>,
    #[serde(default)]
    pub social_level: Option<u8>,
    #[serde(default)]
    pub quiet_hours: Option<bool>,

    // Profile information
    #[serde(default, deserialize_with = "blank_as_none")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub interests: Option<String>,

    // Added by the matching endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
}

impl User {
    /// The name shown in listings: full name when known, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// A partial update to the profile, as sent to `PATCH /auth/profile/`.
///
/// Only `Some` fields are serialized; an outer `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_duration: Option<LeaseDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoking_preference: Option<SmokingPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pets_preference: Option<PetsPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests_preference: Option<GuestsPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanliness_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "personalityProfile")]
    pub personality_profile: Option<PersonalityProfile>,
}

impl ProfileUpdate {
    /// Merges the update into a locally cached user (the store's partial update).
    pub fn apply_to(&self, user: &mut User) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }
        fn set_nullable<T: Clone>(target: &mut Option<T>, value: &Option<Option<T>>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut user.first_name, &self.first_name);
        set(&mut user.last_name, &self.last_name);
        set_nullable(&mut user.date_of_birth, &self.date_of_birth);
        set(&mut user.gender, &self.gender);
        set(&mut user.phone_number, &self.phone_number);
        set(&mut user.occupation, &self.occupation);
        set(&mut user.education, &self.education);
        set(&mut user.current_city, &self.current_city);
        set(&mut user.preferred_city, &self.preferred_city);
        set_nullable(&mut user.budget_min, &self.budget_min);
        set_nullable(&mut user.budget_max, &self.budget_max);
        set_nullable(&mut user.move_in_date, &self.move_in_date);
        set(&mut user.lease_duration, &self.lease_duration);
        set(&mut user.smoking_preference, &self.smoking_preference);
        set(&mut user.pets_preference, &self.pets_preference);
        set(&mut user.guests_preference, &self.guests_preference);
        set(&mut user.cleanliness_level, &self.cleanliness_level);
        set(&mut user.social_level, &self.social_level);
        set(&mut user.quiet_hours, &self.quiet_hours);
        set(&mut user.bio, &self.bio);
        set(&mut user.interests, &self.interests);
        set(&mut user.personality_profile, &self.personality_profile);
    }
}

//=========================================================================================
// Matching
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
    Mutual,
}

/// A pair relationship between the current user and another user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: RecordId,
    #[serde(rename = "user1Id", alias = "user1_id")]
    pub user1_id: RecordId,
    #[serde(rename = "user2Id", alias = "user2_id")]
    pub user2_id: RecordId,
    #[serde(rename = "compatibilityScore", alias = "compatibility_score")]
    pub compatibility_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
    pub status: MatchStatus,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "otherUser",
        alias = "other_user",
        skip_serializing_if = "Option::is_none"
    )]
    pub other_user: Option<User>,
}

impl Match {
    /// The id of the participant that is not `me`.
    pub fn other_user_id(&self, me: RecordId) -> RecordId {
        if self.user1_id == me {
            self.user2_id
        } else {
            self.user1_id
        }
    }
}

/// An incoming like that the current user has not answered yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub id: RecordId,
    #[serde(rename = "requestingUser", alias = "requesting_user")]
    pub requesting_user: User,
    #[serde(rename = "compatibilityScore", alias = "compatibility_score")]
    pub compatibility_score: f64,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestResponse {
    Accept,
    Decline,
}

/// What the backend reports after a like or an accepted request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub match_id: Option<RecordId>,
    #[serde(default)]
    pub compatibility_score: Option<f64>,
}

impl LikeOutcome {
    /// A match exists once the backend hands back its id.
    pub fn is_mutual(&self) -> bool {
        self.match_id.is_some()
    }
}

/// The backend's detailed compatibility with one other user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    #[serde(rename = "compatibilityScore", alias = "compatibility_score")]
    pub compatibility_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

//=========================================================================================
// Messaging
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: RecordId,
    #[serde(default, rename = "senderId", alias = "sender_id", alias = "sender")]
    pub sender: Option<String>,
    #[serde(default, rename = "receiverId", alias = "receiver_id", alias = "receiver")]
    pub receiver: Option<String>,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, rename = "readStatus", alias = "read_status", alias = "is_read")]
    pub read_status: bool,
    #[serde(default, rename = "matchId", alias = "match_id")]
    pub match_id: Option<RecordId>,
}

//=========================================================================================
// Onboarding
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStep {
    pub step: String,
    pub title: String,
    pub url: String,
}

/// Server-tracked registration and assessment checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProgress {
    pub id: RecordId,
    #[serde(default)]
    pub status: OnboardingStatus,
    #[serde(default)]
    pub status_display: String,
    #[serde(default)]
    pub overall_progress: u8,
    #[serde(default)]
    pub registration_progress: u8,
    #[serde(default)]
    pub assessment_progress: u8,
    #[serde(default)]
    pub completed_steps_count: u32,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default)]
    pub next_step: Option<NextStep>,
    #[serde(default)]
    pub profile_completeness_score: u8,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub account_created: bool,
    #[serde(default)]
    pub personal_info_completed: bool,
    #[serde(default)]
    pub location_preferences_completed: bool,
    #[serde(default)]
    pub lifestyle_preferences_completed: bool,
    #[serde(default)]
    pub assessment_started: bool,
    #[serde(default)]
    pub assessment_completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

//=========================================================================================
// Auth payloads
//=========================================================================================

/// Body of `POST /auth/register/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub role: Role,
}

/// A user together with the bearer token the backend issued for them.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_user() -> serde_json::Value {
        json!({
            "id": 7,
            "email": "ana@example.com",
            "username": "ana",
            "role": "student",
            "verificationStatus": "verified",
            "gender": "",
            "date_of_birth": null,
            "budget_min": 400,
            "budget_max": 900
        })
    }

    #[test]
    fn record_id_accepts_strings_and_numbers() {
        let a: RecordId = serde_json::from_value(json!(12)).unwrap();
        let b: RecordId = serde_json::from_value(json!("12")).unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_value::<RecordId>(json!("twelve")).is_err());
    }

    #[test]
    fn blank_choice_fields_decode_as_none() {
        let user: User = serde_json::from_value(minimal_user()).unwrap();
        assert_eq!(user.gender, None);
        assert_eq!(user.date_of_birth, None);
        assert_eq!(user.verification_status, VerificationStatus::Verified);
        assert_eq!(user.budget_max, Some(900));
    }

    #[test]
    fn profile_fields_are_clamped_on_decode() {
        let profile: PersonalityProfile = serde_json::from_value(json!({
            "openness": 140,
            "conscientiousness": -5,
            "extraversion": 40,
            "agreeableness": 70,
            "neuroticism": 30,
            "lifestylePreferences": {
                "cleanliness": 250,
                "socialLevel": 60,
                "quietHours": true,
                "pets": false,
                "smoking": false
            },
            "communicationStyle": "direct"
        }))
        .unwrap();

        assert_eq!(profile.openness, 100);
        assert_eq!(profile.conscientiousness, 0);
        assert_eq!(profile.lifestyle_preferences.cleanliness, 100);
        assert!(profile.lifestyle_preferences.quiet_hours);
        assert_eq!(profile.communication_style, CommunicationStyle::Direct);
    }

    #[test]
    fn profile_survives_its_own_serialization() {
        let profile = PersonalityProfile {
            openness: 80,
            conscientiousness: 60,
            extraversion: 40,
            agreeableness: 70,
            neuroticism: 30,
            lifestyle_preferences: LifestylePreferences::default(),
            communication_style: CommunicationStyle::Casual,
        };
        let encoded = serde_json::to_value(&profile).unwrap();
        assert_eq!(encoded["lifestylePreferences"]["socialLevel"], 50);
        let decoded: PersonalityProfile = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn profile_update_merges_only_present_fields() {
        let mut user: User = serde_json::from_value(minimal_user()).unwrap();
        let update = ProfileUpdate {
            bio: Some("Early riser".into()),
            budget_min: Some(None),
            ..Default::default()
        };
        update.apply_to(&mut user);

        assert_eq!(user.bio.as_deref(), Some("Early riser"));
        assert_eq!(user.budget_min, None);
        assert_eq!(user.budget_max, Some(900));
        assert_eq!(user.username, "ana");
    }

    #[test]
    fn match_decodes_from_either_key_style() {
        let m: Match = serde_json::from_value(json!({
            "id": "3",
            "user1Id": "1",
            "user2Id": "9",
            "compatibilityScore": 82.0,
            "status": "mutual",
            "createdAt": "2024-01-20T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(m.other_user_id(RecordId(1)), RecordId(9));
        assert_eq!(m.status, MatchStatus::Mutual);
    }
}
