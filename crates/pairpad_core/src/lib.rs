pub mod coliving;
pub mod domain;
pub mod forms;
pub mod ports;
pub mod scoring;
pub mod validation;
pub mod wizard;

pub use domain::{
    CommunicationStyle, LifestylePreferences, Match, MatchRequest, MatchStatus, Message,
    OnboardingProgress, PersonalityProfile, RecordId, Role, ScoreBreakdown, TraitVector, User,
    VerificationStatus,
};
pub use ports::{
    AuthService, ColivingService, MatchingService, MessagingService, PersonalityService,
    PortError, PortResult, SharedDashboardService, StateStorage, TokenStore,
};
pub use scoring::{compatibility_score, resolve_score, CompatibilityScore, ScoreSource};
pub use validation::FieldErrors;
pub use wizard::{MultiStepForm, Step, WizardError};
