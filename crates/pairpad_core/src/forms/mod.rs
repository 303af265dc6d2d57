pub mod assessment;
pub mod dashboard;
pub mod profile;
pub mod registration;
pub mod space;

pub use assessment::{AssessmentForm, AssessmentQuestion, AssessmentSubmission, BigFiveTrait};
pub use profile::ProfileForm;
pub use registration::RegistrationForm;
pub use space::SpaceForm;
