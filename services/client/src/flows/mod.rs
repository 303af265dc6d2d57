//! services/client/src/flows/mod.rs
//!
//! The flows behind each screen. A flow validates locally, makes its backend call,
//! folds the answer into the application state, raises a notice, and tells the
//! caller where to go next.

pub mod assessment;
pub mod auth;
pub mod dashboard;
pub mod discover;
pub mod guard;
pub mod messaging;
pub mod notify;
pub mod profile;
pub mod space;

pub use assessment::AssessmentFlow;
pub use dashboard::DashboardController;
pub use discover::{DiscoverFeed, RequestsInbox};
pub use guard::ActionGuard;
pub use messaging::Conversation;
pub use notify::{ConsoleNotifier, Notice, Notifier, RecordingNotifier};
pub use profile::ProfileFlow;
pub use auth::RegistrationFlow;
pub use space::SpaceFlow;

use pairpad_core::domain::RecordId;
use std::fmt;

/// Where the user lands after a flow finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Dashboard,
    Assessment,
    Matches,
    Conversation(RecordId),
    Space(RecordId),
    SharedDashboard(RecordId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Assessment => write!(f, "/personality/assessment"),
            Route::Matches => write!(f, "/dashboard/matches"),
            Route::Conversation(id) => write!(f, "/dashboard/messages/{}", id),
            Route::Space(id) => write!(f, "/dashboard/coliving/{}", id),
            Route::SharedDashboard(id) => write!(f, "/dashboard/shared/{}", id),
        }
    }
}
