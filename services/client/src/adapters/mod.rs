pub mod auth;
pub mod coliving;
pub mod dashboard;
pub mod http;
pub mod matching;
pub mod messaging;
pub mod personality;
pub mod token;

pub use auth::RestAuthAdapter;
pub use coliving::RestColivingAdapter;
pub use dashboard::RestDashboardAdapter;
pub use http::RestClient;
pub use matching::RestMatchingAdapter;
pub use messaging::RestMessagingAdapter;
pub use personality::RestPersonalityAdapter;
pub use token::{FileTokenStore, MemoryTokenStore};
