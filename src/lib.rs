pub mod clock;
pub mod config;
pub mod feedback;
pub mod gatekeeper;
pub mod metrics;
pub mod models;
pub mod nav;
pub mod rate_limit;
pub mod session;
pub mod spam;
pub mod transport;
pub mod validation;

pub use config::{GateConfig, GreetingPolicy};
pub use gatekeeper::{Gatekeeper, Outcome, RejectReason, evaluate};
pub use models::{Field, FormFields, SubmissionAttempt};
pub use rate_limit::RateWindow;
pub use session::{DisplayUpdate, Host, HostEvent, PageSession};
