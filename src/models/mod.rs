// Module exports for models

pub mod appointment;
pub mod availability;
pub mod block;
pub mod business_hour;
pub mod verdict;
pub mod viewer;

pub use appointment::{Appointment, ClientRef, ProviderRef, ServiceRef, UserRef};
pub use availability::Availability;
pub use block::Block;
pub use business_hour::BusinessHour;
pub use verdict::Verdict;
pub use viewer::{Role, Viewer};
