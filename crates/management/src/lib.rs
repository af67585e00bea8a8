//! Campaign management backend: store, logo uploads and REST handlers.
//!
//! Campaign records live in a DashMap for the lifetime of the process.

pub mod handlers;
pub mod router;
pub mod store;
pub mod uploads;

pub use handlers::ManagementState;
pub use router::management_router;
pub use store::CampaignStore;
pub use uploads::LogoStorage;
