//! Branding studio: drives the campaign flow for a single user action.
//!
//! [`BrandingStudio`] runs the staged flow against any [`BrandingBackend`]
//! (the HTTP API or an in-process store). [`QuickCampaign`] is the
//! one-shot variant with no store at all.

pub mod backend;
pub mod standalone;
pub mod studio;

pub use backend::{BrandingBackend, HttpBackend, LocalBackend, LogoUpload};
pub use standalone::{ImageStyle, QuickBrief, QuickCampaign, QuickOutput};
pub use studio::{BrandingOutcome, BrandingRequest, BrandingStudio};
