//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::RecruitmentAppState;
pub use router::{admin_router, application_status_router, recruitment_router};
