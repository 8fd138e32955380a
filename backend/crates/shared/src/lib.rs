//! Shared Kernel - vocabulary shared by every recruitment-portal crate
//!
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed identifiers for users, jobs and applications
//!
//! Only things with the same meaning in every bounded context live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
