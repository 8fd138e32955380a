//! Value Object Module

pub mod email;
pub mod gender;
pub mod person_name;
pub mod phone;
pub mod user_password;
pub mod user_role;
pub mod verification_purpose;
