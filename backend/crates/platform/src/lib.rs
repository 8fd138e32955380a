//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random digits, SHA-256, constant-time compare)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - TTL key/value cache (Redis or in-memory)
//! - Outgoing mail (SMTP or in-memory outbox)

pub mod cache;
pub mod crypto;
pub mod mail;
pub mod password;
