//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRecruitmentRepository;
pub use postgres::PgRecruitmentRepository;
