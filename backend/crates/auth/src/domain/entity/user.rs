//! User Entity
//!
//! Identity record owned by the Credential Store.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, gender::Gender, person_name::PersonName, phone::Phone,
    user_password::UserPassword, user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: PersonName,
    pub gender: Gender,
    /// Unique, lowercased
    pub email: Email,
    /// Unique; receives nothing directly but keys account-deletion codes
    pub phone: Phone,
    pub password: UserPassword,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: PersonName,
        gender: Gender,
        email: Email,
        phone: Phone,
        password: UserPassword,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            gender,
            email,
            phone,
            password,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    pub fn set_phone(&mut self, phone: Phone) {
        self.phone = phone;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
