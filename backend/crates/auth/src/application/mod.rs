//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod forget_password;
pub mod profile;
pub mod sign_in;
pub mod sign_up;
pub mod token;
pub mod verification;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use forget_password::ForgetPasswordUseCase;
pub use profile::{
    DeleteAccountUseCase, GetProfileUseCase, RequestDeletionCodeUseCase, UpdateProfileInput,
    UpdateProfileUseCase, authorize_profile_access,
};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{RequestSignUpCodeUseCase, SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{AuthenticatedUser, Claims, IssuedToken, TokenService};
pub use verification::VerificationCodeService;
