//! Application Status Use Case

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use kernel::id::UserId;

use crate::domain::entities::UserApplicationView;
use crate::domain::repository::ApplicationRepository;
use crate::error::{RecruitmentError, RecruitmentResult};

/// All applications of one user with their current status
pub struct ListUserApplicationsUseCase<R, U>
where
    R: ApplicationRepository,
    U: UserRepository,
{
    repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> ListUserApplicationsUseCase<R, U>
where
    R: ApplicationRepository,
    U: UserRepository,
{
    pub fn new(repo: Arc<R>, user_repo: Arc<U>) -> Self {
        Self { repo, user_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> RecruitmentResult<Vec<UserApplicationView>> {
        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(RecruitmentError::UserNotFound);
        }

        self.repo.list_applications_by_user(user_id).await
    }
}
