use super::IUserProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use masterclass_mailer_domain::{UserProfile, ID};

pub struct InMemoryUserProfileRepo {
    profiles: std::sync::Mutex<Vec<UserProfile>>,
}

impl InMemoryUserProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserProfileRepo for InMemoryUserProfileRepo {
    async fn insert(&self, profile: &UserProfile) -> anyhow::Result<()> {
        insert(profile, &self.profiles);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserProfile>> {
        Ok(find(user_id, &self.profiles))
    }
}
