mod inmemory;
mod mongo;

pub use inmemory::InMemoryUserProfileRepo;
use masterclass_mailer_domain::{UserProfile, ID};
pub use mongo::MongoUserProfileRepo;

#[async_trait::async_trait]
pub trait IUserProfileRepo: Send + Sync {
    async fn insert(&self, profile: &UserProfile) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserProfile>>;
}
