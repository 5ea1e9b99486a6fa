mod inmemory;
mod mongo;

pub use inmemory::InMemoryMasterclassRepo;
use masterclass_mailer_domain::{Masterclass, RemindersSentUpdate, ID};
pub use mongo::MongoMasterclassRepo;

#[async_trait::async_trait]
pub trait IMasterclassRepo: Send + Sync {
    async fn insert(&self, masterclass: &Masterclass) -> anyhow::Result<()>;
    async fn find(&self, masterclass_id: &ID) -> anyhow::Result<Option<Masterclass>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Masterclass>>;
    /// Marks the reminder classes present in `update` as sent. Flags that
    /// are already set are never unset.
    async fn mark_reminders_sent(
        &self,
        masterclass_id: &ID,
        update: &RemindersSentUpdate,
    ) -> anyhow::Result<()>;
}
