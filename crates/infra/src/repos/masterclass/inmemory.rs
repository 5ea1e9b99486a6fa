use super::IMasterclassRepo;
use crate::repos::shared::inmemory_repo::*;
use masterclass_mailer_domain::{Masterclass, RemindersSentUpdate, ID};

pub struct InMemoryMasterclassRepo {
    masterclasses: std::sync::Mutex<Vec<Masterclass>>,
}

impl InMemoryMasterclassRepo {
    pub fn new() -> Self {
        Self {
            masterclasses: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IMasterclassRepo for InMemoryMasterclassRepo {
    async fn insert(&self, masterclass: &Masterclass) -> anyhow::Result<()> {
        insert(masterclass, &self.masterclasses);
        Ok(())
    }

    async fn find(&self, masterclass_id: &ID) -> anyhow::Result<Option<Masterclass>> {
        Ok(find(masterclass_id, &self.masterclasses))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Masterclass>> {
        Ok(find_all(&self.masterclasses))
    }

    async fn mark_reminders_sent(
        &self,
        masterclass_id: &ID,
        sent_update: &RemindersSentUpdate,
    ) -> anyhow::Result<()> {
        let found = update(masterclass_id, &self.masterclasses, |masterclass| {
            masterclass.apply_reminders_update(sent_update)
        });
        if !found {
            return Err(anyhow::anyhow!(
                "No masterclass with id: {}",
                masterclass_id
            ));
        }
        Ok(())
    }
}
