use super::IMasterclassRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use masterclass_mailer_domain::{
    parse_timestamp, Masterclass, MasterclassType, RemindersSent, RemindersSentUpdate, ID,
};
use mongodb::{
    bson::{Bson, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoMasterclassRepo {
    collection: Collection<Document>,
}

impl MongoMasterclassRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("MasterClasses"),
        }
    }
}

/// Dotted field paths setting the flags and timestamps of the reminder classes in `update`
fn reminders_sent_fields(update: &RemindersSentUpdate) -> Document {
    let mut fields = Document::new();
    for (kind, sent_at) in update.entries() {
        let key = kind.flag_key();
        fields.insert(format!("remindersSent.{}", key), Bson::Boolean(true));
        fields.insert(
            format!("remindersSent.{}_timestamp", key),
            Bson::String(sent_at.to_rfc3339()),
        );
    }
    fields
}

#[async_trait::async_trait]
impl IMasterclassRepo for MongoMasterclassRepo {
    async fn insert(&self, masterclass: &Masterclass) -> anyhow::Result<()> {
        mongo_repo::upsert::<_, MasterclassMongo>(
            &self.collection,
            masterclass.id.as_str(),
            masterclass,
        )
        .await
    }

    async fn find(&self, masterclass_id: &ID) -> anyhow::Result<Option<Masterclass>> {
        mongo_repo::find::<_, MasterclassMongo>(&self.collection, masterclass_id.as_str()).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Masterclass>> {
        mongo_repo::find_many_by::<_, MasterclassMongo>(&self.collection, None).await
    }

    async fn mark_reminders_sent(
        &self,
        masterclass_id: &ID,
        update: &RemindersSentUpdate,
    ) -> anyhow::Result<()> {
        if update.is_empty() {
            return Ok(());
        }
        mongo_repo::set_fields(
            &self.collection,
            masterclass_id.as_str(),
            reminders_sent_fields(update),
        )
        .await
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RemindersSentMongo {
    #[serde(rename = "24h", default)]
    day_before: Option<bool>,
    #[serde(rename = "24h_timestamp", default)]
    day_before_timestamp: Option<String>,
    #[serde(rename = "2h", default)]
    two_hours_before: Option<bool>,
    #[serde(rename = "2h_timestamp", default)]
    two_hours_before_timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MasterclassMongo {
    _id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    speaker_name: Option<String>,
    #[serde(rename = "type", default)]
    masterclass_type: Option<String>,
    #[serde(default)]
    scheduled_date: Option<String>,
    #[serde(default)]
    joined_users: Option<Vec<String>>,
    #[serde(rename = "remindersSent", default)]
    reminders_sent: Option<RemindersSentMongo>,
}

impl MongoDocument<Masterclass> for MasterclassMongo {
    fn to_domain(self) -> Masterclass {
        let reminders_sent = self.reminders_sent.unwrap_or_default();
        Masterclass {
            id: ID::from(self._id),
            title: self.title.unwrap_or_default(),
            speaker_name: self.speaker_name,
            masterclass_type: MasterclassType::from(
                self.masterclass_type.as_deref().unwrap_or_default(),
            ),
            scheduled_date: self.scheduled_date.as_deref().and_then(parse_timestamp),
            joined_users: self
                .joined_users
                .unwrap_or_default()
                .into_iter()
                .map(ID::from)
                .collect(),
            reminders_sent: RemindersSent {
                day_before: reminders_sent.day_before.unwrap_or(false),
                day_before_at: reminders_sent
                    .day_before_timestamp
                    .as_deref()
                    .and_then(parse_timestamp),
                two_hours_before: reminders_sent.two_hours_before.unwrap_or(false),
                two_hours_before_at: reminders_sent
                    .two_hours_before_timestamp
                    .as_deref()
                    .and_then(parse_timestamp),
            },
        }
    }

    fn from_domain(masterclass: &Masterclass) -> Self {
        let sent = &masterclass.reminders_sent;
        Self {
            _id: masterclass.id.as_str().to_string(),
            title: Some(masterclass.title.clone()),
            speaker_name: masterclass.speaker_name.clone(),
            masterclass_type: Some(masterclass.masterclass_type.as_str().to_string()),
            scheduled_date: masterclass.scheduled_date.map(|date| date.to_rfc3339()),
            joined_users: Some(
                masterclass
                    .joined_users
                    .iter()
                    .map(|id| id.as_str().to_string())
                    .collect(),
            ),
            reminders_sent: Some(RemindersSentMongo {
                day_before: Some(sent.day_before),
                day_before_timestamp: sent.day_before_at.map(|ts| ts.to_rfc3339()),
                two_hours_before: Some(sent.two_hours_before),
                two_hours_before_timestamp: sent.two_hours_before_at.map(|ts| ts.to_rfc3339()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mongodb::bson::{self, doc};

    #[test]
    fn it_reads_platform_documents() {
        let document = doc! {
            "_id": "mc-42",
            "title": "Ownership in Practice",
            "speaker_name": "Niko",
            "type": "upcoming",
            "price": 0,
            "scheduled_date": "2024-03-11T12:00:00.000Z",
            "joined_users": ["u1", "u2"],
            "remindersSent": { "24h": true, "24h_timestamp": "2024-03-10T12:00:00+00:00" }
        };
        let raw: MasterclassMongo = bson::from_document(document).unwrap();
        let masterclass = raw.to_domain();

        assert_eq!(masterclass.id, ID::from("mc-42"));
        assert!(masterclass.is_upcoming());
        assert_eq!(
            masterclass.scheduled_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 11, 12, 0, 0).unwrap())
        );
        assert_eq!(masterclass.joined_users, vec![ID::from("u1"), ID::from("u2")]);
        assert!(masterclass.reminders_sent.day_before);
        assert!(masterclass.reminders_sent.day_before_at.is_some());
        assert!(!masterclass.reminders_sent.two_hours_before);
    }

    #[test]
    fn it_reads_sparse_documents() {
        let document = doc! { "_id": "mc-1", "joined_users": null, "scheduled_date": "soon" };
        let raw: MasterclassMongo = bson::from_document(document).unwrap();
        let masterclass = raw.to_domain();
        assert_eq!(masterclass.title, "");
        assert!(!masterclass.is_upcoming());
        assert_eq!(masterclass.scheduled_date, None);
        assert!(masterclass.joined_users.is_empty());
    }

    #[test]
    fn it_builds_dotted_reminder_fields() {
        let sent_at = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let fields = reminders_sent_fields(&RemindersSentUpdate {
            day_before: None,
            two_hours_before: Some(sent_at),
        });
        assert_eq!(
            fields,
            doc! {
                "remindersSent.2h": true,
                "remindersSent.2h_timestamp": "2024-03-10T12:00:00+00:00",
            }
        );
    }
}
