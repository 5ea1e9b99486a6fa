use super::IUserProfileRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use masterclass_mailer_domain::{UserProfile, ID};
use mongodb::{bson::Document, Collection, Database};
use serde::{Deserialize, Serialize};

pub struct MongoUserProfileRepo {
    collection: Collection<Document>,
}

impl MongoUserProfileRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("user_profiles"),
        }
    }
}

#[async_trait::async_trait]
impl IUserProfileRepo for MongoUserProfileRepo {
    async fn insert(&self, profile: &UserProfile) -> anyhow::Result<()> {
        mongo_repo::upsert::<_, UserProfileMongo>(&self.collection, profile.id.as_str(), profile)
            .await
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<UserProfile>> {
        mongo_repo::find::<_, UserProfileMongo>(&self.collection, user_id.as_str()).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserProfileMongo {
    _id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
}

impl MongoDocument<UserProfile> for UserProfileMongo {
    fn to_domain(self) -> UserProfile {
        // The platform has stored the name under different keys over time
        let name = [self.name, self.display_name, self.full_name]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty());

        UserProfile {
            id: ID::from(self._id),
            email: self.email,
            name,
        }
    }

    fn from_domain(profile: &UserProfile) -> Self {
        Self {
            _id: profile.id.as_str().to_string(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            display_name: None,
            full_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    fn to_domain(document: Document) -> UserProfile {
        bson::from_document::<UserProfileMongo>(document)
            .unwrap()
            .to_domain()
    }

    #[test]
    fn it_resolves_name_from_fallback_keys() {
        let profile = to_domain(doc! { "_id": "u1", "email": "a@b.c", "name": "Ada" });
        assert_eq!(profile.display_name(), "Ada");

        let profile = to_domain(doc! { "_id": "u1", "name": "", "displayName": "Ada L" });
        assert_eq!(profile.display_name(), "Ada L");

        let profile = to_domain(doc! { "_id": "u1", "full_name": "Ada Lovelace" });
        assert_eq!(profile.display_name(), "Ada Lovelace");
        assert_eq!(profile.contact_email(), None);

        let profile = to_domain(doc! { "_id": "u1" });
        assert_eq!(profile.display_name(), "");
    }
}
