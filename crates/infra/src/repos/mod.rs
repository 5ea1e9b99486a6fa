mod masterclass;
mod shared;
mod user_profile;

pub use masterclass::IMasterclassRepo;
use masterclass::{InMemoryMasterclassRepo, MongoMasterclassRepo};
use mongodb::{bson::doc, options::ClientOptions, Client};
use std::sync::Arc;
use tracing::info;
pub use user_profile::IUserProfileRepo;
use user_profile::{InMemoryUserProfileRepo, MongoUserProfileRepo};

#[derive(Clone)]
pub struct Repos {
    pub masterclasses: Arc<dyn IMasterclassRepo>,
    pub user_profiles: Arc<dyn IUserProfileRepo>,
}

impl Repos {
    pub async fn create_mongodb(connection_string: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            masterclasses: Arc::new(MongoMasterclassRepo::new(&db)),
            user_profiles: Arc::new(MongoUserProfileRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            masterclasses: Arc::new(InMemoryMasterclassRepo::new()),
            user_profiles: Arc::new(InMemoryUserProfileRepo::new()),
        }
    }
}
