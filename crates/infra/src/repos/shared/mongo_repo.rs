use anyhow::Result;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{self, doc, Document},
    Collection,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
}

pub fn get_id_filter(id: &str) -> Document {
    doc! {
        "_id": id
    }
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    Ok(bson::to_document(&raw)?)
}

/// Inserts the entity or replaces the document with the same id
pub async fn upsert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &str,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    let options = mongodb::options::ReplaceOptions::builder()
        .upsert(true)
        .build();
    collection
        .replace_one(get_id_filter(id), doc, options)
        .await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &str,
) -> Result<Option<E>> {
    find_one_by::<E, D>(collection, get_id_filter(id)).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Option<E>> {
    match collection.find_one(filter, None).await? {
        Some(doc) => Ok(Some(persistence_to_entity::<E, D>(doc)?)),
        None => Ok(None),
    }
}

/// Reads every document matching the filter. Documents that can not be
/// deserialized are logged and left out instead of failing the whole read.
pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Option<Document>,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, None).await?;
    let documents: Vec<Document> = cursor.try_collect().await?;

    let mut entities = Vec::with_capacity(documents.len());
    for document in documents {
        let id = document
            .get("_id")
            .map(|id| id.to_string())
            .unwrap_or_default();
        match persistence_to_entity::<E, D>(document) {
            Ok(entity) => entities.push(entity),
            Err(e) => {
                warn!(document_id = %id, "Skipping malformed document in {}: {:?}", collection.name(), e);
            }
        }
    }
    Ok(entities)
}

/// Sets the given fields on the document with the given id.
/// Fails if there is no document with that id.
pub async fn set_fields(
    collection: &Collection<Document>,
    id: &str,
    fields: Document,
) -> Result<()> {
    let res = collection
        .update_one(get_id_filter(id), doc! { "$set": fields }, None)
        .await?;
    if res.matched_count == 0 {
        return Err(anyhow::anyhow!(
            "No document with id: {} in {}",
            id,
            collection.name()
        ));
    }
    Ok(())
}
