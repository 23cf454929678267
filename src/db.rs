use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{malformed_payload_error, not_found_error, Error};

pub const CLAIMS: &str = "claims";
pub const MAINTENANCE: &str = "maintenance";
pub const RECEIPTS: &str = "receipts";
pub const ROUTES: &str = "routes";

/// A stored record: the caller's data plus the identifier and creation time
/// the store assigned.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

#[async_trait]
pub trait DocumentStore {
    async fn insert(&self, collection: &str, data: Value) -> Result<Document<Value>, Error>;
    async fn find(&self, collection: &str, id: Uuid) -> Result<Document<Value>, Error>;
}

pub type DynStore = dyn DocumentStore + Send + Sync;

pub async fn insert_record<T: Serialize>(
    store: &DynStore,
    collection: &str,
    record: T,
) -> Result<Document<T>, Error> {
    let value = serde_json::to_value(&record)?;
    if !value.is_object() {
        return Err(malformed_payload_error("stored records must be JSON objects"));
    }

    let Document { id, created_at, .. } = store.insert(collection, value).await?;

    Ok(Document {
        id,
        created_at,
        data: record,
    })
}

pub async fn find_record<T: DeserializeOwned>(
    store: &DynStore,
    collection: &str,
    id: Uuid,
) -> Result<Document<T>, Error> {
    let Document {
        id,
        created_at,
        data,
    } = store.find(collection, id).await?;

    Ok(Document {
        id,
        created_at,
        data: serde_json::from_value(data)?,
    })
}

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip(db_uri))]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        pool.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                id UUID PRIMARY KEY,
                collection VARCHAR NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .await?;
        pool.execute(
            "CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection, id)",
        )
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    #[tracing::instrument(skip(self, data))]
    async fn insert(&self, collection: &str, data: Value) -> Result<Document<Value>, Error> {
        let id = Uuid::new_v4();
        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_one(
                sqlx::query(
                    "INSERT INTO documents (id, collection, data) VALUES ($1, $2, $3) RETURNING created_at",
                )
                .bind(&id)
                .bind(collection)
                .bind(Json(&data)),
            )
            .await?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Document {
            id,
            created_at,
            data,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, collection: &str, id: Uuid) -> Result<Document<Value>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(
                sqlx::query(
                    "SELECT data, created_at FROM documents WHERE collection = $1 AND id = $2",
                )
                .bind(collection)
                .bind(&id),
            )
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error(collection, &id.to_string()))?;
        let Json(data) = result.try_get("data")?;
        let created_at = result.try_get("created_at")?;

        Ok(Document {
            id,
            created_at,
            data,
        })
    }
}

/// Process-local store for running without a database. Contents are lost on
/// restart.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<Uuid, Document<Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, data: Value) -> Result<Document<Value>, Error> {
        let document = Document {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            data,
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(document.id, document.clone());

        Ok(document)
    }

    async fn find(&self, collection: &str, id: Uuid) -> Result<Document<Value>, Error> {
        self.collections
            .read()
            .await
            .get(collection)
            .and_then(|documents| documents.get(&id))
            .cloned()
            .ok_or_else(|| not_found_error(collection, &id.to_string()))
    }
}
