//! Per-user document store over SQLite.
//!
//! Documents are JSON bodies addressed by (collection, doc id) under one
//! user's namespace. Subcollections use path-shaped collection names such
//! as `dailyData/2025-01-15/foods`. Collections can be observed through
//! snapshot subscriptions: every mutation pushes the full ordered
//! collection state to subscribers, not incremental diffs.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Usuário não autenticado")]
    NotAuthenticated,
    #[error("Documento não encontrado: {collection}/{doc_id}")]
    NotFound { collection: String, doc_id: String },
    #[error("Erro de banco de dados: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One operation in a batch write.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Full replace (or create when the document does not exist).
    Set {
        collection: String,
        doc_id: Option<String>,
        data: Value,
    },
    /// Merge into an existing document; fails the batch if it is missing.
    Update {
        collection: String,
        doc_id: String,
        data: Value,
    },
    Delete {
        collection: String,
        doc_id: String,
    },
}

impl WriteOp {
    fn collection(&self) -> &str {
        match self {
            WriteOp::Set { collection, .. } => collection,
            WriteOp::Update { collection, .. } => collection,
            WriteOp::Delete { collection, .. } => collection,
        }
    }
}

struct Subscription {
    sender: broadcast::Sender<Vec<Value>>,
    order_by: Option<String>,
}

/// Initializes the connection pool and runs migrations.
pub async fn init_db(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| sqlx::Error::Io(e))?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub struct DocumentStore {
    pool: SqlitePool,
    user_id: Option<String>,
    last_error: Mutex<Option<String>>,
    subscriptions: Mutex<HashMap<String, Subscription>>,
}

impl DocumentStore {
    pub fn new(pool: SqlitePool, user_id: Option<String>) -> Self {
        Self {
            pool,
            user_id,
            last_error: Mutex::new(None),
            subscriptions: Mutex::new(HashMap::new()),
        }
    }

    /// The most recent operation failure, for a global error banner.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }

    #[cfg(test)]
    pub(crate) fn pool_for_tests(&self) -> SqlitePool {
        self.pool.clone()
    }

    fn require_user(&self) -> Result<&str, StoreError> {
        self.user_id.as_deref().ok_or(StoreError::NotAuthenticated)
    }

    /// Records the failure in `last_error` and passes the result through.
    fn track<T>(&self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if let Err(e) = &result {
            tracing::warn!("store operation failed: {e}");
            *self.last_error.lock().unwrap() = Some(e.to_string());
        }
        result
    }

    /// Fetches one document; `None` when absent. The returned object has
    /// `id`, `createdAt` and `updatedAt` attached and every
    /// Firestore-shaped timestamp normalized to an RFC3339 string.
    pub async fn get_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let result = self.get_document_inner(collection, doc_id).await;
        self.track(result)
    }

    async fn get_document_inner(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let user_id = self.require_user()?;

        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT body, created_at, updated_at FROM documents \
             WHERE user_id = ? AND collection = ? AND doc_id = ?",
        )
        .bind(user_id)
        .bind(collection)
        .bind(doc_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((body, created_at, updated_at)) => {
                Ok(Some(hydrate(doc_id, &body, &created_at, &updated_at)?))
            }
            None => Ok(None),
        }
    }

    /// Upserts a document. Null fields are stripped; object fields merge
    /// into any existing body rather than overwriting it. Returns the
    /// document id (generated when not supplied).
    pub async fn save_document(
        &self,
        collection: &str,
        data: Value,
        doc_id: Option<&str>,
    ) -> Result<String, StoreError> {
        let result = self.save_document_inner(collection, data, doc_id).await;
        self.track(result)
    }

    async fn save_document_inner(
        &self,
        collection: &str,
        data: Value,
        doc_id: Option<&str>,
    ) -> Result<String, StoreError> {
        let user_id = self.require_user()?.to_string();
        let doc_id = doc_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let clean = strip_nulls(data);
        let now = Utc::now().to_rfc3339();

        let existing: Option<(String,)> = sqlx::query_as(
            "SELECT body FROM documents WHERE user_id = ? AND collection = ? AND doc_id = ?",
        )
        .bind(&user_id)
        .bind(collection)
        .bind(&doc_id)
        .fetch_optional(&self.pool)
        .await?;

        match existing {
            Some((body,)) => {
                let merged = merge_objects(serde_json::from_str(&body)?, clean);
                sqlx::query(
                    "UPDATE documents SET body = ?, updated_at = ? \
                     WHERE user_id = ? AND collection = ? AND doc_id = ?",
                )
                .bind(serde_json::to_string(&merged)?)
                .bind(&now)
                .bind(&user_id)
                .bind(collection)
                .bind(&doc_id)
                .execute(&self.pool)
                .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO documents (user_id, collection, doc_id, body, created_at, updated_at) \
                     VALUES (?, ?, ?, ?, ?, ?)",
                )
                .bind(&user_id)
                .bind(collection)
                .bind(&doc_id)
                .bind(serde_json::to_string(&clean)?)
                .bind(&now)
                .bind(&now)
                .execute(&self.pool)
                .await?;
            }
        }

        self.publish(collection).await;
        Ok(doc_id)
    }

    pub async fn delete_document(&self, collection: &str, doc_id: &str) -> Result<(), StoreError> {
        let result = self.delete_document_inner(collection, doc_id).await;
        self.track(result)
    }

    async fn delete_document_inner(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<(), StoreError> {
        let user_id = self.require_user()?;

        sqlx::query("DELETE FROM documents WHERE user_id = ? AND collection = ? AND doc_id = ?")
            .bind(user_id)
            .bind(collection)
            .bind(doc_id)
            .execute(&self.pool)
            .await?;

        self.publish(collection).await;
        Ok(())
    }

    /// Applies a mixed list of set/update/delete operations in one
    /// transaction. An update against a missing document fails the whole
    /// batch; nothing is applied.
    pub async fn batch_write(&self, operations: Vec<WriteOp>) -> Result<(), StoreError> {
        let result = self.batch_write_inner(operations).await;
        self.track(result)
    }

    async fn batch_write_inner(&self, operations: Vec<WriteOp>) -> Result<(), StoreError> {
        let user_id = self.require_user()?.to_string();
        let now = Utc::now().to_rfc3339();

        let touched: Vec<String> = {
            let mut seen = HashSet::new();
            operations
                .iter()
                .map(|op| op.collection().to_string())
                .filter(|c| seen.insert(c.clone()))
                .collect()
        };

        let mut tx = self.pool.begin().await?;

        for op in operations {
            match op {
                WriteOp::Set {
                    collection,
                    doc_id,
                    data,
                } => {
                    let doc_id = doc_id.unwrap_or_else(|| Uuid::new_v4().to_string());
                    let body = serde_json::to_string(&strip_nulls(data))?;
                    sqlx::query(
                        "INSERT INTO documents (user_id, collection, doc_id, body, created_at, updated_at) \
                         VALUES (?, ?, ?, ?, ?, ?) \
                         ON CONFLICT (user_id, collection, doc_id) \
                         DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                    )
                    .bind(&user_id)
                    .bind(&collection)
                    .bind(&doc_id)
                    .bind(body)
                    .bind(&now)
                    .bind(&now)
                    .execute(&mut *tx)
                    .await?;
                }
                WriteOp::Update {
                    collection,
                    doc_id,
                    data,
                } => {
                    let existing: Option<(String,)> = sqlx::query_as(
                        "SELECT body FROM documents \
                         WHERE user_id = ? AND collection = ? AND doc_id = ?",
                    )
                    .bind(&user_id)
                    .bind(&collection)
                    .bind(&doc_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                    let body = match existing {
                        Some((body,)) => body,
                        None => {
                            return Err(StoreError::NotFound { collection, doc_id });
                        }
                    };

                    let merged =
                        merge_objects(serde_json::from_str(&body)?, strip_nulls(data));
                    sqlx::query(
                        "UPDATE documents SET body = ?, updated_at = ? \
                         WHERE user_id = ? AND collection = ? AND doc_id = ?",
                    )
                    .bind(serde_json::to_string(&merged)?)
                    .bind(&now)
                    .bind(&user_id)
                    .bind(&collection)
                    .bind(&doc_id)
                    .execute(&mut *tx)
                    .await?;
                }
                WriteOp::Delete { collection, doc_id } => {
                    sqlx::query(
                        "DELETE FROM documents \
                         WHERE user_id = ? AND collection = ? AND doc_id = ?",
                    )
                    .bind(&user_id)
                    .bind(&collection)
                    .bind(&doc_id)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;

        for collection in touched {
            self.publish(&collection).await;
        }
        Ok(())
    }

    /// Distinct collection names starting with `prefix`, ascending.
    /// Subcollection layouts (`dailyData/<date>/foods`) make this the way
    /// to discover which days exist in the store.
    pub async fn list_collections(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let result = self.list_collections_inner(prefix).await;
        self.track(result)
    }

    async fn list_collections_inner(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let user_id = self.require_user()?;

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT collection FROM documents \
             WHERE user_id = ? AND collection LIKE ? ORDER BY collection",
        )
        .bind(user_id)
        .bind(format!("{prefix}%"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(collection,)| collection).collect())
    }

    /// One-shot ordered snapshot of a collection, without subscribing.
    pub async fn get_collection(
        &self,
        collection: &str,
        order_by: Option<&str>,
    ) -> Result<Vec<Value>, StoreError> {
        let result = self.fetch_collection(collection, order_by).await;
        self.track(result)
    }

    /// Subscribes to full-snapshot updates for a collection. The current
    /// state is pushed immediately and again after every mutation.
    ///
    /// Without an authenticated user this logs a warning and returns a
    /// receiver that never fires, so callers need no special casing.
    pub async fn subscribe(
        &self,
        collection: &str,
        order_by: Option<&str>,
    ) -> broadcast::Receiver<Vec<Value>> {
        if self.user_id.is_none() {
            tracing::warn!("subscription to '{collection}' requested without a user");
            let (_sender, receiver) = broadcast::channel(1);
            return receiver;
        }

        let (sender, receiver) = {
            let mut subs = self.subscriptions.lock().unwrap();
            let sub = subs
                .entry(collection.to_string())
                .or_insert_with(|| Subscription {
                    sender: broadcast::channel(16).0,
                    order_by: order_by.map(str::to_string),
                });
            (sub.sender.clone(), sub.sender.subscribe())
        };

        match self.fetch_collection(collection, order_by).await {
            Ok(snapshot) => {
                let _ = sender.send(snapshot);
            }
            Err(e) => {
                tracing::warn!("initial snapshot for '{collection}' failed: {e}");
                *self.last_error.lock().unwrap() = Some(e.to_string());
            }
        }

        receiver
    }

    async fn publish(&self, collection: &str) {
        let target = {
            let subs = self.subscriptions.lock().unwrap();
            subs.get(collection)
                .map(|s| (s.sender.clone(), s.order_by.clone()))
        };

        let Some((sender, order_by)) = target else {
            return;
        };

        match self.fetch_collection(collection, order_by.as_deref()).await {
            Ok(snapshot) => {
                let _ = sender.send(snapshot);
            }
            Err(e) => {
                tracing::warn!("snapshot push for '{collection}' failed: {e}");
                *self.last_error.lock().unwrap() = Some(e.to_string());
            }
        }
    }

    /// Full ordered collection state. Ordered by the requested body field
    /// descending with `updated_at` as tiebreaker, so concurrent snapshot
    /// arrivals resolve to the same ordering.
    async fn fetch_collection(
        &self,
        collection: &str,
        order_by: Option<&str>,
    ) -> Result<Vec<Value>, StoreError> {
        let user_id = self.require_user()?;

        let rows: Vec<(String, String, String, String)> = match order_by {
            Some(field) => {
                sqlx::query_as(
                    "SELECT doc_id, body, created_at, updated_at FROM documents \
                     WHERE user_id = ? AND collection = ? \
                     ORDER BY COALESCE(json_extract(body, ?), updated_at) DESC, updated_at DESC",
                )
                .bind(user_id)
                .bind(collection)
                .bind(format!("$.{field}"))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT doc_id, body, created_at, updated_at FROM documents \
                     WHERE user_id = ? AND collection = ? \
                     ORDER BY updated_at DESC, doc_id",
                )
                .bind(user_id)
                .bind(collection)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut docs = Vec::with_capacity(rows.len());
        for (doc_id, body, created_at, updated_at) in rows {
            docs.push(hydrate(&doc_id, &body, &created_at, &updated_at)?);
        }
        Ok(docs)
    }
}

/// Attaches id/timestamps to a stored body and normalizes timestamps.
fn hydrate(
    doc_id: &str,
    body: &str,
    created_at: &str,
    updated_at: &str,
) -> Result<Value, StoreError> {
    let mut value: Value = serde_json::from_str(body)?;
    normalize_timestamps(&mut value);
    if let Value::Object(map) = &mut value {
        map.insert("id".to_string(), Value::String(doc_id.to_string()));
        map.insert("createdAt".to_string(), Value::String(created_at.to_string()));
        map.insert("updatedAt".to_string(), Value::String(updated_at.to_string()));
    }
    Ok(value)
}

/// Drops top-level null fields, matching the write-side cleaning the
/// original store performed.
fn strip_nulls(data: Value) -> Value {
    match data {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, value)| !value.is_null())
                .collect(),
        ),
        other => other,
    }
}

/// Shallow merge: fields of `incoming` win over `existing`.
fn merge_objects(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut base), Value::Object(update)) => {
            for (key, value) in update {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, incoming) => incoming,
    }
}

/// Converts any server-native timestamp map (`{seconds, nanoseconds}`)
/// into a plain RFC3339 string, recursively.
fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(iso) = timestamp_map_to_iso(map) {
                *value = Value::String(iso);
                return;
            }
            for child in map.values_mut() {
                normalize_timestamps(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_timestamps(item);
            }
        }
        _ => {}
    }
}

fn timestamp_map_to_iso(map: &Map<String, Value>) -> Option<String> {
    if map.len() > 2 || !map.contains_key("seconds") {
        return None;
    }
    let seconds = map.get("seconds")?.as_i64()?;
    let nanos = map
        .get("nanoseconds")
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    DateTime::<Utc>::from_timestamp(seconds, nanos as u32).map(|dt| dt.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    struct TestContext {
        store: DocumentStore,
        _temp_dir: TempDir,
    }

    async fn setup_store() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_dir.path().join("test.db")).await.unwrap();
        TestContext {
            store: DocumentStore::new(pool, Some("user1".to_string())),
            _temp_dir: temp_dir,
        }
    }

    async fn setup_store_without_user() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_dir.path().join("test.db")).await.unwrap();
        TestContext {
            store: DocumentStore::new(pool, None),
            _temp_dir: temp_dir,
        }
    }

    #[tokio::test]
    async fn test_save_and_get_document() {
        let ctx = setup_store().await;

        let id = ctx
            .store
            .save_document("profile", json!({"age": "30", "weight": "80"}), Some("info"))
            .await
            .unwrap();
        assert_eq!(id, "info");

        let doc = ctx.store.get_document("profile", "info").await.unwrap().unwrap();
        assert_eq!(doc["age"], "30");
        assert_eq!(doc["id"], "info");
        assert!(doc["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_save_generates_id_when_omitted() {
        let ctx = setup_store().await;

        let id = ctx
            .store
            .save_document("recipes", json!({"name": "Bolo"}), None)
            .await
            .unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn test_save_merges_into_existing() {
        let ctx = setup_store().await;

        ctx.store
            .save_document("profile", json!({"age": "30", "weight": "80"}), Some("info"))
            .await
            .unwrap();
        ctx.store
            .save_document("profile", json!({"weight": "78"}), Some("info"))
            .await
            .unwrap();

        let doc = ctx.store.get_document("profile", "info").await.unwrap().unwrap();
        assert_eq!(doc["age"], "30");
        assert_eq!(doc["weight"], "78");
    }

    #[tokio::test]
    async fn test_save_strips_null_fields() {
        let ctx = setup_store().await;

        ctx.store
            .save_document("profile", json!({"age": "30", "waist": null}), Some("info"))
            .await
            .unwrap();

        let doc = ctx.store.get_document("profile", "info").await.unwrap().unwrap();
        assert!(doc.get("waist").is_none());
    }

    #[tokio::test]
    async fn test_get_missing_document_returns_none() {
        let ctx = setup_store().await;
        let doc = ctx.store.get_document("profile", "nope").await.unwrap();
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn test_delete_document() {
        let ctx = setup_store().await;

        ctx.store
            .save_document("recipes", json!({"name": "Bolo"}), Some("r1"))
            .await
            .unwrap();
        ctx.store.delete_document("recipes", "r1").await.unwrap();

        assert!(ctx.store.get_document("recipes", "r1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_operations_fail_without_user() {
        let ctx = setup_store_without_user().await;

        let err = ctx
            .store
            .save_document("profile", json!({"age": "30"}), Some("info"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotAuthenticated));
        assert!(ctx.store.last_error().is_some());

        let err = ctx.store.get_document("profile", "info").await.unwrap_err();
        assert!(matches!(err, StoreError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_subscribe_without_user_is_noop() {
        let ctx = setup_store_without_user().await;
        let mut rx = ctx.store.subscribe("recipes", None).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_subscribe_pushes_initial_and_updated_snapshots() {
        let ctx = setup_store().await;

        ctx.store
            .save_document("recipes", json!({"name": "A"}), Some("r1"))
            .await
            .unwrap();

        let mut rx = ctx.store.subscribe("recipes", None).await;
        let initial = rx.recv().await.unwrap();
        assert_eq!(initial.len(), 1);

        ctx.store
            .save_document("recipes", json!({"name": "B"}), Some("r2"))
            .await
            .unwrap();
        let updated = rx.recv().await.unwrap();
        assert_eq!(updated.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_ordering_by_field_descending() {
        let ctx = setup_store().await;

        ctx.store
            .save_document("weightHistory", json!({"weight": 80.0, "date": "2025-01-01"}), Some("w1"))
            .await
            .unwrap();
        ctx.store
            .save_document("weightHistory", json!({"weight": 79.0, "date": "2025-02-01"}), Some("w2"))
            .await
            .unwrap();

        let mut rx = ctx.store.subscribe("weightHistory", Some("date")).await;
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot[0]["date"], "2025-02-01");
        assert_eq!(snapshot[1]["date"], "2025-01-01");
    }

    #[tokio::test]
    async fn test_list_collections_by_prefix() {
        let ctx = setup_store().await;

        ctx.store
            .save_document("dailyData/2025-01-15/foods", json!({"name": "Arroz"}), Some("f1"))
            .await
            .unwrap();
        ctx.store
            .save_document(
                "dailyData/2025-02-01/exercises",
                json!({"name": "Corrida"}),
                Some("e1"),
            )
            .await
            .unwrap();
        ctx.store
            .save_document("recipes", json!({"name": "Bolo"}), Some("r1"))
            .await
            .unwrap();

        let collections = ctx.store.list_collections("dailyData/").await.unwrap();
        assert_eq!(
            collections,
            vec![
                "dailyData/2025-01-15/foods".to_string(),
                "dailyData/2025-02-01/exercises".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_collection_one_shot_snapshot() {
        let ctx = setup_store().await;

        ctx.store
            .save_document("recipes", json!({"name": "Bolo"}), Some("r1"))
            .await
            .unwrap();

        let docs = ctx.store.get_collection("recipes", None).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "Bolo");
        assert_eq!(docs[0]["id"], "r1");
    }

    #[tokio::test]
    async fn test_batch_write_mixed_operations() {
        let ctx = setup_store().await;

        ctx.store
            .save_document("alerts", json!({"title": "old"}), Some("a1"))
            .await
            .unwrap();

        ctx.store
            .batch_write(vec![
                WriteOp::Set {
                    collection: "alerts".to_string(),
                    doc_id: Some("a2".to_string()),
                    data: json!({"title": "new"}),
                },
                WriteOp::Update {
                    collection: "alerts".to_string(),
                    doc_id: "a1".to_string(),
                    data: json!({"read": true}),
                },
                WriteOp::Delete {
                    collection: "recipes".to_string(),
                    doc_id: "missing".to_string(),
                },
            ])
            .await
            .unwrap();

        let a1 = ctx.store.get_document("alerts", "a1").await.unwrap().unwrap();
        assert_eq!(a1["title"], "old");
        assert_eq!(a1["read"], true);
        assert!(ctx.store.get_document("alerts", "a2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_batch_update_on_missing_document_rolls_back() {
        let ctx = setup_store().await;

        let err = ctx
            .store
            .batch_write(vec![
                WriteOp::Set {
                    collection: "alerts".to_string(),
                    doc_id: Some("a1".to_string()),
                    data: json!({"title": "x"}),
                },
                WriteOp::Update {
                    collection: "alerts".to_string(),
                    doc_id: "missing".to_string(),
                    data: json!({"read": true}),
                },
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
        // The Set in the same batch must not have been applied.
        assert!(ctx.store.get_document("alerts", "a1").await.unwrap().is_none());
    }

    #[test]
    fn test_normalize_timestamps_recursive() {
        let mut value = json!({
            "name": "x",
            "createdAt": {"seconds": 1735689600, "nanoseconds": 0},
            "nested": {"updatedAt": {"seconds": 1735689600}}
        });
        normalize_timestamps(&mut value);
        assert!(value["createdAt"].is_string());
        assert!(value["nested"]["updatedAt"].is_string());
        assert!(value["createdAt"].as_str().unwrap().starts_with("2025-01-01"));
    }

    #[test]
    fn test_normalize_leaves_ordinary_objects_alone() {
        let mut value = json!({"nutrition": {"calories": 52.0, "protein": 0.3}});
        let before = value.clone();
        normalize_timestamps(&mut value);
        assert_eq!(value, before);
    }

    #[test]
    fn test_merge_objects_shallow() {
        let merged = merge_objects(json!({"a": 1, "b": 2}), json!({"b": 3, "c": 4}));
        assert_eq!(merged, json!({"a": 1, "b": 3, "c": 4}));
    }
}
