//! Tracker synchronization service.
//!
//! Owns the full in-memory `TrackerData` for one user and keeps it in
//! step with the document store. Mutations apply optimistically to local
//! state, persist asynchronously, and roll the local change back when the
//! write fails; callers observe failures through [`Tracker::error`], never
//! through a panic or an `Err`.

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::lookup::CalorieLookup;
use crate::metrics::{self, Metrics};
use crate::models::{
    Alert, AlertKind, AlertPriority, BarcodeProduct, DailyData, ExerciseEntry, MacroGoalsPatch,
    NewFood, Recipe, TrackerData, UserInfoPatch, WaistEntry, WeightEntry,
};
use crate::store::{DocumentStore, StoreError, WriteOp};

const PROFILE_COLLECTION: &str = "profile";
const PROFILE_DOC: &str = "info";
const GOALS_DOC: &str = "macroGoals";
const WEIGHT_COLLECTION: &str = "weightHistory";
const WAIST_COLLECTION: &str = "waistHistory";
const RECIPES_COLLECTION: &str = "recipes";
const ALERTS_COLLECTION: &str = "alerts";

fn foods_collection(date: NaiveDate) -> String {
    format!("dailyData/{date}/foods")
}

fn exercises_collection(date: NaiveDate) -> String {
    format!("dailyData/{date}/exercises")
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Live snapshot receivers for the collections the tracker mirrors. The
/// foods/exercises pair follows the current date and is swapped out by
/// `set_current_date`.
struct Receivers {
    weight: broadcast::Receiver<Vec<Value>>,
    waist: broadcast::Receiver<Vec<Value>>,
    recipes: broadcast::Receiver<Vec<Value>>,
    alerts: broadcast::Receiver<Vec<Value>>,
    foods: broadcast::Receiver<Vec<Value>>,
    exercises: broadcast::Receiver<Vec<Value>>,
}

pub struct Tracker {
    store: DocumentStore,
    data: TrackerData,
    current_date: NaiveDate,
    lookup: CalorieLookup,
    error: Option<String>,
    receivers: Option<Receivers>,
}

impl Tracker {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            data: TrackerData::default(),
            current_date: Local::now().date_naive(),
            lookup: CalorieLookup::new(),
            error: None,
            receivers: None,
        }
    }

    pub fn data(&self) -> &TrackerData {
        &self.data
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// The most recent mutation or load failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Recomputed from the profile; cheap enough to never cache.
    pub fn metrics(&self) -> Metrics {
        metrics::calculate(&self.data.user_info)
    }

    /// Fetches the profile and macro-goals documents concurrently and
    /// establishes collection subscriptions. A failed fetch keeps the
    /// defaults and records a non-fatal error; the tracker is always
    /// usable afterwards.
    pub async fn load(&mut self) {
        let (profile, goals) = tokio::join!(
            self.store.get_document(PROFILE_COLLECTION, PROFILE_DOC),
            self.store.get_document(PROFILE_COLLECTION, GOALS_DOC),
        );

        match profile {
            Ok(Some(doc)) => self.data.user_info = decode_or_default(doc),
            Ok(None) => {}
            Err(e) => self.error = Some(e.to_string()),
        }
        match goals {
            Ok(Some(doc)) => self.data.macro_goals = decode_or_default(doc),
            Ok(None) => {}
            Err(e) => self.error = Some(e.to_string()),
        }

        self.start_subscriptions().await;
        self.apply_pending();
    }

    async fn start_subscriptions(&mut self) {
        self.receivers = Some(Receivers {
            weight: self.store.subscribe(WEIGHT_COLLECTION, Some("date")).await,
            waist: self.store.subscribe(WAIST_COLLECTION, Some("date")).await,
            recipes: self.store.subscribe(RECIPES_COLLECTION, Some("createdAt")).await,
            alerts: self.store.subscribe(ALERTS_COLLECTION, Some("timestamp")).await,
            foods: self
                .store
                .subscribe(&foods_collection(self.current_date), None)
                .await,
            exercises: self
                .store
                .subscribe(&exercises_collection(self.current_date), None)
                .await,
        });
    }

    /// Moves the tracker to a new calendar day. The old day's
    /// foods/exercises receivers are dropped so stale-date snapshots can
    /// no longer land in local state.
    pub async fn set_current_date(&mut self, date: NaiveDate) {
        if date == self.current_date {
            return;
        }
        self.current_date = date;
        if let Some(receivers) = &mut self.receivers {
            receivers.foods = self.store.subscribe(&foods_collection(date), None).await;
            receivers.exercises = self
                .store
                .subscribe(&exercises_collection(date), None)
                .await;
        }
        self.apply_pending();
    }

    /// Drains every pending snapshot without blocking and replaces the
    /// corresponding slice of state wholesale. Only the last snapshot per
    /// collection matters.
    pub fn apply_pending(&mut self) {
        let Some(receivers) = &mut self.receivers else {
            return;
        };

        if let Some(snapshot) = drain(&mut receivers.weight) {
            self.data.weight_history = decode_list(snapshot);
        }
        if let Some(snapshot) = drain(&mut receivers.waist) {
            self.data.waist_history = decode_list(snapshot);
        }
        if let Some(snapshot) = drain(&mut receivers.recipes) {
            self.data.recipes = decode_list(snapshot);
        }
        if let Some(snapshot) = drain(&mut receivers.alerts) {
            self.data.alerts = decode_list(snapshot);
        }

        let key = date_key(self.current_date);
        if let Some(snapshot) = drain(&mut receivers.foods) {
            self.data.daily_data.entry(key.clone()).or_default().foods = decode_list(snapshot);
        }
        if let Some(snapshot) = drain(&mut receivers.exercises) {
            self.data
                .daily_data
                .entry(key)
                .or_default()
                .exercises = decode_list(snapshot);
        }
    }

    fn record_error(&mut self, error: StoreError) {
        tracing::warn!("tracker mutation failed, rolled back: {error}");
        self.error = Some(error.to_string());
    }

    /// Merges a partial profile update and persists the whole profile doc.
    pub async fn update_user_info(&mut self, patch: UserInfoPatch) {
        let previous = self.data.user_info.clone();
        self.data.user_info.apply(patch);

        let result = self
            .persist_doc(PROFILE_COLLECTION, PROFILE_DOC, &self.data.user_info)
            .await;
        if let Err(e) = result {
            self.data.user_info = previous;
            self.record_error(e);
        }
    }

    pub async fn update_macro_goals(&mut self, patch: MacroGoalsPatch) {
        let previous = self.data.macro_goals.clone();
        self.data.macro_goals.apply(patch);

        let result = self
            .persist_doc(PROFILE_COLLECTION, GOALS_DOC, &self.data.macro_goals)
            .await;
        if let Err(e) = result {
            self.data.macro_goals = previous;
            self.record_error(e);
        }
    }

    async fn persist_doc<T: serde::Serialize>(
        &self,
        collection: &str,
        doc_id: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_value(value)?;
        self.store.save_document(collection, body, Some(doc_id)).await?;
        Ok(())
    }

    /// Logs a food against the current date. Returns the stored item's id,
    /// or `None` when persistence failed and the entry was rolled back.
    pub async fn add_food(&mut self, new_food: NewFood) -> Option<Uuid> {
        let item = new_food.into_item();
        let id = item.id;
        let key = date_key(self.current_date);
        let collection = foods_collection(self.current_date);

        self.data
            .daily_data
            .entry(key.clone())
            .or_default()
            .foods
            .push(item.clone());

        let result = self.persist_doc(&collection, &id.to_string(), &item).await;
        if let Err(e) = result {
            if let Some(day) = self.data.daily_data.get_mut(&key) {
                day.foods.retain(|f| f.id != id);
            }
            self.record_error(e);
            return None;
        }
        Some(id)
    }

    pub async fn remove_food(&mut self, date: NaiveDate, id: Uuid) {
        let key = date_key(date);
        let removed = match self.data.daily_data.get_mut(&key) {
            Some(day) => match day.foods.iter().position(|f| f.id == id) {
                Some(index) => Some((index, day.foods.remove(index))),
                None => None,
            },
            None => None,
        };
        let Some((index, item)) = removed else {
            return;
        };

        let result = self
            .store
            .delete_document(&foods_collection(date), &id.to_string())
            .await;
        if let Err(e) = result {
            if let Some(day) = self.data.daily_data.get_mut(&key) {
                day.foods.insert(index.min(day.foods.len()), item);
            }
            self.record_error(e);
        }
    }

    pub async fn add_exercise(&mut self, name: &str, calories: f64) -> Option<Uuid> {
        let entry = ExerciseEntry::new(name, calories);
        let id = entry.id;
        let key = date_key(self.current_date);
        let collection = exercises_collection(self.current_date);

        self.data
            .daily_data
            .entry(key.clone())
            .or_default()
            .exercises
            .push(entry.clone());

        let result = self.persist_doc(&collection, &id.to_string(), &entry).await;
        if let Err(e) = result {
            if let Some(day) = self.data.daily_data.get_mut(&key) {
                day.exercises.retain(|x| x.id != id);
            }
            self.record_error(e);
            return None;
        }
        Some(id)
    }

    pub async fn remove_exercise(&mut self, date: NaiveDate, id: Uuid) {
        let key = date_key(date);
        let removed = match self.data.daily_data.get_mut(&key) {
            Some(day) => match day.exercises.iter().position(|x| x.id == id) {
                Some(index) => Some((index, day.exercises.remove(index))),
                None => None,
            },
            None => None,
        };
        let Some((index, entry)) = removed else {
            return;
        };

        let result = self
            .store
            .delete_document(&exercises_collection(date), &id.to_string())
            .await;
        if let Err(e) = result {
            if let Some(day) = self.data.daily_data.get_mut(&key) {
                day.exercises.insert(index.min(day.exercises.len()), entry);
            }
            self.record_error(e);
        }
    }

    /// Appends a weight measurement and mirrors it into the profile's
    /// current weight. Both writes land in one batch, so either both
    /// persist or neither does.
    pub async fn add_weight_entry(&mut self, weight: f64, date: NaiveDate) -> Option<Uuid> {
        let entry = WeightEntry::new(weight, date);
        let id = entry.id;
        let previous_weight = self.data.user_info.weight.clone();

        self.data.weight_history.push(entry.clone());
        self.data.user_info.weight = format_measurement(weight);

        let result = self.persist_measurement(WEIGHT_COLLECTION, id, &entry).await;
        if let Err(e) = result {
            self.data.weight_history.retain(|w| w.id != id);
            self.data.user_info.weight = previous_weight;
            self.record_error(e);
            return None;
        }
        Some(id)
    }

    pub async fn remove_weight_entry(&mut self, id: Uuid) {
        let Some(index) = self.data.weight_history.iter().position(|w| w.id == id) else {
            return;
        };
        let entry = self.data.weight_history.remove(index);

        let result = self
            .store
            .delete_document(WEIGHT_COLLECTION, &id.to_string())
            .await;
        if let Err(e) = result {
            let index = index.min(self.data.weight_history.len());
            self.data.weight_history.insert(index, entry);
            self.record_error(e);
        }
    }

    pub async fn add_waist_entry(&mut self, waist: f64, date: NaiveDate) -> Option<Uuid> {
        let entry = WaistEntry::new(waist, date);
        let id = entry.id;
        let previous_waist = self.data.user_info.waist.clone();

        self.data.waist_history.push(entry.clone());
        self.data.user_info.waist = format_measurement(waist);

        let result = self.persist_measurement(WAIST_COLLECTION, id, &entry).await;
        if let Err(e) = result {
            self.data.waist_history.retain(|w| w.id != id);
            self.data.user_info.waist = previous_waist;
            self.record_error(e);
            return None;
        }
        Some(id)
    }

    pub async fn remove_waist_entry(&mut self, id: Uuid) {
        let Some(index) = self.data.waist_history.iter().position(|w| w.id == id) else {
            return;
        };
        let entry = self.data.waist_history.remove(index);

        let result = self
            .store
            .delete_document(WAIST_COLLECTION, &id.to_string())
            .await;
        if let Err(e) = result {
            let index = index.min(self.data.waist_history.len());
            self.data.waist_history.insert(index, entry);
            self.record_error(e);
        }
    }

    async fn persist_measurement<T: serde::Serialize>(
        &self,
        collection: &str,
        id: Uuid,
        entry: &T,
    ) -> Result<(), StoreError> {
        self.store
            .batch_write(vec![
                WriteOp::Set {
                    collection: collection.to_string(),
                    doc_id: Some(id.to_string()),
                    data: serde_json::to_value(entry)?,
                },
                WriteOp::Set {
                    collection: PROFILE_COLLECTION.to_string(),
                    doc_id: Some(PROFILE_DOC.to_string()),
                    data: serde_json::to_value(&self.data.user_info)?,
                },
            ])
            .await
    }

    pub async fn add_recipe(&mut self, recipe: Recipe) -> Option<Uuid> {
        let id = recipe.id;
        self.data.recipes.push(recipe.clone());

        let result = self
            .persist_doc(RECIPES_COLLECTION, &id.to_string(), &recipe)
            .await;
        if let Err(e) = result {
            self.data.recipes.retain(|r| r.id != id);
            self.record_error(e);
            return None;
        }
        Some(id)
    }

    pub async fn remove_recipe(&mut self, id: Uuid) {
        let Some(index) = self.data.recipes.iter().position(|r| r.id == id) else {
            return;
        };
        let recipe = self.data.recipes.remove(index);

        let result = self
            .store
            .delete_document(RECIPES_COLLECTION, &id.to_string())
            .await;
        if let Err(e) = result {
            let index = index.min(self.data.recipes.len());
            self.data.recipes.insert(index, recipe);
            self.record_error(e);
        }
    }

    /// Logs `servings` portions of a recipe as a single synthetic food.
    pub async fn add_food_from_recipe(&mut self, recipe: &Recipe, servings: f64) -> Option<Uuid> {
        let per_serving = recipe.per_serving();
        let food = NewFood::new(
            format!("{} (Receita)", recipe.name),
            per_serving.calories,
            servings,
            "porção",
        )
        .with_nutrition(per_serving);
        self.add_food(food).await
    }

    /// Logs a scanned product. Product nutrition is per serving; the food
    /// entry is per unit, so it is divided by the serving size first.
    pub async fn add_food_from_barcode(
        &mut self,
        product: &BarcodeProduct,
        quantity: f64,
    ) -> Option<Uuid> {
        let per_unit = product.nutrition.per_serving(product.serving_size);
        let food = NewFood::new(
            product.name.clone(),
            per_unit.calories,
            quantity,
            product.serving_unit.clone(),
        )
        .with_nutrition(per_unit)
        .with_barcode(product.barcode.clone());
        self.add_food(food).await
    }

    pub async fn add_alert(&mut self, alert: Alert) -> Option<Uuid> {
        let id = alert.id;
        self.data.alerts.push(alert.clone());

        let result = self
            .persist_doc(ALERTS_COLLECTION, &id.to_string(), &alert)
            .await;
        if let Err(e) = result {
            self.data.alerts.retain(|a| a.id != id);
            self.record_error(e);
            return None;
        }
        Some(id)
    }

    pub async fn mark_alert_as_read(&mut self, id: Uuid) {
        let Some(alert) = self.data.alerts.iter_mut().find(|a| a.id == id) else {
            return;
        };
        if alert.read {
            return;
        }
        alert.read = true;

        let result = self
            .store
            .save_document(
                ALERTS_COLLECTION,
                serde_json::json!({ "read": true }),
                Some(&id.to_string()),
            )
            .await;
        if let Err(e) = result {
            if let Some(alert) = self.data.alerts.iter_mut().find(|a| a.id == id) {
                alert.read = false;
            }
            self.record_error(e);
        }
    }

    /// Rule-derived alerts for a day. Ephemeral: recomputed on demand,
    /// never persisted.
    pub fn smart_alerts(&self, date: NaiveDate, now: NaiveTime) -> Vec<Alert> {
        let day = self.get_daily_data(date);
        let consumed = day.total_consumed();
        let goal = self.data.macro_goals.calories;
        let mut alerts = Vec::new();

        if goal > 0.0 {
            let percent = consumed / goal * 100.0;
            if percent > 110.0 {
                alerts.push(Alert::new(
                    AlertKind::Warning,
                    "Meta ultrapassada",
                    format!("Você já consumiu {:.0}% da meta de calorias de hoje", percent),
                    AlertPriority::High,
                ));
            } else if (95.0..=105.0).contains(&percent) {
                alerts.push(Alert::new(
                    AlertKind::Achievement,
                    "Meta atingida",
                    "Consumo de calorias dentro da meta de hoje",
                    AlertPriority::Medium,
                ));
            } else if percent < 50.0 && now.hour() >= 18 {
                alerts.push(Alert::new(
                    AlertKind::Reminder,
                    "Consumo baixo",
                    "Você consumiu menos da metade da meta de calorias hoje",
                    AlertPriority::Medium,
                ));
            }
        }

        let has_water = day
            .foods
            .iter()
            .any(|f| f.name.to_lowercase().contains("água") || f.name.to_lowercase().contains("agua"));
        if !has_water && now.hour() >= 12 {
            alerts.push(Alert::new(
                AlertKind::Reminder,
                "Hidratação",
                "Nenhum registro de água hoje",
                AlertPriority::Low,
            ));
        }

        alerts
    }

    /// Delete operations covering every stored daily document.
    async fn daily_delete_ops(&self) -> Result<Vec<WriteOp>, StoreError> {
        let mut operations = Vec::new();
        for collection in self.store.list_collections("dailyData/").await? {
            for doc in self.store.get_collection(&collection, None).await? {
                if let Some(id) = doc.get("id").and_then(|v| v.as_str()) {
                    operations.push(WriteOp::Delete {
                        collection: collection.clone(),
                        doc_id: id.to_string(),
                    });
                }
            }
        }
        Ok(operations)
    }

    /// Hydrates every stored day's foods and exercises into memory.
    /// `load` only follows the current date; whole-history reads such as
    /// the export command call this first.
    pub async fn load_history(&mut self) {
        let collections = match self.store.list_collections("dailyData/").await {
            Ok(collections) => collections,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        for collection in collections {
            let mut parts = collection.split('/');
            let (Some(_), Some(date), Some(kind)) = (parts.next(), parts.next(), parts.next())
            else {
                continue;
            };

            let snapshot = match self.store.get_collection(&collection, None).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    self.error = Some(e.to_string());
                    continue;
                }
            };

            let day = self.data.daily_data.entry(date.to_string()).or_default();
            match kind {
                "foods" => day.foods = decode_list(snapshot),
                "exercises" => day.exercises = decode_list(snapshot),
                _ => {}
            }
        }
    }

    /// Total over all dates: unknown dates yield an empty day.
    pub fn get_daily_data(&self, date: NaiveDate) -> DailyData {
        self.data
            .daily_data
            .get(&date_key(date))
            .cloned()
            .unwrap_or_default()
    }

    pub fn search_calories(&mut self, name: &str) -> f64 {
        self.lookup.search(name)
    }

    /// Wipes local state and every remote document in one batch. On batch
    /// failure the local state is restored untouched.
    pub async fn reset_data(&mut self) {
        let previous = std::mem::take(&mut self.data);

        let mut operations = vec![
            WriteOp::Delete {
                collection: PROFILE_COLLECTION.to_string(),
                doc_id: PROFILE_DOC.to_string(),
            },
            WriteOp::Delete {
                collection: PROFILE_COLLECTION.to_string(),
                doc_id: GOALS_DOC.to_string(),
            },
        ];
        for entry in &previous.weight_history {
            operations.push(WriteOp::Delete {
                collection: WEIGHT_COLLECTION.to_string(),
                doc_id: entry.id.to_string(),
            });
        }
        for entry in &previous.waist_history {
            operations.push(WriteOp::Delete {
                collection: WAIST_COLLECTION.to_string(),
                doc_id: entry.id.to_string(),
            });
        }
        for recipe in &previous.recipes {
            operations.push(WriteOp::Delete {
                collection: RECIPES_COLLECTION.to_string(),
                doc_id: recipe.id.to_string(),
            });
        }
        for alert in &previous.alerts {
            operations.push(WriteOp::Delete {
                collection: ALERTS_COLLECTION.to_string(),
                doc_id: alert.id.to_string(),
            });
        }
        // Daily documents are enumerated from the store, not from memory:
        // a session only mirrors the current day, and any document left
        // behind would resurrect the next time its date is viewed.
        match self.daily_delete_ops().await {
            Ok(daily_ops) => operations.extend(daily_ops),
            Err(e) => {
                self.data = previous;
                self.record_error(e);
                return;
            }
        }

        match self.store.batch_write(operations).await {
            Ok(()) => {
                self.lookup.clear();
                self.error = None;
            }
            Err(e) => {
                self.data = previous;
                self.record_error(e);
            }
        }
    }
}

/// Renders a measurement the way a user would have typed it: no trailing
/// `.0` on whole numbers.
fn format_measurement(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn drain(receiver: &mut broadcast::Receiver<Vec<Value>>) -> Option<Vec<Value>> {
    let mut latest = None;
    loop {
        match receiver.try_recv() {
            Ok(snapshot) => latest = Some(snapshot),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    latest
}

fn decode_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
    serde_json::from_value(value).unwrap_or_default()
}

/// Decodes a snapshot, skipping documents that no longer parse rather
/// than dropping the whole collection.
fn decode_list<T: DeserializeOwned>(snapshot: Vec<Value>) -> Vec<T> {
    snapshot
        .into_iter()
        .filter_map(|doc| match serde_json::from_value(doc) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("skipping undecodable document: {e}");
                None
            }
        })
        .collect()
}
