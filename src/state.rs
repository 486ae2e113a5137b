use crate::clock::Clock;
use crate::errors::AppError;
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub clock: Clock,
    pub default_owner: u64,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, clock: Clock, default_owner: u64) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            clock,
            default_owner,
        }
    }

    /// Applies `change` to a copy of the store, persists it, then swaps it in.
    /// Writers are serialized by the lock; a failed change or write leaves
    /// the store untouched, and a change that alters nothing is not written.
    pub async fn write<T>(
        &self,
        change: impl FnOnce(&mut AppData) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let value = change(&mut next)?;
        if next == *data {
            return Ok(value);
        }
        persist_data(&self.data_path, &next).await?;
        *data = next;
        Ok(value)
    }
}
