// src/db/memory_store.rs
//
// Store em memória para os testes do serviço e dos handlers.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DesignItemStore,
    models::designer::{Column, DesignItem, FieldUpdateSet, NewDesignItem},
};

#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<Uuid, DesignItem>>>,
    delivered: Arc<Mutex<HashSet<Uuid>>>,
    patches: Arc<Mutex<Vec<(Uuid, FieldUpdateSet)>>>,
    fail_patches: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, item: DesignItem) {
        self.items.lock().unwrap().insert(item.id, item);
    }

    pub fn get(&self, id: Uuid) -> Option<DesignItem> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    pub fn mark_delivered(&self, item_id: Uuid) {
        self.delivered.lock().unwrap().insert(item_id);
    }

    pub fn fail_patches(&self, fail: bool) {
        self.fail_patches.store(fail, Ordering::SeqCst);
    }

    pub fn patches(&self) -> Vec<(Uuid, FieldUpdateSet)> {
        self.patches.lock().unwrap().clone()
    }
}

#[async_trait]
impl DesignItemStore for MemoryStore {
    async fn fetch(&self, id: Uuid) -> Result<Option<DesignItem>, AppError> {
        Ok(self.get(id))
    }

    async fn list_by_job(&self, folha_obra_id: Uuid) -> Result<Vec<DesignItem>, AppError> {
        let mut items: Vec<_> = self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.folha_obra_id == folha_obra_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(items)
    }

    async fn insert(&self, new_item: NewDesignItem, now: DateTime<Utc>) -> Result<DesignItem, AppError> {
        let item = new_item.into_item(now);
        self.put(item.clone());
        Ok(item)
    }

    async fn patch(&self, id: Uuid, updates: &FieldUpdateSet) -> Result<(), AppError> {
        if self.fail_patches.load(Ordering::SeqCst) {
            return Err(AppError::InternalServerError(anyhow::anyhow!("banco indisponível")));
        }

        let mut items = self.items.lock().unwrap();
        let item = items.get_mut(&id).ok_or(AppError::ItemNotFound(id))?;
        updates.apply(item);
        item.updated_at = Some(Utc::now());
        self.patches.lock().unwrap().push((id, updates.clone()));
        Ok(())
    }

    async fn assign_designer(&self, folha_obra_id: Uuid, designer: Option<String>) -> Result<u64, AppError> {
        let mut count = 0;
        for item in self.items.lock().unwrap().values_mut() {
            if item.folha_obra_id == folha_obra_id {
                let mut updates = FieldUpdateSet::new();
                updates.set_text(Column::Designer, designer.clone());
                updates.apply(item);
                count += 1;
            }
        }
        Ok(count)
    }

    async fn delivered_pending_paginacao(&self, job_ids: &[Uuid]) -> Result<Vec<DesignItem>, AppError> {
        let delivered = self.delivered.lock().unwrap().clone();
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|i| job_ids.contains(&i.folha_obra_id))
            .filter(|i| !i.paginacao && delivered.contains(&i.item_id))
            .cloned()
            .collect())
    }
}
