// src/services/designer_service.rs

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

use chrono::Utc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DesignItemStore,
    models::designer::{
        DesignItem, FieldUpdateSet, ItemCard, ItemFlag, ItemTimeline, MutationResponse,
        NewDesignItem, ToggleTarget,
    },
    services::{
        cascade::{self, DetailsChange},
        stage, timeline,
    },
};

/// Resultado de uma mutação: o item já com a atualização otimista aplicada.
#[derive(Debug)]
pub struct MutationOutcome {
    pub applied: bool,
    pub changes: FieldUpdateSet,
    pub item: DesignItem,
    /// Gravação em andamento. Quem chama não precisa esperar.
    pub persistence: Option<JoinHandle<()>>,
}

impl MutationOutcome {
    pub fn into_response(self) -> MutationResponse {
        MutationResponse {
            applied: self.applied,
            changes: self.changes,
            card: stage::card(self.item),
        }
    }
}

/// Cópia local dos itens com gravação pendente.
///
/// Cada entrada guarda a geração do último commit; a gravação que terminar
/// só remove a entrada se ninguém tiver escrito por cima dela.
#[derive(Clone, Default)]
struct OptimisticOverlay {
    entries: Arc<Mutex<HashMap<Uuid, (u64, DesignItem)>>>,
    generation: Arc<AtomicU64>,
}

impl OptimisticOverlay {
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, (u64, DesignItem)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get(&self, id: Uuid) -> Option<DesignItem> {
        self.lock().get(&id).map(|(_, item)| item.clone())
    }

    fn put(&self, item: DesignItem) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock().insert(item.id, (generation, item));
        generation
    }

    fn release(&self, id: Uuid, generation: u64) {
        let mut entries = self.lock();
        if entries.get(&id).is_some_and(|(current, _)| *current == generation) {
            entries.remove(&id);
        }
    }
}

#[derive(Clone)]
pub struct DesignerService {
    store: Arc<dyn DesignItemStore>,
    pending: OptimisticOverlay,
}

impl DesignerService {
    pub fn new(store: Arc<dyn DesignItemStore>) -> Self {
        Self {
            store,
            pending: OptimisticOverlay::default(),
        }
    }

    /// Estado local mais recente: a cópia otimista pendente, senão o banco.
    async fn snapshot(&self, id: Uuid) -> Result<DesignItem, AppError> {
        if let Some(item) = self.pending.get(id) {
            return Ok(item);
        }
        self.store.fetch(id).await?.ok_or(AppError::ItemNotFound(id))
    }

    // --- LEITURA ---

    pub async fn get_card(&self, id: Uuid) -> Result<ItemCard, AppError> {
        Ok(stage::card(self.snapshot(id).await?))
    }

    pub async fn list_job_cards(&self, folha_obra_id: Uuid) -> Result<Vec<ItemCard>, AppError> {
        let items = self.store.list_by_job(folha_obra_id).await?;
        Ok(items
            .into_iter()
            .map(|item| self.pending.get(item.id).unwrap_or(item))
            .map(stage::card)
            .collect())
    }

    pub async fn get_timeline(&self, id: Uuid) -> Result<ItemTimeline, AppError> {
        Ok(timeline::timeline(&self.snapshot(id).await?))
    }

    // --- ENTRADA NO FLUXO ---

    pub async fn create_item(&self, new_item: NewDesignItem) -> Result<ItemCard, AppError> {
        let item = self.store.insert(new_item, Utc::now()).await?;
        tracing::info!("🎨 Item {} entrou no fluxo do designer", item.id);
        Ok(stage::card(item))
    }

    // --- CASCATA DAS VERSÕES ---

    pub async fn toggle_field(
        &self,
        id: Uuid,
        target: ToggleTarget,
        value: bool,
    ) -> Result<MutationOutcome, AppError> {
        let item = self.snapshot(id).await?;

        match cascade::compute_cascade(&item, target, value, Utc::now()) {
            Some(updates) => Ok(self.commit(item, updates)),
            None => {
                tracing::debug!("Toggle {} ignorado no item {}: maquete não enviada", target, id);
                Ok(MutationOutcome {
                    applied: false,
                    changes: FieldUpdateSet::new(),
                    item,
                    persistence: None,
                })
            }
        }
    }

    // --- FINALIZAÇÃO E CAMPOS GLOBAIS ---

    pub async fn set_paginacao(&self, id: Uuid, value: bool) -> Result<MutationOutcome, AppError> {
        let item = self.snapshot(id).await?;
        Ok(self.commit(item, cascade::compute_paginacao(value, Utc::now())))
    }

    pub async fn set_path(&self, id: Uuid, path: &str) -> Result<MutationOutcome, AppError> {
        let item = self.snapshot(id).await?;
        let updates = cascade::compute_path(&item, path, Utc::now())?;
        Ok(self.commit(item, updates))
    }

    pub async fn set_complexidade(
        &self,
        id: Uuid,
        complexidade: Option<&str>,
    ) -> Result<MutationOutcome, AppError> {
        let item = self.snapshot(id).await?;
        Ok(self.commit(item, cascade::compute_complexidade(complexidade, Utc::now())))
    }

    pub async fn set_flag(&self, id: Uuid, flag: ItemFlag, value: bool) -> Result<MutationOutcome, AppError> {
        let item = self.snapshot(id).await?;
        Ok(self.commit(item, cascade::compute_flag(flag, value, Utc::now())))
    }

    pub async fn update_details(&self, id: Uuid, change: DetailsChange) -> Result<MutationOutcome, AppError> {
        let item = self.snapshot(id).await?;
        Ok(self.commit(item, cascade::compute_details(change)))
    }

    // --- OPERAÇÕES EM LOTE ---

    pub async fn assign_designer(&self, folha_obra_id: Uuid, designer: Option<String>) -> Result<u64, AppError> {
        let designer = designer.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());
        let count = self.store.assign_designer(folha_obra_id, designer).await?;
        tracing::info!("Designer atribuído a {} itens da FO {}", count, folha_obra_id);
        Ok(count)
    }

    /// Finaliza os itens cuja entrega a logística já concluiu.
    /// Falhas por item são registradas e não interrompem o lote.
    pub async fn sync_logistics_paginacao(&self, job_ids: &[Uuid]) -> Result<usize, AppError> {
        if job_ids.is_empty() {
            return Ok(0);
        }

        let candidates = self.store.delivered_pending_paginacao(job_ids).await?;
        let now = Utc::now();
        let mut finalized = 0;

        for item in candidates {
            let Some(updates) = cascade::compute_logistics_finalization(&item, now) else {
                continue;
            };
            match self.store.patch(item.id, &updates).await {
                Ok(()) => finalized += 1,
                Err(e) => tracing::error!("Erro ao paginar item {} pela logística: {:?}", item.id, e),
            }
        }

        if finalized > 0 {
            tracing::info!("🚚 {} itens paginados automaticamente pela logística", finalized);
        }
        Ok(finalized)
    }

    // --- APLICAÇÃO OTIMISTA ---

    /// Aplica o lote na cópia local (visível já para a próxima chamada) e
    /// dispara a gravação sem esperar por ela.
    fn commit(&self, mut item: DesignItem, updates: FieldUpdateSet) -> MutationOutcome {
        updates.apply(&mut item);
        let generation = self.pending.put(item.clone());

        let store = Arc::clone(&self.store);
        let pending = self.pending.clone();
        let id = item.id;
        let persisted = updates.clone();
        // TODO: decidir com o produto entre retry e rollback; hoje a falha só vai
        // para o log e a próxima leitura volta a mostrar o que está no banco.
        let persistence = tokio::spawn(async move {
            if let Err(e) = store.patch(id, &persisted).await {
                tracing::error!("Erro ao gravar alterações do item {}: {:?}", id, e);
            }
            pending.release(id, generation);
        });

        MutationOutcome {
            applied: true,
            changes: updates,
            item,
            persistence: Some(persistence),
        }
    }
}
