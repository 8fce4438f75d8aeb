// src/db/designer_repo.rs

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::designer::{DesignItem, FieldUpdateSet, FieldValue, NewDesignItem, Table, ROUNDS},
};

/// Acesso ao registro persistido dos itens do designer.
#[async_trait]
pub trait DesignItemStore: Send + Sync {
    async fn fetch(&self, id: Uuid) -> Result<Option<DesignItem>, AppError>;

    async fn list_by_job(&self, folha_obra_id: Uuid) -> Result<Vec<DesignItem>, AppError>;

    /// Cria o item base e a entrada no fluxo do designer.
    async fn insert(&self, new_item: NewDesignItem, now: DateTime<Utc>) -> Result<DesignItem, AppError>;

    /// Aplica o lote de alterações numa única transação.
    async fn patch(&self, id: Uuid, updates: &FieldUpdateSet) -> Result<(), AppError>;

    async fn assign_designer(&self, folha_obra_id: Uuid, designer: Option<String>) -> Result<u64, AppError>;

    /// Itens com entrega concluída na logística e ainda sem paginação.
    async fn delivered_pending_paginacao(&self, job_ids: &[Uuid]) -> Result<Vec<DesignItem>, AppError>;
}

// As colunas de recusa têm nome legado ("R1", "R1_date"); o alias deixa
// o FromRow com nomes uniformes.
static SELECT_ITEM: LazyLock<String> = LazyLock::new(|| {
    let mut columns = String::from(
        "di.id, di.item_id, ib.folha_obra_id, ib.descricao, ib.codigo, ib.quantidade, \
         di.em_curso, di.data_em_curso, di.duvidas, di.data_duvidas, \
         di.paginacao, di.data_paginacao, di.path_trabalho, di.complexidade, di.notas, \
         di.designer, di.data_in, di.data_saida, di.updated_at, fo.data_in AS job_data_in",
    );
    for v in 1..=ROUNDS {
        columns.push_str(&format!(
            ", di.maquete_enviada{v}, di.data_maquete_enviada{v}, \
             di.aprovacao_recebida{v}, di.data_aprovacao_recebida{v}, \
             di.\"R{v}\" AS recusada{v}, di.\"R{v}_date\" AS data_recusada{v}"
        ));
    }
    format!(
        "SELECT {columns} FROM designer_items di \
         JOIN items_base ib ON ib.id = di.item_id \
         LEFT JOIN folhas_obras fo ON fo.id = ib.folha_obra_id"
    )
});

#[derive(Clone)]
pub struct DesignerRepository {
    pool: PgPool,
}

impl DesignerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_assignments(qb: &mut QueryBuilder<'_, Postgres>, updates: &FieldUpdateSet, table: Table) {
    for (column, value) in updates.iter().filter(|(c, _)| c.table() == table) {
        qb.push(", ").push(column.sql_name()).push(" = ");
        match value {
            FieldValue::Bool(flag) => qb.push_bind(*flag),
            FieldValue::Timestamp(ts) => qb.push_bind(*ts),
            FieldValue::Text(text) => qb.push_bind(text.clone()),
            FieldValue::Int(n) => qb.push_bind(*n),
        };
    }
}

#[async_trait]
impl DesignItemStore for DesignerRepository {
    async fn fetch(&self, id: Uuid) -> Result<Option<DesignItem>, AppError> {
        let sql = format!("{} WHERE di.id = $1", *SELECT_ITEM);
        let item = sqlx::query_as::<_, DesignItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    async fn list_by_job(&self, folha_obra_id: Uuid) -> Result<Vec<DesignItem>, AppError> {
        let sql = format!(
            "{} WHERE ib.folha_obra_id = $1 ORDER BY di.updated_at DESC NULLS LAST",
            *SELECT_ITEM
        );
        let items = sqlx::query_as::<_, DesignItem>(&sql)
            .bind(folha_obra_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn insert(&self, new_item: NewDesignItem, now: DateTime<Utc>) -> Result<DesignItem, AppError> {
        let item = new_item.into_item(now);
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO items_base (id, folha_obra_id, descricao, codigo, quantidade)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.item_id)
        .bind(item.folha_obra_id)
        .bind(&item.descricao)
        .bind(&item.codigo)
        .bind(item.quantidade)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO designer_items (id, item_id, em_curso, data_em_curso, duvidas, paginacao, data_in)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id)
        .bind(item.item_id)
        .bind(item.em_curso)
        .bind(item.data_em_curso)
        .bind(item.duvidas)
        .bind(item.paginacao)
        .bind(item.data_in)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.fetch(item.id).await?.ok_or(AppError::ItemNotFound(item.id))
    }

    async fn patch(&self, id: Uuid, updates: &FieldUpdateSet) -> Result<(), AppError> {
        if updates.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE designer_items SET updated_at = NOW()");
        push_assignments(&mut qb, updates, Table::DesignerItems);
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ItemNotFound(id));
        }

        if updates.touches(Table::ItemsBase) {
            let mut qb = QueryBuilder::<Postgres>::new("UPDATE items_base SET updated_at = NOW()");
            push_assignments(&mut qb, updates, Table::ItemsBase);
            qb.push(" WHERE id = (SELECT item_id FROM designer_items WHERE id = ")
                .push_bind(id)
                .push(")");
            qb.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn assign_designer(&self, folha_obra_id: Uuid, designer: Option<String>) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE designer_items di
            SET designer = $1, updated_at = NOW()
            FROM items_base ib
            WHERE ib.id = di.item_id AND ib.folha_obra_id = $2
            "#,
        )
        .bind(designer)
        .bind(folha_obra_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delivered_pending_paginacao(&self, job_ids: &[Uuid]) -> Result<Vec<DesignItem>, AppError> {
        let sql = format!(
            r#"{} WHERE ib.folha_obra_id = ANY($1)
              AND COALESCE(di.paginacao, FALSE) = FALSE
              AND EXISTS (
                  SELECT 1 FROM logistica_entregas le
                  WHERE le.item_id = di.item_id AND le.concluido = TRUE
              )"#,
            *SELECT_ITEM
        );
        let items = sqlx::query_as::<_, DesignItem>(&sql)
            .bind(job_ids.to_vec())
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }
}
