// src/services/cascade.rs
//
// Regras de cascata das versões (maquete → aprovação / recusa) e da paginação.
// Tudo aqui é puro: recebe o snapshot do item e devolve um único
// `FieldUpdateSet`, que o serviço aplica localmente e persiste.

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    models::designer::{
        Column, DesignItem, FieldUpdateSet, ItemFlag, RoundField, ToggleTarget, ROUNDS,
    },
};

/// Complexidade que dispensa o ciclo de maquetes e finaliza na hora.
pub const OFFSET_COMPLEXIDADE: &str = "OFFSET";
pub const OFFSET_PATH: &str = "P:";
/// Path gravado quando a logística conclui a entrega antes da paginação.
pub const LOGISTICS_PATH: &str = "Indefinido";

/// Calcula todas as alterações necessárias para ligar/desligar um checkbox de versão.
///
/// Retorna `None` quando a trava bloqueia a operação: aprovação ou recusa só
/// podem ser marcadas com a maquete da mesma versão já enviada.
pub fn compute_cascade(
    item: &DesignItem,
    target: ToggleTarget,
    value: bool,
    now: DateTime<Utc>,
) -> Option<FieldUpdateSet> {
    let v = target.round();
    let field = target.field();

    if field.is_decision() && value && !item.round(v).maquete_enviada {
        return None;
    }

    let mut updates = FieldUpdateSet::new();
    updates.set_flag_with_date(target.flag_column(), target.date_column(), value, now);

    match (field, value) {
        // Aprovação e recusa são mutuamente exclusivas.
        (RoundField::Aprovacao, true) => {
            clear(&mut updates, v, RoundField::Recusa);
        }
        (RoundField::Recusa, true) => {
            clear(&mut updates, v, RoundField::Aprovacao);
        }
        // Sem maquete não há decisão.
        (RoundField::Maquete, false) => {
            clear(&mut updates, v, RoundField::Aprovacao);
            clear(&mut updates, v, RoundField::Recusa);
        }
        _ => {}
    }

    // Uma decisão nova invalida tudo o que veio depois.
    if field.is_decision() && value {
        for later in (v + 1)..=(ROUNDS as u8) {
            updates.reset_round(later);
        }
    }

    Some(updates)
}

fn clear(updates: &mut FieldUpdateSet, v: u8, field: RoundField) {
    updates
        .set_bool(Column::Round(v, field.flag_column()), false)
        .set_timestamp(Column::Round(v, field.date_column()), None);
}

/// Finalização explícita. Desligar limpa data e path.
pub fn compute_paginacao(value: bool, now: DateTime<Utc>) -> FieldUpdateSet {
    let mut updates = FieldUpdateSet::new();
    updates.set_flag_with_date(Column::Paginacao, Column::DataPaginacao, value, now);
    if !value {
        updates.set_text(Column::PathTrabalho, None);
    }
    updates
}

/// Grava o path do trabalho. Só é editável com a paginação ligada.
pub fn compute_path(
    item: &DesignItem,
    path: &str,
    now: DateTime<Utc>,
) -> Result<FieldUpdateSet, AppError> {
    if !item.paginacao {
        return Err(AppError::PaginacaoInactive);
    }

    let mut updates = FieldUpdateSet::new();
    updates.set_text(Column::PathTrabalho, Some(path.to_string()));

    if !path.trim().is_empty() {
        updates.set_timestamp(Column::DataSaida, Some(now));
        if item.data_paginacao.is_none() {
            updates.set_timestamp(Column::DataPaginacao, Some(now));
        }
    }

    Ok(updates)
}

/// Troca a complexidade. `OFFSET` é uma finalização direta.
pub fn compute_complexidade(value: Option<&str>, now: DateTime<Utc>) -> FieldUpdateSet {
    let value = value.map(str::trim).filter(|v| !v.is_empty());

    let mut updates = FieldUpdateSet::new();
    updates.set_text(Column::Complexidade, value.map(str::to_string));

    if value == Some(OFFSET_COMPLEXIDADE) {
        updates
            .set_bool(Column::Paginacao, true)
            .set_timestamp(Column::DataPaginacao, Some(now))
            .set_text(Column::PathTrabalho, Some(OFFSET_PATH.to_string()))
            .set_timestamp(Column::DataSaida, Some(now));
    }

    updates
}

pub fn compute_flag(flag: ItemFlag, value: bool, now: DateTime<Utc>) -> FieldUpdateSet {
    let (flag_column, date_column) = flag.columns();
    let mut updates = FieldUpdateSet::new();
    updates.set_flag_with_date(flag_column, date_column, value, now);
    updates
}

/// Finalização automática de itens cuja entrega já foi concluída pela logística.
/// Itens já paginados não mudam.
pub fn compute_logistics_finalization(
    item: &DesignItem,
    now: DateTime<Utc>,
) -> Option<FieldUpdateSet> {
    if item.paginacao {
        return None;
    }

    let mut updates = FieldUpdateSet::new();
    updates
        .set_bool(Column::Paginacao, true)
        .set_text(Column::PathTrabalho, Some(LOGISTICS_PATH.to_string()))
        .set_timestamp(Column::DataPaginacao, Some(item.data_paginacao.unwrap_or(now)));
    Some(updates)
}

#[derive(Debug, Clone, Default)]
pub struct DetailsChange {
    pub descricao: Option<String>,
    pub codigo: Option<String>,
    pub quantidade: Option<i32>,
    pub notas: Option<String>,
}

/// Edição livre dos campos de texto; só entra no lote o que foi enviado.
pub fn compute_details(change: DetailsChange) -> FieldUpdateSet {
    let mut updates = FieldUpdateSet::new();
    if let Some(descricao) = change.descricao {
        updates.set_text(Column::Descricao, Some(descricao));
    }
    if let Some(codigo) = change.codigo {
        updates.set_text(Column::Codigo, Some(codigo));
    }
    if let Some(quantidade) = change.quantidade {
        updates.set_int(Column::Quantidade, Some(quantidade));
    }
    if let Some(notas) = change.notas {
        updates.set_text(Column::Notas, Some(notas));
    }
    updates
}
