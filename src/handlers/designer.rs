// src/handlers/designer.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::designer::{
        ItemCard, ItemFlag, ItemTimeline, MutationResponse, NewDesignItem, ToggleTarget,
    },
    services::cascade::DetailsChange,
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesignItemPayload {
    pub folha_obra_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Cartaz A3 campanha verão")]
    pub descricao: String,

    pub codigo: Option<String>,

    #[validate(range(min = 1, message = "range"))]
    #[schema(example = 250)]
    pub quantidade: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFieldPayload {
    /// `maquete_enviada{v}`, `aprovacao_recebida{v}`, `recusada{v}` ou `R{v}`, v de 1 a 6.
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "aprovacao_recebida1")]
    pub field: String,
    pub value: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaginacaoPayload {
    pub value: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PathPayload {
    #[schema(example = "P:\\Trabalhos\\2024\\FO-1234")]
    pub path: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ComplexidadePayload {
    #[schema(example = "OFFSET")]
    pub complexidade: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FlagPayload {
    pub flag: ItemFlag,
    pub value: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailsPayload {
    #[validate(length(min = 1, message = "required"))]
    pub descricao: Option<String>,
    pub codigo: Option<String>,
    #[validate(range(min = 0, message = "range"))]
    pub quantidade: Option<i32>,
    pub notas: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignDesignerPayload {
    /// Vazio ou nulo remove o designer.
    pub designer: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncLogisticsPayload {
    pub job_ids: Vec<Uuid>,
}

// ---
// Rotas
// ---

pub fn designer_routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item))
        .route("/items/{id}", get(get_item).patch(update_details))
        .route("/items/{id}/toggle", post(toggle_field))
        .route("/items/{id}/paginacao", post(set_paginacao))
        .route("/items/{id}/path", put(set_path))
        .route("/items/{id}/complexidade", put(set_complexidade))
        .route("/items/{id}/flags", post(set_flag))
        .route("/items/{id}/timeline", get(get_timeline))
        .route("/jobs/{job_id}/items", get(list_job_items))
        .route("/jobs/{job_id}/designer", put(assign_designer))
        .route("/sync-logistics", post(sync_logistics))
}

// ---
// Handlers: leitura e criação
// ---

#[utoipa::path(
    post,
    path = "/api/designer/items",
    tag = "Designer",
    request_body = CreateDesignItemPayload,
    responses(
        (status = 201, description = "Item entrou no fluxo do designer", body = ItemCard),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateDesignItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let card = app_state
        .designer_service
        .create_item(NewDesignItem {
            folha_obra_id: payload.folha_obra_id,
            descricao: payload.descricao,
            codigo: payload.codigo,
            quantidade: payload.quantidade,
        })
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(card)))
}

#[utoipa::path(
    get,
    path = "/api/designer/items/{id}",
    tag = "Designer",
    responses(
        (status = 200, description = "Item com etapa e badge", body = ItemCard),
        (status = 404, description = "Item não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do item no fluxo do designer"))
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let card = app_state
        .designer_service
        .get_card(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(card)))
}

#[utoipa::path(
    get,
    path = "/api/designer/jobs/{job_id}/items",
    tag = "Designer",
    responses(
        (status = 200, description = "Itens da folha de obra", body = Vec<ItemCard>)
    ),
    params(("job_id" = Uuid, Path, description = "ID da folha de obra"))
)]
pub async fn list_job_items(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let cards = app_state
        .designer_service
        .list_job_cards(job_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cards)))
}

#[utoipa::path(
    get,
    path = "/api/designer/items/{id}/timeline",
    tag = "Designer",
    responses(
        (status = 200, description = "Linha do tempo das versões", body = ItemTimeline),
        (status = 404, description = "Item não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do item no fluxo do designer"))
)]
pub async fn get_timeline(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let timeline = app_state
        .designer_service
        .get_timeline(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(timeline)))
}

// ---
// Handlers: mutações (aplicação otimista)
// ---

#[utoipa::path(
    post,
    path = "/api/designer/items/{id}/toggle",
    tag = "Designer",
    request_body = ToggleFieldPayload,
    responses(
        (status = 200, description = "Cascata aplicada; `applied = false` quando a trava descartou a operação", body = MutationResponse),
        (status = 400, description = "Campo fora das versões 1 a 6"),
        (status = 404, description = "Item não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do item no fluxo do designer"))
)]
pub async fn toggle_field(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleFieldPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let target = ToggleTarget::parse(&payload.field).ok_or_else(|| {
        AppError::UnknownField(payload.field.clone()).to_api_error(&locale, &app_state.i18n_store)
    })?;

    let outcome = app_state
        .designer_service
        .toggle_field(id, target, payload.value)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(outcome.into_response())))
}

#[utoipa::path(
    post,
    path = "/api/designer/items/{id}/paginacao",
    tag = "Designer",
    request_body = PaginacaoPayload,
    responses(
        (status = 200, description = "Paginação alterada", body = MutationResponse),
        (status = 404, description = "Item não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do item no fluxo do designer"))
)]
pub async fn set_paginacao(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaginacaoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .designer_service
        .set_paginacao(id, payload.value)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(outcome.into_response())))
}

#[utoipa::path(
    put,
    path = "/api/designer/items/{id}/path",
    tag = "Designer",
    request_body = PathPayload,
    responses(
        (status = 200, description = "Path do trabalho gravado", body = MutationResponse),
        (status = 409, description = "Paginação inativa")
    ),
    params(("id" = Uuid, Path, description = "ID do item no fluxo do designer"))
)]
pub async fn set_path(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<PathPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .designer_service
        .set_path(id, &payload.path)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(outcome.into_response())))
}

#[utoipa::path(
    put,
    path = "/api/designer/items/{id}/complexidade",
    tag = "Designer",
    request_body = ComplexidadePayload,
    responses(
        (status = 200, description = "Complexidade gravada; OFFSET finaliza o item", body = MutationResponse)
    ),
    params(("id" = Uuid, Path, description = "ID do item no fluxo do designer"))
)]
pub async fn set_complexidade(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<ComplexidadePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .designer_service
        .set_complexidade(id, payload.complexidade.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(outcome.into_response())))
}

#[utoipa::path(
    post,
    path = "/api/designer/items/{id}/flags",
    tag = "Designer",
    request_body = FlagPayload,
    responses(
        (status = 200, description = "Flag alterada", body = MutationResponse)
    ),
    params(("id" = Uuid, Path, description = "ID do item no fluxo do designer"))
)]
pub async fn set_flag(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<FlagPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .designer_service
        .set_flag(id, payload.flag, payload.value)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(outcome.into_response())))
}

#[utoipa::path(
    patch,
    path = "/api/designer/items/{id}",
    tag = "Designer",
    request_body = UpdateDetailsPayload,
    responses(
        (status = 200, description = "Detalhes atualizados", body = MutationResponse),
        (status = 400, description = "Payload inválido")
    ),
    params(("id" = Uuid, Path, description = "ID do item no fluxo do designer"))
)]
pub async fn update_details(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDetailsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let change = DetailsChange {
        descricao: payload.descricao,
        codigo: payload.codigo,
        quantidade: payload.quantidade,
        notas: payload.notas,
    };

    let outcome = app_state
        .designer_service
        .update_details(id, change)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(outcome.into_response())))
}

// ---
// Handlers: lote
// ---

#[utoipa::path(
    put,
    path = "/api/designer/jobs/{job_id}/designer",
    tag = "Designer",
    request_body = AssignDesignerPayload,
    responses(
        (status = 200, description = "Designer atribuído a todos os itens da folha de obra")
    ),
    params(("job_id" = Uuid, Path, description = "ID da folha de obra"))
)]
pub async fn assign_designer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<AssignDesignerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .designer_service
        .assign_designer(job_id, payload.designer)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(json!({ "updated": updated }))))
}

#[utoipa::path(
    post,
    path = "/api/designer/sync-logistics",
    tag = "Designer",
    request_body = SyncLogisticsPayload,
    responses(
        (status = 200, description = "Itens entregues pela logística marcados como paginados")
    )
)]
pub async fn sync_logistics(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SyncLogisticsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let finalized = app_state
        .designer_service
        .sync_logistics_paginacao(&payload.job_ids)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(json!({ "finalized": finalized }))))
}
