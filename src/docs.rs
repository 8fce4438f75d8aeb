// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- DESIGNER: leitura ---
        handlers::designer::create_item,
        handlers::designer::get_item,
        handlers::designer::list_job_items,
        handlers::designer::get_timeline,

        // --- DESIGNER: versões e finalização ---
        handlers::designer::toggle_field,
        handlers::designer::set_paginacao,
        handlers::designer::set_path,
        handlers::designer::set_complexidade,
        handlers::designer::set_flag,
        handlers::designer::update_details,

        // --- DESIGNER: lote ---
        handlers::designer::assign_designer,
        handlers::designer::sync_logistics,
    ),
    components(
        schemas(
            models::designer::Round,
            models::designer::DesignItem,
            models::designer::ItemFlag,
            models::designer::BadgeTone,
            models::designer::ItemCard,
            models::designer::MutationResponse,
            models::designer::TimelineEvent,
            models::designer::TimelineDurations,
            models::designer::ItemTimeline,

            // --- PAYLOADS ---
            handlers::designer::CreateDesignItemPayload,
            handlers::designer::ToggleFieldPayload,
            handlers::designer::PaginacaoPayload,
            handlers::designer::PathPayload,
            handlers::designer::ComplexidadePayload,
            handlers::designer::FlagPayload,
            handlers::designer::UpdateDetailsPayload,
            handlers::designer::AssignDesignerPayload,
            handlers::designer::SyncLogisticsPayload,
        )
    ),
    tags(
        (name = "Designer", description = "Fluxo do designer: versões, aprovações e paginação")
    )
)]
pub struct ApiDoc;
