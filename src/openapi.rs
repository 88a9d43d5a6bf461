use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the core surfaces (materials, inventory,
/// attendance). The remaining subsystems follow the same envelope and
/// error conventions.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "worksite-api",
        description = "Construction ERP backend: materials, warehouse inventory, projects, crews, attendance, forum"
    ),
    paths(
        crate::handlers::materials::list_materials,
        crate::handlers::materials::get_material,
        crate::handlers::materials::get_material_by_barcode,
        crate::handlers::materials::create_material,
        crate::handlers::materials::update_material,
        crate::handlers::materials::delete_material,
        crate::handlers::inventory::list_entries,
        crate::handlers::inventory::get_entry,
        crate::handlers::inventory::create_entry,
        crate::handlers::inventory::adjust_entry,
        crate::handlers::inventory::list_adjustments,
        crate::handlers::inventory::delete_entry,
        crate::handlers::attendance::check_in,
        crate::handlers::attendance::check_out,
        crate::handlers::attendance::report,
    ),
    components(schemas(
        crate::errors::ErrorBody,
        crate::handlers::materials::MaterialResponse,
        crate::handlers::materials::MaterialPayload,
        crate::handlers::inventory::MaterialRef,
        crate::handlers::inventory::WarehouseRef,
        crate::handlers::inventory::InventoryEntryResponse,
        crate::handlers::inventory::AdjustmentResponse,
        crate::handlers::inventory::CreateEntryRequest,
        crate::handlers::inventory::AdjustRequest,
        crate::handlers::attendance::CheckRequest,
        crate::services::attendance::ReportDay,
        crate::services::attendance::RangeReport,
    )),
    tags(
        (name = "materials", description = "Material and tool registry"),
        (name = "inventory", description = "Warehouse stock ledger"),
        (name = "attendance", description = "Worker attendance tracking")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, backed by `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
