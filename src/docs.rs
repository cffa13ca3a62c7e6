// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Products ---
        handlers::products::get_all_products,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::generate_sku,
        handlers::products::export_products_csv,

        // --- Categories ---
        handlers::categories::get_all_categories,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Inventory ---
        handlers::inventory::adjust_stock,
        handlers::inventory::get_stock_movements,
        handlers::inventory::get_low_stock,

        // --- Invoices ---
        handlers::invoices::get_all_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::create_invoice,
        handlers::invoices::delete_invoice,
        handlers::invoices::download_invoice_pdf,

        // --- Catalogues ---
        handlers::catalogues::get_all_catalogues,
        handlers::catalogues::create_catalogue,
        handlers::catalogues::delete_catalogue,

        // --- Users / Activity ---
        handlers::users::get_all_users,
        handlers::activity::get_activity_logs,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::settings::download_backup,
        handlers::settings::reset_data,

        // --- Reports ---
        handlers::reports::get_dashboard_summary,
        handlers::reports::get_product_report,
        handlers::reports::get_stock_report,
        handlers::reports::get_invoice_report,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserView,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Inventory ---
            models::inventory::Category,
            models::inventory::Product,
            models::inventory::StockStatus,
            models::inventory::StockAction,
            models::inventory::StockMovement,
            models::inventory::ProductPayload,
            models::inventory::CategoryPayload,
            models::inventory::StockAdjustmentPayload,

            // --- Invoices ---
            models::invoice::Invoice,
            models::invoice::InvoiceItem,
            models::invoice::InvoiceItemPayload,
            models::invoice::CreateInvoicePayload,

            // --- Catalogues ---
            models::catalogue::Catalogue,
            models::catalogue::CreateCataloguePayload,

            // --- Activity ---
            models::activity::ActivityLogEntry,

            // --- Settings ---
            models::settings::Settings,
            models::settings::UpdateSettingsPayload,

            // --- Reports ---
            models::reports::DashboardSummary,
            models::reports::CategoryCount,
            models::reports::ProductReport,
            models::reports::StockReport,
            models::reports::InvoiceReport,

            // --- Payload auxiliar ---
            handlers::products::SkuResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Sessão"),
        (name = "Products", description = "Gestão de Produtos"),
        (name = "Categories", description = "Categorias de Produto"),
        (name = "Inventory", description = "Ajustes e Histórico de Estoque"),
        (name = "Invoices", description = "Faturas de Clientes"),
        (name = "Catalogues", description = "Catálogos de Produto"),
        (name = "Users", description = "Contas e Papéis"),
        (name = "Activity", description = "Trilha de Auditoria"),
        (name = "Settings", description = "Configurações, Backup e Reset"),
        (name = "Reports", description = "Indicadores e Relatórios")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
