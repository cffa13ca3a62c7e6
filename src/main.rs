//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

// Declaração dos nossos módulos
mod common;
mod config;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Rotas de autenticação: login é público, logout e /me exigem sessão
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route(
            "/logout",
            post(handlers::auth::logout).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        )
        .route(
            "/me",
            get(handlers::auth::get_me).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::get_all_products).post(handlers::products::create_product),
        )
        .route("/export", get(handlers::products::export_products_csv))
        .route("/generate-sku", get(handlers::products::generate_sku))
        .route(
            "/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        );

    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::categories::get_all_categories)
                .post(handlers::categories::create_category),
        )
        .route(
            "/{id}",
            put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        );

    let invoice_routes = Router::new()
        .route(
            "/",
            get(handlers::invoices::get_all_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/{id}",
            get(handlers::invoices::get_invoice).delete(handlers::invoices::delete_invoice),
        )
        .route("/{id}/pdf", get(handlers::invoices::download_invoice_pdf));

    let inventory_routes = Router::new()
        .route("/adjust", post(handlers::inventory::adjust_stock))
        .route("/movements", get(handlers::inventory::get_stock_movements))
        .route("/low-stock", get(handlers::inventory::get_low_stock));

    let catalogue_routes = Router::new()
        .route(
            "/",
            get(handlers::catalogues::get_all_catalogues)
                .post(handlers::catalogues::create_catalogue),
        )
        .route("/{id}", delete(handlers::catalogues::delete_catalogue));

    let settings_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route("/backup", get(handlers::settings::download_backup))
        .route("/reset", post(handlers::settings::reset_data));

    let report_routes = Router::new()
        .route("/dashboard", get(handlers::reports::get_dashboard_summary))
        .route("/products", get(handlers::reports::get_product_report))
        .route("/stock", get(handlers::reports::get_stock_report))
        .route("/invoices", get(handlers::reports::get_invoice_report));

    // Tudo que mexe nos dados fica atrás do guardião de sessão
    let protected_routes = Router::new()
        .nest("/api/products", product_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/invoices", invoice_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/catalogues", catalogue_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/reports", report_routes)
        .route("/api/users", get(handlers::users::get_all_users))
        .route("/api/logs", get(handlers::activity::get_activity_logs))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        // O painel roda em outra origem; a API original liberava CORS
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener.local_addr().expect("endereço local")
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}

// Fluxo completo do operador, de ponta a ponta, contra um estado montado
// igual ao de produção (mesmos serviços, mesmo store compartilhado).
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Datelike, Utc};
    use rust_decimal::Decimal;

    use crate::config::AppState;
    use crate::models::inventory::{StockAction, StockAdjustmentPayload};
    use crate::models::invoice::{CreateInvoicePayload, InvoiceItemPayload};
    use crate::services::{
        auth::AuthService, catalogue_service::CatalogueService,
        document_service::DocumentService, inventory_service::InventoryService,
        invoice_service::InvoiceService, report_service::ReportService,
    };
    use crate::store::RecordStore;

    fn test_state() -> AppState {
        let store = Arc::new(RecordStore::in_memory().expect("seed"));
        AppState {
            store: store.clone(),
            auth_service: AuthService::new(store.clone(), "segredo-de-teste".to_string()),
            inventory_service: InventoryService::new(store.clone()),
            invoice_service: InvoiceService::new(store.clone()),
            catalogue_service: CatalogueService::new(store.clone()),
            report_service: ReportService::new(store.clone()),
            document_service: DocumentService::new(store),
        }
    }

    #[tokio::test]
    async fn operator_flow_from_login_to_invoice_and_restock() {
        let state = test_state();

        // 1. Login e sessão ativa
        let auth = state
            .auth_service
            .login("admin@np.com", "admin123")
            .await
            .expect("login");
        let user = state
            .auth_service
            .validate_token(&auth.token)
            .await
            .expect("sessão ativa");

        // 2. Venda: fatura de 3 teclados (estoque semeado: 8)
        let keyboard = state
            .store
            .get_products()
            .await
            .into_iter()
            .find(|p| p.sku == "ACCS-0002")
            .expect("produto semeado");

        let invoice = state
            .invoice_service
            .create_invoice(
                CreateInvoicePayload {
                    customer_name: "Digital Hub India".to_string(),
                    customer_contact: Some("sales@digitalhub.in".to_string()),
                    items: vec![InvoiceItemPayload {
                        product_id: keyboard.id,
                        qty: 3,
                        price: keyboard.price,
                    }],
                    discount: Decimal::from(1000),
                },
                &user,
            )
            .await
            .expect("fatura");

        // 3×5999 = 17997; −1000 = 16997; GST 18% = 3059.46; total 20056.46
        assert_eq!(invoice.total, Decimal::from(17997));
        assert_eq!(invoice.tax, Decimal::new(305_946, 2));
        assert_eq!(invoice.final_amount, Decimal::new(2_005_646, 2));
        assert!(invoice
            .invoice_no
            .contains(&Utc::now().year().to_string()));

        // 3. A venda derrubou o estoque pelo razão
        let after_sale = state
            .store
            .get_products()
            .await
            .into_iter()
            .find(|p| p.id == keyboard.id)
            .expect("produto");
        assert_eq!(after_sale.stock, 5);

        let movements = state.inventory_service.list_movements().await;
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].reason.as_deref(), Some("Invoice sale"));

        // 4. Reposição manual
        state
            .inventory_service
            .adjust_stock(
                StockAdjustmentPayload {
                    product_id: keyboard.id,
                    action: StockAction::Added,
                    quantity: 10,
                    reason: Some("Restock".to_string()),
                },
                &user,
            )
            .await
            .expect("ajuste");

        let restocked = state
            .store
            .get_products()
            .await
            .into_iter()
            .find(|p| p.id == keyboard.id)
            .expect("produto");
        assert_eq!(restocked.stock, 15);

        // 5. Relatórios refletem o novo estado
        let summary = state.report_service.dashboard_summary().await;
        assert_eq!(summary.total_invoices, 3); // 2 do seed + 1 nova

        // 6. Cada passo deixou rastro na auditoria
        let logs = state.store.get_logs().await;
        assert!(logs.iter().any(|l| l.action == "Login"));
        assert!(logs.iter().any(|l| l.action == "Stock Adjustment"));
        assert!(logs
            .iter()
            .any(|l| l.entity == "Invoice" && l.details.contains(&invoice.invoice_no)));

        // 7. Logout encerra a sessão
        state.auth_service.logout(&user).await.expect("logout");
        assert!(state.auth_service.validate_token(&auth.token).await.is_err());
    }
}
