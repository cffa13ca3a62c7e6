// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use crate::{
    services::{
        auth::AuthService, catalogue_service::CatalogueService,
        document_service::DocumentService, inventory_service::InventoryService,
        invoice_service::InvoiceService, report_service::ReportService,
    },
    store::RecordStore,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub invoice_service: InvoiceService,
    pub catalogue_service: CatalogueService,
    pub report_service: ReportService,
    pub document_service: DocumentService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Sem DATA_FILE o store roda só em memória (cada reinício volta
        // ao dataset semeado, igual à versão de demonstração).
        let data_file = env::var("DATA_FILE").ok().map(PathBuf::from);
        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "estoque-dev-secret".to_string());

        let store = Arc::new(RecordStore::open(data_file)?);
        tracing::info!("✅ Record Store aberto e semeado com sucesso!");

        // --- Monta o gráfico de dependências ---
        // Todos os serviços recebem o MESMO store por referência;
        // nada de estado global ambiente.
        let auth_service = AuthService::new(store.clone(), jwt_secret);
        let inventory_service = InventoryService::new(store.clone());
        let invoice_service = InvoiceService::new(store.clone());
        let catalogue_service = CatalogueService::new(store.clone());
        let report_service = ReportService::new(store.clone());
        let document_service = DocumentService::new(store.clone());

        Ok(Self {
            store,
            auth_service,
            inventory_service,
            invoice_service,
            catalogue_service,
            report_service,
            document_service,
        })
    }
}
