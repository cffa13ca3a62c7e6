// src/services/catalogue_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        activity::ActivityLogEntry,
        auth::UserView,
        catalogue::{Catalogue, CreateCataloguePayload},
    },
    store::RecordStore,
};

#[derive(Clone)]
pub struct CatalogueService {
    store: Arc<RecordStore>,
}

impl CatalogueService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list_catalogues(&self) -> Vec<Catalogue> {
        self.store.get_catalogues().await
    }

    // As referências de produto são fracas: não validamos contra a
    // coleção de produtos, e um produto apagado depois simplesmente
    // deixa de resolver na exibição.
    pub async fn create_catalogue(
        &self,
        payload: CreateCataloguePayload,
        actor: &UserView,
    ) -> Result<Catalogue, AppError> {
        self.store
            .mutate(move |db| {
                let catalogue = Catalogue {
                    id: Uuid::new_v4(),
                    name: payload.name,
                    products: payload.products,
                    created_by: actor.name.clone(),
                    created_at: Utc::now(),
                };

                db.logs.push(ActivityLogEntry::new(
                    actor.id,
                    "Create",
                    "Catalogue",
                    format!("Created catalogue: {}", catalogue.name),
                ));
                db.catalogues.push(catalogue.clone());
                Ok(catalogue)
            })
            .await
    }

    pub async fn delete_catalogue(&self, id: Uuid) -> Result<(), AppError> {
        self.store
            .mutate(move |db| {
                let position = db
                    .catalogues
                    .iter()
                    .position(|c| c.id == id)
                    .ok_or(AppError::NotFound("Catálogo"))?;
                db.catalogues.remove(position);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> UserView {
        UserView {
            id: Uuid::new_v4(),
            name: "Admin User".to_string(),
            email: "admin@np.com".to_string(),
            role: "Super Admin".to_string(),
            last_login: None,
        }
    }

    #[tokio::test]
    async fn create_and_delete_round_trip() {
        let store = Arc::new(RecordStore::in_memory().expect("seed"));
        let svc = CatalogueService::new(store.clone());
        let user = actor();

        let product_id = store.get_products().await[0].id;
        let catalogue = svc
            .create_catalogue(
                CreateCataloguePayload {
                    name: "Electronics Catalogue 2025".to_string(),
                    products: vec![product_id],
                },
                &user,
            )
            .await
            .expect("create");

        assert_eq!(catalogue.created_by, "Admin User");
        assert_eq!(svc.list_catalogues().await.len(), 2); // 1 do seed + 1 novo
        assert_eq!(
            store.get_logs().await.last().map(|l| l.entity.clone()),
            Some("Catalogue".to_string())
        );

        svc.delete_catalogue(catalogue.id).await.expect("delete");
        assert_eq!(svc.list_catalogues().await.len(), 1);

        let err = svc.delete_catalogue(catalogue.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
