// src/models/catalogue.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Conjunto ordenado de referências fracas a produtos. Produtos apagados
// continuam listados aqui e viram "Unknown" na hora de exibir.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Catalogue {
    pub id: Uuid,

    #[schema(example = "General Product Catalogue 2025")]
    pub name: String,

    pub products: Vec<Uuid>,

    // Nome (não id) de quem criou, como o painel exibe
    pub created_by: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCataloguePayload {
    #[validate(length(min = 1, message = "O nome do catálogo é obrigatório."))]
    pub name: String,

    // O painel não deixa criar catálogo vazio
    #[validate(length(min = 1, message = "Selecione pelo menos um produto."))]
    pub products: Vec<Uuid>,
}
