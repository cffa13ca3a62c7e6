// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Trilha de auditoria append-only: quem fez o quê, em qual entidade.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "Stock Adjustment")]
    pub action: String,

    #[schema(example = "Inventory")]
    pub entity: String,

    pub details: String,

    pub timestamp: DateTime<Utc>,
}

impl ActivityLogEntry {
    pub fn new(user_id: Uuid, action: &str, entity: &str, details: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action: action.to_string(),
            entity: entity.to_string(),
            details,
            timestamp: Utc::now(),
        }
    }
}
