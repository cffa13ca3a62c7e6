// src/store/record_store.rs

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::common::error::AppError;
use crate::models::activity::ActivityLogEntry;
use crate::models::auth::User;
use crate::models::catalogue::Catalogue;
use crate::models::inventory::{Category, Product, StockMovement};
use crate::models::invoice::Invoice;
use crate::models::settings::Settings;
use crate::store::seed;

// Todas as coleções vivem juntas em um único valor. É o análogo do
// "chave → coleção JSON" persistido: as chaves do arquivo são exatamente
// os nomes camelCase abaixo (categories, products, ..., appInitialized).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub invoices: Vec<Invoice>,
    pub catalogues: Vec<Catalogue>,
    pub users: Vec<User>,
    pub logs: Vec<ActivityLogEntry>,
    pub stock_movements: Vec<StockMovement>,
    pub settings: Settings,
    pub app_initialized: bool,
}

// O Record Store é um objeto explícito com ciclo de vida injetado:
// quem precisa dele recebe por referência (Arc), nada de estado global.
//
// Modelo de escrita: UM escritor lógico (um operador por processo).
// Toda mutação passa por `mutate`, que trabalha numa cópia e só troca
// o estado (e persiste) se a operação inteira der certo. Assim uma
// falha nunca deixa escrita parcial para trás, e "mutação + histórico
// + auditoria" são atômicos para quem lê.
pub struct RecordStore {
    inner: RwLock<Database>,
    path: Option<PathBuf>,
}

impl RecordStore {
    // Abre o store a partir do arquivo de dados, semeando o dataset
    // inicial quando o arquivo não existe (primeira execução) ou não
    // chegou a ser inicializado.
    pub fn open(path: Option<PathBuf>) -> Result<Self, AppError> {
        let db = match &path {
            Some(p) if p.exists() => {
                let raw = fs::read_to_string(p)?;
                match serde_json::from_str::<Database>(&raw) {
                    Ok(db) if db.app_initialized => db,
                    // Arquivo corrompido ou inicialização interrompida: recomeça do seed
                    _ => seed::seed_database()?,
                }
            }
            _ => seed::seed_database()?,
        };

        Self::persist(&path, &db)?;
        Ok(Self { inner: RwLock::new(db), path })
    }

    // Store só em memória (testes e execução sem DATA_FILE).
    pub fn in_memory() -> Result<Self, AppError> {
        Ok(Self {
            inner: RwLock::new(seed::seed_database()?),
            path: None,
        })
    }

    fn persist(path: &Option<PathBuf>, db: &Database) -> Result<(), AppError> {
        if let Some(p) = path {
            let json = serde_json::to_string_pretty(db)
                .map_err(|e| AppError::InternalServerError(e.into()))?;
            fs::write(p, json)?;
        }
        Ok(())
    }

    // Unidade de trabalho: roda a closure numa cópia do banco e só
    // efetiva (memória + disco) se ela retornar Ok. O write-lock cobre
    // a operação inteira, então nenhum leitor enxerga estado intermediário.
    pub async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut guard = self.inner.write().await;
        let mut working = guard.clone();
        let out = f(&mut working)?;
        Self::persist(&self.path, &working)?;
        *guard = working;
        Ok(out)
    }

    // Volta tudo ao dataset inicial.
    pub async fn reset(&self) -> Result<(), AppError> {
        let fresh = seed::seed_database()?;
        let mut guard = self.inner.write().await;
        Self::persist(&self.path, &fresh)?;
        *guard = fresh;
        Ok(())
    }

    // --- Leituras ---
    // Sempre a coleção COMPLETA, clonada. Filtro é problema de quem chama.

    pub async fn snapshot(&self) -> Database {
        self.inner.read().await.clone()
    }

    pub async fn get_categories(&self) -> Vec<Category> {
        self.inner.read().await.categories.clone()
    }

    pub async fn get_products(&self) -> Vec<Product> {
        self.inner.read().await.products.clone()
    }

    pub async fn get_invoices(&self) -> Vec<Invoice> {
        self.inner.read().await.invoices.clone()
    }

    pub async fn get_catalogues(&self) -> Vec<Catalogue> {
        self.inner.read().await.catalogues.clone()
    }

    pub async fn get_users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    pub async fn get_logs(&self) -> Vec<ActivityLogEntry> {
        self.inner.read().await.logs.clone()
    }

    pub async fn get_stock_movements(&self) -> Vec<StockMovement> {
        self.inner.read().await.stock_movements.clone()
    }

    pub async fn get_settings(&self) -> Settings {
        self.inner.read().await.settings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_data_file() -> PathBuf {
        std::env::temp_dir().join(format!("estoque-test-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn seeds_the_fixed_dataset_on_first_run() {
        let store = RecordStore::in_memory().expect("seed");

        assert_eq!(store.get_categories().await.len(), 5);
        assert_eq!(store.get_products().await.len(), 15);
        assert_eq!(store.get_invoices().await.len(), 2);
        assert_eq!(store.get_catalogues().await.len(), 1);
        assert_eq!(store.get_users().await.len(), 1);
        assert!(store.get_logs().await.is_empty());
        assert!(store.get_stock_movements().await.is_empty());

        let settings = store.get_settings().await;
        assert_eq!(settings.company_name, "N.P. Trigunayat Systems");
        assert_eq!(settings.session_timeout_minutes, 15);
    }

    #[tokio::test]
    async fn reads_are_idempotent_without_writes() {
        let store = RecordStore::in_memory().expect("seed");

        let first = store.get_products().await;
        let second = store.get_products().await;

        let a = serde_json::to_value(&first).expect("json");
        let b = serde_json::to_value(&second).expect("json");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_prior_state_untouched() {
        let store = RecordStore::in_memory().expect("seed");
        let before = store.get_products().await;

        let result: Result<(), AppError> = store
            .mutate(|db| {
                // Mexe no estado e depois falha: nada disso pode vazar.
                db.products.clear();
                Err(AppError::NotFound("Produto"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.get_products().await.len(), before.len());
    }

    #[tokio::test]
    async fn persists_and_reloads_from_the_data_file() {
        let path = temp_data_file();

        {
            let store = RecordStore::open(Some(path.clone())).expect("open");
            store
                .mutate(|db| {
                    db.settings.company_name = "Reloaded Systems".to_string();
                    Ok(())
                })
                .await
                .expect("mutate");
        }

        let reopened = RecordStore::open(Some(path.clone())).expect("reopen");
        assert_eq!(
            reopened.get_settings().await.company_name,
            "Reloaded Systems"
        );
        // Recarregou, não re-semeou
        assert_eq!(reopened.get_products().await.len(), 15);

        let _ = fs::remove_file(path);
    }

    #[tokio::test]
    async fn reset_restores_the_seed_dataset() {
        let store = RecordStore::in_memory().expect("seed");

        store
            .mutate(|db| {
                db.products.clear();
                db.settings.company_name = "Someone Else".to_string();
                Ok(())
            })
            .await
            .expect("mutate");
        assert!(store.get_products().await.is_empty());

        store.reset().await.expect("reset");
        assert_eq!(store.get_products().await.len(), 15);
        assert_eq!(
            store.get_settings().await.company_name,
            "N.P. Trigunayat Systems"
        );
    }
}
