// src/services/inventory_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        activity::ActivityLogEntry,
        auth::UserView,
        inventory::{
            Category, CategoryPayload, Product, ProductPayload, StockAction,
            StockAdjustmentPayload, StockMovement, StockStatus,
        },
    },
    store::{Database, RecordStore},
};

// O Livro-Razão de estoque: toda mudança de quantidade passa por aqui,
// dentro de UMA unidade de trabalho que grava o produto, a movimentação
// imutável e a entrada de auditoria juntos. A criação de fatura reusa
// esta mesma função por item vendido.
pub(crate) fn apply_stock_adjustment(
    db: &mut Database,
    product_id: Uuid,
    quantity: u32,
    action: StockAction,
    reason: Option<String>,
    actor: &UserView,
) -> Result<StockMovement, AppError> {
    let product = db
        .products
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or(AppError::NotFound("Produto"))?;

    let previous_stock = product.stock;
    let new_stock = match action {
        StockAction::Added => previous_stock.saturating_add(quantity),
        // Redução tem piso em zero: pedir mais do que há descarta o
        // excedente em silêncio e o estoque nunca fica negativo
        StockAction::Reduced => previous_stock.saturating_sub(quantity),
    };
    product.stock = new_stock;

    let movement = StockMovement {
        id: Uuid::new_v4(),
        product_id,
        product_name: product.name.clone(),
        action,
        quantity,
        previous_stock,
        new_stock,
        reason,
        user_id: actor.id,
        user_name: actor.name.clone(),
        timestamp: Utc::now(),
    };
    db.stock_movements.push(movement.clone());

    let verb = match action {
        StockAction::Added => "Added",
        StockAction::Reduced => "Reduced",
    };
    db.logs.push(ActivityLogEntry::new(
        actor.id,
        "Stock Adjustment",
        "Inventory",
        format!("{} {} units of {}", verb, quantity, movement.product_name),
    ));

    Ok(movement)
}

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<RecordStore>,
}

impl InventoryService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    // --- Produtos ---

    // Filtros como no painel: busca por nome/SKU (case-insensitive),
    // categoria exata e situação de estoque ("in" | "low" | "out").
    pub async fn list_products(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        stock: Option<&str>,
    ) -> Vec<Product> {
        let mut products = self.store.get_products().await;

        if let Some(term) = search {
            let term = term.to_lowercase();
            products.retain(|p| {
                p.name.to_lowercase().contains(&term) || p.sku.to_lowercase().contains(&term)
            });
        }

        if let Some(cat) = category {
            products.retain(|p| p.category == cat);
        }

        match stock {
            Some("low") => products.retain(|p| p.stock_status() == StockStatus::LowStock),
            Some("out") => products.retain(|p| p.stock_status() == StockStatus::OutOfStock),
            Some("in") => products.retain(|p| p.stock_status() == StockStatus::InStock),
            _ => {}
        }

        products
    }

    pub async fn create_product(
        &self,
        payload: ProductPayload,
        actor: &UserView,
    ) -> Result<Product, AppError> {
        self.store
            .mutate(move |db| {
                if db.products.iter().any(|p| p.sku == payload.sku) {
                    return Err(AppError::SkuAlreadyExists);
                }

                let product = Product {
                    id: Uuid::new_v4(),
                    name: payload.name,
                    sku: payload.sku,
                    category: payload.category,
                    description: payload.description,
                    price: payload.price,
                    cost_price: payload.cost_price,
                    stock: payload.stock,
                    reorder_level: payload.reorder_level,
                    featured: payload.featured,
                    created_at: Utc::now(),
                    updated_at: None,
                };

                db.logs.push(ActivityLogEntry::new(
                    actor.id,
                    "Create",
                    "Product",
                    format!("Created product: {}", product.name),
                ));
                db.products.push(product.clone());
                Ok(product)
            })
            .await
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        payload: ProductPayload,
        actor: &UserView,
    ) -> Result<Product, AppError> {
        self.store
            .mutate(move |db| {
                // SKU continua único entre os DEMAIS produtos
                if db.products.iter().any(|p| p.sku == payload.sku && p.id != id) {
                    return Err(AppError::SkuAlreadyExists);
                }

                let product = db
                    .products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(AppError::NotFound("Produto"))?;

                product.name = payload.name;
                product.sku = payload.sku;
                product.category = payload.category;
                product.description = payload.description;
                product.price = payload.price;
                product.cost_price = payload.cost_price;
                product.stock = payload.stock;
                product.reorder_level = payload.reorder_level;
                product.featured = payload.featured;
                product.updated_at = Some(Utc::now());

                let updated = product.clone();
                db.logs.push(ActivityLogEntry::new(
                    actor.id,
                    "Update",
                    "Product",
                    format!("Updated product: {}", updated.name),
                ));
                Ok(updated)
            })
            .await
    }

    pub async fn delete_product(&self, id: Uuid, actor: &UserView) -> Result<(), AppError> {
        self.store
            .mutate(move |db| {
                let position = db
                    .products
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or(AppError::NotFound("Produto"))?;
                let removed = db.products.remove(position);

                db.logs.push(ActivityLogEntry::new(
                    actor.id,
                    "Delete",
                    "Product",
                    format!("Deleted product: {}", removed.name),
                ));
                Ok(())
            })
            .await
    }

    // SKU sugerido: 4 primeiras letras da categoria + sequencial por
    // categoria com 4 dígitos (ELEC-0003, HARD-0006...).
    pub async fn generate_sku(&self, category: &str) -> Result<String, AppError> {
        let db = self.store.snapshot().await;

        if !db.categories.iter().any(|c| c.name == category) {
            return Err(AppError::NotFound("Categoria"));
        }

        let prefix: String = category.chars().take(4).collect::<String>().to_uppercase();
        let next = db.products.iter().filter(|p| p.category == category).count() + 1;
        Ok(format!("{}-{:04}", prefix, next))
    }

    // --- Categorias ---

    pub async fn list_categories(&self) -> Vec<Category> {
        self.store.get_categories().await
    }

    pub async fn create_category(
        &self,
        payload: CategoryPayload,
        actor: &UserView,
    ) -> Result<Category, AppError> {
        self.store
            .mutate(move |db| {
                if db.categories.iter().any(|c| c.name == payload.name) {
                    return Err(AppError::CategoryAlreadyExists);
                }

                let category = Category {
                    id: Uuid::new_v4(),
                    name: payload.name,
                    description: payload.description,
                };
                db.logs.push(ActivityLogEntry::new(
                    actor.id,
                    "Create",
                    "Category",
                    format!("Created category: {}", category.name),
                ));
                db.categories.push(category.clone());
                Ok(category)
            })
            .await
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        payload: CategoryPayload,
        actor: &UserView,
    ) -> Result<Category, AppError> {
        self.store
            .mutate(move |db| {
                if db.categories.iter().any(|c| c.name == payload.name && c.id != id) {
                    return Err(AppError::CategoryAlreadyExists);
                }

                let category = db
                    .categories
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or(AppError::NotFound("Categoria"))?;

                // Produtos referenciam a categoria pelo nome (referência
                // fraca): renomear NÃO reatribui os produtos existentes.
                category.name = payload.name;
                category.description = payload.description;

                let updated = category.clone();
                db.logs.push(ActivityLogEntry::new(
                    actor.id,
                    "Update",
                    "Category",
                    format!("Updated category: {}", updated.name),
                ));
                Ok(updated)
            })
            .await
    }

    pub async fn delete_category(&self, id: Uuid, actor: &UserView) -> Result<(), AppError> {
        self.store
            .mutate(move |db| {
                let position = db
                    .categories
                    .iter()
                    .position(|c| c.id == id)
                    .ok_or(AppError::NotFound("Categoria"))?;
                let removed = db.categories.remove(position);

                db.logs.push(ActivityLogEntry::new(
                    actor.id,
                    "Delete",
                    "Category",
                    format!("Deleted category: {}", removed.name),
                ));
                Ok(())
            })
            .await
    }

    // --- Livro-Razão ---

    pub async fn adjust_stock(
        &self,
        payload: StockAdjustmentPayload,
        actor: &UserView,
    ) -> Result<StockMovement, AppError> {
        self.store
            .mutate(move |db| {
                apply_stock_adjustment(
                    db,
                    payload.product_id,
                    payload.quantity,
                    payload.action,
                    payload.reason,
                    actor,
                )
            })
            .await
    }

    pub async fn list_movements(&self) -> Vec<StockMovement> {
        self.store.get_stock_movements().await
    }

    // Inclui os zerados, como a tabela de alertas do painel
    pub async fn low_stock_products(&self) -> Vec<Product> {
        let mut products = self.store.get_products().await;
        products.retain(|p| p.stock <= p.reorder_level);
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn actor() -> UserView {
        UserView {
            id: Uuid::new_v4(),
            name: "Admin User".to_string(),
            email: "admin@np.com".to_string(),
            role: "Super Admin".to_string(),
            last_login: None,
        }
    }

    fn service() -> InventoryService {
        InventoryService::new(Arc::new(RecordStore::in_memory().expect("seed")))
    }

    fn payload(name: &str, sku: &str, stock: u32) -> ProductPayload {
        ProductPayload {
            name: name.to_string(),
            sku: sku.to_string(),
            category: "Electronics".to_string(),
            description: None,
            price: Decimal::from(100),
            cost_price: Decimal::from(60),
            stock,
            reorder_level: 5,
            featured: false,
        }
    }

    #[tokio::test]
    async fn adding_stock_records_a_reconciling_movement_and_log() {
        let svc = service();
        let user = actor();
        let product = svc.create_product(payload("Test Item", "TEST-0001", 10), &user)
            .await
            .expect("create");

        let movement = svc
            .adjust_stock(
                StockAdjustmentPayload {
                    product_id: product.id,
                    action: StockAction::Added,
                    quantity: 5,
                    reason: Some("Restock".to_string()),
                },
                &user,
            )
            .await
            .expect("adjust");

        assert_eq!(movement.previous_stock, 10);
        assert_eq!(movement.new_stock, 15);
        assert_eq!(movement.new_stock - movement.previous_stock, movement.quantity);

        let products = svc.list_products(Some("TEST-0001"), None, None).await;
        assert_eq!(products[0].stock, 15);

        let movements = svc.list_movements().await;
        assert_eq!(movements.len(), 1);
        let logs = svc.store.get_logs().await;
        assert_eq!(logs.last().map(|l| l.action.as_str()), Some("Stock Adjustment"));
    }

    #[tokio::test]
    async fn reducing_below_zero_clamps_at_zero() {
        let svc = service();
        let user = actor();
        let product = svc.create_product(payload("Clamped", "TEST-0002", 4), &user)
            .await
            .expect("create");

        let movement = svc
            .adjust_stock(
                StockAdjustmentPayload {
                    product_id: product.id,
                    action: StockAction::Reduced,
                    quantity: 10,
                    reason: None,
                },
                &user,
            )
            .await
            .expect("adjust");

        // 4 − 10 vira 0, nunca −6; o registro guarda a quantidade PEDIDA
        assert_eq!(movement.previous_stock, 4);
        assert_eq!(movement.new_stock, 0);
        assert_eq!(movement.quantity, 10);

        let products = svc.list_products(Some("TEST-0002"), None, None).await;
        assert_eq!(products[0].stock, 0);
    }

    #[tokio::test]
    async fn every_adjustment_appends_exactly_one_movement() {
        let svc = service();
        let user = actor();
        let product = svc.create_product(payload("Counted", "TEST-0003", 20), &user)
            .await
            .expect("create");

        for qty in [3u32, 7, 2] {
            svc.adjust_stock(
                StockAdjustmentPayload {
                    product_id: product.id,
                    action: StockAction::Reduced,
                    quantity: qty,
                    reason: None,
                },
                &user,
            )
            .await
            .expect("adjust");
        }

        let movements: Vec<_> = svc
            .list_movements()
            .await
            .into_iter()
            .filter(|m| m.product_id == product.id)
            .collect();
        assert_eq!(movements.len(), 3);
        for m in &movements {
            assert_eq!(m.previous_stock - m.new_stock, m.quantity);
        }
    }

    #[tokio::test]
    async fn adjusting_an_unknown_product_fails_and_appends_nothing() {
        let svc = service();
        let user = actor();
        let before = svc.list_movements().await.len();

        let err = svc
            .adjust_stock(
                StockAdjustmentPayload {
                    product_id: Uuid::new_v4(),
                    action: StockAction::Added,
                    quantity: 1,
                    reason: None,
                },
                &user,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(svc.list_movements().await.len(), before);
        assert!(svc.store.get_logs().await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_sku_is_a_conflict() {
        let svc = service();
        let user = actor();

        // ELEC-0001 já existe no dataset semeado
        let err = svc
            .create_product(payload("Duplicate", "ELEC-0001", 1), &user)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SkuAlreadyExists));
    }

    #[tokio::test]
    async fn generated_sku_follows_category_prefix_and_sequence() {
        let svc = service();

        // O seed tem 2 produtos em Electronics
        let sku = svc.generate_sku("Electronics").await.expect("sku");
        assert_eq!(sku, "ELEC-0003");

        let err = svc.generate_sku("Nonexistent").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn product_filters_match_the_dashboard_semantics() {
        let svc = service();

        let by_search = svc.list_products(Some("laptop"), None, None).await;
        assert_eq!(by_search.len(), 2); // Laptop HP Pavilion 15 + Laptop Cooling Pad

        let out_of_stock = svc.list_products(None, None, Some("out")).await;
        assert_eq!(out_of_stock.len(), 1);
        assert_eq!(out_of_stock[0].name, "Wireless Mouse Logitech");

        let hardware = svc.list_products(None, Some("Hardware"), None).await;
        assert_eq!(hardware.len(), 5);
    }
}
