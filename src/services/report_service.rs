// src/services/report_service.rs

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use crate::{
    models::{
        inventory::StockStatus,
        reports::{CategoryCount, DashboardSummary, InvoiceReport, ProductReport, StockReport},
    },
    store::RecordStore,
};

// Agregações de leitura do dashboard e da página de relatórios.
// Nenhuma delas grava nada: tudo é derivado do snapshot do momento.
#[derive(Clone)]
pub struct ReportService {
    store: Arc<RecordStore>,
}

impl ReportService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn dashboard_summary(&self) -> DashboardSummary {
        let db = self.store.snapshot().await;
        let now = Utc::now();

        let monthly_revenue = db
            .invoices
            .iter()
            .filter(|inv| {
                inv.created_at.month() == now.month() && inv.created_at.year() == now.year()
            })
            .map(|inv| inv.final_amount)
            .sum();

        DashboardSummary {
            total_products: db.products.len(),
            total_stock_units: db.products.iter().map(|p| u64::from(p.stock)).sum(),
            low_stock_count: db
                .products
                .iter()
                .filter(|p| p.stock <= p.reorder_level)
                .count(),
            total_invoices: db.invoices.len(),
            monthly_revenue,
            inventory_value: db
                .products
                .iter()
                .map(|p| p.cost_price * Decimal::from(p.stock))
                .sum(),
        }
    }

    pub async fn product_report(&self) -> ProductReport {
        let db = self.store.snapshot().await;

        let category_breakdown = db
            .categories
            .iter()
            .map(|cat| CategoryCount {
                category: cat.name.clone(),
                count: db.products.iter().filter(|p| p.category == cat.name).count(),
            })
            .collect();

        ProductReport {
            total_products: db.products.len(),
            total_categories: db.categories.len(),
            featured_products: db.products.iter().filter(|p| p.featured).count(),
            category_breakdown,
        }
    }

    pub async fn stock_report(&self) -> StockReport {
        let db = self.store.snapshot().await;

        StockReport {
            in_stock: db
                .products
                .iter()
                .filter(|p| p.stock_status() == StockStatus::InStock)
                .count(),
            low_stock: db
                .products
                .iter()
                .filter(|p| p.stock_status() == StockStatus::LowStock)
                .count(),
            out_of_stock: db
                .products
                .iter()
                .filter(|p| p.stock_status() == StockStatus::OutOfStock)
                .count(),
            total_stock_value: db
                .products
                .iter()
                .map(|p| p.cost_price * Decimal::from(p.stock))
                .sum(),
        }
    }

    pub async fn invoice_report(&self) -> InvoiceReport {
        let db = self.store.snapshot().await;

        let total_revenue: Decimal = db.invoices.iter().map(|inv| inv.final_amount).sum();
        let average_invoice = if db.invoices.is_empty() {
            Decimal::ZERO
        } else {
            total_revenue / Decimal::from(db.invoices.len() as u64)
        };

        InvoiceReport {
            total_invoices: db.invoices.len(),
            total_revenue,
            average_invoice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stock_report_matches_the_seeded_dataset() {
        let svc = ReportService::new(Arc::new(RecordStore::in_memory().expect("seed")));

        let report = svc.stock_report().await;
        // Dataset semeado: 1 zerado (Wireless Mouse), 2 baixos (Monitor
        // Dell 3/5 e RTX 4070 2/2), 12 acima do nível de reposição
        assert_eq!(report.out_of_stock, 1);
        assert_eq!(report.low_stock, 2);
        assert_eq!(report.in_stock, 12);
        assert!(report.total_stock_value > Decimal::ZERO);
    }

    #[tokio::test]
    async fn product_report_counts_every_category() {
        let svc = ReportService::new(Arc::new(RecordStore::in_memory().expect("seed")));

        let report = svc.product_report().await;
        assert_eq!(report.total_products, 15);
        assert_eq!(report.total_categories, 5);
        assert_eq!(report.featured_products, 5);

        let electronics = report
            .category_breakdown
            .iter()
            .find(|c| c.category == "Electronics")
            .expect("category");
        assert_eq!(electronics.count, 2);
    }

    #[tokio::test]
    async fn invoice_report_averages_the_revenue() {
        let svc = ReportService::new(Arc::new(RecordStore::in_memory().expect("seed")));

        let report = svc.invoice_report().await;
        assert_eq!(report.total_invoices, 2);
        assert_eq!(
            report.total_revenue,
            Decimal::new(8_920_564, 2) + Decimal::new(2_418_646, 2)
        );
        assert_eq!(report.average_invoice * Decimal::from(2), report.total_revenue);
    }
}
