// src/services/invoice_service.rs

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    models::{
        activity::ActivityLogEntry,
        auth::UserView,
        inventory::StockAction,
        invoice::{CreateInvoicePayload, Invoice, InvoiceItem, InvoiceTotals},
    },
    services::inventory_service::apply_stock_adjustment,
    store::RecordStore,
};

// Cálculo puro dos totais: subtotal, desconto, imposto, valor final.
// Nada é arredondado aqui; arredondamento de 2 casas só acontece na
// exibição (PDF/CSV). O desconto é subtraído SEM piso em zero: um
// desconto maior que o subtotal produz base, imposto e total negativos
// (coberto em teste em vez de escondido).
pub fn calculate_totals(
    items: &[InvoiceItem],
    discount: Decimal,
    gst_rate: Decimal,
) -> InvoiceTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| Decimal::from(item.qty) * item.price)
        .sum();

    let taxable = subtotal - discount;
    let tax = taxable * gst_rate / Decimal::from(100);

    InvoiceTotals {
        subtotal,
        tax,
        final_amount: taxable + tax,
    }
}

// Próximo número de fatura para o ano corrente, renderizado a partir do
// formato configurado (tokens YYYY e NNN). A sequência é o maior
// sequencial já emitido no ano + 1, então excluir uma fatura antiga
// nunca faz o número colidir com um existente.
fn next_invoice_number(invoices: &[Invoice], format: &str, year: i32) -> String {
    let year_str = year.to_string();

    let next = invoices
        .iter()
        .filter(|inv| inv.invoice_no.contains(&year_str))
        .filter_map(|inv| inv.invoice_no.rsplit('-').next()?.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1;

    // Largura do sequencial = maior sequência de 'N' do formato (o "N"
    // solto de "INV" não conta)
    let width = format
        .split(|c: char| c != 'N')
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max(1);

    format
        .replace("YYYY", &year_str)
        .replace(&"N".repeat(width), &format!("{:0width$}", next, width = width))
}

fn unresolved_product_error() -> AppError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("unresolved_product");
    error.message = Some("Um dos itens referencia um produto inexistente.".into());
    errors.add("items", error);
    AppError::ValidationError(errors)
}

#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<RecordStore>,
}

impl InvoiceService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list_invoices(&self) -> Vec<Invoice> {
        self.store.get_invoices().await
    }

    pub async fn get_invoice(&self, id: Uuid) -> Result<Invoice, AppError> {
        self.store
            .get_invoices()
            .await
            .into_iter()
            .find(|inv| inv.id == id)
            .ok_or(AppError::NotFound("Fatura"))
    }

    // Criação de fatura é uma transação compensatória: gravar a fatura e
    // dar baixa no estoque de cada item (via Livro-Razão) formam UMA
    // unidade lógica. Se qualquer parte falhar, nada é persistido.
    pub async fn create_invoice(
        &self,
        payload: CreateInvoicePayload,
        actor: &UserView,
    ) -> Result<Invoice, AppError> {
        self.store
            .mutate(move |db| {
                // Toda referência de item precisa resolver ANTES de mexer
                // em qualquer estoque
                for item in &payload.items {
                    if !db.products.iter().any(|p| p.id == item.product_id) {
                        return Err(unresolved_product_error());
                    }
                }

                let items: Vec<InvoiceItem> = payload
                    .items
                    .iter()
                    .map(|item| InvoiceItem {
                        product_id: item.product_id,
                        qty: item.qty,
                        price: item.price,
                    })
                    .collect();

                let totals = calculate_totals(&items, payload.discount, db.settings.gst_rate);

                let now = Utc::now();
                let invoice_no = next_invoice_number(
                    &db.invoices,
                    &db.settings.invoice_number_format,
                    now.year(),
                );

                // Baixa por item, com movimentação e auditoria do razão
                for item in &items {
                    apply_stock_adjustment(
                        db,
                        item.product_id,
                        item.qty,
                        StockAction::Reduced,
                        Some("Invoice sale".to_string()),
                        actor,
                    )?;
                }

                let invoice = Invoice {
                    id: Uuid::new_v4(),
                    invoice_no: invoice_no.clone(),
                    items,
                    total: totals.subtotal,
                    discount: payload.discount,
                    tax: totals.tax,
                    final_amount: totals.final_amount,
                    customer_name: payload.customer_name,
                    customer_contact: payload.customer_contact,
                    created_at: now,
                };

                db.logs.push(ActivityLogEntry::new(
                    actor.id,
                    "Create",
                    "Invoice",
                    format!("Created invoice {} for {}", invoice_no, invoice.customer_name),
                ));
                db.invoices.push(invoice.clone());
                Ok(invoice)
            })
            .await
    }

    pub async fn delete_invoice(&self, id: Uuid) -> Result<(), AppError> {
        self.store
            .mutate(move |db| {
                let position = db
                    .invoices
                    .iter()
                    .position(|inv| inv.id == id)
                    .ok_or(AppError::NotFound("Fatura"))?;
                db.invoices.remove(position);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: u32, price: i64) -> InvoiceItem {
        InvoiceItem {
            product_id: Uuid::new_v4(),
            qty,
            price: Decimal::from(price),
        }
    }

    fn actor() -> UserView {
        UserView {
            id: Uuid::new_v4(),
            name: "Admin User".to_string(),
            email: "admin@np.com".to_string(),
            role: "Super Admin".to_string(),
            last_login: None,
        }
    }

    #[test]
    fn totals_match_the_reference_scenario() {
        // 2×5000 + 1×3000, desconto 1000, GST 18%
        let totals = calculate_totals(
            &[item(2, 5000), item(1, 3000)],
            Decimal::from(1000),
            Decimal::from(18),
        );

        assert_eq!(totals.subtotal, Decimal::from(13000));
        assert_eq!(totals.tax, Decimal::from(2160));
        assert_eq!(totals.final_amount, Decimal::from(14160));
    }

    #[test]
    fn final_amount_is_discounted_subtotal_plus_gst() {
        let items = [item(3, 299), item(1, 8500), item(2, 1999)];
        let discount = Decimal::from(500);
        let gst = Decimal::from(18);

        let totals = calculate_totals(&items, discount, gst);

        let subtotal = Decimal::from(3 * 299 + 8500 + 2 * 1999);
        assert_eq!(totals.subtotal, subtotal);
        let expected = (subtotal - discount) * (Decimal::ONE + gst / Decimal::from(100));
        assert_eq!(totals.final_amount, expected);
    }

    #[test]
    fn empty_item_list_totals_to_zero() {
        let totals = calculate_totals(&[], Decimal::ZERO, Decimal::from(18));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.final_amount, Decimal::ZERO);
    }

    // Desconto maior que o subtotal gera base negativa e, portanto,
    // imposto e total negativos; o cálculo não trava isso de propósito.
    #[test]
    fn negative_taxable_when_discount_exceeds_subtotal() {
        let totals = calculate_totals(&[item(1, 100)], Decimal::from(150), Decimal::from(18));

        assert_eq!(totals.subtotal, Decimal::from(100));
        assert!(totals.tax.is_sign_negative());
        assert_eq!(totals.final_amount, Decimal::from(-59));
    }

    #[test]
    fn invoice_numbers_are_sequential_within_the_year_and_survive_deletions() {
        let year = 2025;
        let format = "INV-YYYY-NNN";

        let mut invoices: Vec<Invoice> = Vec::new();
        let mut mk = |no: &str| Invoice {
            id: Uuid::new_v4(),
            invoice_no: no.to_string(),
            items: Vec::new(),
            total: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            final_amount: Decimal::ZERO,
            customer_name: "X".to_string(),
            customer_contact: None,
            created_at: Utc::now(),
        };

        invoices.push(mk("INV-2025-001"));
        invoices.push(mk("INV-2025-002"));
        invoices.push(mk("INV-2025-003"));
        assert_eq!(next_invoice_number(&invoices, format, year), "INV-2025-004");

        // Excluir uma fatura antiga não faz o número repetir
        invoices.remove(0);
        assert_eq!(next_invoice_number(&invoices, format, year), "INV-2025-004");

        // Ano novo recomeça a sequência
        assert_eq!(next_invoice_number(&invoices, format, 2026), "INV-2026-001");
    }

    #[tokio::test]
    async fn creating_an_invoice_decrements_stock_through_the_ledger() {
        let store = Arc::new(RecordStore::in_memory().expect("seed"));
        let svc = InvoiceService::new(store.clone());
        let user = actor();

        let products = store.get_products().await;
        let laptop = products
            .iter()
            .find(|p| p.sku == "ELEC-0001")
            .cloned()
            .expect("seeded product"); // stock 12
        let cable = products
            .iter()
            .find(|p| p.sku == "ACCS-0001")
            .cloned()
            .expect("seeded product"); // stock 45

        let invoice = svc
            .create_invoice(
                CreateInvoicePayload {
                    customer_name: "John Doe".to_string(),
                    customer_contact: Some("john@example.com".to_string()),
                    items: vec![
                        crate::models::invoice::InvoiceItemPayload {
                            product_id: laptop.id,
                            qty: 2,
                            price: laptop.price,
                        },
                        crate::models::invoice::InvoiceItemPayload {
                            product_id: cable.id,
                            qty: 5,
                            price: cable.price,
                        },
                    ],
                    discount: Decimal::ZERO,
                },
                &user,
            )
            .await
            .expect("create invoice");

        assert_eq!(invoice.total, Decimal::from(2 * 75000 + 5 * 299));

        let after = store.get_products().await;
        assert_eq!(after.iter().find(|p| p.id == laptop.id).map(|p| p.stock), Some(10));
        assert_eq!(after.iter().find(|p| p.id == cable.id).map(|p| p.stock), Some(40));

        // Uma movimentação por item, com o motivo da venda
        let movements = store.get_stock_movements().await;
        assert_eq!(movements.len(), 2);
        assert!(movements
            .iter()
            .all(|m| m.reason.as_deref() == Some("Invoice sale")));
        assert!(movements
            .iter()
            .all(|m| m.previous_stock - m.new_stock == m.quantity));
    }

    #[tokio::test]
    async fn invoice_sale_clamps_stock_at_zero() {
        let store = Arc::new(RecordStore::in_memory().expect("seed"));
        let svc = InvoiceService::new(store.clone());
        let user = actor();

        // Monitor Dell: estoque semeado é 3
        let monitor = store
            .get_products()
            .await
            .into_iter()
            .find(|p| p.sku == "ELEC-0002")
            .expect("seeded product");

        svc.create_invoice(
            CreateInvoicePayload {
                customer_name: "Big Order".to_string(),
                customer_contact: None,
                items: vec![crate::models::invoice::InvoiceItemPayload {
                    product_id: monitor.id,
                    qty: 10,
                    price: monitor.price,
                }],
                discount: Decimal::ZERO,
            },
            &user,
        )
        .await
        .expect("create invoice");

        let after = store
            .get_products()
            .await
            .into_iter()
            .find(|p| p.id == monitor.id)
            .expect("product");
        assert_eq!(after.stock, 0);
    }

    #[tokio::test]
    async fn unresolved_product_reference_fails_without_touching_state() {
        let store = Arc::new(RecordStore::in_memory().expect("seed"));
        let svc = InvoiceService::new(store.clone());
        let user = actor();

        let invoices_before = store.get_invoices().await.len();
        let stock_before: Vec<u32> = store.get_products().await.iter().map(|p| p.stock).collect();

        let err = svc
            .create_invoice(
                CreateInvoicePayload {
                    customer_name: "Ghost".to_string(),
                    customer_contact: None,
                    items: vec![crate::models::invoice::InvoiceItemPayload {
                        product_id: Uuid::new_v4(),
                        qty: 1,
                        price: Decimal::from(10),
                    }],
                    discount: Decimal::ZERO,
                },
                &user,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(store.get_invoices().await.len(), invoices_before);
        let stock_after: Vec<u32> = store.get_products().await.iter().map(|p| p.stock).collect();
        assert_eq!(stock_after, stock_before);
        assert!(store.get_stock_movements().await.is_empty());
    }

    #[tokio::test]
    async fn deleting_an_unknown_invoice_is_a_not_found() {
        let store = Arc::new(RecordStore::in_memory().expect("seed"));
        let svc = InvoiceService::new(store);

        let err = svc.delete_invoice(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
