// src/services/document_service.rs

use std::sync::Arc;

use chrono::Datelike;
use genpdf::{elements, style, Element};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{common::error::AppError, store::RecordStore};

#[derive(Clone)]
pub struct DocumentService {
    store: Arc<RecordStore>,
}

impl DocumentService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    // Renderiza UMA fatura em PDF, já com arredondamento de exibição
    // (2 casas). Os valores armazenados permanecem exatos.
    pub async fn generate_invoice_pdf(&self, invoice_id: Uuid) -> Result<Vec<u8>, AppError> {
        let db = self.store.snapshot().await;

        let invoice = db
            .invoices
            .iter()
            .find(|inv| inv.id == invoice_id)
            .ok_or(AppError::NotFound("Fatura"))?;
        let settings = &db.settings;

        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Invoice {}", invoice.invoice_no));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(settings.company_name.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Paragraph::new("INVOICE").styled(style::Style::new().with_font_size(12)));

        doc.push(elements::Break::new(1.5));

        doc.push(elements::Paragraph::new(format!("Invoice No: {}", invoice.invoice_no)));
        doc.push(elements::Paragraph::new(format!(
            "Date: {}",
            invoice.created_at.format("%d/%m/%Y")
        )));
        doc.push(elements::Paragraph::new(format!("Customer: {}", invoice.customer_name)));
        if let Some(contact) = &invoice.customer_contact {
            doc.push(elements::Paragraph::new(format!("Contact: {}", contact)));
        }

        doc.push(elements::Break::new(2));

        // --- TABELA DE ITENS ---
        // Pesos das colunas: Item (4), Qtd (1), Preço (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Item").styled(style_bold))
            .element(elements::Paragraph::new("Qty").styled(style_bold))
            .element(elements::Paragraph::new("Price").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .expect("Table error");

        for item in &invoice.items {
            // Referência fraca: produto apagado depois vira "Unknown"
            let name = db
                .products
                .iter()
                .find(|p| p.id == item.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            let line_total = Decimal::from(item.qty) * item.price;

            table
                .row()
                .element(elements::Paragraph::new(name))
                .element(elements::Paragraph::new(item.qty.to_string()))
                .element(elements::Paragraph::new(format!(
                    "{}{:.2}",
                    settings.currency, item.price
                )))
                .element(elements::Paragraph::new(format!(
                    "{}{:.2}",
                    settings.currency, line_total
                )))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let lines = [
            format!("Subtotal: {}{:.2}", settings.currency, invoice.total),
            format!("Discount: {}{:.2}", settings.currency, invoice.discount),
            format!("Tax ({}%): {}{:.2}", settings.gst_rate, settings.currency, invoice.tax),
        ];
        for line in lines {
            let mut paragraph = elements::Paragraph::new(line);
            paragraph.set_alignment(genpdf::Alignment::Right);
            doc.push(paragraph);
        }

        let mut total_paragraph = elements::Paragraph::new(format!(
            "TOTAL: {}{:.2}",
            settings.currency, invoice.final_amount
        ));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        // --- RODAPÉ ---
        doc.push(elements::Break::new(2));
        doc.push(
            elements::Paragraph::new(format!(
                "© {} {}. All rights reserved.",
                invoice.created_at.year(),
                settings.company_name
            ))
            .styled(style::Style::new().italic().with_font_size(8)),
        );

        // Renderiza para buffer (memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_invoice_is_a_not_found() {
        let svc = DocumentService::new(Arc::new(RecordStore::in_memory().expect("seed")));

        let err = svc.generate_invoice_pdf(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
