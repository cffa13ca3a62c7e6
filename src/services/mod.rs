pub mod auth;
pub mod catalogue_service;
pub mod document_service;
pub mod inventory_service;
pub mod invoice_service;
pub mod report_service;
