// src/models/settings.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validators::validate_percentage;

// Singleton: existe exatamente um registro de configurações por instalação.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[schema(example = "N.P. Trigunayat Systems")]
    pub company_name: String,

    // Percentual aplicado sobre o subtotal já descontado (0 a 100)
    #[schema(example = "18")]
    pub gst_rate: Decimal,

    #[schema(example = "₹")]
    pub currency: String,

    // Tokens YYYY (ano) e NNN (sequencial com zeros à esquerda)
    #[schema(example = "INV-YYYY-NNN")]
    pub invoice_number_format: String,

    #[schema(example = 15)]
    pub session_timeout_minutes: u64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    #[validate(length(min = 1, message = "O nome da empresa não pode ficar vazio."))]
    pub company_name: Option<String>,

    #[validate(custom(function = "validate_percentage"))]
    pub gst_rate: Option<Decimal>,

    #[validate(length(min = 1, message = "O símbolo da moeda não pode ficar vazio."))]
    pub currency: Option<String>,

    #[validate(length(min = 1, message = "O formato do número de fatura não pode ficar vazio."))]
    pub invoice_number_format: Option<String>,

    #[validate(range(min = 1, message = "O timeout de sessão deve ser de pelo menos 1 minuto."))]
    pub session_timeout_minutes: Option<u64>,
}
