// src/store/seed.rs

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::auth::User;
use crate::models::catalogue::Catalogue;
use crate::models::inventory::{Category, Product};
use crate::models::invoice::{Invoice, InvoiceItem};
use crate::models::settings::Settings;
use crate::store::record_store::Database;

// Dataset fixo da primeira execução. Os ids são gerados na hora da
// semeadura, então as referências cruzadas (fatura → produto,
// catálogo → produto) são montadas aqui mesmo, por posição.

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    // Datas do dataset são fixas e válidas; o fallback nunca dispara.
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[allow(clippy::too_many_arguments)]
fn product(
    name: &str,
    sku: &str,
    category: &str,
    description: &str,
    price: i64,
    cost_price: i64,
    stock: u32,
    reorder_level: u32,
    featured: bool,
    created_at: DateTime<Utc>,
) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sku: sku.to_string(),
        category: category.to_string(),
        description: Some(description.to_string()),
        price: Decimal::from(price),
        cost_price: Decimal::from(cost_price),
        stock,
        reorder_level,
        featured,
        created_at,
        updated_at: None,
    }
}

fn category(name: &str, description: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: Some(description.to_string()),
    }
}

pub fn default_settings() -> Settings {
    Settings {
        company_name: "N.P. Trigunayat Systems".to_string(),
        gst_rate: Decimal::from(18),
        currency: "₹".to_string(),
        invoice_number_format: "INV-YYYY-NNN".to_string(),
        session_timeout_minutes: 15,
    }
}

pub fn seed_database() -> Result<Database, AppError> {
    let categories = vec![
        category("Electronics", "Electronic components and devices"),
        category("Mechanical", "Mechanical parts and assemblies"),
        category("Software", "Software and licenses"),
        category("Hardware", "Hardware components"),
        category("Accessories", "Accessories and add-ons"),
    ];

    let products = vec![
        product("Laptop HP Pavilion 15", "ELEC-0001", "Electronics", "15-inch laptop with Intel i7 processor", 75000, 65000, 12, 5, true, day(2025, 11, 1)),
        product("Monitor Dell 24 inch", "ELEC-0002", "Electronics", "Full HD 24-inch monitor", 15000, 12000, 3, 5, false, day(2025, 11, 2)),
        product("USB Cable Type-C", "ACCS-0001", "Accessories", "High-speed USB 3.0 Type-C cable, 2 meters", 299, 150, 45, 20, false, day(2025, 11, 3)),
        product("Mechanical Keyboard RGB", "ACCS-0002", "Accessories", "Mechanical keyboard with RGB backlight", 5999, 3500, 8, 5, true, day(2025, 11, 4)),
        product("Wireless Mouse Logitech", "ACCS-0003", "Accessories", "Wireless mouse with ergonomic design", 2499, 1200, 0, 10, false, day(2025, 11, 5)),
        product("Processor Intel i7-12700K", "HARD-0001", "Hardware", "High-performance desktop processor", 35000, 28000, 6, 3, true, day(2025, 11, 6)),
        product("RAM DDR5 32GB", "HARD-0002", "Hardware", "DDR5 memory 32GB dual channel", 18000, 14000, 15, 8, false, day(2025, 11, 7)),
        product("SSD Samsung 1TB", "HARD-0003", "Hardware", "NVMe SSD 1TB storage", 8500, 6500, 22, 10, false, day(2025, 11, 8)),
        product("Power Supply 850W Gold", "HARD-0004", "Hardware", "80+ Gold certified 850W power supply", 9999, 7000, 4, 3, false, day(2025, 11, 9)),
        product("Graphics Card RTX 4070", "HARD-0005", "Hardware", "NVIDIA RTX 4070 graphics card", 65000, 55000, 2, 2, true, day(2025, 11, 10)),
        product("Monitor Arm Stand", "MECH-0001", "Mechanical", "Adjustable monitor arm for dual monitors", 3500, 2000, 18, 8, false, day(2025, 11, 11)),
        product("Laptop Cooling Pad", "ACCS-0004", "Accessories", "Dual fan cooling pad for laptops", 1999, 1000, 7, 5, false, day(2025, 11, 12)),
        product("Windows 11 Pro License", "SOFT-0001", "Software", "Windows 11 Professional license key", 15000, 8000, 50, 20, false, day(2025, 11, 13)),
        product("Cable Organizer Kit", "MECH-0002", "Mechanical", "Complete cable management kit", 1299, 600, 25, 15, false, day(2025, 11, 13)),
        product("Office Chair Pro", "MECH-0003", "Mechanical", "Ergonomic office chair with lumbar support", 18999, 12000, 5, 2, true, day(2025, 11, 13)),
    ];

    let admin = User {
        id: Uuid::new_v4(),
        name: "Admin User".to_string(),
        email: "admin@np.com".to_string(),
        role: "Super Admin".to_string(),
        password_hash: bcrypt::hash("admin123", bcrypt::DEFAULT_COST)?,
        created_at: day(2025, 1, 1),
        last_login: None,
    };

    let invoices = vec![
        Invoice {
            id: Uuid::new_v4(),
            invoice_no: "INV-2025-001".to_string(),
            items: vec![
                InvoiceItem { product_id: products[0].id, qty: 1, price: Decimal::from(75000) },
                InvoiceItem { product_id: products[2].id, qty: 2, price: Decimal::from(299) },
            ],
            total: Decimal::from(75598),
            discount: Decimal::ZERO,
            tax: Decimal::new(1_360_764, 2),
            final_amount: Decimal::new(8_920_564, 2),
            customer_name: "Tech Solutions Pvt Ltd".to_string(),
            customer_contact: Some("contact@techsol.com".to_string()),
            created_at: day(2025, 11, 10),
        },
        Invoice {
            id: Uuid::new_v4(),
            invoice_no: "INV-2025-002".to_string(),
            items: vec![
                InvoiceItem { product_id: products[3].id, qty: 3, price: Decimal::from(5999) },
                InvoiceItem { product_id: products[4].id, qty: 2, price: Decimal::from(2499) },
            ],
            total: Decimal::from(22497),
            discount: Decimal::from(2000),
            tax: Decimal::new(368_946, 2),
            final_amount: Decimal::new(2_418_646, 2),
            customer_name: "Digital Hub India".to_string(),
            customer_contact: Some("sales@digitalhub.in".to_string()),
            created_at: day(2025, 11, 11),
        },
    ];

    // Índices do catálogo inicial, como no dataset original
    let catalogue_products: Vec<Uuid> = [0usize, 1, 2, 3, 5, 6, 7, 9, 11, 12, 14]
        .iter()
        .map(|&i| products[i].id)
        .collect();

    let catalogues = vec![Catalogue {
        id: Uuid::new_v4(),
        name: "General Product Catalogue 2025".to_string(),
        products: catalogue_products,
        created_by: admin.name.clone(),
        created_at: day(2025, 11, 12),
    }];

    Ok(Database {
        categories,
        products,
        invoices,
        catalogues,
        users: vec![admin],
        logs: Vec::new(),
        stock_movements: Vec::new(),
        settings: default_settings(),
        app_initialized: true,
    })
}
