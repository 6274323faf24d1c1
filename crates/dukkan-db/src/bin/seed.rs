//! # Seed Data Generator
//!
//! Populates a store with sample products and debtors for development.
//!
//! ## Usage
//! ```bash
//! # 40 products (default)
//! cargo run -p dukkan-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p dukkan-db --bin seed -- --count 200 --db ./data/dukkan.db
//! ```
//!
//! The first product is always the charger `SCAN2829` (1200, 1500 in stock),
//! and the first debtor always owes 1500 with 1200 paid.

use chrono::{Duration, Utc};
use dukkan_core::{DebtorType, Money, NewDebtor, NewProduct, NewTransaction, TransactionType};
use dukkan_db::{Database, DbConfig};
use std::env;

/// Base names, each paired with a barcode prefix.
const CATALOG: &[(&str, &str)] = &[
    ("CHG", "شاحن"),
    ("CBL", "كابل"),
    ("HPH", "سماعة"),
    ("CSE", "غطاء جوال"),
    ("SCR", "واقي شاشة"),
    ("MEM", "بطاقة ذاكرة"),
    ("BAT", "بطارية متنقلة"),
    ("SPK", "مكبر صوت"),
];

const VARIANTS: &[(&str, i64)] = &[
    ("عادي", 0),
    ("سريع", 150),
    ("أصلي", 300),
    ("مزدوج", 220),
    ("لاسلكي", 400),
];

const DEBTORS: &[(&str, &str, DebtorType)] = &[
    ("أحمد محمد", "0551234567", DebtorType::Customer),
    ("سارة علي", "0569876543", DebtorType::Customer),
    ("شركة النور للتوزيع", "0112345678", DebtorType::Supplier),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 40;
    let mut db_path = String::from("./dukkan_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(40);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dukkan Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 40)");
                println!("  -d, --db <PATH>    Database file path (default: ./dukkan_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Dukkan Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Store already has {} products", existing);
        println!("  Skipping seed to avoid duplicate barcodes.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    db.products()
        .insert(NewProduct {
            barcode: "SCAN2829".to_string(),
            name: "شاحن".to_string(),
            quantity: 1500,
            price: Money::from_major(1200),
        })
        .await?;
    let mut generated = 1;

    'outer: for (seq, (prefix, name)) in CATALOG.iter().enumerate() {
        for (v, (variant, addon)) in VARIANTS.iter().enumerate() {
            if generated >= count {
                break 'outer;
            }
            let product = generate_product(prefix, name, variant, *addon, seq * 10 + v);
            if let Err(e) = db.products().insert(product).await {
                eprintln!("Failed to insert {} {}: {}", name, variant, e);
                continue;
            }
            generated += 1;
        }
    }
    println!("✓ Generated {} products", generated);

    let now = Utc::now();
    for (idx, (name, phone, kind)) in DEBTORS.iter().enumerate() {
        let debtor = db
            .debts()
            .add_debtor(NewDebtor {
                name: name.to_string(),
                phone: phone.to_string(),
                religion: None,
                debtor_type: *kind,
            })
            .await?;

        let (debt, paid) = if idx == 0 { (1500, 1200) } else { (400 * (idx as i64 + 1), 100) };
        db.debts()
            .record_transaction(
                NewTransaction {
                    debtor_id: debtor.id.clone(),
                    kind: TransactionType::Debt,
                    amount: Money::from_major(debt),
                    notes: "رصيد افتتاحي".to_string(),
                },
                now - Duration::days(7),
            )
            .await?;
        db.debts()
            .record_transaction(
                NewTransaction {
                    debtor_id: debtor.id,
                    kind: TransactionType::Payment,
                    amount: Money::from_major(paid),
                    notes: "دفعة نقدية".to_string(),
                },
                now,
            )
            .await?;
    }
    println!("✓ Generated {} debtors", DEBTORS.len());

    println!();
    println!("Verifying search...");
    println!("  Search 'شاحن': {} results", db.products().search("شاحن").await?.len());
    println!("  Outstanding debt: {}", db.debts().outstanding().await?);

    println!();
    println!("✓ Seed complete!");
    Ok(())
}

fn generate_product(prefix: &str, name: &str, variant: &str, price_addon: i64, seed: usize) -> NewProduct {
    NewProduct {
        barcode: format!("{}-{:04}", prefix, seed),
        name: format!("{} {}", name, variant),
        quantity: (seed % 90) as i64 + 10,
        price: Money::from_major(25 + ((seed * 37) % 500) as i64 + price_addon),
    }
}
