//! # Dukkan Entry Point
//!
//! Opens the store and prints the dashboard statistics as JSON.
//!
//! ```text
//! $ DUKKAN_DB_PATH=./shop.db dukkan
//! {
//!   "productCount": 41,
//!   "invoiceCount": 0,
//!   ...
//! }
//! ```

#[tokio::main]
async fn main() {
    if let Err(e) = dukkan_app::run().await {
        eprintln!("dukkan: {}", e);
        std::process::exit(1);
    }
}
