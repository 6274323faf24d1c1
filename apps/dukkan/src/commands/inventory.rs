//! # Inventory Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Inventory screen                                                       │
//! │                                                                         │
//! │  [search: شاحن      ]                          [+ إضافة منتج]           │
//! │  ┌──────────┬───────────┬────────┬──────────┬──────────┐                │
//! │  │ باركود   │ الاسم     │ الكمية │ السعر    │ المتوفر  │                │
//! │  ├──────────┼───────────┼────────┼──────────┼──────────┤                │
//! │  │ SCAN2829 │ شاحن      │ 1500   │ 1200.00  │ 1498     │                │
//! │  └──────────┴───────────┴────────┴──────────┴──────────┘                │
//! │                                                                         │
//! │  list_products / search_products ◄── table                              │
//! │  add_product / update_product / delete_product ◄── form and row actions │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dukkan_core::{NewProduct, Product, ProductUpdate};
use tracing::debug;

use super::{failed, notify_success};
use crate::error::ApiError;
use crate::state::DbState;

pub async fn list_products(db: &DbState) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");
    Ok(db.inner().products().list().await?)
}

pub async fn get_product(db: &DbState, id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");
    Ok(db.inner().products().require(id).await?)
}

/// Looks a product up by its scanned barcode.
pub async fn get_product_by_barcode(db: &DbState, barcode: &str) -> Result<Product, ApiError> {
    debug!(barcode = %barcode, "get_product_by_barcode command");
    db.inner()
        .products()
        .find_by_barcode(barcode)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", barcode))
}

/// Name or barcode contains `query`. An empty query lists everything.
pub async fn search_products(db: &DbState, query: &str) -> Result<Vec<Product>, ApiError> {
    debug!(query = %query, "search_products command");
    Ok(db.inner().products().search(query).await?)
}

/// Adds a product to the inventory.
///
/// ## Returns
/// * `Ok(Product)` - stored, `available == quantity`
/// * `Err(VALIDATION_ERROR)` - missing field, bad price or quantity, or the
///   barcode is taken. Nothing is written and an error notification is
///   recorded.
pub async fn add_product(db: &DbState, input: NewProduct) -> Result<Product, ApiError> {
    debug!(barcode = %input.barcode, "add_product command");
    match db.inner().products().insert(input).await {
        Ok(product) => {
            notify_success(
                db,
                "تم إضافة المنتج",
                &format!("تمت إضافة {} بنجاح", product.name),
            )
            .await;
            Ok(product)
        }
        Err(e) => Err(failed(db, "خطأ في الإدخال", e).await),
    }
}

pub async fn update_product(
    db: &DbState,
    id: &str,
    input: ProductUpdate,
) -> Result<Product, ApiError> {
    debug!(id = %id, "update_product command");
    match db.inner().products().update(id, input).await {
        Ok(product) => {
            notify_success(
                db,
                "تم تحديث المنتج",
                &format!("تم تحديث {} بنجاح", product.name),
            )
            .await;
            Ok(product)
        }
        Err(e) => Err(failed(db, "خطأ في التحديث", e).await),
    }
}

pub async fn delete_product(db: &DbState, id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "delete_product command");
    match db.inner().products().delete(id).await {
        Ok(product) => {
            notify_success(db, "تم الحذف", &format!("تم حذف {}", product.name)).await;
            Ok(product)
        }
        Err(e) => Err(failed(db, "خطأ في الحذف", e).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use crate::error::ErrorCode;
    use dukkan_core::{Money, NotificationType};

    fn input(barcode: &str, name: &str) -> NewProduct {
        NewProduct {
            barcode: barcode.to_string(),
            name: name.to_string(),
            quantity: 10,
            price: Money::from_major(25),
        }
    }

    #[tokio::test]
    async fn test_add_product_notifies() {
        let app = testing::app().await;

        let product = add_product(&app.db, input("CBL-1", "كابل")).await.unwrap();
        assert_eq!(product.available, 10);

        let notes = app.db.inner().notifications().list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationType::Success);
        assert_eq!(notes[0].title, "تم إضافة المنتج");
    }

    #[tokio::test]
    async fn test_invalid_product_is_not_stored() {
        let app = testing::app().await;

        let err = add_product(&app.db, input("", "كابل")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(list_products(&app.db).await.unwrap().is_empty());

        let notes = app.db.inner().notifications().list().await.unwrap();
        assert_eq!(notes[0].kind, NotificationType::Error);
        assert_eq!(notes[0].title, "خطأ في الإدخال");
    }

    #[tokio::test]
    async fn test_duplicate_barcode_rejected() {
        let app = testing::app().await;
        testing::charger(&app).await;

        let err = add_product(&app.db, input("SCAN2829", "شاحن آخر")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_products(&app.db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_search_delete() {
        let app = testing::app().await;
        let charger = testing::charger(&app).await;

        let updated = update_product(
            &app.db,
            &charger.id,
            ProductUpdate {
                barcode: "SCAN2829".to_string(),
                name: "شاحن سريع".to_string(),
                quantity: 1500,
                price: Money::from_major(1100),
                available: 1400,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.available, 1400);

        assert_eq!(search_products(&app.db, "سريع").await.unwrap().len(), 1);
        assert_eq!(
            get_product_by_barcode(&app.db, " SCAN2829 ").await.unwrap().id,
            charger.id
        );

        delete_product(&app.db, &charger.id).await.unwrap();
        let err = get_product(&app.db, &charger.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = delete_product(&app.db, &charger.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
