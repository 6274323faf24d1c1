//! # Report Documents
//!
//! Inventory valuation and the single-product card.

use chrono::{DateTime, Utc};
use dukkan_core::report::{InventoryReport, ProductReport};

use crate::document::{Document, DocumentKind};
use crate::html::{date, date_time, esc, file_safe, header_row, row};
use crate::layout::Layout;

pub const END_OF_REPORT: &str = "نهاية التقرير";

pub fn inventory_document(report: &InventoryReport, now: DateTime<Utc>) -> Document {
    let mut body = String::from("<div class=\"header\"><h1>تقرير المخزون</h1></div>");
    body.push_str(&format!(
        "<div class=\"footer\" style=\"text-align: left; margin-top: 0;\">تاريخ تقرير المخزون: {}</div>",
        date_time(&now)
    ));

    let mut layout = Layout::new();
    layout
        .title("تقرير المخزون")
        .text(format!("تاريخ تقرير المخزون: {}", date_time(&now)))
        .rule();

    const COLUMNS: [&str; 5] = [
        "باركود",
        "اسم المنتج",
        "الكمية",
        "سعر الوحدة",
        "القيمة الإجمالية",
    ];
    body.push_str("<table>");
    body.push_str(&header_row(&COLUMNS));
    body.push_str("<tbody>");
    layout.header(&COLUMNS);
    for r in &report.rows {
        body.push_str(&row(&[
            esc(&r.barcode),
            esc(&r.name),
            r.quantity.to_string(),
            r.unit_price.to_string(),
            r.total_price.to_string(),
        ]));
        layout.row(vec![
            r.barcode.clone(),
            r.name.clone(),
            r.quantity.to_string(),
            r.unit_price.to_string(),
            r.total_price.to_string(),
        ]);
    }
    body.push_str("</tbody>");
    body.push_str(&format!(
        "<tfoot><tr><td colspan=\"4\">إجمالي قيمة المخزون:</td><td>{}</td></tr></tfoot></table>",
        report.total_value
    ));
    body.push_str(&format!("<div class=\"footer\">{}</div>", END_OF_REPORT));
    layout
        .rule()
        .heading(format!("إجمالي قيمة المخزون: {}", report.total_value))
        .footer(END_OF_REPORT);

    Document::new(
        DocumentKind::InventoryReport,
        "تقرير المخزون",
        format!("inventory-report-{}", now.timestamp_millis()),
        body,
        layout,
    )
}

pub fn product_document(report: &ProductReport, now: DateTime<Utc>) -> Document {
    let product = &report.product;

    let mut body = String::from("<div class=\"header\"><h1>تقرير منتج</h1></div>");
    body.push_str(&format!(
        "<div class=\"box\"><h2>{}</h2>\
         <div class=\"meta\"><div>الباركود: {}</div><div>الكمية المتوفرة: {}</div></div>\
         <div class=\"meta\"><div>سعر الوحدة: {}</div><div>القيمة الإجمالية: {}</div></div>\
         </div>",
        esc(&product.name),
        esc(&product.barcode),
        product.available,
        product.price,
        report.stock_value
    ));
    body.push_str(&format!(
        "<div class=\"box\"><h2>المبيعات</h2>\
         <div class=\"meta\"><div>الكمية المباعة: {}</div><div>عدد الفواتير: {}</div></div>\
         <div>إجمالي المبيعات: {}</div>\
         </div>",
        report.units_sold, report.invoice_count, report.sales_total
    ));
    body.push_str(&format!(
        "<div class=\"footer\">تاريخ التقرير: {}</div>",
        date(&now)
    ));

    let mut layout = Layout::new();
    layout
        .title("تقرير منتج")
        .heading(product.name.clone())
        .pair(
            format!("الباركود: {}", product.barcode),
            format!("الكمية المتوفرة: {}", product.available),
        )
        .pair(
            format!("سعر الوحدة: {}", product.price),
            format!("القيمة الإجمالية: {}", report.stock_value),
        )
        .rule()
        .heading("المبيعات")
        .pair(
            format!("الكمية المباعة: {}", report.units_sold),
            format!("عدد الفواتير: {}", report.invoice_count),
        )
        .text(format!("إجمالي المبيعات: {}", report.sales_total))
        .footer(format!("تاريخ التقرير: {}", date(&now)));

    Document::new(
        DocumentKind::ProductReport,
        format!("تقرير منتج - {}", product.name),
        format!(
            "product-report-{}-{}",
            file_safe(&product.barcode),
            now.timestamp_millis()
        ),
        body,
        layout,
    )
}
