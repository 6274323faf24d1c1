//! # Invoice Document
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │        [logo]  اسم المتجر                 │  business header
//! │        العنوان · الهاتف · البريد           │
//! │  رقم الفاتورة: 1700…        التاريخ: …     │
//! ├──────────────────────────────────────────┤
//! │  المنتج │ الكمية │ السعر │ الإجمالي        │  one row per line
//! ├──────────────────────────────────────────┤
//! │  إجمالي المنتجات / الضريبة / النهائي       │  tax > 0
//! │  الإجمالي                                 │  tax = 0
//! ├──────────────────────────────────────────┤
//! │           شكراً لتعاملكم معنا              │
//! └──────────────────────────────────────────┘
//! ```

use dukkan_core::invoice::InvoiceTotals;
use dukkan_core::settings::BusinessInfo;
use dukkan_core::Invoice;

use crate::document::{Document, DocumentKind};
use crate::html::{date, esc, header_row, row};
use crate::layout::Layout;

pub const THANK_YOU: &str = "شكراً لتعاملكم معنا";

pub(crate) fn business_header(business: &BusinessInfo) -> String {
    let mut header = String::from("<div class=\"header\">");
    if !business.logo.trim().is_empty() {
        header.push_str(&format!(
            "<img src=\"{}\" alt=\"\" style=\"max-height: 80px;\"/>",
            esc(business.logo.trim())
        ));
    }
    header.push_str(&format!("<h1>{}</h1>", esc(&business.name)));
    for line in [&business.address, &business.phone, &business.email] {
        if !line.trim().is_empty() {
            header.push_str(&format!("<div>{}</div>", esc(line)));
        }
    }
    header.push_str("</div>");
    header
}

/// The business header for the PDF page. The logo is left out.
pub(crate) fn business_layout(layout: &mut Layout, business: &BusinessInfo) {
    layout.title(business.name.clone());
    for line in [&business.address, &business.phone, &business.email] {
        layout.text(line.trim());
    }
}

fn totals_layout(layout: &mut Layout, totals: &InvoiceTotals) {
    layout.rule();
    if !totals.has_tax() {
        layout.heading(format!("الإجمالي: {}", totals.subtotal));
        return;
    }
    layout
        .text(format!("إجمالي المنتجات: {}", totals.subtotal))
        .text(format!(
            "الضريبة ({}%): {}",
            totals.tax_rate.percentage(),
            totals.tax
        ))
        .heading(format!("الإجمالي النهائي: {}", totals.grand_total));
}

fn totals_section(totals: &InvoiceTotals) -> String {
    if !totals.has_tax() {
        return format!(
            "<div class=\"totals\"><div class=\"grand\">الإجمالي: {}</div></div>",
            totals.subtotal
        );
    }
    format!(
        "<div class=\"totals\">\
         <div>إجمالي المنتجات: {}</div>\
         <div>الضريبة ({}%): {}</div>\
         <div class=\"rule\"></div>\
         <div class=\"grand\">الإجمالي النهائي: {}</div>\
         </div>",
        totals.subtotal,
        totals.tax_rate.percentage(),
        totals.tax,
        totals.grand_total
    )
}

/// Builds the printable invoice. Tax comes from `business.tax`.
pub fn invoice_document(invoice: &Invoice, business: &BusinessInfo) -> Document {
    let mut body = business_header(business);
    let mut layout = Layout::new();
    business_layout(&mut layout, business);

    let number = format!("رقم الفاتورة: {}", invoice.id);
    let dated = format!("التاريخ: {}", date(&invoice.date));
    body.push_str(&format!(
        "<div class=\"meta\"><div>{}</div><div>{}</div></div>",
        esc(&number),
        dated
    ));
    layout.pair(number, dated).rule();

    const COLUMNS: [&str; 4] = ["المنتج", "الكمية", "السعر", "الإجمالي"];
    body.push_str("<table>");
    body.push_str(&header_row(&COLUMNS));
    body.push_str("<tbody>");
    layout.header(&COLUMNS);
    for item in &invoice.items {
        let cells = vec![
            item.product_name.clone(),
            item.quantity.to_string(),
            item.price.to_string(),
            item.total.to_string(),
        ];
        body.push_str(&row(&[
            esc(&cells[0]),
            cells[1].clone(),
            cells[2].clone(),
            cells[3].clone(),
        ]));
        layout.row(cells);
    }
    body.push_str("</tbody></table>");

    let totals = InvoiceTotals::for_invoice(invoice, business.tax_rate());
    body.push_str(&totals_section(&totals));
    totals_layout(&mut layout, &totals);
    body.push_str(&format!("<div class=\"footer\">{}</div>", THANK_YOU));
    layout.footer(THANK_YOU);

    Document::new(
        DocumentKind::Invoice,
        format!("فاتورة رقم {}", invoice.id),
        format!("invoice-{}", invoice.id),
        body,
        layout,
    )
}
