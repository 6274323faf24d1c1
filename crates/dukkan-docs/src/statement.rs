//! # Debtor Statement
//!
//! Debtor details, a summary box with the standing, every ledger entry, and
//! the totals with payment percentage.

use chrono::{DateTime, Utc};
use dukkan_core::ledger::{Standing, Statement};
use dukkan_core::settings::BusinessInfo;
use dukkan_core::TransactionType;

use crate::document::{Document, DocumentKind};
use crate::html::{date, date_time, esc, file_safe, header_row, row, truncate_chars};
use crate::invoice::{business_header, business_layout};
use crate::layout::Layout;

/// Notes longer than this are cut in the transaction table.
pub const NOTE_CHARS: usize = 20;

pub fn statement_document(
    statement: &Statement,
    business: &BusinessInfo,
    now: DateTime<Utc>,
) -> Document {
    let debtor = &statement.debtor;
    let summary = &statement.summary;

    let mut body = business_header(business);
    let mut layout = Layout::new();
    business_layout(&mut layout, business);

    body.push_str("<h1>كشف حساب مدين</h1>");
    layout
        .title("كشف حساب مدين")
        .pair(
            format!("الاسم: {}", debtor.name),
            format!("النوع: {}", debtor.debtor_type.label()),
        )
        .text(format!("الهاتف: {}", debtor.phone));
    body.push_str(&format!(
        "<div class=\"meta\"><div><div>الاسم: {}</div><div>الهاتف: {}</div></div><div>النوع: {}</div></div>",
        esc(&debtor.name),
        esc(&debtor.phone),
        debtor.debtor_type.label()
    ));

    let standing_class = match summary.standing {
        Standing::OwesUs => "debt",
        Standing::WeOwe => "payment",
        Standing::Settled => "",
    };
    body.push_str(&format!(
        "<div class=\"box\"><h2>ملخص الحساب المالي</h2><div>{}: <span class=\"{}\">{}</span></div></div>",
        summary.standing.label(),
        standing_class,
        summary.balance.abs()
    ));
    layout
        .rule()
        .heading("ملخص الحساب المالي")
        .text(format!("{}: {}", summary.standing.label(), summary.balance.abs()));

    const COLUMNS: [&str; 4] = ["التاريخ", "الملاحظة", "النوع", "المبلغ"];
    body.push_str("<h2>سجل المعاملات</h2><table>");
    body.push_str(&header_row(&COLUMNS));
    body.push_str("<tbody>");
    layout.rule().heading("سجل المعاملات").header(&COLUMNS);
    for entry in &statement.transactions {
        let class = match entry.kind {
            TransactionType::Debt => "debt",
            TransactionType::Payment => "payment",
        };
        let note = truncate_chars(&entry.notes, NOTE_CHARS);
        body.push_str(&row(&[
            date(&entry.date),
            esc(&note),
            format!("<span class=\"{}\">{}</span>", class, entry.kind.label()),
            entry.amount.to_string(),
        ]));
        layout.row(vec![
            date(&entry.date),
            note,
            entry.kind.label().to_string(),
            entry.amount.to_string(),
        ]);
    }
    body.push_str("</tbody></table>");

    body.push_str(&format!(
        "<div class=\"box\">\
         <div class=\"meta\"><div>إجمالي الديون: {}</div><div>إجمالي الدفعات: {}</div></div>\
         <div class=\"meta\"><div>نسبة السداد: {}%</div><div>الرصيد: {}</div></div>\
         </div>",
        summary.total_debt, summary.total_payment, summary.payment_percentage, summary.balance
    ));
    layout
        .rule()
        .pair(
            format!("إجمالي الديون: {}", summary.total_debt),
            format!("إجمالي الدفعات: {}", summary.total_payment),
        )
        .pair(
            format!("نسبة السداد: {}%", summary.payment_percentage),
            format!("الرصيد: {}", summary.balance),
        );
    body.push_str(&format!(
        "<div class=\"footer\">تم إنشاؤه في {}</div>",
        date_time(&now)
    ));
    layout.footer(format!("تم إنشاؤه في {}", date_time(&now)));

    Document::new(
        DocumentKind::DebtorStatement,
        format!("كشف حساب - {}", debtor.name),
        format!(
            "debtor-statement-{}-{}",
            file_safe(&debtor.name),
            now.timestamp_millis()
        ),
        body,
        layout,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Block;
    use chrono::{Duration, TimeZone};
    use dukkan_core::{DebtTransaction, Debtor, DebtorType, Money, NewDebtor};

    fn statement() -> Statement {
        let mut debtor = Debtor::from_new(
            "d1".to_string(),
            NewDebtor {
                name: "أحمد محمد".to_string(),
                phone: "0551234567".to_string(),
                religion: None,
                debtor_type: DebtorType::Customer,
            },
        );
        debtor.total_debt = Money::from_major(1500);
        debtor.total_payment = Money::from_major(1200);

        let day = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let entries = vec![
            DebtTransaction {
                id: "t2".to_string(),
                debtor_id: "d1".to_string(),
                kind: TransactionType::Payment,
                amount: Money::from_major(1200),
                date: day + Duration::days(3),
                notes: "دفعة نقدية عن بضاعة الشهر الماضي كاملة".to_string(),
            },
            DebtTransaction {
                id: "t1".to_string(),
                debtor_id: "d1".to_string(),
                kind: TransactionType::Debt,
                amount: Money::from_major(1500),
                date: day,
                notes: String::new(),
            },
        ];
        Statement::build(debtor, entries)
    }

    #[test]
    fn test_statement_content() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let doc = statement_document(&statement(), &BusinessInfo::placeholder(), now);
        let body = doc.body();

        assert!(body.contains("مستحق عليه (مدين)"));
        assert!(body.contains("نسبة السداد: 80%"));
        assert!(body.contains("الرصيد: 300.00"));
        assert!(body.contains("دفعة نقدية عن بضاعة"));
        assert!(!body.contains("الشهر"));

        let debt_at = body.find("2024-01-01").unwrap();
        let payment_at = body.find("2024-01-04").unwrap();
        assert!(debt_at < payment_at);
    }

    #[test]
    fn test_statement_layout() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let doc = statement_document(&statement(), &BusinessInfo::placeholder(), now);

        assert!(doc
            .blocks()
            .contains(&Block::Text("مستحق عليه (مدين): 300.00".to_string())));
        assert!(doc.blocks().contains(&Block::Pair(
            "نسبة السداد: 80%".to_string(),
            "الرصيد: 300.00".to_string()
        )));
    }

    #[test]
    fn test_statement_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let doc = statement_document(&statement(), &BusinessInfo::placeholder(), now);
        assert_eq!(
            doc.file_stem,
            format!("debtor-statement-أحمد_محمد-{}", now.timestamp_millis())
        );
    }
}
