//! # HTML Building Blocks
//!
//! The page shell every document is wrapped in, escaping, and a few table
//! helpers. All documents are right-to-left with an Arabic font first in
//! the font stack.

use chrono::{DateTime, Utc};

/// Target medium for the shell's styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media {
    /// Exported file, viewed on screen or converted to PDF.
    Screen,
    /// Handed straight to a print surface: A4 page box, no screen chrome.
    Print,
}

/// Escapes text for use inside element content or a double-quoted attribute.
pub fn esc(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Date as printed on documents.
pub fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub fn date_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d - %H:%M").to_string()
}

/// First `max` characters of `text`, counted in chars rather than bytes.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Replaces characters that are not allowed in file names on common
/// platforms and trims the result.
pub fn file_safe(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

/// A `<thead>` row from column labels.
pub fn header_row(labels: &[&str]) -> String {
    let cells: String = labels
        .iter()
        .map(|l| format!("<th>{}</th>", esc(l)))
        .collect();
    format!("<thead><tr>{}</tr></thead>", cells)
}

/// A body row. Cells are inserted as given; escape them first.
pub fn row(cells: &[String]) -> String {
    let cells: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
    format!("<tr>{}</tr>", cells)
}

const PRINT_PAGE: &str = r#"
@page { size: A4; margin: 12mm; }
body { padding: 0; }
"#;

/// Wraps `body` in a complete HTML page.
pub fn html_shell(title: &str, body: &str, media: Media) -> String {
    let page_rules = match media {
        Media::Screen => "",
        Media::Print => PRINT_PAGE,
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<title>{}</title>
<style>
@font-face {{ font-family: 'arabic'; src: local('Amiri'), local('Noto Naskh Arabic'), local('Tahoma'); }}
body {{ font-family: 'arabic', Arial, sans-serif; direction: rtl; margin: 0 auto; padding: 20px; max-width: 800px; color: #111; background: #fff; }}
h1 {{ font-size: 22px; margin: 0 0 5px 0; text-align: center; }}
h2 {{ font-size: 18px; margin: 0 0 10px 0; }}
table {{ width: 100%; border-collapse: collapse; margin-bottom: 20px; }}
th, td {{ padding: 8px; border: 1px solid #ddd; text-align: right; }}
thead tr, tfoot tr {{ background-color: #f9f9f9; }}
tfoot tr {{ font-weight: bold; }}
.header {{ text-align: center; margin-bottom: 20px; }}
.meta {{ display: flex; justify-content: space-between; margin-bottom: 20px; font-size: 14px; }}
.box {{ border: 1px solid #eee; background-color: #f0f0f0; padding: 15px; margin-bottom: 20px; }}
.totals {{ text-align: left; margin-top: 20px; }}
.totals .grand {{ font-weight: bold; font-size: 18px; }}
.rule {{ height: 1px; background-color: #e5e7eb; margin: 10px 0; }}
.debt {{ color: #dc0000; }}
.payment {{ color: #00b400; }}
.footer {{ text-align: center; font-size: 12px; color: #666; margin-top: 30px; }}
@media print {{
  body {{ max-width: none; }}
  .box, thead tr, tfoot tr {{ -webkit-print-color-adjust: exact; print-color-adjust: exact; }}
  tr {{ page-break-inside: avoid; }}
}}
{}
</style>
</head>
<body>{}</body>
</html>"#,
        esc(title),
        page_rules,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esc() {
        assert_eq!(esc("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(esc("شاحن"), "شاحن");
    }

    #[test]
    fn test_shell_is_rtl_with_arabic_font() {
        let page = html_shell("فاتورة", "<p>x</p>", Media::Screen);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"dir="rtl""#));
        assert!(page.contains("@font-face"));
        assert!(page.contains("<body><p>x</p></body>"));
        assert!(!page.contains("@page"));
    }

    #[test]
    fn test_print_shell_has_page_box() {
        let page = html_shell("فاتورة", "", Media::Print);
        assert!(page.contains("@page { size: A4"));
    }

    #[test]
    fn test_file_safe() {
        assert_eq!(file_safe(" أحمد/علي "), "أحمد-علي");
        assert_eq!(file_safe("a b:c"), "a_b-c");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_chars("دفعة نقدية عن شهر رمضان المبارك", 20).chars().count(), 20);
        assert_eq!(truncate_chars("قصير", 20), "قصير");
    }
}
