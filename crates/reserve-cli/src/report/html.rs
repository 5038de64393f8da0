//! Self-contained HTML ledger report.

use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use reserve_core::multiplier::report::{format_money, Report};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
table{border-collapse:collapse;margin-bottom:1.5em}\
th,td{border:1px solid #bbb;padding:4px 10px}\
td.num{text-align:right;font-family:monospace}\
th{background:#eee}\
.warn{color:#a60}";

const LEDGER_HEADERS: [&str; 9] = [
    "Iteration",
    "Amount deposited",
    "Amount reserved",
    "Available to lend",
    "What customers think they have",
    "Bank's reserves",
    "Bank can lend",
    "Bank has lent",
    "Unrepayable interest",
];

/// Render the report as a standalone HTML document.
pub fn render(report: &Report, warnings: &[String]) -> String {
    let mut html = String::new();
    let input = &report.input;
    let summary = &report.summary;

    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\"><head><meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>Fractional reserve report</title>");
    let _ = writeln!(html, "<style>{STYLE}</style></head><body>");
    let _ = writeln!(html, "<h1>Fractional reserve report</h1>");
    let _ = writeln!(
        html,
        "<p>Generated {}</p>",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let _ = writeln!(html, "<h2>Parameters</h2><table>");
    let params = [
        ("Initial deposit", format_money(input.initial_deposit)),
        ("Reserve ratio", input.reserve_ratio.to_string()),
        ("Iterations", input.iterations.to_string()),
        ("Interest rate", input.interest_rate.to_string()),
        ("Compounded", input.compounding_frequency.to_string()),
        ("Interest periods (years)", input.interest_periods.to_string()),
    ];
    for (label, value) in &params {
        push_pair(&mut html, label, value);
    }
    let _ = writeln!(html, "</table>");

    let _ = writeln!(html, "<h2>Results</h2><table>");
    push_pair(&mut html, "What customers think they have", &summary.customer_total);
    push_pair(&mut html, "Bank's reserves", &summary.reserve_total);
    push_pair(&mut html, "Bank can lend", &summary.lendable_total);
    push_pair(&mut html, "Bank has lent", &summary.lent_total);
    push_pair(&mut html, "Bank's next loan", &summary.next_loan);
    push_pair(&mut html, "Total interest only", &summary.interest_only);
    push_pair(
        &mut html,
        "Total interest and principal",
        &summary.total_interest_and_principal,
    );
    let _ = writeln!(html, "</table>");

    if !warnings.is_empty() {
        let _ = writeln!(html, "<ul class=\"warn\">");
        for w in warnings {
            let _ = writeln!(html, "<li>{}</li>", escape(w));
        }
        let _ = writeln!(html, "</ul>");
    }

    let _ = writeln!(html, "<h2>Ledger</h2><table><tr>");
    for header in LEDGER_HEADERS {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    let _ = writeln!(html, "</tr>");
    for row in &report.rows {
        let _ = write!(html, "<tr><td class=\"num\">{}</td>", row.iteration);
        for cell in [
            &row.amount_deposited,
            &row.amount_reserved,
            &row.amount_available_to_lend,
            &row.customer_total,
            &row.reserve_total,
            &row.lendable_total,
            &row.lent_total,
            &row.unrepayable_interest,
        ] {
            let _ = write!(html, "<td class=\"num\">{}</td>", escape(cell));
        }
        let _ = writeln!(html, "</tr>");
    }
    let _ = writeln!(html, "</table></body></html>");

    html
}

/// Render the report and write it to `path`, replacing any existing file.
pub fn write_report(
    path: &Path,
    report: &Report,
    warnings: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, render(report, warnings))
        .map_err(|e| format!("Failed to write report '{}': {}", path.display(), e))?;
    Ok(())
}

fn push_pair(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        html,
        "<tr><th>{}</th><td class=\"num\">{}</td></tr>",
        escape(label),
        escape(value)
    );
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reserve_core::multiplier::report::build_report;
    use reserve_core::multiplier::SimulationInput;

    #[test]
    fn test_render_contains_every_row() {
        let report = build_report(&SimulationInput::default()).unwrap();
        let html = render(&report, &[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<tr><td class=\"num\">").count(), 10);
        assert!(html.contains("<td class=\"num\">6513.22</td>"));
        assert!(html.contains("<td class=\"num\">348.68</td>"));
        assert!(!html.contains("class=\"warn\""));
    }

    #[test]
    fn test_render_escapes_warnings() {
        let report = build_report(&SimulationInput::default()).unwrap();
        let html = render(&report, &["ratio <b>1</b> & more".to_string()]);
        assert!(html.contains("<li>ratio &lt;b&gt;1&lt;/b&gt; &amp; more</li>"));
    }

    #[test]
    fn test_write_report_to_disk() {
        let path = std::env::temp_dir().join(format!("frackin-report-{}.html", std::process::id()));
        let report = build_report(&SimulationInput::default()).unwrap();
        write_report(&path, &report, &[]).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!(written.contains("Fractional reserve report"));
    }
}
