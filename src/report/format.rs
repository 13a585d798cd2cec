//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the classification/statistics code stays clean and testable
//! - output changes are localized (the golden test below pins the layout)

use crate::domain::{Bucket, NumberForm};
use crate::nps::NpsSummary;

const RULE_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 25;

/// Format the NPS results block and the additional statistics.
pub fn format_summary(summary: &NpsSummary) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{rule}\n"));
    out.push_str("NPS Calculation Results:\n");
    out.push_str(&format!("{rule}\n"));
    out.push_str(&line("Total valid responses:", &summary.total.to_string()));
    for bucket in Bucket::ALL {
        let share = summary.share(bucket);
        let label = format!("{} ({}):", bucket.display_name(), bucket.range_label());
        out.push_str(&line(&label, &format!("{} ({:.1}%)", share.count, share.percent)));
    }
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("** Net Promoter Score (NPS): {:.2} **\n", summary.nps));
    out.push_str(&format!("{rule}\n"));

    let stats = &summary.stats;
    out.push_str("\nAdditional Statistics:\n");
    out.push_str(&line("Mean rating:", &format!("{:.2}", stats.mean)));
    out.push_str(&line("Median rating:", &format!("{:.2}", stats.median)));
    out.push_str(&line(
        "Standard Deviation:",
        &stats
            .std_dev
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "nan".to_string()),
    ));
    out.push_str(&line("Min rating:", &fmt_rating(stats.min, stats.form)));
    out.push_str(&line("Max rating:", &fmt_rating(stats.max, stats.form)));

    out
}

fn line(label: &str, value: &str) -> String {
    format!("{label:<LABEL_WIDTH$}{value}\n")
}

/// Ratings print the way the column holds them: `10` for whole-number
/// columns, `10.0` or `7.5` for float columns.
pub fn fmt_rating(v: f64, form: NumberForm) -> String {
    match form {
        NumberForm::Integer => format!("{v}"),
        // Debug keeps the trailing `.0` on whole floats.
        NumberForm::Float => format!("{v:?}"),
    }
}
