use super::chart::render_bar_chart;
use super::summary::MomentumReport;
use super::super::metrics::PriceRange;

const NOT_AVAILABLE: &str = "N/A";
const CHART_WIDTH: usize = 40;
const DISCLAIMER: &str = "This report is generated from the provided MLS export. Field names are \
expected to match the fixed set; optional fields like Seller Concessions and DaysInMLS may be omitted.";

#[derive(Debug, Clone, Copy)]
pub struct DocumentOptions {
    pub include_chart: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            include_chart: true,
        }
    }
}

/// Renders the report as a Markdown document. Undefined statistics print as
/// `N/A`.
pub fn render_markdown(report: &MomentumReport, options: &DocumentOptions) -> String {
    let stats = report.stats();
    let days = report.window_days();
    let report_date = report.window().reference_now().format("%B %d, %Y");

    let mut doc = format!("# Momentum Report\n\nReport Date: {report_date}\n");

    doc.push_str("\n## Summary\n\n");
    doc.push_str(&format!("- Active: {}\n", stats.active_count));
    doc.push_str(&format!("- Pending: {}\n", stats.pending_count));
    doc.push_str(&format!(
        "- Solds (last {days}d): {}\n",
        stats.sold_window_count
    ));
    doc.push_str(&format!(
        "- Months of Inventory (MOI): {}\n",
        optional(stats.months_of_inventory, |moi| format!("{moi:.3}"))
    ));

    doc.push_str("\n## Price Ranges\n\n");
    doc.push_str(&format!(
        "- Active List Price Range: {}\n",
        price_range(stats.active_list_price_range)
    ));
    doc.push_str(&format!(
        "- Pending List Price Range: {}\n",
        price_range(stats.pending_list_price_range)
    ));
    doc.push_str(&format!(
        "- Closed Net Price Range ({days}d): {}\n",
        price_range(stats.sold_net_price_range)
    ));

    doc.push_str("\n## Days in MLS (Closed, Window)\n\n");
    doc.push_str(&format!(
        "- Average DaysInMLS: {}\n",
        optional(stats.avg_days_on_market, |avg| format!("{avg:.1}"))
    ));
    doc.push_str(&format!(
        "- Median DaysInMLS: {}\n",
        optional(stats.median_days_on_market, |median| format!("{median:.1}"))
    ));

    if options.include_chart {
        doc.push_str("\n## Status Counts Chart\n\n```text\n");
        doc.push_str(&render_bar_chart(&report.chart_counts(), CHART_WIDTH));
        doc.push_str("```\n");
    }

    doc.push_str("\n## Formula\n\n");
    doc.push_str(&format!("MOI = Active / ((Solds_{days}d / 3) + Pending)\n"));

    doc.push_str("\n## Disclaimer\n\n");
    doc.push_str(DISCLAIMER);
    doc.push('\n');

    doc
}

/// Whole dollars with thousands separators, e.g. `$1,234,568` or `-$5,000`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn price_range(range: Option<PriceRange>) -> String {
    optional(range, |range| {
        format!(
            "{} \u{2013} {}",
            format_currency(range.min),
            format_currency(range.max)
        )
    })
}

fn optional<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map(render).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
