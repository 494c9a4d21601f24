use super::views::StatusCount;

const BAR_GLYPH: char = '█';

/// Horizontal text bar chart. The largest count spans `width` glyphs; any
/// non-zero count gets at least one.
pub fn render_bar_chart(counts: &[StatusCount], width: usize) -> String {
    let label_width = counts
        .iter()
        .map(|entry| entry.label.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|entry| entry.count.to_string().len())
        .max()
        .unwrap_or(1);
    let peak = counts.iter().map(|entry| entry.count).max().unwrap_or(0);

    let mut chart = String::new();
    for entry in counts {
        let bar_len = bar_length(entry.count, peak, width);
        let bar: String = std::iter::repeat(BAR_GLYPH).take(bar_len).collect();
        let line = format!(
            "{:<label_width$} | {:>count_width$} {}",
            entry.label, entry.count, bar
        );
        chart.push_str(line.trim_end());
        chart.push('\n');
    }
    chart
}

fn bar_length(count: usize, peak: usize, width: usize) -> usize {
    if count == 0 || peak == 0 {
        return 0;
    }
    let scaled = (count as f64 / peak as f64 * width as f64).round() as usize;
    scaled.clamp(1, width.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(label: &str, count: usize) -> StatusCount {
        StatusCount {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn scales_bars_to_the_largest_count() {
        let chart = render_bar_chart(
            &[count("Active", 10), count("Pending", 5), count("Solds (90d)", 0)],
            20,
        );
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("Active      | 10 {}", "█".repeat(20)));
        assert_eq!(lines[1], format!("Pending     |  5 {}", "█".repeat(10)));
        assert_eq!(lines[2], "Solds (90d) |  0");
    }

    #[test]
    fn tiny_counts_still_get_a_bar() {
        let chart = render_bar_chart(&[count("Active", 1000), count("Pending", 1)], 10);
        assert!(chart.lines().nth(1).expect("pending line").ends_with(" 1 █"));
    }

    #[test]
    fn all_zero_counts_render_without_bars() {
        let chart = render_bar_chart(&[count("Active", 0), count("Pending", 0)], 10);
        assert_eq!(chart, "Active  | 0\nPending | 0\n");
    }
}
