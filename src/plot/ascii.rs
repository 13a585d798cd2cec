//! Rating histogram: binning plus an ASCII rendering for terminal output.
//!
//! The ASCII form is intentionally "dumb" (fixed-height bars), optimized for:
//! - quick visual sanity checks when no interactive terminal is available
//! - deterministic output (helpful for golden tests)

use crate::domain::{RATING_MAX, RATING_MIN, RatingSeries};

/// Number of unit-width bins centred on the integers 0..=10.
pub const BIN_COUNT: usize = 11;

/// Bin edges: `-0.5, 0.5, ..., 10.5`.
pub fn bin_edges() -> [f64; BIN_COUNT + 1] {
    let mut edges = [0.0; BIN_COUNT + 1];
    for (i, e) in edges.iter_mut().enumerate() {
        *e = RATING_MIN - 0.5 + i as f64;
    }
    edges
}

/// Count ratings per bin.
///
/// Bins are half-open `[k - 0.5, k + 0.5)` except the last, which also
/// includes its upper edge.
pub fn histogram_bins(series: &RatingSeries) -> [usize; BIN_COUNT] {
    let mut counts = [0usize; BIN_COUNT];
    for &v in series.values() {
        counts[bin_index(v)] += 1;
    }
    counts
}

fn bin_index(v: f64) -> usize {
    let v = v.clamp(RATING_MIN, RATING_MAX);
    ((v - RATING_MIN + 0.5).floor() as usize).min(BIN_COUNT - 1)
}

/// Render a vertical bar histogram.
///
/// `height` is the number of rows used by the tallest bar.
pub fn render_ascii_histogram(counts: &[usize; BIN_COUNT], title: &str, height: usize) -> String {
    let height = height.max(1);
    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    let count_width = max.to_string().len();

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    // Each bar's height in rows, rounded up so a single rating stays visible.
    let bars: Vec<usize> = counts
        .iter()
        .map(|&c| (c * height).div_ceil(max))
        .collect();

    for row in (1..=height).rev() {
        // Frequency tick on the top and bottom rows only.
        let tick = if row == height {
            max.to_string()
        } else if row == 1 {
            "0".to_string()
        } else {
            String::new()
        };
        let mut line = format!("{tick:>count_width$} |");
        for &bar in &bars {
            line.push_str(if bar >= row { " ## " } else { "    " });
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{:>count_width$} +{}\n", "", "-".repeat(BIN_COUNT * 4)));

    let mut labels = format!("{:>count_width$}  ", "");
    for k in 0..BIN_COUNT {
        labels.push_str(&format!("{k:^4}"));
    }
    out.push_str(labels.trim_end());
    out.push('\n');
    out.push_str(&format!("{:>count_width$}  Rating (0-10) / Frequency\n", ""));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> RatingSeries {
        RatingSeries::from_validated(values.to_vec()).unwrap()
    }

    #[test]
    fn edges_are_half_integers() {
        let edges = bin_edges();
        assert_eq!(edges[0], -0.5);
        assert_eq!(edges[1], 0.5);
        assert_eq!(edges[BIN_COUNT], 10.5);
    }

    #[test]
    fn values_on_inner_edges_go_up() {
        let counts = histogram_bins(&series(&[0.0, 0.49, 0.5, 7.5, 9.5, 10.0]));
        assert_eq!(counts[0], 2);
        assert_eq!(counts[1], 1);
        assert_eq!(counts[8], 1);
        assert_eq!(counts[10], 2);
        assert_eq!(counts.iter().sum::<usize>(), 6);
    }

    #[test]
    fn ascii_histogram_golden_snapshot() {
        let counts = histogram_bins(&series(&[10.0, 10.0, 9.0, 0.0]));
        let txt = render_ascii_histogram(&counts, "t", 2);
        let expected = concat!(
            "t\n",
            "2 |                                         ##\n",
            "0 | ##                                  ##  ##\n",
            "  +--------------------------------------------\n",
            "    0   1   2   3   4   5   6   7   8   9   10\n",
            "   Rating (0-10) / Frequency\n",
        );
        assert_eq!(txt, expected);
    }
}
