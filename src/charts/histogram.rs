use serde::Serialize;

/// Bin count of the resolution-time histogram.
pub const RESOLUTION_BINS: usize = 20;

/// One half-open bin `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Split the observed `[min, max]` of `values` into `bins` equal-width bins.
///
/// Non-finite values are skipped.  No values (or `bins == 0`) yields no
/// bins; a constant series is centred in a unit-wide range.
pub fn bin_values(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_bins() {
        assert!(bin_values(&[], RESOLUTION_BINS).is_empty());
        assert!(bin_values(&[f64::NAN], RESOLUTION_BINS).is_empty());
        assert!(bin_values(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn bins_span_observed_range() {
        let values: Vec<f64> = (1..=72).map(|h| h as f64).collect();
        let bins = bin_values(&values, RESOLUTION_BINS);

        assert_eq!(bins.len(), RESOLUTION_BINS);
        assert_eq!(bins[0].start, 1.0);
        assert_eq!(bins[RESOLUTION_BINS - 1].end, 72.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 72);
        assert!(bins.windows(2).all(|w| (w[0].end - w[1].start).abs() < 1e-9));
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let bins = bin_values(&[2.0, 4.0], RESOLUTION_BINS);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[RESOLUTION_BINS - 1].count, 1);
        assert!((bins[0].width() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn constant_series_is_centred() {
        let bins = bin_values(&[5.0, 5.0, 5.0], RESOLUTION_BINS);
        assert_eq!(bins.len(), RESOLUTION_BINS);
        assert_eq!(bins[0].start, 4.5);
        assert_eq!(bins[RESOLUTION_BINS - 1].end, 5.5);
        let hit: Vec<&HistogramBin> = bins.iter().filter(|b| b.count > 0).collect();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].count, 3);
        assert!(hit[0].start <= 5.0 + 1e-9 && 5.0 <= hit[0].end + 1e-9);
    }
}
