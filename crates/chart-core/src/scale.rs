// File: crates/chart-core/src/scale.rs
// Summary: Band, linear and ordinal color scales mapping data domains to pixels and colors.

use crate::theme::Color;

/// Distinct values in first-seen order.
pub fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|seen| seen == v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Categorical scale splitting a pixel range into equal bands with padding.
///
/// Inner and outer padding are both `padding` (a fraction of the step) and
/// the bands are centred in the range.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new<'a, I>(categories: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let domain = distinct(categories);
        let padding = padding.clamp(0.0, 1.0);
        let n = domain.len() as f64;
        let (r0, r1) = range;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self { domain, start, step, bandwidth: step * (1.0 - padding) }
    }

    pub fn domain(&self) -> &[String] { &self.domain }

    pub fn step(&self) -> f64 { self.step }

    pub fn bandwidth(&self) -> f64 { self.bandwidth }

    /// Left edge of the band for `category`, or `None` if it is not in the domain.
    pub fn position(&self, category: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|c| c == category)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Centre of the band for `category`.
    pub fn center(&self, category: &str) -> Option<f64> {
        self.position(category).map(|x| x + self.bandwidth * 0.5)
    }
}

/// Continuous scale with linear interpolation from `domain` to `range`.
///
/// Construction guards degenerate domains so mapped values stay finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (mut d0, mut d1) = domain;
        if !d0.is_finite() || !d1.is_finite() {
            d0 = 0.0;
            d1 = 1.0;
        }
        if (d1 - d0).abs() < 1e-12 {
            d1 = d0 + 1.0;
        }
        Self { domain: (d0, d1), range }
    }

    /// Domain `[0, max * headroom]` over the present values.
    ///
    /// Falls back to `[0, 1]` when nothing is present or the maximum is not positive.
    pub fn zero_based<I>(values: I, headroom: f64, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let max = values.into_iter().flatten().fold(f64::NEG_INFINITY, f64::max);
        let top = max * headroom;
        if max.is_finite() && top > 0.0 {
            Self::new((0.0, top), range)
        } else {
            Self::new((0.0, 1.0), range)
        }
    }

    /// Domain `[min, max]` over the present values, without padding.
    pub fn extent<I>(values: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let (lo, hi) = values
            .into_iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo.is_finite() && hi.is_finite() {
            Self::new((lo, hi), range)
        } else {
            Self::new((0.0, 1.0), range)
        }
    }

    pub fn domain(&self) -> (f64, f64) { self.domain }

    pub fn range(&self) -> (f64, f64) { self.range }

    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Step between "nice" ticks (1, 2 or 5 times a power of ten) for about `count` ticks.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        tick_increment(d0.min(d1), d0.max(d1), count.max(1))
    }

    /// Nice tick values inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (lo, hi) = (d0.min(d1), d0.max(d1));
        let step = tick_increment(lo, hi, count.max(1));
        if !(step.is_finite() && step > 0.0) {
            return Vec::new();
        }
        let power = step.log10().floor();
        // divide by an integer inverse for sub-unit steps to avoid 0.30000000000000004
        if power < 0.0 {
            let inv = (10f64.powf(-power) / (step / 10f64.powf(power))).round();
            let (i0, i1) = ((lo * inv).ceil() as i64, (hi * inv).floor() as i64);
            (i0..=i1).map(|i| i as f64 / inv).collect()
        } else {
            let (i0, i1) = ((lo / step).ceil() as i64, (hi / step).floor() as i64);
            (i0..=i1).map(|i| i as f64 * step).collect()
        }
    }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Format a tick value with as many decimals as its step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 { 0 } else { (-step.log10().floor()) as usize };
    format!("{value:.decimals$}")
}

/// Categorical color scale cycling through a fixed palette.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    palette: Vec<Color>,
}

impl OrdinalScale {
    pub fn new<'a, I>(categories: I, palette: &[Color]) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self { domain: distinct(categories), palette: palette.to_vec() }
    }

    pub fn domain(&self) -> &[String] { &self.domain }

    /// Color for a known category.
    pub fn lookup(&self, category: &str) -> Option<Color> {
        if self.palette.is_empty() {
            return None;
        }
        self.domain
            .iter()
            .position(|c| c == category)
            .map(|i| self.palette[i % self.palette.len()])
    }

    /// Color for `category`, appending it to the domain when unseen.
    pub fn color(&mut self, category: &str) -> Color {
        if let Some(c) = self.lookup(category) {
            return c;
        }
        self.domain.push(category.to_string());
        self.lookup(category).unwrap_or(Color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::TECH_PALETTE;

    #[test]
    fn band_positions_match_padding() {
        let band = BandScale::new(["A", "B", "C"], (0.0, 100.0), 0.3);
        // step = 100 / (3 - 0.3 + 0.6)
        let step = 100.0 / 3.3;
        assert!((band.step() - step).abs() < 1e-9);
        assert!((band.bandwidth() - step * 0.7).abs() < 1e-9);
        assert!((band.position("A").unwrap() - step * 0.3).abs() < 1e-9);
        let last = band.position("C").unwrap() + band.bandwidth();
        assert!((100.0 - last - step * 0.3).abs() < 1e-9);
        assert_eq!(band.position("D"), None);
    }

    #[test]
    fn band_domain_is_distinct_first_seen() {
        let band = BandScale::new(["OLED", "LED", "OLED", "LCD", "LED"], (0.0, 10.0), 0.3);
        assert_eq!(band.domain(), ["OLED", "LED", "LCD"]);
    }

    #[test]
    fn empty_band_has_no_positions() {
        let band = BandScale::new(std::iter::empty(), (0.0, 10.0), 0.3);
        assert!(band.domain().is_empty());
        assert!(band.bandwidth().is_finite());
    }

    #[test]
    fn zero_based_applies_headroom() {
        let s = LinearScale::zero_based([Some(120.0), None, Some(150.0)], 1.1, (200.0, 0.0));
        assert!((s.domain().1 - 165.0).abs() < 1e-9);
        assert_eq!(s.map(0.0), 200.0);
        assert!((s.map(165.0)).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domains_are_guarded() {
        let empty = LinearScale::zero_based(std::iter::empty(), 1.1, (100.0, 0.0));
        assert_eq!(empty.domain(), (0.0, 1.0));
        let zeros = LinearScale::zero_based([Some(0.0), Some(0.0)], 1.1, (100.0, 0.0));
        assert_eq!(zeros.domain(), (0.0, 1.0));
        let flat = LinearScale::extent([Some(2001.0), Some(2001.0)], (0.0, 100.0));
        assert_eq!(flat.domain(), (2001.0, 2002.0));
        assert!(flat.map(2001.0).is_finite());
    }

    #[test]
    fn extent_uses_min_and_max() {
        let s = LinearScale::extent([Some(2005.0), Some(1999.0), None, Some(2020.0)], (0.0, 210.0));
        assert_eq!(s.domain(), (1999.0, 2020.0));
        assert_eq!(s.map(2020.0), 210.0);
    }

    #[test]
    fn ticks_are_nice() {
        let s = LinearScale::new((0.0, 165.0), (0.0, 1.0));
        assert_eq!(s.ticks(10), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0]);
        let small = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        let t = small.ticks(5);
        assert_eq!(t, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(format_tick(0.4, small.tick_step(5)), "0.4");
        assert_eq!(format_tick(2000.0, 5.0), "2000");
    }

    #[test]
    fn ordinal_cycles_palette() {
        let mut s = OrdinalScale::new(["A", "B", "C", "D"], &TECH_PALETTE);
        assert_eq!(s.lookup("A"), Some(TECH_PALETTE[0]));
        assert_eq!(s.lookup("D"), Some(TECH_PALETTE[0]));
        assert_eq!(s.color("E"), TECH_PALETTE[1]);
        assert_eq!(s.domain().len(), 5);
    }
}
