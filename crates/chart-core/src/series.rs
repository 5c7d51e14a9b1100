// File: crates/chart-core/src/series.rs
// Summary: Named x/y series with gaps, as drawn by the line chart.
// Notes:
// - A point whose y is missing is kept as a gap so the drawn line breaks
//   there instead of bridging the neighbours.
// - Rows without a usable x are dropped; the rest are ordered by x.

use crate::schema::Measure;

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub data: Vec<(f64, Option<f64>)>,
}

impl Series {
    pub fn new(name: impl Into<String>, mut data: Vec<(f64, Option<f64>)>) -> Self {
        data.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { name: name.into(), data }
    }

    /// Build from (x, y) measure pairs, typically one table column against another.
    pub fn from_measures<'a, I>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a Measure, &'a Measure)>,
    {
        let data = pairs
            .into_iter()
            .filter_map(|(x, y)| x.value().map(|x| (x, y.value())))
            .collect();
        Self::new(name, data)
    }

    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Present points, in x order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.data.iter().filter_map(|&(x, y)| y.map(|y| (x, y)))
    }

    /// Maximal runs of consecutive present points.
    pub fn runs(&self) -> Vec<Vec<(f64, f64)>> {
        let mut out = Vec::new();
        let mut cur = Vec::new();
        for &(x, y) in &self.data {
            match y {
                Some(y) => cur.push((x, y)),
                None if !cur.is_empty() => out.push(std::mem::take(&mut cur)),
                None => {}
            }
        }
        if !cur.is_empty() {
            out.push(cur);
        }
        out
    }

    /// First point holding the largest y.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points().fold(None, |best, p| match best {
            Some((_, y)) if y >= p.1 => best,
            _ => Some(p),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(v: f64) -> Measure { Measure::Present(v) }
    fn gap() -> Measure { Measure::Missing { raw: String::new() } }

    #[test]
    fn gaps_split_runs() {
        let years = [m(2001.0), m(2002.0), m(2003.0), m(2004.0), m(2005.0)];
        let prices = [m(30.0), gap(), m(40.0), m(45.0), gap()];
        let s = Series::from_measures("QLD", years.iter().zip(prices.iter()));
        assert_eq!(s.len(), 5);
        assert_eq!(s.runs(), vec![vec![(2001.0, 30.0)], vec![(2003.0, 40.0), (2004.0, 45.0)]]);
        assert_eq!(s.points().count(), 3);
    }

    #[test]
    fn rows_without_x_are_dropped_and_sorted() {
        let years = [m(2003.0), gap(), m(2001.0)];
        let prices = [m(1.0), m(2.0), m(3.0)];
        let s = Series::from_measures("NSW", years.iter().zip(prices.iter()));
        assert_eq!(s.data, vec![(2001.0, Some(3.0)), (2003.0, Some(1.0))]);
    }

    #[test]
    fn peak_keeps_the_first_maximum() {
        let s = Series::new("avg", vec![(1.0, Some(5.0)), (2.0, Some(9.0)), (3.0, Some(9.0)), (4.0, None)]);
        assert_eq!(s.peak(), Some((2.0, 9.0)));
        assert_eq!(Series::new("empty", vec![(1.0, None)]).peak(), None);
    }
}
