use serde::Serialize;

/// Linear map from a numeric domain onto a pixel range.
///
/// A zero-width domain (every input equal, or an empty dataset) maps every
/// value to the start of the range instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let extent = d1 - d0;
        if extent == 0.0 || !extent.is_finite() {
            return r0;
        }

        r0 + (value - d0) / extent * (r1 - r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_endpoints_onto_range() {
        let scale = LinearScale::new((1.0, 5.0), (0.0, 400.0));
        assert_eq!(scale.apply(1.0), 0.0);
        assert_eq!(scale.apply(3.0), 200.0);
        assert_eq!(scale.apply(5.0), 400.0);
    }

    #[test]
    fn zero_extent_domain_maps_to_range_start() {
        let scale = LinearScale::new((0.0, 0.0), (0.0, 180.0));
        assert_eq!(scale.apply(0.0), 0.0);
        assert_eq!(scale.apply(12.0), 0.0);
        assert!(!scale.apply(0.0).is_nan());
    }

    #[test]
    fn is_non_decreasing_for_increasing_domains() {
        let scale = LinearScale::new((0.0, 97.0), (0.0, 176.4));
        let mut previous = scale.apply(0.0);
        for count in 1..=97 {
            let next = scale.apply(count as f64);
            assert!(next >= previous);
            previous = next;
        }
    }
}
