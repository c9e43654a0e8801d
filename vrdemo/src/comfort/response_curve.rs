use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise-linear float curve, e.g. speed to vignette radius.
///
/// Inputs before the first key or after the last key clamp to that key's value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct ResponseCurve {
    keys: Vec<CurveKey>,
}

impl ResponseCurve {
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.retain(|key| key.time.is_finite() && key.value.is_finite());
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    pub fn from_points(points: &[(f32, f32)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(time, value)| CurveKey { time, value })
                .collect(),
        )
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn evaluate(&self, x: f32) -> Option<f32> {
        let first = self.keys.first()?;
        let last = self.keys.last()?;

        if x <= first.time {
            return Some(first.value);
        }
        if x >= last.time {
            return Some(last.value);
        }

        // x is strictly inside the key range, so some window brackets it
        self.keys.windows(2).find_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            if x < a.time || x > b.time {
                return None;
            }
            let span = b.time - a.time;
            if span <= f32::EPSILON {
                return Some(b.value);
            }
            let t = (x - a.time) / span;
            Some(a.value + (b.value - a.value) * t)
        })
    }
}

impl From<Vec<CurveKey>> for ResponseCurve {
    fn from(keys: Vec<CurveKey>) -> Self {
        ResponseCurve::new(keys)
    }
}

impl From<ResponseCurve> for Vec<CurveKey> {
    fn from(curve: ResponseCurve) -> Self {
        curve.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_curve_has_no_value() {
        assert_eq!(ResponseCurve::default().evaluate(3.0), None);
    }

    #[test]
    fn test_interpolates_between_keys() {
        let curve = ResponseCurve::from_points(&[(0.0, 1.0), (200.0, 0.4)]);
        let mid = curve.evaluate(100.0).unwrap();
        assert!((mid - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_clamps_outside_range() {
        let curve = ResponseCurve::from_points(&[(10.0, 0.9), (0.0, 1.0), (300.0, 0.3)]);
        assert_eq!(curve.evaluate(-5.0), Some(1.0));
        assert_eq!(curve.evaluate(1000.0), Some(0.3));
        assert_eq!(curve.keys()[0].time, 0.0);
    }

    #[test]
    fn test_deserializes_from_key_list() {
        let curve: ResponseCurve =
            serde_json::from_str(r#"[{"time": 0.0, "value": 1.0}, {"time": 100.0, "value": 0.5}]"#)
                .unwrap();
        assert_eq!(curve.keys().len(), 2);
        assert_eq!(curve.evaluate(50.0), Some(0.75));
    }
}
