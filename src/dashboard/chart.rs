//! Temperature chart view.

use crate::api::Sample;

/// X axis title.
pub const X_AXIS_TITLE: &str = "Time";

/// Y axis title and series name.
pub const Y_AXIS_TITLE: &str = "Temperature (°C)";

/// The last `size` samples as parallel (time labels, temperatures) sequences.
pub fn window_view(series: &[Sample], size: usize) -> (Vec<String>, Vec<f64>) {
    let start = series.len().saturating_sub(size);
    series[start..]
        .iter()
        .map(|s| (s.time_of_day(), s.temperature))
        .unzip()
}

/// Chart contents, created once and updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    labels: Vec<String>,
    temperatures: Vec<f64>,
    presence: Option<bool>,
    revision: u64,
}

impl ChartView {
    /// Create a chart showing the given window.
    pub fn new(labels: Vec<String>, temperatures: Vec<f64>) -> Self {
        Self {
            labels,
            temperatures,
            presence: None,
            revision: 0,
        }
    }

    /// Replace labels and data, then mark the chart for redraw.
    pub fn update(&mut self, labels: Vec<String>, temperatures: Vec<f64>) {
        self.labels = labels;
        self.temperatures = temperatures;
        self.revision += 1;
    }

    /// Record the presence flag of the newest visible sample.
    pub fn set_presence(&mut self, presence: Option<bool>) {
        self.presence = presence;
    }

    /// Time-of-day labels, oldest first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Temperatures, oldest first.
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// Presence flag of the newest visible sample.
    pub fn presence(&self) -> Option<bool> {
        self.presence
    }

    /// Number of in-place updates since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of points shown.
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    /// Whether the chart has no points.
    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// `(index, temperature)` pairs for the chart widget.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.temperatures
            .iter()
            .enumerate()
            .map(|(i, t)| (i as f64, *t))
            .collect()
    }

    /// Newest temperature.
    pub fn latest(&self) -> Option<f64> {
        self.temperatures.last().copied()
    }

    /// `(min, max)` over finite temperatures.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.temperatures
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .fold(None, |acc, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }

    /// Y bounds with `padding` as a fraction of the span on each side.
    ///
    /// A flat series gets a fixed ±1 °C band so the line stays visible.
    pub fn y_bounds(&self, padding: f64) -> [f64; 2] {
        match self.range() {
            None => [0.0, 1.0],
            Some((lo, hi)) if hi - lo < f64::EPSILON => [lo - 1.0, hi + 1.0],
            Some((lo, hi)) => {
                let pad = (hi - lo) * padding;
                [lo - pad, hi + pad]
            },
        }
    }

    /// X bounds covering every index.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.len().saturating_sub(1)).max(1) as f64]
    }

    /// First, middle and last time labels.
    pub fn x_labels(&self) -> Vec<String> {
        match self.labels.len() {
            0 => vec![],
            1 => vec![self.labels[0].clone()],
            2 => self.labels.clone(),
            n => vec![
                self.labels[0].clone(),
                self.labels[n / 2].clone(),
                self.labels[n - 1].clone(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample {
                datetime: format!("2024-05-01T10:{:02}:00", i),
                temperature: 20.0 + i as f64,
                presence: None,
            })
            .collect()
    }

    #[test]
    fn test_window_takes_most_recent() {
        let data = series(8);
        let (labels, temps) = window_view(&data, 3);

        assert_eq!(temps, vec![25.0, 26.0, 27.0]);
        assert_eq!(labels, vec!["10:05:00", "10:06:00", "10:07:00"]);
    }

    #[test]
    fn test_window_is_min_of_size_and_len() {
        for len in 0..12 {
            let data = series(len);
            for size in 1..15 {
                let (labels, temps) = window_view(&data, size);
                assert_eq!(temps.len(), size.min(len));
                assert_eq!(labels.len(), temps.len());
                if let Some(last) = temps.last() {
                    assert_eq!(*last, 20.0 + (len - 1) as f64);
                }
            }
        }
    }

    #[test]
    fn test_update_in_place_bumps_revision() {
        let mut chart = ChartView::new(vec!["a".into()], vec![1.0]);
        assert_eq!(chart.revision(), 0);

        chart.update(vec!["b".into(), "c".into()], vec![2.0, 3.0]);
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.labels(), ["b", "c"]);
        assert_eq!(chart.latest(), Some(3.0));
    }

    #[test]
    fn test_bounds() {
        let chart = ChartView::new(vec![], vec![]);
        assert_eq!(chart.y_bounds(0.1), [0.0, 1.0]);
        assert_eq!(chart.x_bounds(), [0.0, 1.0]);

        let flat = ChartView::new(vec!["x".into(); 3], vec![22.0; 3]);
        assert_eq!(flat.y_bounds(0.1), [21.0, 23.0]);

        let ramp = ChartView::new(vec!["x".into(); 3], vec![20.0, f64::NAN, 30.0]);
        assert_eq!(ramp.range(), Some((20.0, 30.0)));
        assert_eq!(ramp.y_bounds(0.1), [19.0, 31.0]);
        assert_eq!(ramp.x_bounds(), [0.0, 2.0]);
    }

    #[test]
    fn test_x_labels() {
        let labels: Vec<String> = (0..5).map(|i| i.to_string()).collect();
        let chart = ChartView::new(labels, vec![0.0; 5]);
        assert_eq!(chart.x_labels(), vec!["0", "2", "4"]);
    }
}
