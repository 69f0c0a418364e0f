//! Window-size range control.

/// Smallest selectable window.
pub const MIN_WINDOW: usize = 1;

/// Window size on start.
pub const DEFAULT_WINDOW: usize = 10;

/// Most samples the controller keeps, and so the largest useful window.
pub const HISTORY_LIMIT: usize = 1000;

/// Integer range control over `[MIN_WINDOW, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowControl {
    value: usize,
    max: usize,
}

impl WindowControl {
    /// Create a control; both bounds are clamped into range.
    pub fn new(initial: usize, max: usize) -> Self {
        let max = max.clamp(MIN_WINDOW, HISTORY_LIMIT);
        Self {
            value: initial.clamp(MIN_WINDOW, max),
            max,
        }
    }

    /// Current value.
    pub fn value(&self) -> usize {
        self.value
    }

    /// Upper bound.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Set the value, clamped. Returns `true` if it changed.
    pub fn set(&mut self, value: usize) -> bool {
        let value = value.clamp(MIN_WINDOW, self.max);
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }

    /// Move by `delta`, clamped. Returns `true` if the value changed.
    pub fn step(&mut self, delta: isize) -> bool {
        let target = if delta < 0 {
            self.value.saturating_sub(delta.unsigned_abs())
        } else {
            self.value.saturating_add(delta as usize)
        };
        self.set(target)
    }

    /// Range label, e.g. `0-10`.
    pub fn label(&self) -> String {
        format!("0-{}", self.value)
    }

    /// Position of the value within the range, for the gauge.
    pub fn ratio(&self) -> f64 {
        if self.max <= MIN_WINDOW {
            return 1.0;
        }
        (self.value - MIN_WINDOW) as f64 / (self.max - MIN_WINDOW) as f64
    }
}

impl Default for WindowControl {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_tracks_value() {
        let mut window = WindowControl::default();
        assert_eq!(window.label(), "0-10");

        assert!(window.set(42));
        assert_eq!(window.label(), "0-42");
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let mut window = WindowControl::new(10, 100);
        assert!(!window.set(10));
    }

    #[test]
    fn test_step_clamps_at_bounds() {
        let mut window = WindowControl::new(3, 20);

        assert!(window.step(-10));
        assert_eq!(window.value(), MIN_WINDOW);
        assert!(!window.step(-1));

        assert!(window.step(100));
        assert_eq!(window.value(), 20);
        assert!(!window.step(1));
    }

    #[test]
    fn test_ratio() {
        let window = WindowControl::new(1, 101);
        assert_eq!(window.ratio(), 0.0);

        let window = WindowControl::new(101, 101);
        assert_eq!(window.ratio(), 1.0);

        let window = WindowControl::new(1, 1);
        assert_eq!(window.ratio(), 1.0);
    }
}
