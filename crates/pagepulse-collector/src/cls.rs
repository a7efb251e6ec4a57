use pagepulse_timing::LayoutShift;

/// Largest gap (ms) between consecutive shifts that still belong to one session.
pub const SESSION_GAP_MS: f64 = 1000.0;

/// Running layout-shift session.
///
/// Shifts closer than [`SESSION_GAP_MS`] to the previous counted shift are
/// summed into the open session; a larger gap closes it and starts a new
/// one. The reported score is the open session's sum, not the largest
/// session seen so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutShiftWindow {
    last_start: Option<f64>,
    entries: usize,
    value: f64,
}

impl LayoutShiftWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one shift. Returns `false` when the shift was excluded
    /// because it followed recent input.
    pub fn record(&mut self, shift: &LayoutShift) -> bool {
        if shift.had_recent_input {
            return false;
        }

        match self.last_start {
            Some(last) if shift.start_time - last >= SESSION_GAP_MS => {
                self.entries = 1;
                self.value = shift.value;
            }
            _ => {
                self.entries += 1;
                self.value += shift.value;
            }
        }
        self.last_start = Some(shift.start_time);
        true
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of shifts in the open session.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(start_time: f64, value: f64) -> LayoutShift {
        LayoutShift {
            start_time,
            value,
            had_recent_input: false,
        }
    }

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn close_shifts_accumulate() {
        let mut window = LayoutShiftWindow::new();
        for (start, value) in [(100.0, 0.05), (600.0, 0.1), (1500.0, 0.02), (2400.0, 0.3)] {
            assert!(window.record(&shift(start, value)));
        }
        approx(window.value(), 0.47);
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn wide_gap_starts_new_session_with_its_own_value() {
        let mut window = LayoutShiftWindow::new();
        window.record(&shift(100.0, 0.2));
        window.record(&shift(500.0, 0.2));
        window.record(&shift(1600.0, 0.07));
        approx(window.value(), 0.07);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn gap_of_exactly_one_second_resets() {
        let mut window = LayoutShiftWindow::new();
        window.record(&shift(0.0, 0.4));
        window.record(&shift(1000.0, 0.1));
        approx(window.value(), 0.1);
    }

    #[test]
    fn input_driven_shifts_neither_count_nor_extend() {
        let mut window = LayoutShiftWindow::new();
        window.record(&shift(100.0, 0.1));
        let excluded = LayoutShift {
            start_time: 900.0,
            value: 0.5,
            had_recent_input: true,
        };
        assert!(!window.record(&excluded));
        approx(window.value(), 0.1);

        // 1050ms after the last counted shift, so the excluded one at 900
        // must not have kept the session open.
        window.record(&shift(1150.0, 0.2));
        approx(window.value(), 0.2);
    }
}
