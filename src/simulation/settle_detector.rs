// src/simulation/settle_detector.rs

/// Debounces rest detection: a throw only counts as settled once low motion has been
/// observed for `required` consecutive steps. Any other step resets the count, so a
/// die momentarily still at the top of a bounce is not mistaken for a resting one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDetector {
    required: u32,
    stable_frames: u32,
}

impl SettleDetector {
    /// A `required` of zero is treated as one: at least one low-motion step is needed.
    pub fn new(required: u32) -> Self {
        SettleDetector { required: required.max(1), stable_frames: 0 }
    }

    /// Records one step and returns `true` once the die has settled.
    ///
    /// # Example
    /// ```
    /// use rs_dice::simulation::SettleDetector;
    ///
    /// let mut detector = SettleDetector::new(2);
    /// assert!(!detector.observe(true));
    /// assert!(!detector.observe(false));
    /// assert!(!detector.observe(true));
    /// assert!(detector.observe(true));
    /// ```
    pub fn observe(&mut self, low_motion: bool) -> bool {
        if low_motion {
            self.stable_frames = self.stable_frames.saturating_add(1);
        } else {
            self.stable_frames = 0;
        }
        self.is_settled()
    }

    pub fn is_settled(&self) -> bool {
        self.stable_frames >= self.required
    }

    pub fn stable_frames(&self) -> u32 {
        self.stable_frames
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn reset(&mut self) {
        self.stable_frames = 0;
    }
}
