#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

/// Tuning knobs for the popup layer. One instance is shared through the popup context.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupSettings {
    /// Minimum hours between two displays of the same gated popup.
    pub cooldown_hours: i64,
    /// Wait after a popup closes before the next one may open (exit animation).
    pub close_delay_ms: u32,
    /// Scroll depth, in percent of scrollable height, that fires the scroll trigger.
    pub scroll_threshold_percent: f64,
    pub scroll_delay_min_ms: u32,
    pub scroll_delay_max_ms: u32,
    pub exit_intent_confirm_ms: u32,
    /// Viewports at or below this width count as mobile.
    pub mobile_breakpoint_px: f64,
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            cooldown_hours: 24,
            close_delay_ms: 300,
            scroll_threshold_percent: 50.0,
            scroll_delay_min_ms: 6000,
            scroll_delay_max_ms: 8000,
            exit_intent_confirm_ms: 100,
            mobile_breakpoint_px: 768.0,
        }
    }
}
