use std::time::Duration;

pub const DEFAULT_JUST_SELECTED_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSettings {
    /// A second click inside this window after a select counts as part of
    /// the same gesture rather than a drag release.
    pub just_selected_window: Duration,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            just_selected_window: DEFAULT_JUST_SELECTED_WINDOW,
        }
    }
}
