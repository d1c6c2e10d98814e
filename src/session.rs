use std::collections::BTreeMap;

/// Explicit tab-session-scoped key/value store. Initialized lazily on first
/// access and never expired within the session; the host maps it onto
/// whatever session storage it has.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    values: Option<BTreeMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&mut self) -> &mut BTreeMap<String, String> {
        self.values.get_or_insert_with(BTreeMap::new)
    }

    pub fn get(&mut self, key: &str) -> Option<&str> {
        self.map().get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map().insert(key.into(), value.into());
    }

    pub fn is_set(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Viewports narrower than this get the disclaimer.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Session flag recording that the disclaimer was dismissed.
pub const DISMISS_KEY: &str = "mobile_disclaimer_dismissed";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum DisclaimerState {
    #[default]
    Unknown,
    Shown,
    NotShown,
}

/// Mobile-disclaimer overlay state machine: `Unknown -> {Shown, NotShown}`.
///
/// Policy (one of three inconsistent source variants, see DESIGN.md): the
/// width check re-runs on every resize, and dismissal persists for the
/// session: once dismissed it never re-shows, whatever the width does.
#[derive(Clone, Copy, Debug, Default)]
pub struct Disclaimer {
    state: DisclaimerState,
}

impl Disclaimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DisclaimerState {
        self.state
    }

    fn evaluate(&mut self, viewport_width: f64, store: &mut SessionStore) -> DisclaimerState {
        self.state = if store.is_set(DISMISS_KEY) {
            DisclaimerState::NotShown
        } else if viewport_width < MOBILE_BREAKPOINT_PX {
            DisclaimerState::Shown
        } else {
            DisclaimerState::NotShown
        };
        self.state
    }

    pub fn on_mount(&mut self, viewport_width: f64, store: &mut SessionStore) -> DisclaimerState {
        self.evaluate(viewport_width, store)
    }

    pub fn on_resize(&mut self, viewport_width: f64, store: &mut SessionStore) -> DisclaimerState {
        self.evaluate(viewport_width, store)
    }

    pub fn dismiss(&mut self, store: &mut SessionStore) {
        store.set(DISMISS_KEY, "1");
        self.state = DisclaimerState::NotShown;
    }
}
