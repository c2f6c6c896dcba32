//! Splash screen presentation controller.
//!
//! Owns the UI state machine
//! `Idle -> Loading -> (Error | Completing) -> FadingOut -> Removed` and the
//! node handles of the splash chrome. All rendering goes through the
//! [`RenderSurface`] primitives; this module never touches a concrete
//! renderer.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::defaults::{
    BACKGROUND_CLASS, ERROR_BAR_COLOR, FADE_OUT_DELAY, LOGO_CLASS, LOGO_DATA_PREFIX, LOGO_TOKEN,
    PROGRESS_BAR_CLASS, SCREEN_CLASS, STATUS_ELEMENT_ID, STATUS_FAIL_CLASS, STYLE_TOKEN, UI_CLASS,
};
use crate::progress::ProgressFraction;
use crate::surface::{NodeId, RenderSurface, StyleProperty, SurfaceError};

/// Screen state machine errors.
#[derive(Error, Debug)]
pub enum ScreenError {
    /// A transition was requested that the state machine does not allow.
    #[error("Invalid screen transition: {from} -> {to}")]
    InvalidTransition {
        from: ScreenPhase,
        to: ScreenPhase,
    },

    /// A rendering operation was requested with no chrome mounted.
    #[error("Screen chrome is not mounted")]
    NotMounted,

    /// The surface rejected a rendering primitive.
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Phase of the splash screen state machine.
///
/// `Error` and `Removed` are terminal; an errored screen requires a full
/// page reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    /// Not yet presented.
    Idle,
    /// Presented, resources loading.
    Loading,
    /// A group failed; error chrome shown.
    Error,
    /// All resources loaded, awaiting the bar's final transition.
    Completing,
    /// Opacities zeroed, teardown timer armed.
    FadingOut,
    /// All chrome detached.
    Removed,
}

impl std::fmt::Display for ScreenPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Loading => write!(f, "LOADING"),
            Self::Error => write!(f, "ERROR"),
            Self::Completing => write!(f, "COMPLETING"),
            Self::FadingOut => write!(f, "FADING_OUT"),
            Self::Removed => write!(f, "REMOVED"),
        }
    }
}

/// Node handles of the constructed splash chrome.
struct SplashChrome {
    style: NodeId,
    container: NodeId,
    background: NodeId,
    logo: NodeId,
    track: NodeId,
    bar: NodeId,
}

struct ScreenState {
    phase: ScreenPhase,
    chrome: Option<SplashChrome>,
}

/// Presents and tears down the splash screen over a render surface.
///
/// Methods take `&self`; state lives behind a lock because progress updates
/// arrive from concurrently settling loads.
pub struct LoadScreen {
    surface: Arc<dyn RenderSurface>,
    state: Mutex<ScreenState>,
}

impl LoadScreen {
    /// Creates an idle screen bound to a surface.
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            surface,
            state: Mutex::new(ScreenState {
                phase: ScreenPhase::Idle,
                chrome: None,
            }),
        }
    }

    /// The current phase.
    pub async fn phase(&self) -> ScreenPhase {
        self.state.lock().await.phase
    }

    /// Builds the splash chrome and enters `Loading` with the bar at 0%.
    pub async fn present(&self) -> Result<(), ScreenError> {
        let mut state = self.state.lock().await;
        Self::expect_phase(&state, ScreenPhase::Idle, ScreenPhase::Loading)?;

        let surface = &self.surface;
        let body = surface.body();

        // Injected style block; its text is the packaging placeholder until
        // the build step substitutes the real stylesheet.
        let style = surface.create_element("style", &[]);
        surface.append_child(body, style)?;
        surface.set_text(style, STYLE_TOKEN)?;

        let container = surface.create_element("div", &[UI_CLASS, SCREEN_CLASS]);
        surface.append_child(body, container)?;

        let background = surface.create_element("div", &[UI_CLASS, BACKGROUND_CLASS]);
        surface.append_child(container, background)?;

        let logo = surface.create_element("img", &[UI_CLASS, LOGO_CLASS]);
        surface.set_attribute(logo, "src", &format!("{}{}", LOGO_DATA_PREFIX, LOGO_TOKEN))?;
        surface.append_child(container, logo)?;

        let track = surface.create_element("div", &[UI_CLASS, PROGRESS_BAR_CLASS]);
        surface.append_child(container, track)?;
        let bar = surface.create_element("div", &[]);
        surface.append_child(track, bar)?;
        surface.set_style(bar, StyleProperty::Width, &ProgressFraction::zero().as_css_percent())?;

        state.chrome = Some(SplashChrome {
            style,
            container,
            background,
            logo,
            track,
            bar,
        });
        state.phase = ScreenPhase::Loading;
        Ok(())
    }

    /// Writes the bar width for an updated fraction. `Loading` self-loop.
    pub async fn set_progress(&self, fraction: ProgressFraction) -> Result<(), ScreenError> {
        let state = self.state.lock().await;
        Self::expect_phase(&state, ScreenPhase::Loading, ScreenPhase::Loading)?;

        let chrome = Self::chrome(&state)?;
        self.surface
            .set_style(chrome.bar, StyleProperty::Width, &fraction.as_css_percent())?;
        log::debug!("Progress {}", fraction);
        Ok(())
    }

    /// Enters the terminal `Error` phase for a failed kind.
    ///
    /// Recolors the bar, writes the status message, and arms a blocking
    /// alert on the bar's next transition end. No automatic transition
    /// leaves this phase; the user must reload.
    pub async fn fail(&self, kind: &str) -> Result<(), ScreenError> {
        let mut state = self.state.lock().await;
        Self::expect_phase(&state, ScreenPhase::Loading, ScreenPhase::Error)?;

        let chrome = Self::chrome(&state)?;
        let bar = chrome.bar;
        let message = failure_message(kind);

        self.surface
            .set_style(bar, StyleProperty::BackgroundColor, ERROR_BAR_COLOR)?;
        if let Some(status) = self.surface.element_by_id(STATUS_ELEMENT_ID) {
            self.surface.set_text(status, &message)?;
            self.surface.add_class(status, STATUS_FAIL_CLASS)?;
        }

        // Give the recolor transition time to render before blocking the
        // page with the alert.
        let surface = Arc::clone(&self.surface);
        tokio::spawn(async move {
            if surface.await_transition_end(bar).await.is_ok() {
                surface.alert(&message);
            }
        });

        state.phase = ScreenPhase::Error;
        Ok(())
    }

    /// Runs the completion sequence: `Completing`, fade out, timed teardown,
    /// `Removed`.
    pub async fn finish(&self) -> Result<(), ScreenError> {
        let mut state = self.state.lock().await;
        Self::expect_phase(&state, ScreenPhase::Loading, ScreenPhase::Completing)?;
        state.phase = ScreenPhase::Completing;

        let chrome = Self::chrome(&state)?;
        let surface = &self.surface;

        // Wait for the bar's final width transition before fading.
        surface.await_transition_end(chrome.track).await?;
        state.phase = ScreenPhase::FadingOut;

        let chrome = Self::chrome(&state)?;
        for node in [chrome.logo, chrome.background, chrome.track, chrome.container] {
            surface.set_style(node, StyleProperty::Opacity, "0%")?;
        }

        // Teardown once the fade animation has run its course.
        tokio::time::sleep(FADE_OUT_DELAY).await;

        let chrome = state.chrome.take().ok_or(ScreenError::NotMounted)?;
        for node in [
            chrome.bar,
            chrome.track,
            chrome.logo,
            chrome.background,
            chrome.container,
            chrome.style,
        ] {
            surface.remove(node)?;
        }

        state.phase = ScreenPhase::Removed;
        Ok(())
    }

    fn expect_phase(
        state: &ScreenState,
        expected: ScreenPhase,
        to: ScreenPhase,
    ) -> Result<(), ScreenError> {
        if state.phase != expected {
            return Err(ScreenError::InvalidTransition {
                from: state.phase,
                to,
            });
        }
        Ok(())
    }

    fn chrome(state: &ScreenState) -> Result<&SplashChrome, ScreenError> {
        state.chrome.as_ref().ok_or(ScreenError::NotMounted)
    }
}

/// The user-facing message for a failed kind.
pub(crate) fn failure_message(kind: &str) -> String {
    format!("Failed to load {}, please reload and try again.", kind)
}
