//! Load session orchestration.
//!
//! [`Orchestrator::run`] drives one session: configuration is validated up
//! front, the total is fixed, and groups are processed strictly in request
//! order. Within a group every resource load is spawned before any is
//! awaited (fan-out), and the group is only judged once all of its loads
//! have settled (fan-in). The first failed group is fatal for the session.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::{ConfigError, LoadRequest};
use crate::error::Result;
use crate::loader::{LoaderError, LoaderRegistry};
use crate::progress::{ProgressFraction, ProgressTracker};
use crate::screen::LoadScreen;
use crate::surface::RenderSurface;

/// A single resource failed to load.
#[derive(Error, Debug)]
#[error("Could not load {locator} from kind '{kind}': {cause}")]
pub struct ResourceLoadError {
    kind: String,
    locator: String,
    #[source]
    cause: LoaderError,
}

impl ResourceLoadError {
    fn new(kind: impl Into<String>, locator: impl Into<String>, cause: LoaderError) -> Self {
        Self {
            kind: kind.into(),
            locator: locator.into(),
            cause,
        }
    }

    /// The kind whose group failed.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The locator of the failing resource.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// The loader's failure value.
    pub fn cause(&self) -> &LoaderError {
        &self.cause
    }
}

/// Fatal session failure.
///
/// Raised when any resource in any group fails. The session cannot continue
/// or be resumed; the caller must restart the whole invocation.
#[derive(Error, Debug)]
#[error("Load session aborted: {source}")]
pub struct SessionAbortError {
    #[from]
    source: ResourceLoadError,
}

impl SessionAbortError {
    /// The failure that aborted the session.
    pub fn resource_error(&self) -> &ResourceLoadError {
        &self.source
    }

    /// The kind whose group failed.
    pub fn kind(&self) -> &str {
        self.source.kind()
    }
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Succeeded,
    Failed,
}

/// Transient state for one `run` invocation.
///
/// Constructed fresh per run and owned by it; nothing survives across
/// invocations.
#[derive(Debug)]
pub struct LoadSession {
    tracker: ProgressTracker,
    current_group: usize,
    outcome: Option<SessionOutcome>,
}

impl LoadSession {
    fn new(total: usize) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            tracker: ProgressTracker::new(total)?,
            current_group: 0,
            outcome: None,
        })
    }

    fn enter_group(&mut self, index: usize) {
        self.current_group = index;
    }

    fn record_completion(&mut self) -> ProgressFraction {
        self.tracker.record_completion()
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.outcome = Some(outcome);
    }

    /// The fixed total resource count for this session.
    pub fn total(&self) -> usize {
        self.tracker.total()
    }

    /// Resources completed so far.
    pub fn completed(&self) -> usize {
        self.tracker.completed()
    }

    /// Index of the group currently in flight.
    pub fn current_group(&self) -> usize {
        self.current_group
    }

    /// Terminal outcome, once the session has one.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }
}

/// Drives one load session over a render surface.
pub struct Orchestrator {
    surface: Arc<dyn RenderSurface>,
}

impl Orchestrator {
    /// Creates an orchestrator bound to a surface.
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self { surface }
    }

    /// Runs the session to completion.
    ///
    /// Consumes the orchestrator: one instance loads exactly once. On
    /// success the splash screen has been torn down and `on_load` invoked;
    /// on failure the screen is in its terminal error state and the
    /// returned [`SessionAbortError`] names the failed kind.
    pub async fn run(self, request: LoadRequest) -> Result<()> {
        request.validate()?;

        let LoadRequest {
            groups,
            loaders,
            on_preload,
            on_load,
        } = request;

        let mut registry = LoaderRegistry::with_defaults(Arc::clone(&self.surface));
        for (kind, loader) in loaders {
            registry.insert(kind, loader);
        }
        registry.validate_coverage(&groups)?;

        // Fixed denominator for the whole session; never recomputed.
        let total: usize = groups.iter().map(|group| group.len()).sum();

        if let Some(callback) = on_preload {
            callback();
        }

        let screen = Arc::new(LoadScreen::new(Arc::clone(&self.surface)));
        screen.present().await?;

        if total == 0 {
            // Every group is empty: nothing to count, the session trivially
            // succeeds with the bar jumping straight to 100%.
            screen.set_progress(ProgressFraction::complete()).await?;
            screen.finish().await?;
            if let Some(callback) = on_load {
                callback();
            }
            return Ok(());
        }

        let session = Arc::new(Mutex::new(LoadSession::new(total)?));

        for (index, group) in groups.iter().enumerate() {
            session.lock().await.enter_group(index);

            let loader = registry.get(&group.kind).ok_or_else(|| ConfigError::MissingLoader {
                kind: group.kind.clone(),
            })?;

            // Fan out: every member starts before any is awaited. Dropping
            // a JoinHandle detaches the task, so nothing in flight is ever
            // cancelled.
            let mut locators = Vec::with_capacity(group.len());
            let mut handles = Vec::with_capacity(group.len());
            for spec in &group.resources {
                locators.push(spec.locator().to_string());

                let loader = Arc::clone(&loader);
                let spec = spec.clone();
                let kind = group.kind.clone();
                let session = Arc::clone(&session);
                let screen = Arc::clone(&screen);
                handles.push(tokio::spawn(async move {
                    match loader.load(&spec).await {
                        Ok(locator) => {
                            // Counter increment and bar write share one lock
                            // acquisition so the rendered sequence never
                            // regresses.
                            let mut session = session.lock().await;
                            let fraction = session.record_completion();
                            if let Err(err) = screen.set_progress(fraction).await {
                                log::warn!("Progress update dropped: {}", err);
                            }
                            Ok(locator)
                        }
                        Err(cause) => Err(ResourceLoadError::new(kind, spec.locator(), cause)),
                    }
                }));
            }

            // Fan in: the whole group settles before it is judged.
            let results = join_all(handles).await;
            let mut first_failure: Option<ResourceLoadError> = None;
            for (locator, result) in locators.into_iter().zip(results) {
                let settled = match result {
                    Ok(settled) => settled,
                    Err(join_err) => Err(ResourceLoadError::new(
                        group.kind.clone(),
                        locator,
                        LoaderError::new(format!("loader task aborted: {}", join_err)),
                    )),
                };
                if let Err(err) = settled {
                    first_failure.get_or_insert(err);
                }
            }

            if let Some(failure) = first_failure {
                log::error!("Could not load all {}: {}", group.kind, failure);
                session.lock().await.finish(SessionOutcome::Failed);
                screen.fail(&group.kind).await?;
                return Err(SessionAbortError::from(failure).into());
            }

            log::info!("Loaded all {}!", group.kind);
        }

        session.lock().await.finish(SessionOutcome::Succeeded);
        screen.finish().await?;

        if let Some(callback) = on_load {
            callback();
        }
        Ok(())
    }
}
