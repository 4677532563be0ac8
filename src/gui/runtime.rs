//! GUI Runtime
//! Starts the eframe event loop once per process on its own thread and
//! marshals window work onto it.
//!
//! All window state lives on the UI thread. Other threads hand it work as
//! [`UiTask`] closures through [`UiRuntime::submit`].

use crate::config::PlotConfig;
use crate::gui::app::PlotApp;
use crate::gui::windows::{WindowTracker, Windows};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, OnceLock, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("GUI runtime failed to start: {0}")]
    Startup(String),
    #[error("GUI runtime not ready after {0:?}")]
    NotReady(Duration),
    #[error("GUI runtime has shut down")]
    Disconnected,
    #[error("GUI runtime already started")]
    AlreadyStarted,
    #[error("GUI runtime already configured")]
    AlreadyConfigured,
}

/// Work to run on the UI thread against the open windows.
pub type UiTask = Box<dyn FnOnce(&mut Windows) + Send + 'static>;

/// A submitted task on its way to the UI thread.
///
/// Counts toward the window tracker from submission until it has run or has
/// been dropped unrun.
pub(crate) struct QueuedTask {
    task: Option<UiTask>,
    tracker: Arc<WindowTracker>,
}

impl QueuedTask {
    pub(crate) fn new(task: UiTask, tracker: Arc<WindowTracker>) -> Self {
        tracker.acquire();
        Self {
            task: Some(task),
            tracker,
        }
    }

    /// Run the task. Windows it opens are counted before this one is released.
    pub(crate) fn run(mut self, windows: &mut Windows) {
        if let Some(task) = self.task.take() {
            task(windows);
        }
    }
}

impl Drop for QueuedTask {
    fn drop(&mut self) {
        if self.task.is_some() {
            debug!("dropping unrun UI task");
        }
        self.tracker.release();
    }
}

/// A single-threaded UI context that accepts work from any thread.
///
/// Tasks run on the UI thread in submission order. `submit` does not wait for
/// the task to run.
pub trait UiRuntime: Send + Sync {
    fn submit(&self, task: UiTask) -> Result<(), RuntimeError>;
}

/// One-shot, thread-safe lazy start. The start closure runs at most once even
/// when many threads race on the first call.
#[derive(Debug)]
pub struct Bootstrap<R> {
    cell: OnceLock<R>,
}

impl<R> Default for Bootstrap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Bootstrap<R> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_start<F>(&self, start: F) -> &R
    where
        F: FnOnce() -> R,
    {
        self.cell.get_or_init(start)
    }

    pub fn get(&self) -> Option<&R> {
        self.cell.get()
    }

    pub fn is_started(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[derive(Debug)]
enum ReadyState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

/// Explicit "runtime ready" signal. Resolves once, to a value or a failure.
#[derive(Debug)]
pub struct Readiness<T> {
    state: Mutex<ReadyState<T>>,
    changed: Condvar,
}

impl<T: Clone> Default for Readiness<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Readiness<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ReadyState::Pending),
            changed: Condvar::new(),
        }
    }

    /// Resolve to `value`. Ignored if already resolved.
    pub fn set_ready(&self, value: T) {
        self.resolve(ReadyState::Ready(value));
    }

    /// Resolve to a failure. Ignored if already resolved.
    pub fn set_failed(&self, reason: impl Into<String>) {
        self.resolve(ReadyState::Failed(reason.into()));
    }

    fn resolve(&self, next: ReadyState<T>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, ReadyState::Pending) {
            *state = next;
            self.changed.notify_all();
        }
    }

    /// Block until resolved or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> Result<T, RuntimeError> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            match &*state {
                ReadyState::Ready(value) => return Ok(value.clone()),
                ReadyState::Failed(reason) => return Err(RuntimeError::Startup(reason.clone())),
                ReadyState::Pending => {}
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(RuntimeError::NotReady(timeout));
            }
            let (guard, _) = self
                .changed
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
    }
}

/// The eframe-backed UI runtime.
pub struct EguiRuntime {
    tasks: Sender<QueuedTask>,
    ready: Arc<Readiness<egui::Context>>,
    tracker: Arc<WindowTracker>,
    ready_timeout: Duration,
}

impl EguiRuntime {
    /// Spawn the event loop thread. Returns immediately; readiness is
    /// awaited by `submit`.
    pub fn start(config: PlotConfig, tracker: Arc<WindowTracker>) -> Self {
        let (tx, rx) = channel();
        let ready = Arc::new(Readiness::new());
        let ready_timeout = config.ready_timeout();

        if cfg!(target_os = "macos") {
            ready.set_failed("the event loop must run on the main thread on macOS");
        } else {
            let thread_ready = Arc::clone(&ready);
            let thread_tracker = Arc::clone(&tracker);
            let spawned = thread::Builder::new()
                .name("quickplot-ui".to_string())
                .spawn(move || Self::run(rx, thread_ready, config, thread_tracker));
            if let Err(e) = spawned {
                error!(error = %e, "failed to spawn GUI thread");
                ready.set_failed(e.to_string());
            }
        }

        Self::from_parts(tx, ready, tracker, ready_timeout)
    }

    pub(crate) fn from_parts(
        tasks: Sender<QueuedTask>,
        ready: Arc<Readiness<egui::Context>>,
        tracker: Arc<WindowTracker>,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            tasks,
            ready,
            tracker,
            ready_timeout,
        }
    }

    fn run(
        tasks: Receiver<QueuedTask>,
        ready: Arc<Readiness<egui::Context>>,
        config: PlotConfig,
        tracker: Arc<WindowTracker>,
    ) {
        info!("starting GUI runtime");

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title("QuickPlot")
                .with_inner_size(config.min_window_size)
                .with_visible(!config.hide_root_window),
            event_loop_builder: Some(Box::new(allow_any_thread)),
            ..Default::default()
        };

        let creator_ready = Arc::clone(&ready);
        let result = panic::catch_unwind(AssertUnwindSafe(move || {
            eframe::run_native(
                "QuickPlot",
                options,
                Box::new(move |cc| {
                    creator_ready.set_ready(cc.egui_ctx.clone());
                    Ok(Box::new(PlotApp::new(tasks, config, tracker)))
                }),
            )
        }));

        match result {
            Ok(Ok(())) => {
                debug!("GUI runtime exited");
                ready.set_failed("GUI runtime exited");
            }
            Ok(Err(e)) => {
                error!(error = %e, "GUI runtime failed");
                ready.set_failed(e.to_string());
            }
            Err(_) => {
                error!("GUI runtime panicked");
                ready.set_failed("GUI runtime panicked");
            }
        }
    }
}

impl UiRuntime for EguiRuntime {
    fn submit(&self, task: UiTask) -> Result<(), RuntimeError> {
        let ctx = self.ready.wait(self.ready_timeout)?;

        // A failed send hands the task back inside the error, which releases it
        self.tasks
            .send(QueuedTask::new(task, Arc::clone(&self.tracker)))
            .map_err(|_| RuntimeError::Disconnected)?;
        ctx.request_repaint();
        Ok(())
    }
}

/// Let winit create its event loop off the main thread.
fn allow_any_thread(builder: &mut winit::event_loop::EventLoopBuilder<eframe::UserEvent>) {
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    {
        winit::platform::x11::EventLoopBuilderExtX11::with_any_thread(builder, true);
    }
    #[cfg(windows)]
    {
        winit::platform::windows::EventLoopBuilderExtWindows::with_any_thread(builder, true);
    }
    #[cfg(not(any(
        windows,
        all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))
    )))]
    {
        let _ = builder;
    }
}

static CONFIG: OnceLock<PlotConfig> = OnceLock::new();
static TRACKER: OnceLock<Arc<WindowTracker>> = OnceLock::new();
static RUNTIME: Bootstrap<EguiRuntime> = Bootstrap::new();

fn tracker() -> &'static Arc<WindowTracker> {
    TRACKER.get_or_init(|| Arc::new(WindowTracker::new()))
}

/// Set the configuration used by the process-wide runtime and by
/// `Figure::save`. Must be called before the first figure is shown.
pub fn configure(config: PlotConfig) -> Result<(), RuntimeError> {
    if RUNTIME.is_started() {
        return Err(RuntimeError::AlreadyStarted);
    }
    CONFIG.set(config).map_err(|_| {
        if RUNTIME.is_started() {
            RuntimeError::AlreadyStarted
        } else {
            RuntimeError::AlreadyConfigured
        }
    })
}

/// The configuration in effect (defaults until [`configure`] is called).
pub fn current_config() -> PlotConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

/// The process-wide runtime, started on first call.
pub fn global() -> &'static EguiRuntime {
    RUNTIME.get_or_start(|| {
        let config = CONFIG.get_or_init(PlotConfig::default).clone();
        EguiRuntime::start(config, Arc::clone(tracker()))
    })
}

/// Block until every figure window shown so far has been closed.
///
/// Returns immediately if nothing was shown.
pub fn wait_until_closed() {
    tracker().wait_until_closed();
}
