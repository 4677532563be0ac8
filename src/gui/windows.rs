//! Figure Windows
//! The set of open figure windows, owned by the UI thread, and the
//! process-wide tracker that lets other threads wait for them to close.

use crate::charts::ChartSpec;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

pub type WindowId = u64;

/// Counts queued window requests plus open windows.
#[derive(Debug, Default)]
pub struct WindowTracker {
    active: Mutex<usize>,
    changed: Condvar,
}

impl WindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn acquire(&self) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        *active += 1;
    }

    pub(crate) fn release(&self) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        *active = active.saturating_sub(1);
        if *active == 0 {
            self.changed.notify_all();
        }
    }

    pub fn active(&self) -> usize {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until nothing is queued or open.
    pub fn wait_until_closed(&self) {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        let _idle = self
            .changed
            .wait_while(active, |active| *active > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Like [`wait_until_closed`](Self::wait_until_closed) with an upper
    /// bound. Returns `true` if everything closed in time.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        while *active > 0 {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .changed
                .wait_timeout(active, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            active = guard;
        }
        true
    }
}

/// One open figure window.
#[derive(Debug, Clone)]
pub struct ChartWindow {
    id: WindowId,
    chart: ChartSpec,
}

impl ChartWindow {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    pub fn viewport_id(&self) -> egui::ViewportId {
        egui::ViewportId::from_hash_of(("quickplot_window", self.id))
    }
}

/// Open figure windows in the order they were opened.
#[derive(Debug)]
pub struct Windows {
    next_id: WindowId,
    windows: Vec<ChartWindow>,
    tracker: Arc<WindowTracker>,
}

impl Default for Windows {
    fn default() -> Self {
        Self::new(Arc::new(WindowTracker::new()))
    }
}

impl Windows {
    pub fn new(tracker: Arc<WindowTracker>) -> Self {
        Self {
            next_id: 0,
            windows: Vec::new(),
            tracker,
        }
    }

    /// Add a window for `chart`. Every call opens a new window.
    pub fn open(&mut self, chart: ChartSpec) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;
        debug!(window = id, title = %chart.title, "opening figure window");
        self.tracker.acquire();
        self.windows.push(ChartWindow { id, chart });
        id
    }

    /// Remove a window. Returns `false` if it was not open.
    pub fn close(&mut self, id: WindowId) -> bool {
        let Some(pos) = self.windows.iter().position(|w| w.id == id) else {
            return false;
        };
        self.windows.remove(pos);
        self.tracker.release();
        debug!(window = id, "closed figure window");
        true
    }

    pub fn get(&self, id: WindowId) -> Option<&ChartWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartWindow> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn tracker(&self) -> &Arc<WindowTracker> {
        &self.tracker
    }
}

impl Drop for Windows {
    fn drop(&mut self) {
        for _ in self.windows.drain(..) {
            self.tracker.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Figure;
    use std::thread;

    fn chart(title: &str) -> ChartSpec {
        Figure::new(title, "l").chart().unwrap()
    }

    #[test]
    fn open_assigns_fresh_ids() {
        let mut windows = Windows::default();
        let a = windows.open(chart("a"));
        let b = windows.open(chart("a"));
        assert_ne!(a, b);
        assert_eq!(windows.len(), 2);
        assert_ne!(
            windows.get(a).unwrap().viewport_id(),
            windows.get(b).unwrap().viewport_id()
        );
    }

    #[test]
    fn close_updates_tracker() {
        let tracker = Arc::new(WindowTracker::new());
        let mut windows = Windows::new(Arc::clone(&tracker));
        let a = windows.open(chart("a"));
        windows.open(chart("b"));
        assert_eq!(tracker.active(), 2);

        assert!(windows.close(a));
        assert!(!windows.close(a));
        assert_eq!(tracker.active(), 1);
        let titles: Vec<&str> = windows.iter().map(|w| w.chart().title.as_str()).collect();
        assert_eq!(titles, vec!["b"]);
    }

    #[test]
    fn dropping_windows_releases_tracker() {
        let tracker = Arc::new(WindowTracker::new());
        let mut windows = Windows::new(Arc::clone(&tracker));
        windows.open(chart("a"));
        drop(windows);
        assert_eq!(tracker.active(), 0);
        assert!(tracker.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn wait_returns_after_last_close() {
        let tracker = Arc::new(WindowTracker::new());
        let mut windows = Windows::new(Arc::clone(&tracker));
        let id = windows.open(chart("a"));
        assert!(!tracker.wait_timeout(Duration::from_millis(10)));

        let closer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            windows.close(id);
        });
        tracker.wait_until_closed();
        assert_eq!(tracker.active(), 0);
        closer.join().unwrap();
    }
}
