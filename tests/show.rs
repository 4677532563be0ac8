// Drives Figure::show_on through in-process runtimes, no display needed.

use quickplot::{
    ChartBody, ChartKind, Figure, FigureError, RuntimeError, UiRuntime, UiTask, Windows,
};
use std::sync::{Arc, Mutex};
use std::thread;

/// Runs each task immediately against its own window list.
#[derive(Default)]
struct ImmediateRuntime {
    windows: Mutex<Windows>,
}

impl UiRuntime for ImmediateRuntime {
    fn submit(&self, task: UiTask) -> Result<(), RuntimeError> {
        task(&mut *self.windows.lock().unwrap());
        Ok(())
    }
}

/// Holds tasks until `run_all`, like a UI loop that has not ticked yet.
#[derive(Default)]
struct QueuedRuntime {
    queue: Mutex<Vec<UiTask>>,
    windows: Mutex<Windows>,
}

impl QueuedRuntime {
    fn run_all(&self) {
        let tasks: Vec<UiTask> = self.queue.lock().unwrap().drain(..).collect();
        let mut windows = self.windows.lock().unwrap();
        for task in tasks {
            task(&mut *windows);
        }
    }
}

impl UiRuntime for QueuedRuntime {
    fn submit(&self, task: UiTask) -> Result<(), RuntimeError> {
        self.queue.lock().unwrap().push(task);
        Ok(())
    }
}

struct DeadRuntime;

impl UiRuntime for DeadRuntime {
    fn submit(&self, _task: UiTask) -> Result<(), RuntimeError> {
        Err(RuntimeError::Startup("no display".to_string()))
    }
}

#[test]
fn line_window_has_points_verbatim() {
    let runtime = ImmediateRuntime::default();
    let mut fig = Figure::new("Sample Plot", "L");
    fig.set_x_label("X Axis");
    fig.set_y_label("Y Axis");
    fig.add_numeric_series("Series 1", [(0.0, 1.0), (1.0, 2.0), (0.5, -1.0), (0.5, -1.0)]);
    fig.show_on(&runtime).unwrap();

    let windows = runtime.windows.lock().unwrap();
    assert_eq!(windows.len(), 1);
    let chart = windows.iter().next().unwrap().chart();
    assert_eq!(chart.title, "Sample Plot");
    assert_eq!(chart.kind, ChartKind::Line);
    assert_eq!(chart.x_label, "X Axis");
    assert_eq!(chart.y_label, "Y Axis");
    let ChartBody::Xy(traces) = &chart.body else {
        panic!("expected xy body");
    };
    assert_eq!(traces[0].name, "Series 1");
    assert_eq!(
        traces[0].points,
        vec![[0.0, 1.0], [1.0, 2.0], [0.5, -1.0], [0.5, -1.0]]
    );
}

#[test]
fn histogram_window_counts_labels() {
    let runtime = ImmediateRuntime::default();
    let mut fig = Figure::new("Votes", "h");
    fig.add_category_series("", ["b", "a", "b", "c", "a", "a"]);
    fig.show_on(&runtime).unwrap();

    let windows = runtime.windows.lock().unwrap();
    let chart = windows.iter().next().unwrap().chart();
    assert_eq!(chart.y_label, "Frequency");
    let ChartBody::Bars { categories, traces } = &chart.body else {
        panic!("expected bar body");
    };
    assert_eq!(categories.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    assert_eq!(traces[0].name, "Series");
    assert_eq!(traces[0].table.counts(), vec![2, 3, 1]);
}

#[test]
fn state_is_snapshotted_when_show_is_called() {
    let runtime = QueuedRuntime::default();
    let mut fig = Figure::new("t", "s");
    fig.set_x_label("before");
    fig.add_numeric_series("a", [(1.0, 1.0)]);
    fig.show_on(&runtime).unwrap();

    fig.set_x_label("after");
    fig.add_numeric_series("b", [(2.0, 2.0)]);
    fig.show_on(&runtime).unwrap();

    // Nothing has reached the UI side yet.
    assert!(runtime.windows.lock().unwrap().is_empty());
    runtime.run_all();

    let windows = runtime.windows.lock().unwrap();
    let charts: Vec<_> = windows.iter().map(|w| w.chart()).collect();
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0].x_label, "before");
    assert_eq!(charts[0].trace_count(), 1);
    assert_eq!(charts[1].x_label, "after");
    assert_eq!(charts[1].trace_count(), 2);
}

#[test]
fn labels_set_after_series_apply_to_next_show() {
    let runtime = ImmediateRuntime::default();
    let mut fig = Figure::new("t", "l");
    fig.add_numeric_series("a", [(0.0, 0.0)]);
    fig.set_y_label("late");
    fig.show_on(&runtime).unwrap();

    let windows = runtime.windows.lock().unwrap();
    assert_eq!(windows.iter().next().unwrap().chart().y_label, "late");
}

#[test]
fn invalid_type_fails_without_submitting() {
    let runtime = QueuedRuntime::default();
    let mut fig = Figure::new("t", "bar");
    fig.add_category_series("a", ["x"]);

    let err = fig.show_on(&runtime).unwrap_err();
    assert!(matches!(err, FigureError::InvalidChartType(ref code) if code == "bar"));
    assert_eq!(err.to_string(), "Unknown chart type: bar");
    assert!(runtime.queue.lock().unwrap().is_empty());
}

#[test]
fn runtime_failures_are_reported() {
    let fig = Figure::new("t", "l");
    let err = fig.show_on(&DeadRuntime).unwrap_err();
    assert!(matches!(
        err,
        FigureError::Runtime(RuntimeError::Startup(_))
    ));
}

#[test]
fn mismatched_series_leave_chart_emptier() {
    let runtime = ImmediateRuntime::default();
    let mut fig = Figure::new("t", "l");
    fig.add_category_series("labels", ["x", "y"]);
    fig.show_on(&runtime).unwrap();

    let windows = runtime.windows.lock().unwrap();
    let chart = windows.iter().next().unwrap().chart();
    assert!(chart.is_empty());
}

#[test]
fn concurrent_shows_open_independent_windows() {
    let runtime = Arc::new(ImmediateRuntime::default());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let runtime = Arc::clone(&runtime);
            thread::spawn(move || {
                let mut fig = Figure::new(format!("figure {i}"), "s");
                fig.add_numeric_series("p", [(i as f64, i as f64)]);
                fig.show_on(runtime.as_ref()).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let windows = runtime.windows.lock().unwrap();
    assert_eq!(windows.len(), 8);
    let mut titles: Vec<String> = windows.iter().map(|w| w.chart().title.clone()).collect();
    titles.sort();
    titles.dedup();
    assert_eq!(titles.len(), 8);
}

#[test]
fn dyn_runtime_is_accepted() {
    let runtime: Box<dyn UiRuntime> = Box::new(ImmediateRuntime::default());
    let fig = Figure::new("t", "h");
    fig.show_on(runtime.as_ref()).unwrap();
}
