// The process-wide runtime; kept in its own test binary because the first
// show starts global state. Works with or without a display: shows either
// succeed or report the runtime failure.

use quickplot::gui::EguiRuntime;
use quickplot::{Figure, FigureError, PlotConfig, RuntimeError};
use std::thread;

#[test]
fn concurrent_shows_share_one_runtime() {
    quickplot::configure(PlotConfig {
        ready_timeout_ms: 200,
        ..Default::default()
    })
    .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let mut fig = Figure::new(format!("figure {i}"), "l");
                fig.add_numeric_series("p", [(0.0, i as f64), (1.0, 1.0)]);
                let shown = fig.show();
                assert!(
                    matches!(shown, Ok(()) | Err(FigureError::Runtime(_))),
                    "{:?}",
                    shown
                );
                quickplot::gui::global() as *const EguiRuntime as usize
            })
        })
        .collect();

    let runtimes: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(runtimes.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(std::ptr::eq(quickplot::gui::global(), quickplot::gui::global()));

    assert_eq!(
        quickplot::configure(PlotConfig::default()),
        Err(RuntimeError::AlreadyStarted)
    );
    assert_eq!(quickplot::gui::current_config().ready_timeout_ms, 200);
}
