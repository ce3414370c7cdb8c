//! Runs in its own process: the global `log` logger can only be installed once, and `tracing`
//! events are forwarded to it because no subscriber is set.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use browser_console::test_helpers::SharedBuffer;
use browser_console::{BrowserConsole, ConsoleLogger};
use pretty_assertions::assert_eq;

#[test]
fn internal_events_do_not_reenter_the_global_logger() {
    let buffer = SharedBuffer::new();
    let logger = ConsoleLogger::new(BrowserConsole::with_output(true, buffer.clone()));
    log::set_boxed_logger(Box::new(logger)).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let (done, finished) = mpsc::channel();
    thread::spawn(move || {
        // Every written entry fires a `tracing` trace event from inside the console lock.
        log::info!("hello");
        log::warn!(user = "alice"; "{{user}} logged in");
        done.send(()).unwrap();
    });

    finished
        .recv_timeout(Duration::from_secs(5))
        .expect("logging from the global logger finished");
    assert_eq!(
        buffer.lines(),
        [
            r#"<script>console.info("hello")</script>"#,
            r#"<script>console.warning("alice logged in")</script>"#,
        ]
    );
}
