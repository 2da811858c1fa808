//! Scripted Keyboard Session
//!
//! Plays a fixed key sequence through the key map against the wall clock,
//! printing the screen after each key, then waits out the error auto-clear.
//!
//! Run with: RUST_LOG=calc_engine=debug cargo run --example scripted_session

use std::thread;
use std::time::Duration;

use calc_engine::engine::DisplaySink;
use calc_engine::keyboard::handle_key;
use calc_engine::logging::{self, LogConfig};
use calc_engine::prelude::*;

/// Prints every frame next to the key that produced it
#[derive(Debug, Default)]
struct Terminal {
    last_key: String,
}

impl DisplaySink for Terminal {
    fn render(&mut self, text: &str) {
        println!("  {:>10} │ {text}", self.last_key);
    }
}

const SCRIPT: &[&str] = &[
    "1", "2", "0", "*", "1", "5", "%", "Enter", // 18
    "+", "2", "Enter", // 20
    "Backspace", "0", ".", "1", "+", "0", ".", "2", "=", // 0.3
    "a", "Tab", // ignored
    "5", "*", "Enter", // Error
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&LogConfig::default().with_level("calc_engine=info"))?;

    let config = EngineConfig::new();
    let mut engine = ExpressionEngine::with_config(Terminal::default(), config);
    engine.sink_mut().last_key = "(start)".to_string();
    engine.refresh();

    for key in SCRIPT {
        engine.sink_mut().last_key = (*key).to_string();
        if !handle_key(&mut engine, key).prevent_default() {
            println!("  {key:>10} │ (ignored)");
        }
    }

    engine.sink_mut().last_key = "(timer)".to_string();
    while let Some(ms) = engine.ms_until_next_timer() {
        thread::sleep(Duration::from_millis(ms));
        engine.poll();
    }

    println!();
    println!("final display: {}", engine.display_text());
    Ok(())
}
