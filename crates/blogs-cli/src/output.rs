use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Print a result: pretty JSON in `--json` mode, `key: value` lines otherwise.
pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let v = serde_json::to_value(value)?;
    if is_json() {
        println!("{}", serde_json::to_string_pretty(&v)?);
        return Ok(());
    }

    let serde_json::Value::Object(map) = v else {
        println!("{v}");
        return Ok(());
    };

    let mut out = stdout();
    let mut key_spec = ColorSpec::new();
    key_spec.set_fg(Some(Color::Cyan)).set_bold(true);
    for (key, value) in map {
        out.set_color(&key_spec)?;
        write!(out, "{key}")?;
        out.reset()?;
        match value {
            serde_json::Value::String(s) => writeln!(out, ": {s}")?,
            serde_json::Value::Null => writeln!(out, ": -")?,
            other => writeln!(out, ": {other}")?,
        }
    }
    Ok(())
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

/// Spinner on stderr while waiting for confirmation. Hidden in JSON mode and
/// when stderr is not a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
