// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Logging for the carver and the command line tool.
//!
//! Session lifecycle goes out at info, each removed seam at debug, and
//! each selected seam at trace.  Events go to stderr so that nothing
//! interferes with image data a caller might pipe through stdout.

use crate::config::LoggingConfig;
use std::io::{self, IsTerminal};
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::EnvFilter;

/// Build a subscriber for `config` that writes to `writer`, colouring
/// plain output when `ansi` is set.  The filter is taken from
/// `config.level` alone.
pub fn subscriber<W>(
    config: &LoggingConfig,
    writer: W,
    ansi: bool,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::new(&config.level))
        .with_ansi(ansi && !config.json)
        .with_writer(writer);
    if config.json {
        Box::new(builder.json().finish())
    } else {
        Box::new(
            builder
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    }
}

/// Install the global subscriber, logging to stderr.  `RUST_LOG`, when
/// set, wins over the configured level.  Only the first call installs
/// anything.
pub fn init_logging(config: &LoggingConfig) {
    let level = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| config.level.clone());
    let config = LoggingConfig {
        level,
        ..config.clone()
    };
    let ansi = io::stderr().is_terminal();
    tracing::subscriber::set_global_default(subscriber(&config, io::stderr, ansi)).ok();
}

#[cfg(test)]
pub(crate) mod capture {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// An in-memory log sink for tests.
    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with events at `level` and above captured, and return
    /// what was logged.
    pub(crate) fn logged<F: FnOnce()>(level: &str, json: bool, f: F) -> String {
        let sink = Captured::default();
        let writer = sink.clone();
        let config = LoggingConfig {
            level: level.to_string(),
            json,
        };
        let subscriber = subscriber(&config, move || writer.clone(), false);
        tracing::subscriber::with_default(subscriber, f);
        sink.contents()
    }
}
