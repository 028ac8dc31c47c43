use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::logger::{
    config::LoggerConfig,
    error::{LoggerError, LoggerResult},
};

/// Human-readable lines on stderr.
pub(super) fn text(cfg: &LoggerConfig) -> LoggerResult<()> {
    install(text_subscriber(cfg, std::io::stderr))
}

/// One JSON object per event on stderr.
pub(super) fn json(cfg: &LoggerConfig) -> LoggerResult<()> {
    install(json_subscriber(cfg, std::io::stderr))
}

#[cfg(target_os = "linux")]
pub(super) fn journald(cfg: &LoggerConfig) -> LoggerResult<()> {
    let layer =
        tracing_journald::layer().map_err(|e| LoggerError::JournaldInitFailed(e.to_string()))?;

    install(tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer))
}

#[cfg(not(target_os = "linux"))]
pub(super) fn journald(_cfg: &LoggerConfig) -> LoggerResult<()> {
    Err(LoggerError::JournaldNotSupported)
}

fn text_subscriber<W>(cfg: &LoggerConfig, writer: W) -> impl Subscriber + Send + Sync + use<W>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(cfg.should_use_color())
        .with_target(cfg.with_targets);

    tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer)
}

fn json_subscriber<W>(cfg: &LoggerConfig, writer: W) -> impl Subscriber + Send + Sync + use<W>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(cfg.with_targets);

    tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer)
}

fn install<S>(subscriber: S) -> LoggerResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing::{info, subscriber::with_default, warn};

    use super::*;
    use crate::logger::object::LoggerLevel;

    /// In-memory writer shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn plain(level: &str) -> LoggerConfig {
        LoggerConfig {
            level: LoggerLevel::new(level).unwrap(),
            use_color: false,
            ..Default::default()
        }
    }

    #[test]
    fn json_events_carry_structured_fields() {
        let buf = Buffer::default();
        with_default(json_subscriber(&plain("info"), buf.clone()), || {
            warn!(step = "db", attempt = 2u32, "step attempt failed");
        });

        let out = buf.contents();
        let line: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(line["level"], "WARN");
        assert_eq!(line["fields"]["message"], "step attempt failed");
        assert_eq!(line["fields"]["step"], "db");
        assert_eq!(line["fields"]["attempt"].as_u64(), Some(2));
        assert!(line.get("target").is_none());
    }

    #[test]
    fn text_respects_level_filter() {
        let buf = Buffer::default();
        with_default(text_subscriber(&plain("warn"), buf.clone()), || {
            info!("hidden");
            warn!(step = "cache", "step attempt failed");
        });

        let out = buf.contents();
        assert_eq!(out.lines().count(), 1, "{out}");
        assert!(out.contains("WARN"));
        assert!(out.contains("step attempt failed"));
        assert!(out.contains("cache"));
        assert!(!out.contains("hidden"));
    }

    #[test]
    fn only_the_first_global_install_succeeds() {
        // The only test in this binary that touches the global dispatcher.
        let cfg = plain("info");
        assert!(text(&cfg).is_ok());
        assert!(matches!(json(&cfg), Err(LoggerError::AlreadyInitialized)));
        assert!(matches!(text(&cfg), Err(LoggerError::AlreadyInitialized)));
    }

    #[test]
    #[cfg(not(target_os = "linux"))]
    fn journald_unsupported_off_linux() {
        assert!(matches!(
            journald(&LoggerConfig::default()),
            Err(LoggerError::JournaldNotSupported)
        ));
    }
}
