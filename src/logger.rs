use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Setup logging for a simulation run
///
/// Log messages go to stderr, keeping stdout free for results. The filter is
/// taken from `level` when given (any `EnvFilter` directive, e.g. `debug` or
/// `statin_pd=trace`), otherwise from `RUST_LOG`, and defaults to `INFO`.
pub fn setup_log(level: Option<&str>) -> Result<()> {
    let env_filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let timestamper = CompactTimestamp {
        start: Instant::now(),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_timer(timestamper);

    Registry::default()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

#[derive(Clone)]
struct CompactTimestamp {
    start: Instant,
}

impl FormatTime for CompactTimestamp {
    fn format_time(
        &self,
        w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> Result<(), std::fmt::Error> {
        let elapsed = self.start.elapsed();
        write!(w, "{:>4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}
