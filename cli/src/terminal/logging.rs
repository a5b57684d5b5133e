use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Per-port connect failures, logged at `trace` once per port and host.
const PORT_ATTEMPT_TARGET: &str = "sweepr_core::network::tcp";

/// Renders events as `[+] message`, one line each, without timestamps.
///
/// Per-port attempt noise is indented under the host lines instead of getting
/// its own marker, so a `-vvv` run stays readable.
pub struct SweeprFormatter;

impl<S, N> FormatEvent<S, N> for SweeprFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        match marker(meta.level(), meta.target()) {
            Some(marker) => write!(writer, "{marker} ")?,
            None => write!(writer, "    ")?,
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn marker(level: &Level, target: &str) -> Option<ColoredString> {
    if *level == Level::TRACE && target.starts_with(PORT_ATTEMPT_TARGET) {
        return None;
    }

    let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *level {
        Level::TRACE => ("[ ]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        Level::INFO => ("[+]", |s| s.green().bold()),
        Level::WARN => ("[*]", |s| s.yellow().bold()),
        Level::ERROR => ("[-]", |s| s.red().bold()),
    };

    Some(color_func(symbol.into()))
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Sends diagnostics to stderr; stdout stays reserved for scan results.
///
/// `RUST_LOG` takes precedence over the `-v` count.
pub fn init_logging(verbosity: u8) {
    let filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(SweeprFormatter)
        .init();
}
