//! Contains [`init_tracing`], which sets up logging for the whole program.
//!
//! Which outputs are active is decided by cargo features:
//! * `log-to-console` logs to stdout.
//! * `log-to-file` logs to a new file under `logs/`, compressing the logs of earlier runs.
//! * `trace` writes a chrome trace under `tracing/`.
//!
//! The level is read from the `CLEARLOOP_LOG` environment variable and defaults to `info`.

use cfg_if::cfg_if;
use tracing_panic::panic_hook;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

cfg_if! {
    if #[cfg(feature = "log-to-file")] {
        use std::fs::{File, OpenOptions};
        use std::path::Path;
        use std::time::SystemTime;
        use tracing::{Event, Subscriber};
        use tracing_log::NormalizeEvent;
        use tracing_subscriber::fmt::format::Writer;
        use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
        use tracing_subscriber::registry::LookupSpan;
    }
}

cfg_if! {
    if #[cfg(any(feature = "log-to-console", feature = "log-to-file"))] {
        use tracing::metadata::LevelFilter;
        use tracing_subscriber::{EnvFilter, Layer};
    }
}

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "CLEARLOOP_LOG";

/// Keeps the tracing outputs that need flushing alive.
///
/// Hold on to it until the program exits.
#[must_use = "dropping the guard stops trace output"]
pub struct TraceGuard {
    /// Flushes the chrome trace file on drop
    #[cfg(feature = "trace")]
    _chrome: Option<tracing_chrome::FlushGuard>,
}

/// Builds the filter shared by the console and file outputs
#[cfg(any(feature = "log-to-console", feature = "log-to-file"))]
fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy()
}

/// Installs the global tracing subscriber and routes panics through it.
///
/// Failing to open a log or trace file is reported on stderr and only disables that output.
pub fn init_tracing() -> TraceGuard {
    cfg_if! {
        if #[cfg(feature = "log-to-console")] {
            let stdout_log = tracing_subscriber::fmt::layer().with_filter(env_filter());
        } else {
            // This creates a layer that does nothing
            let stdout_log = tracing_subscriber::layer::Identity::new();
        }
    }

    cfg_if! {
        if #[cfg(feature = "log-to-file")] {
            let file_log = match get_log_file() {
                Ok(file) => Some(
                    tracing_subscriber::fmt::layer()
                        .event_format(FileFormatter)
                        .with_writer(file)
                        .with_ansi(false)
                        .with_filter(env_filter()),
                ),
                Err(error) => {
                    eprintln!("Failed to open log file: {error}");
                    None
                }
            };
        } else {
            let file_log = tracing_subscriber::layer::Identity::new();
        }
    }

    cfg_if! {
        if #[cfg(feature = "trace")] {
            let (chrome, chrome_guard) = match chrome_trace_path() {
                Ok(path) => {
                    let (layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
                        .file(path)
                        .include_args(true)
                        .build();
                    (Some(layer), Some(guard))
                }
                Err(error) => {
                    eprintln!("Failed to initialize tracing directory: {error}");
                    (None, None)
                }
            };
        } else {
            let chrome = tracing_subscriber::layer::Identity::new();
        }
    }

    registry()
        .with(stdout_log)
        .with(file_log)
        .with(chrome)
        .init();

    // Feed panic through tracing
    let old_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |infos| {
        panic_hook(infos);
        old_hook(infos);
    }));

    TraceGuard {
        #[cfg(feature = "trace")]
        _chrome: chrome_guard,
    }
}

#[cfg(feature = "log-to-file")]
/// Initializes the log directory, compresses old logs and then creates a new log file and returns it.
fn get_log_file() -> Result<File, std::io::Error> {
    initialize_log_directory()?;

    let log_path = chrono::Utc::now()
        .format("logs/clearloop_log_%Y-%m-%d_%H-%M-%S-%f.log")
        .to_string();
    OpenOptions::new().create(true).append(true).open(log_path)
}

/// Creates the logs directory if needed and gzips every `.log` file already in it.
#[cfg(feature = "log-to-file")]
fn initialize_log_directory() -> Result<(), std::io::Error> {
    let logs = Path::new("logs");
    if !logs.exists() {
        std::fs::create_dir(logs)?;
    }

    for entry in std::fs::read_dir(logs)? {
        let entry = entry?;
        let path = entry.path();

        if !entry.metadata()?.is_file() || path.extension().map_or(true, |ext| ext != "log") {
            continue;
        }

        let mut compressed_path = path.clone().into_os_string();
        compressed_path.push(".gz");

        let mut reader = std::io::BufReader::new(File::open(&path)?);
        let mut compressed_file = flate2::write::GzEncoder::new(
            File::create(&compressed_path)?,
            flate2::Compression::default(),
        );

        std::io::copy(&mut reader, &mut compressed_file)?;
        compressed_file.finish()?;
        std::fs::remove_file(&path)?;
    }

    Ok(())
}

#[cfg(feature = "trace")]
/// Creates the tracing directory if it does not exist and returns the path of a new trace file
fn chrome_trace_path() -> Result<String, std::io::Error> {
    if !std::path::Path::new("tracing").exists() {
        std::fs::create_dir("tracing")?;
    }

    Ok(chrono::Utc::now()
        .format("tracing/clearloop_trace_%Y-%m-%d_%H-%M-%S-%f.json")
        .to_string())
}

#[cfg(feature = "log-to-file")]
/// Formatting for logging to files
///
/// Will format events in the following format:
/// \[\<timestamp>] \[\<level>] \[\<target>]: \<message>
///
/// Example:
/// \[2024-05-05T05:15:02.623Z] \[INFO] \[clearloop::client]: Entered main loop
struct FileFormatter;

#[cfg(feature = "log-to-file")]
impl<S, N> FormatEvent<S, N> for FileFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        // Events forwarded from the `log` crate carry their real metadata separately
        let metadata = event.normalized_metadata();
        let metadata = metadata.as_ref().unwrap_or(event.metadata());

        write!(
            &mut writer,
            "[{}] [{}] [{}]: ",
            humantime::format_rfc3339_millis(SystemTime::now()),
            metadata.level(),
            metadata.target()
        )?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name())?;

                let ext = span.extensions();
                if let Some(fields) = ext.get::<tracing_subscriber::fmt::FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{}}}", fields)?;
                    }
                }
                write!(writer, ": ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
