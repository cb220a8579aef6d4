use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "sweepgen.log";
/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

/// Cut the log file down to its most recent `keep` bytes once it grows past
/// `max`. Returns whether the file was rotated.
fn rotate_log(log_path: &Path, max: u64, keep: u64) -> std::io::Result<bool> {
    let len = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if len <= max {
        return Ok(false);
    }

    let mut tail = Vec::with_capacity(keep as usize);
    {
        let mut file = File::open(log_path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(keep)))?;
        file.read_to_end(&mut tail)?;
    }

    // Drop the partial first line
    let start = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- log rotated, older entries removed ---\n")?;
    file.write_all(&tail[start..])?;
    Ok(true)
}

/// Hands out writers that share one open log file
#[derive(Clone)]
struct SharedFile {
    file: Arc<Mutex<File>>,
}

struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for SharedFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.file.lock() {
            Ok(mut file) => file.write(buf),
            // A panic mid-write poisons the lock; keep logging regardless
            Err(poisoned) => poisoned.into_inner().write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.file.lock() {
            Ok(mut file) => file.flush(),
            Err(poisoned) => poisoned.into_inner().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for SharedFile {
    type Writer = SharedFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileWriter {
            file: self.file.clone(),
        }
    }
}

/// Initialize logging to `{data_dir}/sweepgen.log`.
///
/// The file is size-rotated: past 5MB only the last 1MB is kept. `level`
/// applies to both crates unless `RUST_LOG` is set. With `verbose`, events
/// are mirrored to stderr as well.
pub fn init_logging(data_dir: &Path, level: &str, verbose: bool) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE_NAME);

    if let Err(e) = rotate_log(&log_path, MAX_LOG_SIZE, KEEP_SIZE) {
        eprintln!("Warning: Failed to rotate log file: {e}");
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let shared = SharedFile {
        file: Arc::new(Mutex::new(file)),
    };

    let default_filter = format!("sweepgen={level},sweepgen_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(shared)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(stderr_layer)
        .init();

    tracing::info!(log_path = %log_path.display(), "sweepgen logging initialized");
    Ok(())
}
