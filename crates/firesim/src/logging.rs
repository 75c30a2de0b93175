use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Cut `log_path` down to roughly its last `keep` bytes once it exceeds `max`.
///
/// The retained tail starts at a line boundary and is prefixed with
/// [`ROTATION_MARKER`]. Returns whether the file was rewritten.
fn rotate_log(log_path: &Path, max: u64, keep: u64) -> io::Result<bool> {
    let len = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if len <= max {
        return Ok(false);
    }

    let tail = {
        let mut file = File::open(log_path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(keep)))?;
        let mut tail = Vec::with_capacity(usize::try_from(keep).unwrap_or_default());
        file.read_to_end(&mut tail)?;
        tail
    };

    // The seek usually lands mid-line
    let first_line = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut rotated = Vec::with_capacity(ROTATION_MARKER.len() + tail.len() - first_line);
    rotated.extend_from_slice(ROTATION_MARKER);
    rotated.extend_from_slice(&tail[first_line..]);
    fs::write(log_path, rotated)?;

    Ok(true)
}

/// Hands out writers to one shared log file
#[derive(Clone)]
struct SharedFile {
    file: Arc<Mutex<File>>,
}

struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for SharedFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
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

/// Default directive when `RUST_LOG` is unset.
fn default_directive(level: &str) -> String {
    format!("firesim={level},firesim_core={level}")
}

/// Initialize logging.
///
/// Without `log_file` events go to stderr so table and JSON output on stdout
/// stay clean. With it, events are appended to that file, which is trimmed to
/// its last 1 MB whenever it has grown past 5 MB. `RUST_LOG` overrides
/// `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let mut rotated_on_start = false;
    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            match rotate_log(path, MAX_LOG_SIZE, KEEP_SIZE) {
                Ok(rotated) => rotated_on_start = rotated,
                Err(e) => eprintln!("firesim: could not rotate {}: {e}", path.display()),
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(SharedFile {
                        file: Arc::new(Mutex::new(file)),
                    })
                    .with_ansi(false)
                    .with_target(true),
            )
        }
        None => None,
    };

    let stderr_layer = log_file
        .is_none()
        .then(|| fmt::layer().with_writer(io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!(log_file = ?log_file, rotated_on_start, "logging initialized");
    Ok(())
}
