#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Append-only frame journal backing the match history log.
//!
//! The journal takes ownership of every frame appended to it, notifies an
//! optional observer on each append, and can persist the whole sequence to
//! its log file on demand. Persistence failures are reported, never fatal.

use std::{
    error::Error,
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tank_duel_core::FrameSnapshot;

const FRAME_SEPARATOR: &str =
    "---------------------------------------------------------------";

/// Callback invoked with a borrowed frame right before it is stored.
pub type AppendObserver = Box<dyn FnMut(&FrameSnapshot)>;

/// Append-only ordered sequence of rendered frames.
pub struct Journal {
    frames: Vec<FrameSnapshot>,
    target: PathBuf,
    observer: Option<AppendObserver>,
}

impl Journal {
    /// Creates an empty journal that persists to the provided log file.
    #[must_use]
    pub fn new(target: PathBuf) -> Self {
        Self {
            frames: Vec::new(),
            target,
            observer: None,
        }
    }

    /// Installs the on-append observer, replacing any previous one.
    pub fn observe_appends(&mut self, observer: AppendObserver) {
        self.observer = Some(observer);
    }

    /// Appends a frame, passing ownership to the journal.
    ///
    /// The observer, when installed, sees the frame before it is stored.
    pub fn append(&mut self, frame: FrameSnapshot) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&frame);
        }
        self.frames.push(frame);
    }

    /// Number of frames recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Reports whether no frame has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames recorded so far, in append order.
    #[must_use]
    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    /// Log file the journal persists to.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Writes every recorded frame to the log file, each preceded by a
    /// separator line. Creates or truncates the file.
    ///
    /// Returns the number of frames written.
    pub fn persist(&self) -> Result<usize, PersistenceError> {
        let file = File::create(&self.target).map_err(|source| PersistenceError {
            path: self.target.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        for frame in &self.frames {
            self.write_frame(&mut writer, frame)
                .map_err(|source| PersistenceError {
                    path: self.target.clone(),
                    source,
                })?;
        }

        writer.flush().map_err(|source| PersistenceError {
            path: self.target.clone(),
            source,
        })?;

        Ok(self.frames.len())
    }

    fn write_frame(
        &self,
        writer: &mut BufWriter<File>,
        frame: &FrameSnapshot,
    ) -> Result<(), std::io::Error> {
        writeln!(writer, "{FRAME_SEPARATOR}")?;
        for line in frame.lines() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Journal")
            .field("frames", &self.frames.len())
            .field("target", &self.target)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Failure to open or write the journal's log file.
#[derive(Debug)]
pub struct PersistenceError {
    path: PathBuf,
    source: std::io::Error,
}

impl PersistenceError {
    /// Log file the journal failed to write.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "could not write journal file `{}`: {}",
            self.path.display(),
            self.source
        )
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
