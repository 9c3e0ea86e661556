//! Console and durable-log destinations

use super::sink::Destination;
use super::BattleEvent;
use crate::error::SinkError;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where the durable log is appended when no path is configured
pub const DEFAULT_LOG_PATH: &str = "battle_log.txt";

/// Narrates every event to a writer (stdout by default)
///
/// Attacks are announced with the attacker's role verb, and each encounter
/// header is set off by a blank line.
#[derive(Debug)]
pub struct ConsoleLog<W: Write + Send = io::Stdout> {
    out: W,
}

impl ConsoleLog<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleLog { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsoleLog<W> {
    pub fn new(out: W) -> Self {
        ConsoleLog { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Destination for ConsoleLog<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn accept(&mut self, event: &BattleEvent) -> Result<(), SinkError> {
        let result = match event {
            BattleEvent::Attack { actor, role, .. } => writeln!(
                self.out,
                "{} {} attacks!\n{}",
                actor,
                role.capabilities().attack_verb,
                event
            ),
            BattleEvent::EncounterStarted { .. } => writeln!(self.out, "\n{}", event),
            _ => writeln!(self.out, "{}", event),
        };
        result.map_err(|error| SinkError::Io { error, path: None })
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.out
            .flush()
            .map_err(|error| SinkError::Io { error, path: None })
    }
}

/// Append-only text log of attacks and status lines
///
/// The file is opened lazily in append mode. Each line goes to the file in a
/// single write, so an accepted event is on disk as far as the OS is concerned.
/// If the file cannot be opened or written, the event is rejected and the next
/// event reopens it.
#[derive(Debug)]
pub struct FileLog {
    path: PathBuf,
    file: Option<File>,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLog {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: io::Error) -> SinkError {
        SinkError::Io {
            error,
            path: Some(self.path.clone()),
        }
    }

    fn file(&mut self) -> Result<&mut File, SinkError> {
        let file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|e| self.io_error(e))?,
        };
        Ok(self.file.insert(file))
    }
}

impl Default for FileLog {
    fn default() -> Self {
        FileLog::new(DEFAULT_LOG_PATH)
    }
}

impl Destination for FileLog {
    fn name(&self) -> &str {
        "file"
    }

    fn accept(&mut self, event: &BattleEvent) -> Result<(), SinkError> {
        if !event.is_durable() {
            return Ok(());
        }
        let line = format!("{}\n", event);
        match self.file()?.write_all(line.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.file = None;
                Err(self.io_error(e))
            }
        }
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let result = match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        };
        result.map_err(|e| self.io_error(e))
    }
}
