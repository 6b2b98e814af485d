//! File-backed parameter store.
//!
//! [`ConfigFile`] owns the in-memory [`Store`] for one backing file. `load`
//! reads the file into the store; `save` rewrites the file from the store while
//! keeping the operator's layout: comment and blank lines are copied through,
//! known statements are rewritten in place with their current value, and keys
//! the file has never seen are appended. The new contents are written to a
//! sibling `.tmp` file which is then renamed over the target.

use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::error_sink::TracingErrorSink;
use crate::domain::error::{ConfigError, ErrorCode};
use crate::domain::line_parser::{self, LineStatus};
use crate::domain::store::Store;
use crate::ports::config_port::ConfigPort;
use crate::ports::error_sink_port::ErrorSink;

const TEMP_SUFFIX: &str = ".tmp";

pub struct ConfigFile {
    path: PathBuf,
    store: Store,
    sink: Arc<dyn ErrorSink + Send + Sync>,
}

impl ConfigFile {
    /// A config file reporting failures through `tracing`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_sink(path, Arc::new(TracingErrorSink))
    }

    pub fn with_sink(path: impl Into<PathBuf>, sink: Arc<dyn ErrorSink + Send + Sync>) -> Self {
        Self {
            path: path.into(),
            store: Store::new(),
            sink,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path the next `save` writes to before renaming.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Entries in ascending key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.store.iter()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn report(&self, err: ConfigError) -> ConfigError {
        self.sink.report(err.code());
        err
    }

    /// Read every statement in the backing file into the store.
    ///
    /// Stops at the first malformed line. Statements read before it stay in
    /// the store.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let file = File::open(&self.path).map_err(|source| {
            self.report(ConfigError::Io {
                path: self.path.clone(),
                source,
            })
        })?;

        let mut statements = 0usize;
        for (idx, raw) in raw_lines(BufReader::new(file)).enumerate() {
            let raw = raw.map_err(|source| {
                self.report(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            })?;

            let parsed = line_parser::parse_bytes(&raw);
            match parsed.status {
                LineStatus::Statement => {
                    self.store.upsert(parsed.key, parsed.value);
                    statements += 1;
                }
                LineStatus::NoStatement => {}
                LineStatus::Malformed => {
                    let text = String::from_utf8_lossy(&raw).into_owned();
                    tracing::error!(
                        path = %self.path.display(),
                        line = idx + 1,
                        text = %text,
                        "malformed line, aborting load"
                    );
                    return Err(self.report(ConfigError::Parse {
                        path: self.path.clone(),
                        line: idx + 1,
                        text,
                    }));
                }
            }
        }

        tracing::debug!(path = %self.path.display(), statements, "config file loaded");
        Ok(())
    }

    /// Rewrite the backing file from the store, keeping its existing layout.
    ///
    /// On failure the target is left as it was; a `.tmp` sibling may remain.
    pub fn save(&self) -> Result<(), ConfigError> {
        let temp = self.temp_path();
        let temp_io = |source: io::Error| {
            self.report(ConfigError::Io {
                path: temp.clone(),
                source,
            })
        };

        let file = File::create(&temp).map_err(temp_io)?;
        let mut out = BufWriter::new(file);

        let emitted = match self.open_existing() {
            Some(existing) => self.merge_existing(existing, &mut out, &temp)?,
            None => HashSet::new(),
        };

        let mut appended = 0usize;
        for (key, value) in self.store.iter().filter(|(k, _)| !emitted.contains(*k)) {
            write_statement(&mut out, key, value, b"").map_err(temp_io)?;
            appended += 1;
        }

        let file = out.into_inner().map_err(|e| temp_io(e.into_error()))?;
        file.sync_all().map_err(temp_io)?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|source| {
            self.report(ConfigError::Rename {
                path: self.path.clone(),
                temp: temp.clone(),
                source,
            })
        })?;

        // rename already succeeded; a failed directory sync is not fatal
        if let Err(e) = sync_parent_dir(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not sync config directory");
        }

        tracing::info!(
            path = %self.path.display(),
            keys = self.store.len(),
            appended,
            "config file saved"
        );
        Ok(())
    }

    /// The current backing file, if there is a regular file to carry over.
    fn open_existing(&self) -> Option<File> {
        match File::open(&self.path) {
            Ok(file) if file.metadata().is_ok_and(|m| m.is_file()) => Some(file),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "target is not a regular file, writing fresh");
                None
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no existing config file, writing fresh");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read existing config file, writing fresh");
                None
            }
        }
    }

    /// Copy `existing` to `out`, rewriting statements with current values.
    /// Comment and blank lines are copied byte for byte. Returns the keys
    /// written.
    fn merge_existing<W: Write>(
        &self,
        existing: File,
        out: &mut W,
        temp: &Path,
    ) -> Result<HashSet<String>, ConfigError> {
        let mut emitted = HashSet::new();
        let temp_io = |source: io::Error| {
            self.report(ConfigError::Io {
                path: temp.to_path_buf(),
                source,
            })
        };

        for (idx, raw) in raw_lines(BufReader::new(existing)).enumerate() {
            let raw = raw.map_err(|source| {
                self.report(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            })?;

            let parsed = line_parser::parse_bytes(&raw);
            match parsed.status {
                LineStatus::Statement => match self.store.get(&parsed.key) {
                    Some(value) => {
                        write_statement(out, &parsed.key, value, comment_bytes(&raw))
                            .map_err(temp_io)?;
                        emitted.insert(parsed.key);
                    }
                    None => {
                        tracing::debug!(key = %parsed.key, "dropping statement for unknown key");
                    }
                },
                LineStatus::NoStatement => {
                    out.write_all(&raw)
                        .and_then(|()| out.write_all(b"\n"))
                        .map_err(temp_io)?;
                }
                LineStatus::Malformed => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = idx + 1,
                        text = %String::from_utf8_lossy(&raw),
                        "dropping malformed line"
                    );
                    self.sink.report(ErrorCode::SaveFoundBadLine);
                }
            }
        }

        Ok(emitted)
    }

    /// Operator listing of every entry, one `key: <k> value: <v>` per line.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (key, value) in self.store.iter() {
            writeln!(out, "key: {key} value: {value}")?;
        }
        Ok(())
    }
}

/// Lines split on `\n`, without the terminator or a preceding `\r`.
fn raw_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            bytes
        })
    })
}

/// The original comment of a raw line, from its first `#`.
fn comment_bytes(raw: &[u8]) -> &[u8] {
    raw.iter()
        .position(|&b| b == b'#')
        .map_or(&[][..], |idx| &raw[idx..])
}

fn write_statement<W: Write>(out: &mut W, key: &str, value: &str, comment: &[u8]) -> io::Result<()> {
    write!(out, "{key} = {value}")?;
    if !comment.is_empty() {
        out.write_all(b" ")?;
        out.write_all(comment)?;
    }
    out.write_all(b"\n")
}

/// Flush the directory entry for `path` so a completed rename survives power loss.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

impl ConfigPort for ConfigFile {
    fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.store.get_string(key).map_err(|err| self.report(err))
    }

    fn set_string(&mut self, key: &str, value: &str) {
        if !line_parser::is_valid_key(key) {
            tracing::warn!(key, "key will not read back from the config file");
        }
        if !line_parser::is_valid_value(value) {
            tracing::warn!(key, value, "value will not read back from the config file");
        }
        self.store.upsert(key, value);
    }
}

impl fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFile")
            .field("path", &self.path)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
