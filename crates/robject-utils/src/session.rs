//! Key-value session store persisted as a single serialized string.
//!
//! Pairs are written as `key=value` joined by `|`, with keys and values
//! encoded by [`escape`] so neither separator can appear inside them.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Storage holding the serialized session string.
pub trait SessionBackend: Send {
    /// Reads the serialized string; an unset store reads as empty.
    fn read(&self) -> Result<String>;

    /// Replaces the serialized string.
    fn write(&mut self, contents: &str) -> Result<()>;
}

/// Session string kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: String,
}

impl MemoryBackend {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl SessionBackend for MemoryBackend {
    fn read(&self) -> Result<String> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.contents = contents.to_string();
        Ok(())
    }
}

/// Session string stored in a file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionBackend for FileBackend {
    fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        }
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// Lazily loaded key-value store.
///
/// The backing string is parsed on the first `get` or `set`. Every change
/// rewrites the whole string; setting a key to its current value does not.
pub struct Session {
    backend: Box<dyn SessionBackend>,
    data: IndexMap<String, String>,
    initialized: bool,
}

impl Session {
    pub fn new(backend: impl SessionBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            data: IndexMap::new(),
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Parses the backing string into the store.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    pub fn init(&mut self) -> Result<&mut Self> {
        let contents = self.backend.read()?;
        for pair in contents.split('|').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            self.data.insert(unescape(key), unescape(value));
        }
        self.initialized = true;
        tracing::debug!(entries = self.data.len(), "session initialized");
        Ok(self)
    }

    /// Stores `value` under `key`.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read or written.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<&mut Self> {
        self.ensure_initialized()?;
        let (key, value) = (key.into(), value.into());
        if self.data.get(&key) == Some(&value) {
            return Ok(self);
        }
        self.data.insert(key, value);
        let serialized = self.serialize();
        self.backend.write(&serialized)?;
        Ok(self)
    }

    /// Returns the value stored under `key`, or an empty string.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    pub fn get(&mut self, key: &str) -> Result<&str> {
        self.ensure_initialized()?;
        Ok(self.data.get(key).map_or("", String::as_str))
    }

    /// Serialized form of the current entries.
    pub fn serialize(&self) -> String {
        self.data
            .iter()
            .map(|(key, value)| format!("{}={}", escape(key), escape(value)))
            .collect::<Vec<_>>()
            .join("|")
    }

    fn ensure_initialized(&mut self) -> Result<()> {
        if !self.initialized {
            self.init()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("data", &self.data)
            .field("initialized", &self.initialized)
            .finish()
    }
}

fn is_unreserved(unit: u16) -> bool {
    u8::try_from(unit).is_ok_and(|byte| {
        byte.is_ascii_alphanumeric() || b"@*_+-./".contains(&byte)
    })
}

/// Percent-encodes `input` per UTF-16 code unit.
///
/// Units below 256 become `%XX`, all others `%uXXXX`. ASCII letters, digits
/// and `@*_+-./` are kept as they are.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for unit in input.encode_utf16() {
        if is_unreserved(unit) {
            out.push(char::from(unit as u8));
        } else if unit < 256 {
            out.push_str(&format!("%{unit:02X}"));
        } else {
            out.push_str(&format!("%u{unit:04X}"));
        }
    }
    out
}

fn hex_unit(digits: Option<&str>) -> Option<u16> {
    let digits = digits?;
    if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Reverses [`escape`]. Malformed escapes are kept literally.
pub fn unescape(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut units = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if bytes[i] == b'%' {
            if bytes.get(i + 1) == Some(&b'u')
                && let Some(unit) = hex_unit(input.get(i + 2..i + 6))
            {
                units.push(unit);
                i += 6;
                continue;
            }
            if let Some(unit) = hex_unit(input.get(i + 1..i + 3)) {
                units.push(unit);
                i += 3;
                continue;
            }
        }
        let Some(ch) = input[i..].chars().next() else {
            break;
        };
        let mut buf = [0u16; 2];
        units.extend_from_slice(ch.encode_utf16(&mut buf));
        i += ch.len_utf8();
    }

    String::from_utf16_lossy(&units)
}
