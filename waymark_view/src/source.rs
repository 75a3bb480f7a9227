// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset resolution.
//!
//! A [`DatasetSource`] turns a dataset name (such as `"malta"`) into a
//! readable byte stream. Sources are shared with the decode worker, so they
//! must be `Send + Sync`.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use waymark_format::DecodeError;

use crate::ViewError;

/// Read-only lookup of named datasets.
pub trait DatasetSource: Send + Sync {
    /// Opens the dataset called `name` for sequential reading.
    ///
    /// A missing dataset is reported as [`ViewError::ResourceNotFound`].
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, ViewError>;
}

impl<S: DatasetSource + ?Sized> DatasetSource for Arc<S> {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, ViewError> {
        (**self).open(name)
    }
}

/// Resolves `<root>/<name>.<extension>` on the local filesystem.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    /// Directory holding the dataset files.
    pub root: PathBuf,
    /// File extension without the leading dot.
    pub extension: String,
}

impl DirectorySource {
    /// Creates a source over `root` using the default `dat` extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "dat".to_owned(),
        }
    }

    /// Replaces the file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path a dataset name resolves to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let ext = &self.extension;
        self.root.join(format!("{name}.{ext}"))
    }
}

impl DatasetSource for DirectorySource {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, ViewError> {
        match File::open(self.path_for(name)) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ViewError::ResourceNotFound {
                name: name.to_owned(),
            }),
            Err(err) => Err(ViewError::Decode(DecodeError::Io(err))),
        }
    }
}

/// Named in-memory datasets.
///
/// Handy for tests and embedded data. Every successful [`DatasetSource::open`]
/// is counted.
#[derive(Default)]
pub struct MemorySource {
    datasets: Mutex<HashMap<String, Arc<[u8]>>>,
    opens: AtomicUsize,
}

impl fmt::Debug for MemorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let datasets = self.datasets.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&str> = datasets.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("MemorySource")
            .field("datasets", &names)
            .field("opens", &self.opens.load(Ordering::Relaxed))
            .finish()
    }
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dataset, builder style.
    #[must_use]
    pub fn with(self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Adds or replaces a dataset.
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), bytes.into());
    }

    /// Number of datasets successfully opened so far.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::Acquire)
    }
}

impl DatasetSource for MemorySource {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, ViewError> {
        let bytes = self
            .datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| ViewError::ResourceNotFound {
                name: name.to_owned(),
            })?;
        self.opens.fetch_add(1, Ordering::AcqRel);
        Ok(Box::new(Cursor::new(bytes)))
    }
}
