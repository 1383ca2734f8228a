//! Storage abstraction for Foundation Docs content.
//!
//! This crate provides a [`Storage`] trait for abstracting document scanning and
//! content retrieval from the underlying content source, plus the front matter
//! format shared by every backend.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, `exists()` and `mtime()` methods
//! - [`Metadata`] and [`split_front_matter`] for YAML front matter
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `fd-storage-fs` crate.

mod metadata;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use metadata::{Metadata, MetadataError, split_front_matter};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Document, ErrorStatus, Storage, StorageError, StorageErrorKind};
