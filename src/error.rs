//! `ggsdl::error` submodule defines [`Error`] enum which lists every failure that `ggsdl` reports.
//!
//! There are three kinds of failures that `ggsdl` distinguishes:
//! 1. Construction errors ([`Error::NullResource`] and [`Error::InvalidArgument`]) -
//!    the caller gave `ggsdl` something it cannot work with (null pointer where an owner is expected,
//!    string with interior nul byte, number that does not fit into native type).
//! 2. Native errors ([`Error::Acquisition`], [`Error::Native`] and [`Error::Uninitialized`]) - underlying library refused
//!    to create a resource or to perform an operation. Those carry SDL's last error text.
//! 3. Configuration errors ([`Error::Io`] and [`Error::Serialization`]) - settings could not be
//!    read from or written to a file.
//!
//! Using a handle whose resource was already released is **not** an error that `ggsdl` reports -
//! handles that are derived from owners are guarded by the borrow checker, and handles that are built
//! from raw pointers are the caller's responsibility.
//!

use thiserror::Error as ThisError;

/// [`Error`] enum lists all errors that might occur while working with `ggsdl`.
///
#[derive(Debug, ThisError)]
pub enum Error {
    /// Resource owner was requested for a null pointer
    /// (or an operation was called on an empty handle).
    ///
    #[error("`{kind}` resource cannot be used through a null pointer")]
    NullResource {
        /// Name of the resource kind.
        ///
        kind: &'static str,
    },
    /// Native library failed to create or open a resource.
    ///
    #[error("failed to acquire `{kind}` resource: {message}")]
    Acquisition {
        /// Name of the resource kind.
        ///
        kind: &'static str,
        /// Native library's last error.
        ///
        message: String,
    },
    /// Native library failed to perform an operation on an existing resource.
    ///
    #[error("`{operation}` failed: {message}")]
    Native {
        /// Name of the native operation.
        ///
        operation: &'static str,
        /// Native library's last error.
        ///
        message: String,
    },
    /// Resource is locked by an access that is still running.
    ///
    #[error("`{kind}` resource is locked")]
    Locked {
        /// Name of the resource kind.
        ///
        kind: &'static str,
    },
    /// Operation needs a subsystem that was not requested in `ContextSettings`.
    ///
    #[error("`{0}` subsystem is not initialized")]
    Uninitialized(&'static str),
    /// Argument cannot be passed to the native library.
    ///
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Filesystem error.
    ///
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Data could not be (de)serialized.
    ///
    #[error(transparent)]
    Serialization(#[from] serde_cbor::Error),
}
impl Error {
    /// Constructs [`Error::Acquisition`] from the native library's last error.
    ///
    pub(crate) fn acquisition(kind: &'static str) -> Self {
        Error::Acquisition {
            kind,
            message: sdl2::get_error(),
        }
    }
    /// Constructs [`Error::Native`] from the native library's last error.
    ///
    pub(crate) fn native(operation: &'static str) -> Self {
        Error::Native {
            operation,
            message: sdl2::get_error(),
        }
    }
}

/// Type alias for `Result<T, ggsdl::error::Error>`.
///
pub type Result<T> = std::result::Result<T, Error>;
