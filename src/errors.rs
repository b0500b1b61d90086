use backtrace::Backtrace;
use parking_lot::RwLock;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

pub(crate) type Atomic<T> = Arc<RwLock<T>>;

pub(crate) fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

/// Error kinds for repository operations.
///
/// Each kind names a category of failure a repository call can surface. The
/// facade performs no classification of store-reported failures beyond what
/// the connection handle itself reports; the kinds it originates on its own
/// are [`ErrorKind::NotFound`] (single-document lookup with no match) and
/// [`ErrorKind::ObjectMappingError`] (encode/decode or acknowledgment-shape
/// failures at the typed boundary).
///
/// # Examples
///
/// ```rust,ignore
/// use docrepo::errors::{RepoError, ErrorKind, RepoResult};
///
/// fn example() -> RepoResult<()> {
///     Err(RepoError::new("No document matched the filter", ErrorKind::NotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The store is unreachable or a round trip was aborted
    ConnectionError,
    /// A single-document lookup matched no document
    NotFound,
    /// A document could not be mapped to or from the model type
    ObjectMappingError,
    /// The store rejected a write
    WriteRejected,
    /// A unique constraint was violated on insert
    UniqueConstraintViolation,
    /// The provided identifier is malformed
    InvalidId,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// The operation was cancelled before the store responded
    Cancelled,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConnectionError => write!(f, "Connection error"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::WriteRejected => write!(f, "Write rejected"),
            ErrorKind::UniqueConstraintViolation => write!(f, "Unique constraint violation"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::Cancelled => write!(f, "Cancelled"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom repository error type.
///
/// `RepoError` encapsulates the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use docrepo::errors::{RepoError, ErrorKind};
///
/// // Create a simple error
/// let err = RepoError::new("No document matched the filter", ErrorKind::NotFound);
///
/// // Create an error with a cause
/// let cause = RepoError::new("connection reset", ErrorKind::ConnectionError);
/// let err = RepoError::new_with_cause("Find failed", ErrorKind::ConnectionError, cause);
/// ```
///
/// # Type alias
///
/// The `RepoResult<T>` type alias is equivalent to `Result<T, RepoError>` and
/// is used throughout the crate for operations that can fail.
#[derive(Clone)]
pub struct RepoError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<RepoError>>,
    backtrace: Atomic<Backtrace>,
}

impl RepoError {
    /// Creates a new `RepoError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        RepoError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `RepoError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: RepoError) -> Self {
        RepoError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<RepoError>> {
        self.cause.as_ref()
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, &*self.backtrace.read()),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for repository operations.
///
/// `RepoResult<T>` is shorthand for `Result<T, RepoError>`.
/// All fallible operations in this crate return this type.
pub type RepoResult<T> = Result<T, RepoError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for RepoError {
    fn from(err: std::io::Error) -> Self {
        RepoError::new(&format!("IO error: {}", err), ErrorKind::ConnectionError)
    }
}

impl From<String> for RepoError {
    fn from(msg: String) -> Self {
        RepoError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for RepoError {
    fn from(msg: &str) -> Self {
        RepoError::new(msg, ErrorKind::InternalError)
    }
}
