use ledgerroot_core_types::RequestId;
use thiserror::Error;

/// Result type alias using LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by LedgerRoot maps onto one of these kinds. Each
/// kind has a stable error code for programmatic handling, tests and CLI
/// output, and belongs to exactly one [`ErrorClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidIdentity,
    InvalidAmount,
    AmountOutOfRange,

    // Integrity
    EmptyLedger,
    DuplicateIdentity,

    // Lookup
    LeafNotFound,

    // Storage
    CorruptArtifact,
    UnsupportedFormat,
    Io,
    Serialization,

    // Arithmetic
    AmountOverflow,
}

/// Coarse error classes used for propagation policy
///
/// `Input`, `Integrity`, `Storage` and `Arithmetic` abort a batch; `NotFound`
/// is local to the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Input,
    Integrity,
    NotFound,
    Storage,
    Arithmetic,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidIdentity => "ERR_INVALID_IDENTITY",
            ExErrorKind::InvalidAmount => "ERR_INVALID_AMOUNT",
            ExErrorKind::AmountOutOfRange => "ERR_AMOUNT_OUT_OF_RANGE",
            ExErrorKind::EmptyLedger => "ERR_EMPTY_LEDGER",
            ExErrorKind::DuplicateIdentity => "ERR_DUPLICATE_IDENTITY",
            ExErrorKind::LeafNotFound => "ERR_LEAF_NOT_FOUND",
            ExErrorKind::CorruptArtifact => "ERR_CORRUPT_ARTIFACT",
            ExErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::AmountOverflow => "ERR_AMOUNT_OVERFLOW",
        }
    }

    /// Get the class this kind belongs to
    pub fn class(&self) -> ErrorClass {
        match self {
            ExErrorKind::InvalidInput
            | ExErrorKind::InvalidIdentity
            | ExErrorKind::InvalidAmount
            | ExErrorKind::AmountOutOfRange => ErrorClass::Input,
            ExErrorKind::EmptyLedger | ExErrorKind::DuplicateIdentity => ErrorClass::Integrity,
            ExErrorKind::LeafNotFound => ErrorClass::NotFound,
            ExErrorKind::CorruptArtifact
            | ExErrorKind::UnsupportedFormat
            | ExErrorKind::Io
            | ExErrorKind::Serialization => ErrorClass::Storage,
            ExErrorKind::AmountOverflow => ErrorClass::Arithmetic,
        }
    }

    /// Whether an error of this kind aborts the whole batch
    pub fn is_fatal(&self) -> bool {
        self.class() != ErrorClass::NotFound
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing operation
/// could attach: the operation name, the offending identity, the ledger line
/// and the request it ran under.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    identity: Option<String>,
    line: Option<usize>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            identity: None,
            line: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add identity context
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Add ledger line context (1-based)
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the identity context, if any
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Get the ledger line context, if any
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(identity) = &self.identity {
            write!(f, " (identity: {})", identity)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for commitment operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // ===== Input Errors =====
    /// Identity is not exactly 20 bytes
    #[error("Invalid identity: expected 20 bytes, got {len}")]
    InvalidIdentity { len: usize },

    /// Display-form identity could not be decoded
    #[error("Invalid identity encoding '{value}': {reason}")]
    InvalidIdentityEncoding { value: String, reason: String },

    /// Amount text is not a base-10 integer
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Amount is negative or above 2^256 - 1
    #[error("Amount out of range: {value}")]
    AmountOutOfRange { value: String },

    /// Hash text is not 32 bytes of hex
    #[error("Invalid hash '{value}': {reason}")]
    InvalidHash { value: String, reason: String },

    // ===== Integrity Errors =====
    /// Ledger has no entries
    #[error("Ledger is empty")]
    EmptyLedger,

    /// Identity occurs more than once in the ledger
    #[error("Duplicate identity {identity} ({duplicates} duplicated identities in ledger)")]
    DuplicateIdentity { identity: String, duplicates: usize },

    // ===== Lookup Errors =====
    /// Identity is not a leaf of the tree
    #[error("Leaf not found: {identity}")]
    LeafNotFound { identity: String },

    /// Leaf index is past the end of level 0
    #[error("Leaf index {index} out of range (leaf_count {leaf_count})")]
    LeafIndexOutOfRange { index: usize, leaf_count: usize },

    // ===== Structural Errors =====
    /// Tree parts disagree with each other (only reachable through `MerkleTree::from_parts`)
    #[error("Corrupt tree: {reason}")]
    CorruptTree { reason: String },

    // ===== Arithmetic Errors =====
    /// Running total left the 256-bit range
    #[error("Amount overflow while summing {context}")]
    AmountOverflow { context: String },
}

/// Conversion from LedgerError to ExError
impl From<LedgerError> for ExError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidIdentity { .. } => {
                ExError::new(ExErrorKind::InvalidIdentity).with_message(message)
            }

            LedgerError::InvalidIdentityEncoding { value, .. } => {
                ExError::new(ExErrorKind::InvalidIdentity)
                    .with_identity(value)
                    .with_message(message)
            }

            LedgerError::InvalidAmount { .. } => {
                ExError::new(ExErrorKind::InvalidAmount).with_message(message)
            }

            LedgerError::AmountOutOfRange { .. } => {
                ExError::new(ExErrorKind::AmountOutOfRange).with_message(message)
            }

            LedgerError::InvalidHash { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            LedgerError::EmptyLedger => ExError::new(ExErrorKind::EmptyLedger)
                .with_op("build_tree")
                .with_message(message),

            LedgerError::DuplicateIdentity { identity, .. } => {
                ExError::new(ExErrorKind::DuplicateIdentity)
                    .with_op("build_tree")
                    .with_identity(identity)
                    .with_message(message)
            }

            LedgerError::LeafNotFound { identity } => ExError::new(ExErrorKind::LeafNotFound)
                .with_op("generate_proof")
                .with_identity(identity)
                .with_message("Identity is not a leaf of the tree"),

            LedgerError::LeafIndexOutOfRange { .. } => ExError::new(ExErrorKind::LeafNotFound)
                .with_op("generate_proof")
                .with_message(message),

            LedgerError::CorruptTree { .. } => {
                ExError::new(ExErrorKind::CorruptArtifact).with_message(message)
            }

            LedgerError::AmountOverflow { .. } => {
                ExError::new(ExErrorKind::AmountOverflow).with_message(message)
            }
        }
    }
}
