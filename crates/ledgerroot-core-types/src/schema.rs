//! Canonical schema constants for structured logging and events
//!
//! `tracing` only accepts literal field names, so the boundary macros and
//! engine commands spell these keys out; the test capture layer and the
//! logging tests read events back through these constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Commitment identifiers
pub const FIELD_ROOT: &str = "root";
pub const FIELD_IDENTITY: &str = "identity";

// Collection sizes
pub const FIELD_LEAF_COUNT: &str = "leaf_count";
pub const FIELD_DEPTH: &str = "depth";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
