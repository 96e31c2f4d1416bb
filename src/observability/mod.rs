//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (routing outcomes, auth decisions, server lifecycle)
//!     → tower-http TraceLayer spans (one per request, keyed by x-request-id)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, plain or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through the context into every log line that needs it
//! - Credentials never reach a log event

pub mod logging;

pub use logging::init;
