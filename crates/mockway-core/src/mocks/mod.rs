//! Mock rule table and routing.
//!
//! - [`MockTable`]: ordered, immutable rule set loaded at startup
//! - [`MockRouter`]: decides per request whether a fixture answers it

pub mod router;
pub mod table;

pub use router::{MockReply, MockRequest, MockRouter, RouteOutcome};
pub use table::MockTable;
