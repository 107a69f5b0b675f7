//! Report assembly: placeholder map, template substitution, default layout.
//!
//! We keep all report/formatting code in one place so:
//! - the comparison core stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod builder;
pub mod format;
pub mod placeholders;
pub mod template;

pub use builder::*;
pub use format::*;
pub use placeholders::*;
pub use template::*;
