pub mod loader;
pub mod schema;
pub mod validate;

pub use loader::{load_technique_file, load_techniques_dir, LoadOutcome};
pub use validate::{Issue, IssueKind};
