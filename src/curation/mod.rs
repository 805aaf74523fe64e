pub mod diff;
pub mod objects;
pub mod predefined;
pub mod session;

pub use diff::{diff, LabelDiff};
pub use objects::{ObjectCuration, ObjectRow};
pub use session::{AddOutcome, LabelCuration};
