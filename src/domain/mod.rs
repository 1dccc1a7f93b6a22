mod classify;
mod money;
mod period;
mod records;
mod stats;
mod transaction;
mod trend;

pub use classify::*;
pub use money::*;
pub use period::*;
pub use records::*;
pub use stats::*;
pub use transaction::*;
pub use trend::*;
