pub mod health;
pub mod pad;
pub mod pad_history;
pub mod stats;
pub mod diagnostics;

pub use health::*;
pub use pad::*;
pub use pad_history::*;
pub use stats::*;
pub use diagnostics::*;
