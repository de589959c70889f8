pub mod pad;
pub mod messages;
pub mod pad_info;
pub mod pad_history;
pub mod stats;
pub mod health;
pub mod ready;
pub mod diagnostics;
pub mod error;

pub use pad::*;
pub use messages::*;
pub use pad_info::*;
pub use pad_history::*;
pub use stats::*;
pub use health::*;
pub use ready::*;
pub use diagnostics::*;
pub use error::*;
