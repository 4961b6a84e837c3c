
pub use harness::{TestContext, reg, rows};
