mod ticker;

pub use ticker::{ElapsedDisplay, ElapsedTicker};
