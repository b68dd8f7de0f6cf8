mod clock;
mod model;
mod store;

pub use clock::{Clock, IdGenerator, ManualClock, SequentialIds, SystemClock, UuidGenerator};
pub use model::{validate_timestamp, ActiveFast, ActiveFastUpdate, AppState, Fast, FastUpdate};
pub use store::SessionStore;
