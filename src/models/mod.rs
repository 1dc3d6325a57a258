pub mod envelope;
pub mod user;

pub use envelope::Envelope;
pub use user::{DEFAULT_ROLE, NewUser, User, UserChanges};
