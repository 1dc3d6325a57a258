//! Client side of the users API: an HTTP port plus the view state it keeps in
//! sync by refetching the full list after every mutation.

pub mod api;
pub mod directory;
pub mod state;

pub use api::{ClientError, HttpUsersApi, UsersApi};
pub use directory::UserDirectory;
pub use state::{FormField, Mode, Stats, UserForm, ViewState};
