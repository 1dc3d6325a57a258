use tracing::instrument;

use super::{
    api::UsersApi,
    state::{FormField, Mode, ViewState},
};

pub const CREATED: &str = "user created successfully";
pub const UPDATED: &str = "user updated successfully";
pub const DELETED: &str = "user deleted successfully";

/// Owns the view state and is the only thing that changes it.
pub struct UserDirectory<A> {
    api: A,
    state: ViewState,
}

impl<A: UsersApi> UserDirectory<A> {
    /// Builds the directory and performs the initial load.
    pub async fn mount(api: A) -> Self {
        let mut directory = Self {
            api,
            state: ViewState::default(),
        };
        directory.load().await;
        directory
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Refetches the list. On failure the previous rows stay visible.
    #[instrument(name = "Directory: load", skip(self))]
    pub async fn load(&mut self) {
        self.state.loading = true;
        match self.api.list().await {
            Ok(users) => {
                self.state.users = users;
                self.state.error = None;
            }
            Err(e) => {
                tracing::warn!("Loading users failed: {}", e.detail());
                self.state.error = Some(format!("failed to load users: {}", e.detail()));
            }
        }
        self.state.loading = false;
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.state.set_field(field, value.into());
    }

    /// Creates or updates depending on the mode. A failure keeps the draft and
    /// the mode untouched.
    #[instrument(name = "Directory: submit", skip(self), fields(mode = ?self.state.mode))]
    pub async fn submit(&mut self) {
        self.state.clear_notices();
        let outcome = match self.state.mode {
            Mode::Edit(id) => self
                .api
                .update(id, &self.state.form)
                .await
                .map(|_| UPDATED),
            Mode::Create => self.api.create(&self.state.form).await.map(|_| CREATED),
        };
        match outcome {
            Ok(message) => {
                self.state.success = Some(message.to_string());
                self.state.reset_form();
                self.load().await;
            }
            Err(e) => {
                self.state.error = Some(
                    e.server_message()
                        .unwrap_or("failed to save user")
                        .to_string(),
                );
            }
        }
    }

    /// Switches the form to edit the listed user with `id`. Returns `false`
    /// when that user is not in the current list.
    pub fn edit(&mut self, id: i32) -> bool {
        let Some(user) = self.state.users.iter().find(|u| u.id == id).cloned() else {
            return false;
        };
        self.state.begin_edit(&user);
        true
    }

    /// Deletes after `confirm` agrees. Returns whether a request was sent.
    #[instrument(name = "Directory: delete", skip(self, confirm))]
    pub async fn delete(&mut self, id: i32, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        self.state.clear_notices();
        match self.api.delete(id).await {
            Ok(_) => {
                self.state.success = Some(DELETED.to_string());
                self.load().await;
            }
            Err(e) => {
                self.state.error = Some(format!("failed to delete user: {}", e.detail()));
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.state.reset_form();
    }
}
