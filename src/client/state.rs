use std::fmt;

use serde::Serialize;

use crate::models::{DEFAULT_ROLE, User};

/// Which request the form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Create,
    Edit(i32),
}

/// Draft record behind the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Role,
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "role" => Ok(Self::Role),
            other => Err(format!("unknown field `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub admins: usize,
    pub users: usize,
}

/// Everything the UI shows. `users` is the last successful list and is kept
/// when a later load fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub form: UserForm,
    pub mode: Mode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            loading: true,
            error: None,
            success: None,
            form: UserForm::default(),
            mode: Mode::Create,
        }
    }
}

impl ViewState {
    /// Always derived from `users`, never cached.
    pub fn stats(&self) -> Stats {
        Stats {
            total: self.users.len(),
            admins: self.users.iter().filter(|u| u.is_admin()).count(),
            users: self
                .users
                .iter()
                .filter(|u| u.role == DEFAULT_ROLE)
                .count(),
        }
    }

    pub fn editing_id(&self) -> Option<i32> {
        match self.mode {
            Mode::Create => None,
            Mode::Edit(id) => Some(id),
        }
    }

    pub(crate) fn begin_edit(&mut self, user: &User) {
        self.form = UserForm::from(user);
        self.mode = Mode::Edit(user.id);
    }

    pub(crate) fn reset_form(&mut self) {
        self.form = UserForm::default();
        self.mode = Mode::Create;
    }

    pub(crate) fn clear_notices(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub(crate) fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.form.name = value,
            FormField::Email => self.form.email = value,
            FormField::Role => self.form.role = value,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        writeln!(
            f,
            "users: {}  admins: {}  regular: {}",
            stats.total, stats.admins, stats.users
        )?;
        if let Some(error) = &self.error {
            writeln!(f, "error: {}", error)?;
        }
        if let Some(success) = &self.success {
            writeln!(f, "ok: {}", success)?;
        }
        match self.mode {
            Mode::Create => writeln!(f, "[new user]")?,
            Mode::Edit(id) => writeln!(f, "[editing #{}]", id)?,
        }
        writeln!(
            f,
            "  name={:?} email={:?} role={:?}",
            self.form.name, self.form.email, self.form.role
        )?;
        if self.loading {
            return writeln!(f, "loading...");
        }
        if self.users.is_empty() {
            return writeln!(f, "no users yet");
        }
        for user in &self.users {
            writeln!(
                f,
                "  #{:<4} {:<24} {:<32} {}",
                user.id, user.name, user.email, user.role
            )?;
        }
        Ok(())
    }
}
