//! Ids for rows created inside the grid.

use rand::Rng;

use crate::pattern::{random_token, SHORT_UUID_LEN};

pub const NEW_ROW_PREFIX: &str = "new";

/// Hands out `new-<session>-<n>` ids; `<session>` is drawn once per grid.
#[derive(Debug, Clone)]
pub struct RowIdGenerator {
    session: String,
    next: u64,
}

impl RowIdGenerator {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            session: random_token(rng, SHORT_UUID_LEN),
            next: 1,
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{NEW_ROW_PREFIX}-{}-{}", self.session, self.next);
        self.next += 1;
        id
    }
}

/// Whether `id` was produced by a [`RowIdGenerator`].
pub fn is_unsaved_id(id: &str) -> bool {
    id.starts_with(NEW_ROW_PREFIX) && id[NEW_ROW_PREFIX.len()..].starts_with('-')
}
