//! # Database State
//!
//! Wraps the `Database` handle for commands. The pool inside is shared, so
//! commands run concurrently without an outer lock.

use dukkan_db::Database;

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// ## Usage
    /// ```rust,ignore
    /// let products = db_state.inner().products().search("شاحن").await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
