//! Fluent statement builders.
//!
//! ## Design
//!
//! - Every clause is a [`Concat`] configured with its SQL keyword as prefix,
//!   so empty clauses render nothing and never leave stray separators.
//! - Parameters are recorded per clause in call order and concatenated in
//!   clause order, so `?` placeholders and values always line up.
//! - Misuse (a second value for a write-once clause, a nested query with the
//!   wrong number of slots) is recorded when it happens and reported by
//!   [`SqlBuilder::build`], keeping the chain itself infallible.
//! - Builders are `Clone`; a clone is fully independent of its source.

pub mod concat;
pub mod delete;
pub mod insert;
pub mod select;
pub mod traits;
pub mod union;
pub mod update;
pub mod where_builder;

pub use concat::{Concat, ParamConcat};
pub use delete::Delete;
pub use insert::Insert;
pub use select::Select;
pub use traits::SqlBuilder;
pub use union::Union;
pub use update::Update;
pub use where_builder::Where;

/// Start a SELECT builder.
pub fn select() -> Select {
    Select::new()
}

/// Start a UNION builder.
pub fn union() -> Union {
    Union::new()
}

/// Start an INSERT builder for `table`.
pub fn insert_into(table: &str) -> Insert {
    Insert::new().into(table)
}

/// Start an UPDATE builder for `table`.
pub fn update(table: &str) -> Update {
    Update::new().table(table)
}

/// Start a DELETE builder for `table`.
pub fn delete_from(table: &str) -> Delete {
    Delete::new().from(table)
}
