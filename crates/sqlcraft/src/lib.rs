//! # sqlcraft
//!
//! Fluent, parameter-safe SQL statement builders, plus a clause-level parser
//! that turns existing SQL back into a builder.
//!
//! ## Features
//!
//! - **SQL explicit**: clauses are plain SQL text; the builders only arrange them
//! - **Positional parameters**: values are recorded beside their `?` in clause order
//! - **Composable**: nest queries and conditions; their parameters are spliced in place
//! - **Round-trip**: parse `SELECT ...` text and keep building on it
//! - **Safe misuse**: duplicate single-value clauses and wrong nesting are reported, not rendered
//!
//! ## Builders
//!
//! ```ignore
//! use sqlcraft::prelude::*;
//!
//! let stmt = select()
//!     .select_cols(&["id", "name"])
//!     .from("users")
//!     .where_with("status = ?", ["active"])
//!     .order_by("created_at DESC")
//!     .limit(10)
//!     .build()?;
//! assert_eq!(
//!     stmt.sql(),
//!     "SELECT id, name FROM users WHERE status = ? ORDER BY created_at DESC LIMIT 10"
//! );
//!
//! let stmt = insert_into("users").set("name", "alice").set("age", 30).build()?;
//! assert_eq!(stmt.sql(), "INSERT INTO users (name, age) VALUES (?, ?)");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod prelude;
pub mod row;
pub mod script;
pub mod statement;
pub mod value;

pub use builder::{
    Concat, Delete, Insert, ParamConcat, Select, SqlBuilder, Union, Update, Where, delete_from,
    insert_into, select, union, update,
};
pub use config::RenderConfig;
pub use error::{SqlError, SqlResult};
pub use normalize::{
    BytesToText, IntToBool, IntToFloat, Normalize, NormalizerChain, TextToTimestamp, TextToUuid,
    ValueKind,
};
pub use parser::{Chunk, Clause, SqlParser};
pub use row::{FromRow, Row, RowMapping};
pub use script::{load_script, split_statements};
pub use statement::{PlaceholderStyle, Statement};
pub use value::{FromValue, Value};
