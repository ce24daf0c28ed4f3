//! Convenient imports for typical `sqlcraft` usage.
//!
//! ```ignore
//! use sqlcraft::prelude::*;
//! ```

pub use crate::{
    Delete, FromRow, Insert, Row, RowMapping, Select, SqlBuilder, SqlError, SqlParser, SqlResult,
    Statement, Union, Update, Value, Where, delete_from, insert_into, params, select, union,
    update,
};
