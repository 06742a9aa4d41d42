mod assemble;
pub use assemble::{assemble_deletes, assemble_writes};

pub mod db;
pub use db::Db;

mod materialize;

mod model;
pub use model::Model;

mod node;

mod query;
pub use query::build_query;

pub mod session;
pub use session::{materialize, Session};

pub mod table;
pub use table::{Field, Join, JoinSite, Relation, Table};

pub use joinorm_core::{
    driver::{Cursor, Executor, Rows},
    stmt::{CompositeKey, DeleteRecord, Kind, Primitive, Query, Value, Where, WriteRecord},
    Error, Result,
};

#[cfg(feature = "sqlite")]
pub use joinorm_driver_sqlite as sqlite;
