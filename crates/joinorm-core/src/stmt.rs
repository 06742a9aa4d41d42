mod filter;
pub use filter::{Combinator, Operand, Operator, Where};

mod key;
pub use key::CompositeKey;

mod kind;
pub use kind::Kind;

mod primitive;
pub use primitive::Primitive;

mod query;
pub use query::Query;

mod record;
pub use record::{ColumnMap, DeleteRecord, WriteRecord};

mod value;
pub use value::Value;

mod value_cmp;
