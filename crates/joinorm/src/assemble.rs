mod delete;
pub use delete::assemble_deletes;

mod write;
pub use write::assemble_writes;
