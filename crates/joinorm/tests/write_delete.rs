mod models;
use models::*;

use joinorm::{
    assemble_deletes, assemble_writes, Db, DeleteRecord, Error, Executor, Field, Kind, Model,
    Query, Result, Rows, Table, Value, WriteRecord,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Default, Clone, PartialEq)]
struct Pair {
    a: i64,
    b: i64,
}

impl Model for Pair {
    const TABLE_NAME: &'static str = "pairs";

    fn declare_id(table: &mut Table<Self>) {
        table.declare_id([
            Field::new("a", |pair: &mut Pair, a: i64| pair.a = a),
            Field::new("b", |pair: &mut Pair, b: i64| pair.b = b),
        ]);
    }
}

fn pairs() -> Table<Pair> {
    let mut table = Table::new();
    Pair::declare_id(&mut table);
    table
}

/// Posts written with their author first.
fn writable_posts() -> Table<Post> {
    let mut authors = users();
    authors
        .bind_write("id", |user: &User| user.id)
        .bind_write("name", |user: &User| user.name.clone());

    let mut table = posts();
    table
        .bind_write("id", |post: &Post| post.id)
        .bind_write("title", |post: &Post| post.title.clone())
        .bind_write_nested(
            authors,
            "author_id",
            |user: &User| Value::from(user.id),
            |post: &Post| post.author.as_ref(),
        );
    table
}

fn ann() -> User {
    User {
        id: 5,
        name: "ann".into(),
        team: None,
    }
}

#[test]
fn composite_delete_ids_bind_in_order() {
    let mut table = pairs();
    table.alias("p");
    table.register_delete_id([1, 2]).register_delete_id([3, 4]);

    let records = assemble_deletes(&table).unwrap();

    assert_eq!(
        vec![
            DeleteRecord {
                table: "pairs".into(),
                filter: "a = ? AND b = ?".into(),
                args: vec![Value::I64(1), Value::I64(2)],
            },
            DeleteRecord {
                table: "pairs".into(),
                filter: "a = ? AND b = ?".into(),
                args: vec![Value::I64(3), Value::I64(4)],
            },
        ],
        records
    );
}

#[test]
fn delete_id_arity_must_match() {
    let mut table = pairs();
    table.register_delete_id([1]);

    let err = assemble_deletes(&table).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn deletes_walk_nested_children_in_preorder() {
    let mut removed = comments();
    removed.register_delete_id([10]);

    let mut table = posts();
    table
        .register_delete_id([1])
        .select_nested(removed, comment_list());

    let records = assemble_deletes(&table).unwrap();
    let tables: Vec<_> = records.iter().map(|record| record.table.as_str()).collect();
    assert_eq!(vec!["posts", "comments"], tables);
    assert_eq!("id = ?", records[1].filter);
}

#[test]
fn nested_child_is_written_before_its_parent() {
    let mut table = writable_posts();
    table.write(Post {
        author: Some(ann()),
        ..post(1, "hello")
    });

    let records = assemble_writes(&table).unwrap();

    let mut user = WriteRecord::new("users");
    user.set("id", 5);
    user.set("name", "ann");

    let mut parent = WriteRecord::new("posts");
    parent.set("id", 1);
    parent.set("title", "hello");
    parent.set("author_id", 5);

    assert_eq!(vec![user, parent], records);
}

#[test]
fn missing_nested_child_writes_null() {
    let mut table = writable_posts();
    table.write(post(1, "hello")).write(post(2, "again"));

    let records = assemble_writes(&table).unwrap();

    assert_eq!(2, records.len());
    assert_eq!(Some(&Value::Null), records[0].get("author_id"));
    assert_eq!(Some(&Value::I64(2)), records[1].get("id"));
}

#[test]
fn null_binding_ignores_the_attribute() {
    let mut table = posts();
    table
        .bind_write("id", |post: &Post| post.id)
        .bind_write_null("title");
    table.write(post(1, "hidden"));

    let records = assemble_writes(&table).unwrap();
    assert_eq!(Some(&Value::Null), records[0].get("title"));
}

#[test]
fn accessor_of_the_wrong_kind_is_an_access_error() {
    let mut table = posts();
    table.bind_write_primitive(Kind::Int, "title", |post: &Post| Value::from(post.title.clone()));
    table.write(post(1, "hello"));

    let err = assemble_writes(&table).unwrap_err();
    assert!(err.is_access());
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<String>,
    fail_on: Option<&'static str>,
}

impl Executor for Recorder {
    type Cursor = Rows;

    fn query(&mut self, _query: &Query) -> Result<Rows> {
        Ok(Rows::default())
    }

    fn insert(&mut self, record: &WriteRecord) -> Result<u64> {
        self.calls.push(format!("insert {}", record.table));
        if self.fail_on == Some(record.table.as_str()) {
            return Err(Error::driver_operation_failed(std::io::Error::other(
                "disk full",
            )));
        }
        Ok(1)
    }

    fn delete(&mut self, record: &DeleteRecord) -> Result<u64> {
        self.calls.push(format!("delete {}", record.table));
        Ok(1)
    }

    fn begin_transaction(&mut self) -> Result<()> {
        self.calls.push("begin".into());
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.calls.push("commit".into());
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.calls.push("rollback".into());
        Ok(())
    }
}

#[test]
fn batch_commits_and_clears_staged_objects() {
    let mut db = Db::new(Recorder::default());
    let mut table = writable_posts();
    table.write(Post {
        author: Some(ann()),
        ..post(1, "hello")
    });

    assert_eq!(2, db.write_all(&mut table).unwrap());
    assert!(table.pending().is_empty());
    assert_eq!(
        vec!["begin", "insert users", "insert posts", "commit"],
        db.executor().calls
    );
}

#[test]
fn failed_batch_rolls_back_and_keeps_staged_objects() {
    let mut db = Db::new(Recorder {
        fail_on: Some("posts"),
        ..Recorder::default()
    });
    let mut table = writable_posts();
    table.write(Post {
        author: Some(ann()),
        ..post(1, "hello")
    });

    let err = db.write_all(&mut table).unwrap_err();
    assert!(err.is_transaction());
    assert_eq!(
        "transaction failed and was rolled back: disk full",
        err.to_string()
    );
    assert_eq!(1, table.pending().len());
    assert_eq!(
        vec!["begin", "insert users", "insert posts", "rollback"],
        db.executor().calls
    );
}

#[test]
fn empty_batch_opens_no_transaction() {
    let mut db = Db::new(Recorder::default());
    let mut table = pairs();

    assert_eq!(0, db.delete_all(&mut table).unwrap());
    assert!(db.executor().calls.is_empty());
}

#[test]
fn delete_batch_clears_ids() {
    let mut db = Db::new(Recorder::default());
    let mut table = pairs();
    table.register_delete_id([1, 2]);

    assert_eq!(1, db.delete_all(&mut table).unwrap());
    assert!(table.delete_ids().is_empty());
    assert_eq!(
        vec!["begin", "delete pairs", "commit"],
        db.executor().calls
    );
}
