//! Models shared by the integration tests.
#![allow(dead_code)]

use joinorm::{Field, Join, Model, Relation, Rows, Table, Value};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub team: Option<Team>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author: Option<User>,
    pub comments: Vec<Comment>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub reactions: Vec<Reaction>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reaction {
    pub id: i64,
    pub emoji: String,
}

macro_rules! id_model {
    ($model:ident, $table:literal) => {
        impl Model for $model {
            const TABLE_NAME: &'static str = $table;

            fn declare_id(table: &mut Table<Self>) {
                table.declare_id([Field::new("id", |obj: &mut $model, id: i64| obj.id = id)]);
            }
        }
    };
}

id_model!(User, "users");
id_model!(Team, "teams");
id_model!(Post, "posts");
id_model!(Comment, "comments");
id_model!(Tag, "tags");
id_model!(Reaction, "reactions");

pub fn users() -> Table<User> {
    let mut table = Table::new();
    User::declare_id(&mut table);
    table.select("name", |user: &mut User, name: String| user.name = name);
    table
}

pub fn teams() -> Table<Team> {
    let mut table = Table::new();
    Team::declare_id(&mut table);
    table.select("title", |team: &mut Team, title: String| team.title = title);
    table
}

pub fn posts() -> Table<Post> {
    let mut table = Table::new();
    Post::declare_id(&mut table);
    table.select("title", |post: &mut Post, title: String| post.title = title);
    table
}

pub fn comments() -> Table<Comment> {
    let mut table = Table::new();
    Comment::declare_id(&mut table);
    table.select("body", |comment: &mut Comment, body: String| comment.body = body);
    table
}

pub fn tags() -> Table<Tag> {
    let mut table = Table::new();
    Tag::declare_id(&mut table);
    table.select("label", |tag: &mut Tag, label: String| tag.label = label);
    table
}

pub fn reactions() -> Table<Reaction> {
    let mut table = Table::new();
    Reaction::declare_id(&mut table);
    table.select("emoji", |reaction: &mut Reaction, emoji: String| {
        reaction.emoji = emoji
    });
    table
}

pub fn comment_list() -> Relation<Post, Comment> {
    Relation::many(|post: &mut Post, comments: Vec<Comment>| post.comments = comments)
}

pub fn tag_list() -> Relation<Post, Tag> {
    Relation::many(|post: &mut Post, tags: Vec<Tag>| post.tags = tags)
}

/// Columns: `posts.id, posts.title, comments.id, comments.body`
pub fn posts_with_comments() -> Table<Post> {
    let mut table = posts();
    table
        .select_nested(comments(), comment_list())
        .join("comments", Join::on_id(["post_id"]).left());
    table
}

/// Columns: `posts.id, posts.title, comments.id, comments.body, tags.id,
/// tags.label`
pub fn posts_with_comments_and_tags() -> Table<Post> {
    let mut table = posts_with_comments();
    table
        .select_nested(tags(), tag_list())
        .join("tags", Join::on_id(["post_id"]).left());
    table
}

/// Columns: `posts.id, posts.title, author.id, author.name, teams.id,
/// teams.title`
pub fn posts_with_author_and_team() -> Table<Post> {
    let mut author = users();
    author
        .alias("author")
        .select_nested(
            teams(),
            Relation::one(|user: &mut User, team: Option<Team>| user.team = team),
        )
        .join("teams", Join::on_ref(["team_id"]).left());

    let mut table = posts();
    table
        .select_nested(
            author,
            Relation::one(|post: &mut Post, author: Option<User>| post.author = author),
        )
        .join("author", Join::on_ref(["author_id"]).left());
    table
}

/// Columns: `posts.id, posts.title, comments.id, comments.body,
/// reactions.id, reactions.emoji`
pub fn posts_with_comment_reactions() -> Table<Post> {
    let mut comments = comments();
    comments
        .select_nested(
            reactions(),
            Relation::many(|comment: &mut Comment, reactions: Vec<Reaction>| {
                comment.reactions = reactions
            }),
        )
        .join("reactions", Join::on_id(["comment_id"]).left());

    let mut table = posts();
    table
        .select_nested(comments, comment_list())
        .join("comments", Join::on_id(["post_id"]).left());
    table
}

pub fn rows(rows: Vec<Vec<Value>>) -> Rows {
    Rows::new(rows)
}

pub fn v(value: impl Into<Value>) -> Value {
    value.into()
}

pub const NULL: Value = Value::Null;

pub fn post(id: i64, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        ..Post::default()
    }
}

pub fn comment(id: i64, body: &str) -> Comment {
    Comment {
        id,
        body: body.to_string(),
        ..Comment::default()
    }
}

pub fn tag(id: i64, label: &str) -> Tag {
    Tag {
        id,
        label: label.to_string(),
    }
}

pub fn reaction(id: i64, emoji: &str) -> Reaction {
    Reaction {
        id,
        emoji: emoji.to_string(),
    }
}
