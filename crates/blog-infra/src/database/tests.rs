use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use blog_core::domain::{Post, PostStatus};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository};

use super::entity::post;
use super::{SqlCommentRepository, SqlPostRepository};

fn post_model(id: Uuid, author_id: Uuid) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        slug: "test-post".to_owned(),
        content: "Content".to_owned(),
        featured_image: None,
        excerpt: String::new(),
        author_id,
        created_date: now.into(),
        updated_date: now.into(),
        status: post::Status::Draft,
    }
}

#[tokio::test]
async fn finds_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, author_id)]])
        .into_connection();

    let repo = SqlPostRepository::new(db);
    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.featured_image, None);
}

#[tokio::test]
async fn delete_of_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = SqlPostRepository::new(db);
    let err = repo.delete(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn approve_issues_a_single_update() {
    let ids = [Uuid::new_v4(), Uuid::new_v4()];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

    let repo = SqlCommentRepository::new(db);
    assert_eq!(repo.approve(&ids).await.unwrap(), 2);

    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let statement = format!("{:?}", log[0]);
    assert!(statement.contains(r#"UPDATE "comments" SET "is_approved""#), "{statement}");
}

#[tokio::test]
async fn empty_selection_touches_nothing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = SqlCommentRepository::new(db);

    assert_eq!(repo.approve(&[]).await.unwrap(), 0);
    assert_eq!(repo.delete_many(&[]).await.unwrap(), 0);
    assert!(repo.db.into_transaction_log().is_empty());
}
