//! End-to-end requests against a migrated in-memory SQLite database.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use uuid::Uuid;

use blog_core::domain::{Comment, Post, PostStatus, User};
use blog_core::ports::{BaseRepository, PasswordService, TokenService};
use blog_infra::{Argon2PasswordService, DatabaseConnections, JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::state::AppState;

struct Fixture {
    state: AppState,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
    staff: User,
}

impl Fixture {
    async fn new() -> Self {
        let options = ConnectOptions::new("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false)
            .to_owned();
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let state = AppState::new(DatabaseConnections { main: db }, "http://testserver");
        let staff = state
            .users
            .create(User::new("editor".into(), "editor@example.com".into(), "-".into()).staff())
            .await
            .unwrap();

        Self {
            state,
            tokens: Arc::new(JwtTokenService::new(JwtConfig::default())),
            passwords: Arc::new(Argon2PasswordService::new()),
            staff,
        }
    }

    fn token_for(&self, user: &User) -> String {
        let token = self
            .tokens
            .generate_token(user.id, &user.username, user.roles())
            .unwrap();
        format!("Bearer {token}")
    }

    fn staff_token(&self) -> String {
        self.token_for(&self.staff)
    }

    async fn post(&self, title: &str, slug: &str, status: PostStatus) -> Post {
        self.state
            .posts
            .create(
                Post::new(self.staff.id, title.into(), slug.into(), "Body".into())
                    .with_status(status),
            )
            .await
            .unwrap()
    }

    async fn comment(&self, post: &Post, content: &str) -> Comment {
        self.state
            .comments
            .create(Comment::new(post.id, self.staff.id, content.into()))
            .await
            .unwrap()
    }
}

macro_rules! app {
    ($fx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($fx.state.clone()))
                .app_data(web::Data::new($fx.tokens.clone()))
                .app_data(web::Data::new($fx.passwords.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn admin_requires_a_staff_token() {
    let fx = Fixture::new().await;
    let reader = fx
        .state
        .users
        .create(User::new("reader".into(), "reader@example.com".into(), "-".into()))
        .await
        .unwrap();
    let app = app!(fx);

    let req = test::TestRequest::get().uri("/admin/api/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/admin/api/")
        .insert_header((header::AUTHORIZATION, fx.token_for(&reader)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/admin/api/")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let models: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(models, vec!["post", "comment"]);
}

#[actix_web::test]
async fn adding_a_post_derives_its_slug_and_saves_inline_comments() {
    let fx = Fixture::new().await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({
            "title": "Hello World",
            "content": "Body",
            "author": fx.staff.id,
            "comments": [{ "author": fx.staff.id, "content": "First!" }],
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;

    assert_eq!(body["data"]["view_on_site"], "http://testserver/blog/hello-world/");
    let inline = &body["data"]["inlines"][0];
    assert_eq!(inline["rows"].as_array().unwrap().len(), 1);

    let stored = fx.state.posts.find_by_slug("hello-world").await.unwrap().unwrap();
    assert_eq!(stored.status, PostStatus::Draft);
    let comments = fx.state.comments.find_by_post(stored.id).await.unwrap();
    assert_eq!(comments[0].content, "First!");
    assert!(!comments[0].is_approved);
}

#[actix_web::test]
async fn rejected_posts_report_field_errors() {
    let fx = Fixture::new().await;
    fx.post("Taken", "taken", PostStatus::Draft).await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({
            "title": "",
            "content": "Body",
            "author": fx.staff.id,
            "status": "archived",
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert!(body["errors"]["status"].is_array());
    assert!(body["errors"]["title"].is_array());

    let req = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({
            "title": "Taken",
            "content": "Body",
            "author": fx.staff.id,
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/admin/api/posts")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({
            "title": "Orphan",
            "content": "Body",
            "author": Uuid::new_v4(),
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[actix_web::test]
async fn inline_rows_cannot_touch_other_posts_comments() {
    let fx = Fixture::new().await;
    let mine = fx.post("Mine", "mine", PostStatus::Draft).await;
    let other = fx.post("Other", "other", PostStatus::Draft).await;
    let foreign = fx.comment(&other, "Not yours").await;
    let app = app!(fx);

    let req = test::TestRequest::put()
        .uri(&format!("/admin/api/posts/{}", mine.id))
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({
            "title": "Mine",
            "slug": "mine",
            "content": "Body",
            "author": fx.staff.id,
            "comments": [{ "id": foreign.id, "author": fx.staff.id, "delete": true }],
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert!(fx.state.comments.find_by_id(foreign.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn inline_delete_rows_need_only_an_id() {
    let fx = Fixture::new().await;
    let post = fx.post("Hello", "hello", PostStatus::Draft).await;
    let kept = fx.comment(&post, "Keep").await;
    let dropped = fx.comment(&post, "Drop").await;
    let app = app!(fx);

    let req = test::TestRequest::put()
        .uri(&format!("/admin/api/posts/{}", post.id))
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({
            "title": "Hello",
            "slug": "hello",
            "content": "Body",
            "author": fx.staff.id,
            "comments": [{ "id": dropped.id, "delete": true }],
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert!(fx.state.comments.find_by_id(dropped.id).await.unwrap().is_none());
    assert!(fx.state.comments.find_by_id(kept.id).await.unwrap().is_some());

    let req = test::TestRequest::put()
        .uri(&format!("/admin/api/posts/{}", post.id))
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({
            "title": "Hello",
            "slug": "hello",
            "content": "Body",
            "author": fx.staff.id,
            "comments": [{ "content": "Who wrote this?" }],
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert!(body["errors"]["comments"].is_array());
    assert_eq!(fx.state.comments.find_by_post(post.id).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn comment_form_names_author_and_post() {
    let fx = Fixture::new().await;
    let post = fx.post("Hello", "hello", PostStatus::Published).await;
    let comment = fx.comment(&post, "Nice").await;
    let app = app!(fx);

    let req = test::TestRequest::get()
        .uri(&format!("/admin/api/comments/{}", comment.id))
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["display"], "Comment by editor on Hello");
}

#[actix_web::test]
async fn changelist_filters_and_rejects_unknown_parameters() {
    let fx = Fixture::new().await;
    fx.post("Live", "live", PostStatus::Published).await;
    fx.post("Hidden", "hidden", PostStatus::Draft).await;
    let app = app!(fx);

    let req = test::TestRequest::get()
        .uri("/admin/api/posts?status=published")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["rows"][0]["display"], "Live");
    assert!(body["data"]["date_hierarchy"].is_object());

    let req = test::TestRequest::get()
        .uri("/admin/api/posts?status=published&status=draft")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["rows"][0]["display"], "Hidden");

    let req = test::TestRequest::get()
        .uri("/admin/api/posts?category=news")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn approve_action_moderates_selected_comments() {
    let fx = Fixture::new().await;
    let post = fx.post("Hello", "hello", PostStatus::Published).await;
    let first = fx.comment(&post, "One").await;
    let second = fx.comment(&post, "Two").await;
    let untouched = fx.comment(&post, "Three").await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri("/admin/api/comments/actions")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({ "action": "approve_comments", "selected": [first.id, second.id] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["affected"], 2);
    assert_eq!(body["message"], "Successfully approved 2 comments.");

    for (id, approved) in [(first.id, true), (second.id, true), (untouched.id, false)] {
        let stored = fx.state.comments.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.is_approved, approved);
    }

    let req = test::TestRequest::post()
        .uri("/admin/api/comments/actions")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({ "action": "approve_comments", "selected": [] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/admin/api/posts/actions")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .set_json(json!({ "action": "approve_comments", "selected": [post.id] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deleting_a_post_removes_its_comments() {
    let fx = Fixture::new().await;
    let post = fx.post("Hello", "hello", PostStatus::Draft).await;
    let comment = fx.comment(&post, "One").await;
    let app = app!(fx);

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/api/posts/{}", post.id))
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    assert!(fx.state.comments.find_by_id(comment.id).await.unwrap().is_none());

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/api/posts/{}", post.id))
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn only_published_posts_are_public() {
    let fx = Fixture::new().await;
    fx.post("Live", "live", PostStatus::Published).await;
    fx.post("Hidden", "hidden", PostStatus::Draft).await;
    let app = app!(fx);

    let req = test::TestRequest::get().uri("/blog/live/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["url"], "http://testserver/blog/live/");
    assert_eq!(body["author"], "editor");

    let req = test::TestRequest::get().uri("/blog/hidden/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn login_issues_tokens_for_valid_credentials() {
    let fx = Fixture::new().await;
    let hash = fx.passwords.hash("s3cret-pass").unwrap();
    fx.state
        .users
        .create(User::new("ada".into(), "ada@example.com".into(), hash).staff())
        .await
        .unwrap();
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "ada", "password": "s3cret-pass" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["username"], "ada");
    assert_eq!(body["is_staff"], true);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "ada", "password": "wrong" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn malformed_bodies_are_bad_requests() {
    let fx = Fixture::new().await;
    let app = app!(fx);

    let req = test::TestRequest::post()
        .uri("/admin/api/comments")
        .insert_header((header::AUTHORIZATION, fx.staff_token()))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 400);
}
