use axum::{http::StatusCode, Router};
use pretty_assertions::assert_eq;
use quickcrud::{stmt::Record, CrudRouter};
use serde_json::json;
use tests::{models, setup, Client};

async fn client() -> Client {
    let db = setup([models::parent(), models::child()]).await;

    let parent = db.model("parent").unwrap().clone();
    let child = db.model("child").unwrap().clone();

    let parents: Vec<Record> = (1..=2).map(|id| [("id", id)].into_iter().collect()).collect();
    db.create(&parent, parents, None).await.unwrap();

    let children: Vec<Record> = [(1, 1), (2, 1), (3, 2), (4, 2)]
        .into_iter()
        .map(|(id, parent_id)| [("id", id), ("parent_id", parent_id)].into_iter().collect())
        .collect();
    db.create(&child, children, None).await.unwrap();

    let app = Router::new()
        .merge(CrudRouter::builder(db.clone(), "parent").build().unwrap())
        .merge(CrudRouter::builder(db, "child").build().unwrap());

    Client::new(app)
}

#[tokio::test]
async fn find_many_with_join() {
    let client = client().await;

    let response = client.get("/parent?join_foreign_table=child").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!([
            {"id": 1, "id_foreign": [{"id": 1, "parent_id": 1}, {"id": 2, "parent_id": 1}]},
            {"id": 2, "id_foreign": [{"id": 3, "parent_id": 2}, {"id": 4, "parent_id": 2}]},
        ])
    );
}

#[tokio::test]
async fn find_many_without_join() {
    let client = client().await;

    let response = client.get("/parent").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([{"id": 1}, {"id": 2}]));
}

#[tokio::test]
async fn find_one_with_join() {
    let client = client().await;

    let response = client.get("/parent/2?join_foreign_table=child").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"id": 2, "id_foreign": [{"id": 3, "parent_id": 2}, {"id": 4, "parent_id": 2}]})
    );
}

#[tokio::test]
async fn children_filter_by_parent() {
    let client = client().await;

    let response = client.get("/child?parent_id____list=2").await;
    assert_eq!(
        response.body,
        json!([{"id": 3, "parent_id": 2}, {"id": 4, "parent_id": 2}])
    );
}
