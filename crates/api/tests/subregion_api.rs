//! HTTP-level integration tests for subregion annotation endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json};
use sqlx::PgPool;

use lungmap_db::repositories::AnatomyRepo;

/// Seed an experiment, image set, image, and anatomy term; return
/// (image_id, anatomy_id).
async fn seed_annotation_targets(pool: &PgPool) -> (i64, i64) {
    let experiment = common::create_experiment(pool, "LMEX0000000001").await;
    let set = common::create_image_set(pool, "LMEX0000000001_20X").await;
    let image =
        common::create_image(pool, set.id, experiment.id, "a.tif", "EXP01/a/a.tif").await;
    let anatomy = AnatomyRepo::get_or_create(pool, "bronchiole").await.unwrap();
    (image.id, anatomy.id)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_subregion_returns_201_with_ordered_points(pool: PgPool) {
    let (image_id, anatomy_id) = seed_annotation_targets(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/subregions",
        serde_json::json!({
            "image_id": image_id,
            "anatomy_id": anatomy_id,
            "points": [
                {"x": 10, "y": 10},
                {"x": 50, "y": 10},
                {"x": 50, "y": 40},
                {"x": 10, "y": 40},
            ],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["image_id"], image_id);
    assert_eq!(json["anatomy_name"], "bronchiole");

    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 4);
    // Order comes from list position in the request.
    for (order, point) in points.iter().enumerate() {
        assert_eq!(point["point_order"], order as i64);
    }
    assert_eq!(points[2]["x"], 50);
    assert_eq!(points[2]["y"], 40);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_subregion_without_points_returns_400(pool: PgPool) {
    let (image_id, anatomy_id) = seed_annotation_targets(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/subregions",
        serde_json::json!({
            "image_id": image_id,
            "anatomy_id": anatomy_id,
            "points": [],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_subregion_on_missing_image_returns_404(pool: PgPool) {
    let (_image_id, anatomy_id) = seed_annotation_targets(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/subregions",
        serde_json::json!({
            "image_id": 999999,
            "anatomy_id": anatomy_id,
            "points": [{"x": 0, "y": 0}],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_subregions_filters_by_image(pool: PgPool) {
    let (image_id, anatomy_id) = seed_annotation_targets(&pool).await;

    let body = serde_json::json!({
        "image_id": image_id,
        "anatomy_id": anatomy_id,
        "points": [{"x": 0, "y": 0}, {"x": 4, "y": 0}, {"x": 4, "y": 4}],
    });
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/subregions", body.clone()).await;
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/subregions", body).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/subregions?image={image_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    // A different image id matches nothing.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/subregions?image=999999").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_subregion_cascades_and_404s_afterwards(pool: PgPool) {
    let (image_id, anatomy_id) = seed_annotation_targets(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/subregions",
        serde_json::json!({
            "image_id": image_id,
            "anatomy_id": anatomy_id,
            "points": [{"x": 1, "y": 1}, {"x": 5, "y": 1}, {"x": 5, "y": 5}],
        }),
    )
    .await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/subregions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/subregions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The cascade removed the points too.
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM points")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subregion_counts_group_by_image_set(pool: PgPool) {
    let (image_id, anatomy_id) = seed_annotation_targets(&pool).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/subregions",
        serde_json::json!({
            "image_id": image_id,
            "anatomy_id": anatomy_id,
            "points": [{"x": 0, "y": 0}, {"x": 2, "y": 0}, {"x": 2, "y": 2}],
        }),
    )
    .await;

    // A second, unannotated set appears with a zero count.
    common::create_image_set(&pool, "LMEX0000000002_40X").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/subregions/counts").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let counts = json["data"].as_array().unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0]["image_set_name"], "LMEX0000000001_20X");
    assert_eq!(counts[0]["subregion_count"], 1);
    assert_eq!(counts[1]["image_set_name"], "LMEX0000000002_40X");
    assert_eq!(counts[1]["subregion_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn anatomy_aggregation_counts_per_term(pool: PgPool) {
    let (image_id, anatomy_id) = seed_annotation_targets(&pool).await;
    let other = AnatomyRepo::get_or_create(&pool, "proximal acinar tubule")
        .await
        .unwrap();

    for target in [anatomy_id, anatomy_id, other.id] {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            "/api/v1/subregions",
            serde_json::json!({
                "image_id": image_id,
                "anatomy_id": target,
                "points": [{"x": 0, "y": 0}, {"x": 2, "y": 0}, {"x": 2, "y": 2}],
            }),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/subregions/anatomy-aggregation").await;
    let json = body_json(response).await;

    let counts = json["data"].as_array().unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0]["anatomy_name"], "bronchiole");
    assert_eq!(counts[0]["subregion_count"], 2);
    assert_eq!(counts[1]["anatomy_name"], "proximal acinar tubule");
    assert_eq!(counts[1]["subregion_count"], 1);
}
