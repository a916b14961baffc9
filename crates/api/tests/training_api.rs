//! HTTP-level integration tests for classifier training.
//!
//! The happy path runs the whole loop: cache an image through the API,
//! annotate it with polygons over two visually distinct regions, train,
//! then load the stored model and classify one of the regions with it.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post, post_json};
use sqlx::PgPool;

use lungmap_core::classifier::Pipeline;
use lungmap_core::features;
use lungmap_core::polygon::Vertex;
use lungmap_db::repositories::{AnatomyRepo, ImageRepo, TrainedModelRepo};
use lungmap_storage::MemoryObjectStore;

/// A 64x32 PNG whose left half is red and right half is blue, giving two
/// trivially separable classes.
fn two_tone_png() -> Vec<u8> {
    let img = image::RgbImage::from_fn(64, 32, |x, _y| {
        if x < 32 {
            image::Rgb([200, 30, 30])
        } else {
            image::Rgb([30, 30, 200])
        }
    });
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Polygon request body covering a rectangle.
fn rect_points(x0: i64, y0: i64, x1: i64, y1: i64) -> serde_json::Value {
    serde_json::json!([
        {"x": x0, "y": y0},
        {"x": x1, "y": y0},
        {"x": x1, "y": y1},
        {"x": x0, "y": y1},
    ])
}

/// Seed a fully cached, doubly annotated image set; returns
/// (image_set_id, image_id).
async fn seed_trainable_set(pool: &PgPool) -> (i64, i64) {
    let experiment = common::create_experiment(pool, "LMEX0000000001").await;
    let set = common::create_image_set(pool, "LMEX0000000001_20X").await;
    let image =
        common::create_image(pool, set.id, experiment.id, "a.tif", "EXP01/a/a.tif").await;

    let store = Arc::new(MemoryObjectStore::new());
    store.insert("EXP01/a/a.tif", two_tone_png());
    let app = common::build_test_app_with_store(pool.clone(), store);
    let response = get(app, &format!("/api/v1/images/{}", image.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let vascular = AnatomyRepo::get_or_create(pool, "vascular network")
        .await
        .unwrap();
    let airway = AnatomyRepo::get_or_create(pool, "airway epithelium")
        .await
        .unwrap();

    for (anatomy_id, points) in [
        (vascular.id, rect_points(2, 2, 28, 28)),
        (vascular.id, rect_points(4, 4, 20, 20)),
        (airway.id, rect_points(36, 2, 60, 28)),
        (airway.id, rect_points(40, 4, 58, 20)),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/subregions",
            serde_json::json!({
                "image_id": image.id,
                "anatomy_id": anatomy_id,
                "points": points,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    (set.id, image.id)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn training_stores_a_working_model(pool: PgPool) {
    let (set_id, image_id) = seed_trainable_set(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post(app, &format!("/api/v1/imagesets/{set_id}/train")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["image_set_id"], set_id);

    // Load the stored blob and classify the red region with it.
    let blob = TrainedModelRepo::get_blob(&pool, set_id)
        .await
        .unwrap()
        .expect("model blob must exist after training");
    let pipeline = Pipeline::from_bytes(&blob).unwrap();

    let mut labels = pipeline.labels();
    labels.sort_unstable();
    assert_eq!(labels, vec!["airway epithelium", "vascular network"]);

    let orig = ImageRepo::get_orig(&pool, image_id)
        .await
        .unwrap()
        .flatten()
        .unwrap();
    let rgb = image::load_from_memory(&orig).unwrap().to_rgb8();
    let red_polygon = [
        Vertex::new(6, 6),
        Vertex::new(24, 6),
        Vertex::new(24, 24),
        Vertex::new(6, 24),
    ];
    let example = features::extract(&rgb, &red_polygon, "unlabeled");
    assert_eq!(pipeline.predict(&example.features), "vascular network");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn retraining_replaces_the_model_in_place(pool: PgPool) {
    let (set_id, _image_id) = seed_trainable_set(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post(app, &format!("/api/v1/imagesets/{set_id}/train")).await;
    let first = body_json(response).await;

    let app = common::build_test_app(pool.clone());
    let response = post(app, &format!("/api/v1/imagesets/{set_id}/train")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let second = body_json(response).await;

    // Same row, replaced in place.
    assert_eq!(second["id"], first["id"]);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trained_models")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn training_without_annotations_returns_422(pool: PgPool) {
    let experiment = common::create_experiment(&pool, "LMEX0000000001").await;
    let set = common::create_image_set(&pool, "LMEX0000000001_20X").await;
    common::create_image(&pool, set.id, experiment.id, "a.tif", "EXP01/a/a.tif").await;

    let app = common::build_test_app(pool.clone());
    let response = post(app, &format!("/api/v1/imagesets/{}/train", set.id)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "TRAINING_DATA_ERROR");

    // No model row was written.
    let blob = TrainedModelRepo::get_blob(&pool, set.id).await.unwrap();
    assert!(blob.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn training_with_uncached_annotated_image_returns_422(pool: PgPool) {
    let experiment = common::create_experiment(&pool, "LMEX0000000001").await;
    let set = common::create_image_set(&pool, "LMEX0000000001_20X").await;
    let image =
        common::create_image(&pool, set.id, experiment.id, "a.tif", "EXP01/a/a.tif").await;
    let anatomy = AnatomyRepo::get_or_create(&pool, "bronchiole").await.unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/subregions",
        serde_json::json!({
            "image_id": image.id,
            "anatomy_id": anatomy.id,
            "points": rect_points(0, 0, 4, 4),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post(app, &format!("/api/v1/imagesets/{}/train", set.id)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn training_unknown_image_set_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post(app, "/api/v1/imagesets/999999/train").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
