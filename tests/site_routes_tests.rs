use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use std::io::Cursor;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "vitrine-test-boundary";

struct TestSite {
    app: Router,
    uploads: std::path::PathBuf,
    _dir: TempDir,
}

async fn spawn_site(max_upload_bytes: usize) -> TestSite {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", dir.path().join("site.db").display());
    let uploads = dir.path().join("uploads");

    let pool = vitrine::db::connect(&database_url)
        .await
        .expect("failed to open database");
    let store = vitrine::db::ContentStore::new(pool);
    store.init_schema().await.expect("failed to init schema");

    let normalizer = vitrine::ImageNormalizer::new(&uploads);
    normalizer.ensure_dir().expect("failed to create uploads dir");

    let state =
        vitrine::router::VitrineState::new(vitrine::ContentService::new(store, normalizer));
    let app = vitrine::router::vitrine_router(state, max_upload_bytes);

    TestSite {
        app,
        uploads,
        _dir: dir,
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([90, 40, 160]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("failed to encode png");
    buf.into_inner()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("failed to build request")
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, body.to_vec())
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, req).await;
    let json = serde_json::from_slice(&body).expect("response body was not json");
    (status, json)
}

#[tokio::test]
async fn add_project_normalizes_image_and_lists_it_on_landing_page() {
    let site = spawn_site(16 * 1024 * 1024).await;
    let image = png(200, 200);

    let (status, project) = send_json(
        &site.app,
        multipart_request(
            "/admin/add_project",
            &[
                Part::Text("name", "Harbour"),
                Part::Text("description", "Waterfront rebrand"),
                Part::File("image", "harbour.png", &image),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["name"], "Harbour");
    let image_file = project["image_file"].as_str().expect("image_file missing");
    assert_eq!(image_file.len(), 16 + ".png".len());
    assert_eq!(
        image::image_dimensions(site.uploads.join(image_file)).unwrap(),
        (450, 350)
    );

    let (status, page) = send_json(&site.app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["projects"].as_array().unwrap().len(), 1);
    assert_eq!(page["projects"][0]["image_file"], image_file);
    assert_eq!(page["clients"].as_array().unwrap().len(), 0);

    let (status, served) = send(&site.app, get(&format!("/static/uploads/{image_file}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        image::load_from_memory(&served).unwrap().to_rgb8().dimensions(),
        (450, 350)
    );
}

#[tokio::test]
async fn add_client_produces_square_image() {
    let site = spawn_site(16 * 1024 * 1024).await;
    let image = png(900, 600);

    let (status, client) = send_json(
        &site.app,
        multipart_request(
            "/admin/add_client",
            &[
                Part::Text("name", "Ada"),
                Part::Text("designation", "CEO"),
                Part::Text("description", "Loved the launch"),
                Part::File("image", "ada.png", &image),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(client["designation"], "CEO");
    let image_file = client["image_file"].as_str().unwrap();
    assert_eq!(
        image::image_dimensions(site.uploads.join(image_file)).unwrap(),
        (300, 300)
    );
}

#[tokio::test]
async fn upload_without_image_is_rejected() {
    let site = spawn_site(16 * 1024 * 1024).await;

    let (status, body) = send_json(
        &site.app,
        multipart_request(
            "/admin/add_project",
            &[
                Part::Text("name", "No picture"),
                Part::Text("description", "Forgot the file"),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
    assert_eq!(std::fs::read_dir(&site.uploads).unwrap().count(), 0);
}

#[tokio::test]
async fn corrupt_image_is_rejected_and_nothing_is_stored() {
    let site = spawn_site(16 * 1024 * 1024).await;

    let (status, body) = send_json(
        &site.app,
        multipart_request(
            "/admin/add_client",
            &[
                Part::Text("name", "Ada"),
                Part::Text("designation", "CEO"),
                Part::Text("description", "x"),
                Part::File("image", "ada.png", b"this is not a png"),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_IMAGE");
    assert_eq!(std::fs::read_dir(&site.uploads).unwrap().count(), 0);

    let (_, page) = send_json(&site.app, get("/")).await;
    assert_eq!(page["clients"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn contact_submission_shows_up_in_admin_dashboard() {
    let site = spawn_site(16 * 1024 * 1024).await;

    let (status, accepted) = send_json(
        &site.app,
        form_request(
            "/contact",
            "full_name=Maya+Lund&email=maya%40example.com&mobile=0700000000&city=Oslo",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(accepted["message"], "Message sent successfully!");

    let (status, dashboard) = send_json(&site.app, get("/admin")).await;
    assert_eq!(status, StatusCode::OK);
    let contacts = dashboard["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["full_name"], "Maya Lund");
    assert_eq!(contacts[0]["email"], "maya@example.com");
    assert_eq!(contacts[0]["id"], accepted["id"]);
}

#[tokio::test]
async fn form_with_missing_field_returns_json_error() {
    let site = spawn_site(16 * 1024 * 1024).await;

    let (status, body) = send_json(&site.app, form_request("/contact", "full_name=Maya")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
    assert!(body["error"]["message"].as_str().unwrap().contains("email"));

    let (status, body) = send_json(&site.app, form_request("/subscribe", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");

    let (_, dashboard) = send_json(&site.app, get("/admin")).await;
    assert_eq!(dashboard["contacts"].as_array().unwrap().len(), 0);
    assert_eq!(dashboard["subscribers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn repeated_subscription_does_not_duplicate() {
    let site = spawn_site(16 * 1024 * 1024).await;

    let (status, first) = send_json(&site.app, form_request("/subscribe", "email=a%40x.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["subscribed"], true);
    assert_eq!(first["message"], "Subscribed successfully!");

    let (status, second) =
        send_json(&site.app, form_request("/subscribe", "email=a%40x.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["subscribed"], false);

    let (status, blank) = send_json(&site.app, form_request("/subscribe", "email=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(blank["subscribed"], false);
    assert!(blank.get("message").is_none());

    let (_, dashboard) = send_json(&site.app, get("/admin")).await;
    let subscribers = dashboard["subscribers"].as_array().unwrap();
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0]["email"], "a@x.com");
}

#[tokio::test]
async fn oversized_upload_returns_413() {
    let site = spawn_site(64 * 1024).await;
    let oversized = vec![0u8; 128 * 1024];

    let (status, _) = send(
        &site.app,
        multipart_request(
            "/admin/add_project",
            &[
                Part::Text("name", "Huge"),
                Part::Text("description", "Too big"),
                Part::File("image", "huge.png", &oversized),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(std::fs::read_dir(&site.uploads).unwrap().count(), 0);
}
