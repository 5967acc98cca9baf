// HTTP integration tests: the assembled Rocket app driven through the local client

use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::Value;
use tempfile::TempDir;

use grokmusic::{build_rocket, Config};

fn create_test_client(dir: &TempDir) -> Client {
    let config = Config {
        upload_dir: dir.path().join("uploads"),
        catalog_file: dir.path().join("tracks.json"),
        consent_file: dir.path().join("consent.json"),
        ..Config::default()
    };
    Client::tracked(build_rocket(config)).expect("valid rocket instance")
}

fn post_json(client: &Client, uri: &str) -> Value {
    let response = client.post(uri.to_string()).dispatch();
    assert_eq!(response.status(), Status::Ok, "POST {}", uri);
    response.into_json().expect("json body")
}

fn reload(client: &Client) -> Value {
    post_json(client, "/api/player/reload")
}

#[test]
fn test_index_reports_running() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);

    let response = client.get("/").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["message"], "Grok Music API is running!");
}

#[test]
fn test_track_list_serves_mock_catalog() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);

    let response = client.get("/api/tracks").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let body: Value = response.into_json().unwrap();
    let tracks = body.as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["id"], "1");
    assert_eq!(tracks[0]["title"], "Example Track");
    assert_eq!(tracks[0]["duration"], 180.0);
    assert!(tracks[0]["createdAt"].is_string());
}

#[test]
fn test_track_lookup() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);

    let response = client.get("/api/tracks/1").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["album"], "Demo Album");

    let response = client.get("/api/tracks/missing").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Track not found" }));
}

#[test]
fn test_catalog_file_overrides_mock() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tracks.json"),
        r#"[{"id":"7","title":"Seven","artist":"Band","album":"Numbers","duration":70,"url":"https://example.com/7.mp3"}]"#,
    )
    .unwrap();
    let client = create_test_client(&dir);

    let body: Value = client.get("/api/tracks/7").dispatch().into_json().unwrap();
    assert_eq!(body["title"], "Seven");
    assert_eq!(client.get("/api/tracks/1").dispatch().status(), Status::NotFound);
}

#[test]
fn test_player_select_and_seek() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);

    let snapshot = reload(&client);
    assert_eq!(snapshot["totalTracks"], 1);
    assert!(snapshot["state"]["filter"].is_null());

    // Drop anything queued during liftoff
    client.get("/api/player/commands").dispatch();

    let snapshot = post_json(&client, "/api/player/select/1");
    assert_eq!(snapshot["state"]["current"], "1");
    assert_eq!(snapshot["state"]["playing"], true);
    assert_eq!(snapshot["currentTrack"]["title"], "Example Track");

    let snapshot = post_json(&client, "/api/player/seek?fraction=0.5");
    assert_eq!(snapshot["state"]["elapsed"], 90.0);

    let commands: Value = client.get("/api/player/commands").dispatch().into_json().unwrap();
    assert_eq!(
        commands,
        serde_json::json!([
            { "type": "load", "url": "https://example.com/track.mp3" },
            { "type": "play" },
            { "type": "seek", "seconds": 90.0 },
        ])
    );

    let snapshot = post_json(&client, "/api/player/next");
    assert_eq!(snapshot["state"]["current"], "1");

    let snapshot = post_json(&client, "/api/player/toggle");
    assert_eq!(snapshot["state"]["playing"], false);
}

#[test]
fn test_ended_on_last_track_stops() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);
    reload(&client);

    post_json(&client, "/api/player/select/1");
    let snapshot = post_json(&client, "/api/player/timeupdate?seconds=500");
    assert_eq!(snapshot["state"]["elapsed"], 180.0);

    let snapshot = post_json(&client, "/api/player/ended");
    assert_eq!(snapshot["state"]["current"], "1");
    assert_eq!(snapshot["state"]["playing"], false);
}

#[test]
fn test_upload_then_delete() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);
    reload(&client);

    let response = client
        .post("/api/player/upload?name=song.mp3")
        .header(ContentType::new("audio", "mpeg"))
        .body(vec![0u8; 64])
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let snapshot: Value = response.into_json().unwrap();

    assert_eq!(snapshot["totalTracks"], 2);
    let current = &snapshot["currentTrack"];
    assert_eq!(current["title"], "song");
    assert_eq!(current["artist"], "Unknown Artist");
    assert_eq!(current["album"], "Uploaded");
    assert_eq!(snapshot["state"]["playing"], true);

    let id = current["id"].as_str().unwrap().to_string();
    let url = current["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/media/"));
    assert_eq!(std::fs::read_dir(dir.path().join("uploads")).unwrap().count(), 1);

    let response = client.get(url.clone()).dispatch();
    assert_eq!(response.status(), Status::Ok);

    let response = client.delete(format!("/api/player/tracks/{}", id)).dispatch();
    assert_eq!(response.status(), Status::Ok);
    let snapshot: Value = response.into_json().unwrap();
    assert_eq!(snapshot["totalTracks"], 1);
    assert!(snapshot["state"]["current"].is_null());
    assert_eq!(snapshot["state"]["playing"], false);

    assert_eq!(std::fs::read_dir(dir.path().join("uploads")).unwrap().count(), 0);
    assert_eq!(client.get(url).dispatch().status(), Status::NotFound);
}

#[test]
fn test_non_audio_upload_is_ignored() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);
    reload(&client);

    let response = client
        .post("/api/player/upload?name=notes.txt")
        .header(ContentType::Plain)
        .body("just some notes")
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let snapshot: Value = response.into_json().unwrap();
    assert_eq!(snapshot["totalTracks"], 1);
    assert!(snapshot["state"]["current"].is_null());
}

#[test]
fn test_album_filter_narrows_view_only() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);
    reload(&client);

    let snapshot = post_json(&client, "/api/player/filter?album=Uploaded");
    assert_eq!(snapshot["state"]["filter"], "Uploaded");
    assert_eq!(snapshot["tracks"].as_array().unwrap().len(), 0);
    assert_eq!(snapshot["totalTracks"], 1);
    assert_eq!(snapshot["albums"], serde_json::json!([null, "Demo Album"]));

    let snapshot = post_json(&client, "/api/player/filter");
    assert!(snapshot["state"]["filter"].is_null());
    assert_eq!(snapshot["tracks"].as_array().unwrap().len(), 1);
}

#[test]
fn test_album_called_all_can_be_filtered() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tracks.json"),
        r#"[
            {"id":"a","title":"A","artist":"X","album":"all","duration":61.5,"url":"a.mp3"},
            {"id":"b","title":"B","artist":"X","album":"Other","duration":30,"url":"b.mp3"}
        ]"#,
    )
    .unwrap();
    let client = create_test_client(&dir);

    let snapshot = reload(&client);
    assert_eq!(snapshot["totalTracks"], 2);
    assert_eq!(snapshot["albums"], serde_json::json!([null, "all", "Other"]));
    assert_eq!(snapshot["tracks"][0]["duration"], 61.5);

    let snapshot = post_json(&client, "/api/player/filter?album=all");
    assert_eq!(snapshot["state"]["filter"], "all");
    let visible = snapshot["tracks"].as_array().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["id"], "a");
}

#[test]
fn test_playback_error_report_accepted() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);

    let response = client
        .post("/api/player/playback-error")
        .header(ContentType::JSON)
        .body(r#"{"message":"NotAllowedError"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::NoContent);
}

#[test]
fn test_i18n_tables() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);

    let en: Value = client.get("/api/i18n/en").dispatch().into_json().unwrap();
    assert_eq!(en["playlist"], "PLAYLIST");

    let ru: Value = client.get("/api/i18n/ru").dispatch().into_json().unwrap();
    assert_eq!(ru["playlist"], "ПЛЕЙЛИСТ");

    let fallback: Value = client.get("/api/i18n/de").dispatch().into_json().unwrap();
    assert_eq!(fallback, en);
}

#[test]
fn test_consent_persists() {
    let dir = TempDir::new().unwrap();

    {
        let client = create_test_client(&dir);
        let body: Value = client.get("/api/consent").dispatch().into_json().unwrap();
        assert_eq!(body["accepted"], false);

        let body: Value = client.post("/api/consent").dispatch().into_json().unwrap();
        assert_eq!(body["accepted"], true);
    }

    let client = create_test_client(&dir);
    let body: Value = client.get("/api/consent").dispatch().into_json().unwrap();
    assert_eq!(body["accepted"], true);
}

#[test]
fn test_player_page_renders() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);

    let response = client.get("/player?lang=ru").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let page = response.into_string().unwrap();
    assert!(page.contains("lang=\"ru\""));
    assert!(page.contains("cookie-banner"));

    let response = client.get("/player").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().unwrap().contains("lang=\"en\""));
}

#[test]
fn test_unknown_route_returns_json_404() {
    let dir = TempDir::new().unwrap();
    let client = create_test_client(&dir);

    let response = client.get("/api/nothing-here").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["error"], "Not found");
}
