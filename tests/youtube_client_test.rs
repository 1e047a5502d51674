mod common;

use common::{Route, serve};
use serde_json::json;
use sonicly::config::ExtractionService;
use sonicly::ports::StreamResolver;
use sonicly::youtube::{ApiError, ExtractionResolver, YouTubeClient};
use std::time::Duration;

fn client(base_url: &str) -> YouTubeClient {
    YouTubeClient::new("test-key", &format!("{base_url}/v3"), Duration::from_secs(5)).unwrap()
}

fn search_body() -> String {
    json!({
        "items": [
            {
                "id": {"kind": "youtube#video", "videoId": "s7mDJHGfNVg"},
                "snippet": {
                    "title": "Kesariya - Brahmastra",
                    "channelTitle": "Sony Music India",
                    "publishedAt": "2022-07-17T06:30:00Z",
                    "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/s7mDJHGfNVg/hqdefault.jpg"}}
                }
            },
            {
                "id": {"kind": "youtube#video", "videoId": "JGwWNGJdvx8"},
                "snippet": {"title": "Shape of You", "channelTitle": "Ed Sheeran"}
            },
            {
                "id": {"kind": "youtube#playlist", "playlistId": "PL1"},
                "snippet": {"title": "A playlist"}
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_search_enriches_with_details() {
    let details = json!({
        "items": [
            {"id": "JGwWNGJdvx8", "contentDetails": {"duration": "PT3M53S"}, "statistics": {"viewCount": "6000000000"}},
            {"id": "s7mDJHGfNVg", "contentDetails": {"duration": "PT4M28S"}, "statistics": {"viewCount": "500000000"}}
        ]
    });
    let server = serve(vec![
        Route::new("/v3/search", 200, search_body()),
        Route::new("/v3/videos", 200, details.to_string()),
    ])
    .await;

    let results = client(&server.base_url).search("kesariya", 5).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].video_id, "s7mDJHGfNVg");
    assert_eq!(results[0].duration_text, "4:28");
    assert_eq!(results[0].view_count, "500000000");
    assert_eq!(results[1].duration_text, "3:53");
    assert_eq!(results[1].thumbnail_url, "");

    let requests = server.requests();
    let search = requests.iter().find(|r| r.starts_with("/v3/search")).unwrap();
    assert!(search.contains("videoCategoryId=10"));
    assert!(search.contains("maxResults=5"));
    assert!(search.contains("type=video"));
    let videos = requests.iter().find(|r| r.starts_with("/v3/videos")).unwrap();
    assert!(videos.contains("s7mDJHGfNVg%2CJGwWNGJdvx8"));
}

#[tokio::test]
async fn test_details_failure_degrades_durations() {
    let server = serve(vec![
        Route::new("/v3/search", 200, search_body()),
        Route::new("/v3/videos", 500, "{}"),
    ])
    .await;

    let results = client(&server.base_url).search("kesariya", 5).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.duration_text == "0:00"));
    assert!(results.iter().all(|r| r.view_count == "0"));
}

#[tokio::test]
async fn test_forbidden_and_rate_limited_are_distinct() {
    let quota = json!({"error": {"code": 403, "message": "The request cannot be completed because you have exceeded your quota."}});
    let server = serve(vec![
        Route::new("/v3/search", 403, quota.to_string()),
        Route::new("/v3/videos", 429, json!({"message": "slow down"}).to_string()),
    ])
    .await;
    let yt = client(&server.base_url);

    let err = yt.search("anything", 1).await.unwrap_err();
    assert!(matches!(err, ApiError::UpstreamAuth { .. }));
    assert!(err.upstream_message().unwrap().contains("quota"));
    assert!(err.to_string().to_lowercase().contains("quota"));

    let err = yt.trending("IN").await.unwrap_err();
    assert!(matches!(err, ApiError::UpstreamRateLimited { .. }));
    assert_eq!(err.upstream_message(), Some("slow down"));
}

#[tokio::test]
async fn test_unknown_status_keeps_code() {
    let server = serve(vec![Route::new(
        "/v3/videos",
        503,
        json!({"error": {"message": "backend down"}}).to_string(),
    )])
    .await;

    let err = client(&server.base_url).trending("US").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(
        err.to_string(),
        "YouTube API error (503): Service Unavailable - backend down"
    );
}

#[tokio::test]
async fn test_missing_items_is_malformed() {
    let server = serve(vec![Route::new("/v3/videos", 200, r#"{"kind":"x"}"#)]).await;
    let err = client(&server.base_url).trending("IN").await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));

    let server = serve(vec![Route::new("/v3/videos", 200, "not json")]).await;
    let err = client(&server.base_url).trending("IN").await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_trending_passes_region() {
    let body = json!({
        "items": [{
            "id": "4NRXx6U8ABQ",
            "snippet": {"title": "Blinding Lights", "channelTitle": "The Weeknd"},
            "contentDetails": {"duration": "PT3M20S"},
            "statistics": {"viewCount": "10"}
        }]
    });
    let server = serve(vec![Route::new("/v3/videos", 200, body.to_string())]).await;

    let results = client(&server.base_url).trending("GB").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].duration_text, "3:20");

    let request = &server.requests()[0];
    assert!(request.contains("regionCode=GB"));
    assert!(request.contains("chart=mostPopular"));
    assert!(request.contains("maxResults=20"));
}

#[tokio::test]
async fn test_connection_check() {
    let server = serve(vec![
        Route::new("/v3/search", 200, search_body()),
        Route::new("/v3/videos", 200, json!({"items": []}).to_string()),
    ])
    .await;
    assert!(client(&server.base_url).test_connection().await.unwrap());
    assert!(server.requests()[0].contains("q=test+music"));

    let server = serve(vec![Route::new("/v3/search", 200, json!({"items": []}).to_string())]).await;
    assert!(!client(&server.base_url).test_connection().await.unwrap());
}

#[tokio::test]
async fn test_custom_backend_stream() {
    let stream = json!({"url": "https://cdn.example/kesariya.m4a", "quality": "high", "format": "m4a", "itag": 140});
    let server = serve(vec![
        Route::new("/api/youtube/audio/s7mDJHGfNVg", 200, stream.to_string()),
        Route::new("/api/youtube/audio/empty", 200, json!({"url": ""}).to_string()),
    ])
    .await;

    let resolver = ExtractionResolver::new(
        ExtractionService::Custom,
        "",
        &server.base_url,
        Duration::from_secs(5),
    )
    .unwrap();

    let resolved = resolver.resolve("s7mDJHGfNVg").await.unwrap();
    assert_eq!(resolved.url, "https://cdn.example/kesariya.m4a");
    assert_eq!(resolved.format, "m4a");

    assert!(resolver.resolve("empty").await.is_none());
    assert!(resolver.resolve("missing").await.is_none());
}

#[tokio::test]
async fn test_rapidapi_stream() {
    let server = serve(vec![
        Route::new("/dl?id=empty", 200, json!({"link": ""}).to_string()),
        Route::new("/dl?id=nolink", 200, json!({"status": "fail"}).to_string()),
        Route::new("/dl?id=limited", 429, json!({"message": "quota"}).to_string()),
        Route::new("/dl?id=", 200, json!({"link": "https://cdn.example/kesariya.mp3", "title": "Kesariya"}).to_string()),
    ])
    .await;

    let resolver = ExtractionResolver::new(
        ExtractionService::RapidApi,
        "rapid-key",
        "http://localhost:3001",
        Duration::from_secs(5),
    )
    .unwrap()
    .with_rapidapi_url(&format!("{}/dl", server.base_url));

    let resolved = resolver.resolve("s7mDJHGfNVg").await.unwrap();
    assert_eq!(resolved.url, "https://cdn.example/kesariya.mp3");
    assert_eq!(resolved.quality, "medium");
    assert_eq!(resolved.format, "mp3");
    assert_eq!(resolved.itag, 140);

    assert_eq!(server.requests()[0], "/dl?id=s7mDJHGfNVg");
    let head = &server.request_heads()[0];
    assert!(head.contains("x-rapidapi-key: rapid-key"));
    assert!(head.contains("x-rapidapi-host: youtube-mp36.p.rapidapi.com"));

    assert!(resolver.resolve("empty").await.is_none());
    assert!(resolver.resolve("nolink").await.is_none());
    assert!(resolver.resolve("limited").await.is_none());
}
