//! Integration tests for the CSV download endpoint.
//!
//! Tests cover:
//! - Parameter validation
//! - Range and sensor filtering
//! - CSV shape, ordering and attachment headers

use axum::http::{header, StatusCode};
use shared::export::decode_rows;

use super::common::{at, get, get_raw, seeded_app, test_app};

const HOUR_RANGE: &str = "from=1700000000000&to=1700003600000";

#[tokio::test]
async fn test_missing_bounds_are_rejected() {
    for uri in [
        "/download",
        "/download?from=1700000000000",
        "/download?to=1700003600000",
        "/download?from=&to=1700003600000",
        "/download?sensor=A",
    ] {
        let (app, _store) = seeded_app();
        let (status, response) = get(app, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(
            response["error"], "Both 'from' and 'to' timestamps are required.",
            "uri: {uri}"
        );
    }
}

#[tokio::test]
async fn test_non_numeric_bounds_are_rejected() {
    for uri in [
        "/download?from=abc&to=1700003600000",
        "/download?from=1700000000000&to=abc",
        "/download?from=1.5&to=2",
        "/download?from=9999999999999999999999&to=1",
    ] {
        let (app, _store) = seeded_app();
        let (status, response) = get(app, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(
            response["error"],
            "Invalid timestamp format. Please provide timestamps in milliseconds.",
            "uri: {uri}"
        );
    }
}

#[tokio::test]
async fn test_empty_range_is_not_found() {
    let (app, _store) = seeded_app();

    let (status, response) = get(app, "/download?from=0&to=1000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "No data found for the given time range.");
}

#[tokio::test]
async fn test_empty_store_is_not_found() {
    let (app, _store) = test_app();

    let (status, _response) = get(app, &format!("/download?{HOUR_RANGE}")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inverted_range_is_not_found() {
    let (app, _store) = seeded_app();

    let (status, _response) = get(app, "/download?from=1700003600000&to=1700000000000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_returns_csv_attachment() {
    let (app, _store) = seeded_app();

    let (status, headers, _body) = get_raw(app, &format!("/download?{HOUR_RANGE}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"sensor_data.csv\""
    );
}

#[tokio::test]
async fn test_download_all_sensors_in_range() {
    let (app, _store) = seeded_app();

    let (status, _headers, body) = get_raw(app, &format!("/download?{HOUR_RANGE}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"name,data,time\n"));

    let rows = decode_rows(&body).unwrap();

    // The 1700009000000 metric is outside the range.
    assert_eq!(rows.len(), 4);
    assert!(rows.windows(2).all(|w| w[0].time <= w[1].time));

    let names: Vec<Option<&str>> = rows.iter().map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec![Some("A"), Some("B"), Some("A"), None]);

    let data: Vec<Option<&str>> = rows.iter().map(|r| r.data.as_deref()).collect();
    assert_eq!(data, vec![Some("12.5"), Some("7.0"), Some("13.25"), Some("99")]);
}

#[tokio::test]
async fn test_download_reference_scenario() {
    let (app, _store) = seeded_app();

    // Narrow the range to the two reference metrics.
    let (status, _headers, body) =
        get_raw(app, "/download?from=1700000000000&to=1700002000000").await;
    assert_eq!(status, StatusCode::OK);

    let rows = decode_rows(&body).unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].name.as_deref(), Some("A"));
    assert_eq!(rows[0].data.as_deref(), Some("12.5"));
    assert_eq!(rows[0].time, at(1_700_001_000_000));

    assert_eq!(rows[1].name.as_deref(), Some("B"));
    assert_eq!(rows[1].data.as_deref(), Some("7.0"));
    assert_eq!(rows[1].time, at(1_700_002_000_000));
}

#[tokio::test]
async fn test_range_bounds_are_inclusive() {
    let (app, _store) = seeded_app();

    let (status, _headers, body) =
        get_raw(app, "/download?from=1700001000000&to=1700002500000").await;
    assert_eq!(status, StatusCode::OK);

    let rows = decode_rows(&body).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].time, at(1_700_001_000_000));
    assert_eq!(rows[2].time, at(1_700_002_500_000));
}

#[tokio::test]
async fn test_sensor_filter() {
    let (app, _store) = seeded_app();

    let (status, _headers, body) =
        get_raw(app, &format!("/download?{HOUR_RANGE}&sensor=A")).await;
    assert_eq!(status, StatusCode::OK);

    let rows = decode_rows(&body).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.name.as_deref() == Some("A")));
    assert!(rows[0].time < rows[1].time);
}

#[tokio::test]
async fn test_sensor_filter_respects_range() {
    let (app, _store) = seeded_app();

    // B has one metric inside the hour and one after it.
    let (status, _headers, body) =
        get_raw(app, &format!("/download?{HOUR_RANGE}&sensor=B")).await;
    assert_eq!(status, StatusCode::OK);

    let rows = decode_rows(&body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].time, at(1_700_002_000_000));
}

#[tokio::test]
async fn test_unknown_sensor_is_not_found() {
    let (app, _store) = seeded_app();

    let (status, response) = get(app, &format!("/download?{HOUR_RANGE}&sensor=Z")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response["error"].is_string());
}

#[tokio::test]
async fn test_sensor_filter_is_url_decoded() {
    let (app, store) = test_app();
    store
        .insert_sensor(shared::models::Sensor::new(5, "boiler inlet"))
        .unwrap();
    store
        .insert_metric(shared::models::Metric::new(
            5,
            serde_json::json!({"temp": 71.5}),
            at(1_700_001_000_000),
        ))
        .unwrap();

    let (status, _headers, body) =
        get_raw(app, &format!("/download?{HOUR_RANGE}&sensor=boiler%20inlet")).await;
    assert_eq!(status, StatusCode::OK);

    let rows = decode_rows(&body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name.as_deref(), Some("boiler inlet"));
    assert_eq!(rows[0].data.as_deref(), Some(r#"{"temp":71.5}"#));
}

#[tokio::test]
async fn test_repeated_from_uses_first_value() {
    let (app, _store) = seeded_app();

    let (status, _headers, body) = get_raw(
        app,
        "/download?from=1700000000000&to=1700002000000&from=1700009000000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let rows = decode_rows(&body).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].time, at(1_700_001_000_000));
    assert_eq!(rows[1].time, at(1_700_002_000_000));
}

#[tokio::test]
async fn test_repeated_sensor_uses_first_value() {
    let (app, _store) = seeded_app();

    let (status, _headers, body) =
        get_raw(app, &format!("/download?{HOUR_RANGE}&sensor=B&sensor=A")).await;
    assert_eq!(status, StatusCode::OK);

    let rows = decode_rows(&body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name.as_deref(), Some("B"));
}

#[tokio::test]
async fn test_repeated_invalid_bound_reports_timestamp_message() {
    let (app, _store) = seeded_app();

    let (status, response) = get(app, "/download?from=abc&to=1700003600000&from=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["error"],
        "Invalid timestamp format. Please provide timestamps in milliseconds."
    );
}
