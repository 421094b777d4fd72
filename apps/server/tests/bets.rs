mod common;

use axum::{
    body::Body,
    http::{header, Method, Request},
};
use common::{body_json, body_text, build_test_router, register_and_login, send_json};
use tower::ServiceExt;

fn multipart_csv(boundary: &str, csv: &str) -> Body {
    Body::from(format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"bets.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{boundary}--\r\n"
    ))
}

async fn add_bet(app: &axum::Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = send_json(app, Method::POST, "/api/v1/bets", Some(token), Some(body)).await;
    assert_eq!(response.status(), 200);
    body_json(response).await
}

#[tokio::test]
async fn add_list_and_delete_bets() {
    let (app, _tmp) = build_test_router().await;
    let token = register_and_login(&app, "alice", "pw").await;

    let created = add_bet(
        &app,
        &token,
        serde_json::json!({
            "betDate": "2024-01-05",
            "sport": "NFL",
            "amountInvested": 10.0,
            "numPicks": 3,
            "outcome": "WIN",
            "amountPaid": 25.0
        }),
    )
    .await;

    assert_eq!(created["profit"], 15.0);
    let bet_id = created["id"].as_str().unwrap().to_string();

    let response = send_json(&app, Method::GET, "/api/v1/bets", Some(&token), None).await;
    let bets = body_json(response).await;
    assert_eq!(bets.as_array().unwrap().len(), 1);
    assert_eq!(bets[0]["sport"], "NFL");

    // Delete removes the record
    let response = send_json(
        &app,
        Method::DELETE,
        &format!("/api/v1/bets/{}", bet_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 204);

    // Deleting the same id again is a benign no-op
    let response = send_json(
        &app,
        Method::DELETE,
        &format!("/api/v1/bets/{}", bet_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 204);

    let response = send_json(&app, Method::GET, "/api/v1/bets", Some(&token), None).await;
    let bets = body_json(response).await;
    assert_eq!(bets.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn invalid_bet_is_rejected() {
    let (app, _tmp) = build_test_router().await;
    let token = register_and_login(&app, "alice", "pw").await;

    let response = send_json(
        &app,
        Method::POST,
        "/api/v1/bets",
        Some(&token),
        Some(serde_json::json!({
            "betDate": "2024-01-05",
            "amountInvested": 10.0,
            "numPicks": 0,
            "outcome": "WIN",
            "amountPaid": 25.0
        })),
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn bets_are_scoped_per_user() {
    let (app, _tmp) = build_test_router().await;
    let alice = register_and_login(&app, "alice", "pw").await;
    let bob = register_and_login(&app, "bob", "pw").await;

    add_bet(
        &app,
        &alice,
        serde_json::json!({
            "betDate": "2024-01-05",
            "amountInvested": 10.0,
            "numPicks": 1,
            "outcome": "WIN",
            "amountPaid": 25.0
        }),
    )
    .await;

    let response = send_json(&app, Method::GET, "/api/v1/bets", Some(&bob), None).await;
    let bets = body_json(response).await;
    assert_eq!(bets.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn dashboard_reflects_the_worked_example() {
    let (app, _tmp) = build_test_router().await;
    let token = register_and_login(&app, "alice", "pw").await;

    for (date, invested, paid, outcome) in [
        ("2024-01-05", 10.0, 25.0, "WIN"),
        ("2024-01-20", 20.0, 0.0, "LOSE"),
        ("2024-02-01", 5.0, 5.0, "WIN"),
    ] {
        add_bet(
            &app,
            &token,
            serde_json::json!({
                "betDate": date,
                "amountInvested": invested,
                "numPicks": 1,
                "outcome": outcome,
                "amountPaid": paid
            }),
        )
        .await;
    }

    let response = send_json(
        &app,
        Method::POST,
        "/api/v1/dashboard",
        Some(&token),
        Some(serde_json::json!({ "view": { "granularity": "MONTH" } })),
    )
    .await;
    assert_eq!(response.status(), 200);
    let view = body_json(response).await;

    assert_eq!(view["totalProfit"], -5.0);
    let series = view["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["label"], "January 2024");
    assert_eq!(series[0]["profit"], -5.0);
    assert_eq!(series[1]["label"], "February 2024");
    assert_eq!(series[1]["profit"], 0.0);

    // Drill into January via the select-month command
    let response = send_json(
        &app,
        Method::POST,
        "/api/v1/dashboard",
        Some(&token),
        Some(serde_json::json!({
            "view": { "granularity": "MONTH" },
            "command": { "type": "SELECT_MONTH", "monthLabel": "January 2024" }
        })),
    )
    .await;
    let view = body_json(response).await;
    let detail = view["monthDetail"].as_array().unwrap();
    assert_eq!(detail.len(), 2);
    assert_eq!(detail[0]["label"], "2024-01-05");
    assert_eq!(detail[0]["profit"], 15.0);

    // The standalone ledger endpoints agree
    let response = send_json(&app, Method::GET, "/api/v1/ledger/total", Some(&token), None).await;
    assert_eq!(body_json(response).await, serde_json::json!(-5.0));

    let response = send_json(
        &app,
        Method::GET,
        "/api/v1/ledger/series?granularity=YEAR",
        Some(&token),
        None,
    )
    .await;
    let series = body_json(response).await;
    assert_eq!(series[0]["label"], "2024");
    assert_eq!(series[0]["profit"], -5.0);
}

#[tokio::test]
async fn import_and_export_round_trip() {
    let (app, _tmp) = build_test_router().await;
    let token = register_and_login(&app, "alice", "pw").await;

    // Seed one record the import will replace
    add_bet(
        &app,
        &token,
        serde_json::json!({
            "betDate": "2020-06-01",
            "amountInvested": 1.0,
            "numPicks": 1,
            "outcome": "LOSE",
            "amountPaid": 0.0
        }),
    )
    .await;

    let boundary = "wagerbook-test-boundary";
    let csv = "date,sport,amount_invested,num_picks,win_or_lose,amount_paid,profit\n\
               2024-01-05,NFL,10,3,Win,25,15\n\
               2024-01-20,NBA,20,2,Lose,0,-20\n";
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/bets/import")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(multipart_csv(boundary, csv))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), 200);
    let summary = body_json(response).await;
    assert_eq!(summary["imported"], 2);
    assert_eq!(summary["schema"], "V2");

    // The previous collection is gone, replaced by the imported rows
    let response = send_json(&app, Method::GET, "/api/v1/bets", Some(&token), None).await;
    let bets = body_json(response).await;
    assert_eq!(bets.as_array().unwrap().len(), 2);

    let response = send_json(
        &app,
        Method::GET,
        "/api/v1/bets/export",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let exported = body_text(response).await;
    assert!(exported.starts_with("date,sport,amount_invested"));
    assert_eq!(exported.lines().count(), 3);
    assert!(exported.contains("2024-01-05,NFL,10,3,WIN,25,15"));
}

#[tokio::test]
async fn import_missing_column_leaves_data_untouched() {
    let (app, _tmp) = build_test_router().await;
    let token = register_and_login(&app, "alice", "pw").await;

    add_bet(
        &app,
        &token,
        serde_json::json!({
            "betDate": "2024-01-05",
            "amountInvested": 10.0,
            "numPicks": 1,
            "outcome": "WIN",
            "amountPaid": 25.0
        }),
    )
    .await;

    let boundary = "wagerbook-test-boundary";
    let csv = "date,sport,num_picks,win_or_lose,amount_paid\n2024-01-05,NFL,3,Win,25\n";
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/bets/import")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(multipart_csv(boundary, csv))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), 400);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("amount_invested"));

    // Existing data untouched
    let response = send_json(&app, Method::GET, "/api/v1/bets", Some(&token), None).await;
    let bets = body_json(response).await;
    assert_eq!(bets.as_array().unwrap().len(), 1);
}
