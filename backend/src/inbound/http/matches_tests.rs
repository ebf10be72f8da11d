//! HTTP scenario coverage for the match endpoints.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use crate::domain::Role;
use crate::inbound::http::test_utils::{Harness, login, test_app, with_cookies};

#[actix_web::test]
async fn unauthenticated_requests_are_rejected() {
    let harness = Harness::new();
    let app = actix_test::init_service(test_app(&harness)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/matches/request")
        .set_json(json!({ "skillId": "3fa85f64-5717-4562-b3fc-2c963f66afa6" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("unauthorized"));
}

#[actix_web::test]
async fn create_match_snapshots_the_requester() {
    let harness = Harness::new();
    let owner = harness.seed_user("Owner One", Role::User);
    let requester = harness.seed_user("Rosa Khan", Role::User);
    let skill = harness.seed_skill(&owner, "Violin");
    let app = actix_test::init_service(test_app(&harness)).await;
    let cookies = login(&app, &requester).await;

    let request = with_cookies(actix_test::TestRequest::post(), &cookies)
        .uri("/api/v1/matches/request")
        .set_json(json!({ "skillId": skill.id }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("status").and_then(Value::as_str), Some("Pending"));
    assert_eq!(
        body.get("paymentStatus").and_then(Value::as_str),
        Some("pending")
    );
    assert_eq!(
        body.get("requesterName").and_then(Value::as_str),
        Some("Rosa Khan")
    );
    assert_eq!(
        body.get("requesterEmail").and_then(Value::as_str),
        Some("rosa.khan@example.com")
    );
    assert_eq!(
        body.get("skillOwnerId").and_then(Value::as_str),
        Some(owner.id.to_string().as_str())
    );
}

#[actix_web::test]
async fn missing_skill_id_is_a_bad_request() {
    let harness = Harness::new();
    let requester = harness.seed_user("Rosa Khan", Role::User);
    let app = actix_test::init_service(test_app(&harness)).await;
    let cookies = login(&app, &requester).await;

    let request = with_cookies(actix_test::TestRequest::post(), &cookies)
        .uri("/api/v1/matches/request")
        .set_json(json!({}))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("skillId")
    );
}

#[actix_web::test]
async fn duplicate_pending_request_conflicts() {
    let harness = Harness::new();
    let owner = harness.seed_user("Owner One", Role::User);
    let requester = harness.seed_user("Rosa Khan", Role::User);
    let skill = harness.seed_skill(&owner, "Violin");
    let app = actix_test::init_service(test_app(&harness)).await;
    let cookies = login(&app, &requester).await;

    let first = with_cookies(actix_test::TestRequest::post(), &cookies)
        .uri("/api/v1/matches/request")
        .set_json(json!({ "skillId": skill.id }))
        .to_request();
    let first_res = actix_test::call_service(&app, first).await;
    assert_eq!(first_res.status(), StatusCode::CREATED);

    let second = with_cookies(actix_test::TestRequest::post(), &cookies)
        .uri("/api/v1/matches/request")
        .set_json(json!({ "skillId": skill.id }))
        .to_request();
    let second_res = actix_test::call_service(&app, second).await;
    assert_eq!(second_res.status(), StatusCode::CONFLICT);

    let body: Value = actix_test::read_body_json(second_res).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
}

#[actix_web::test]
async fn owner_accepts_a_pending_match() {
    let harness = Harness::new();
    let owner = harness.seed_user("Owner One", Role::User);
    let requester = harness.seed_user("Rosa Khan", Role::User);
    let skill = harness.seed_skill(&owner, "Violin");
    let app = actix_test::init_service(test_app(&harness)).await;

    let requester_cookies = login(&app, &requester).await;
    let create = with_cookies(actix_test::TestRequest::post(), &requester_cookies)
        .uri("/api/v1/matches/request")
        .set_json(json!({ "skillId": skill.id }))
        .to_request();
    let created: Value =
        actix_test::read_body_json(actix_test::call_service(&app, create).await).await;
    let match_id = created
        .get("id")
        .and_then(Value::as_str)
        .expect("match id")
        .to_owned();

    let owner_cookies = login(&app, &owner).await;
    let accept = with_cookies(actix_test::TestRequest::post(), &owner_cookies)
        .uri(&format!("/api/v1/matches/{match_id}/accept"))
        .to_request();
    let response = actix_test::call_service(&app, accept).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("status").and_then(Value::as_str), Some("Accepted"));

    // A decided match refuses further decisions.
    let reject = with_cookies(actix_test::TestRequest::post(), &owner_cookies)
        .uri(&format!("/api/v1/matches/{match_id}/reject"))
        .to_request();
    let conflict = actix_test::call_service(&app, reject).await;
    assert_eq!(conflict.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(conflict).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_state")
    );
}

#[actix_web::test]
async fn only_the_owner_may_decide() {
    let harness = Harness::new();
    let owner = harness.seed_user("Owner One", Role::User);
    let requester = harness.seed_user("Rosa Khan", Role::User);
    let stranger = harness.seed_user("Third Party", Role::User);
    let skill = harness.seed_skill(&owner, "Violin");
    let app = actix_test::init_service(test_app(&harness)).await;

    let requester_cookies = login(&app, &requester).await;
    let create = with_cookies(actix_test::TestRequest::post(), &requester_cookies)
        .uri("/api/v1/matches/request")
        .set_json(json!({ "skillId": skill.id }))
        .to_request();
    let created: Value =
        actix_test::read_body_json(actix_test::call_service(&app, create).await).await;
    let match_id = created
        .get("id")
        .and_then(Value::as_str)
        .expect("match id")
        .to_owned();

    let stranger_cookies = login(&app, &stranger).await;
    let accept = with_cookies(actix_test::TestRequest::post(), &stranger_cookies)
        .uri(&format!("/api/v1/matches/{match_id}/accept"))
        .to_request();
    let response = actix_test::call_service(&app, accept).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The match is untouched and still visible to the owner as pending.
    let owner_cookies = login(&app, &owner).await;
    let received = with_cookies(actix_test::TestRequest::get(), &owner_cookies)
        .uri("/api/v1/matches/received")
        .to_request();
    let body: Value =
        actix_test::read_body_json(actix_test::call_service(&app, received).await).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("status").and_then(Value::as_str),
        Some("Pending")
    );
}

#[actix_web::test]
async fn match_listing_is_admin_only() {
    let harness = Harness::new();
    let member = harness.seed_user("Rosa Khan", Role::User);
    let admin = harness.seed_user("Site Admin", Role::Admin);
    let app = actix_test::init_service(test_app(&harness)).await;

    let member_cookies = login(&app, &member).await;
    let forbidden = with_cookies(actix_test::TestRequest::get(), &member_cookies)
        .uri("/api/v1/matches")
        .to_request();
    let response = actix_test::call_service(&app, forbidden).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_cookies = login(&app, &admin).await;
    let allowed = with_cookies(actix_test::TestRequest::get(), &admin_cookies)
        .uri("/api/v1/matches")
        .to_request();
    let response = actix_test::call_service(&app, allowed).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn payment_status_flag_requires_admin() {
    let harness = Harness::new();
    let owner = harness.seed_user("Owner One", Role::User);
    let requester = harness.seed_user("Rosa Khan", Role::User);
    let admin = harness.seed_user("Site Admin", Role::Admin);
    let skill = harness.seed_skill(&owner, "Violin");
    let app = actix_test::init_service(test_app(&harness)).await;

    let requester_cookies = login(&app, &requester).await;
    let create = with_cookies(actix_test::TestRequest::post(), &requester_cookies)
        .uri("/api/v1/matches/request")
        .set_json(json!({ "skillId": skill.id }))
        .to_request();
    let created: Value =
        actix_test::read_body_json(actix_test::call_service(&app, create).await).await;
    let match_id = created
        .get("id")
        .and_then(Value::as_str)
        .expect("match id")
        .to_owned();

    let forbidden = with_cookies(actix_test::TestRequest::put(), &requester_cookies)
        .uri(&format!("/api/v1/matches/{match_id}/payment-status"))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    let response = actix_test::call_service(&app, forbidden).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_cookies = login(&app, &admin).await;
    let allowed = with_cookies(actix_test::TestRequest::put(), &admin_cookies)
        .uri(&format!("/api/v1/matches/{match_id}/payment-status"))
        .set_json(json!({ "status": "approved" }))
        .to_request();
    let response = actix_test::call_service(&app, allowed).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("paymentStatus").and_then(Value::as_str),
        Some("approved")
    );
}
