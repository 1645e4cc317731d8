use crate::utils::{pool_address, proof_query, setup_app, FakeManagers, Wallet};
use anyhow::Result;
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use profile_registry::store::load_profile;
use profile_types::{Amount, Profile};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;

fn create_body(wallet: &Wallet, pool: Option<&str>) -> Value {
    let signature = wallet.sign_store("Jane Doe", "Acme Farms", None, Some("jane@acme.test"));
    let mut body = json!({
        "walletAddress": wallet.address().to_checksum(),
        "walletSignature": signature,
        "name": "Jane Doe",
        "businessName": "Acme Farms",
        "email": "jane@acme.test",
        "isLocalCurrencyLoan": false,
    });
    if let Some(pool) = pool {
        body["poolAddress"] = json!(pool);
    }
    body
}

fn local_detail() -> Value {
    json!({
        "localLoanAmount": 1500.0,
        "localCurrencyCode": "KES",
        "fxRate": 129.5,
        "localInstallmentAmount": 125.0,
    })
}

#[tokio::test]
async fn test_create_then_public_read() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(1);

    let (status, text) = app
        .send(Method::POST, "/profile", Some(create_body(&owner, None)))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_str(&text)?;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["digest"].as_str().unwrap().len(), 64);

    let (status, text) = app.get(&format!("/profile/{id}")).await?;
    assert_eq!(status, StatusCode::OK);
    let public: Value = serde_json::from_str(&text)?;
    assert_eq!(
        public,
        json!({
            "name": "Jane Doe",
            "businessName": "Acme Farms",
            "isLocalCurrencyLoan": false,
            "localDetail": {},
        })
    );
    assert_eq!(app.managers.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_owner_signed_read_returns_full_profile() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(2);
    let id = app.create(create_body(&owner, None)).await?;

    let (time, signature) = owner.login_now();
    let (status, text) = app
        .get(&format!("/profile/{id}?{}", proof_query(&time, &signature, None)))
        .await?;
    assert_eq!(status, StatusCode::OK);
    let full: Value = serde_json::from_str(&text)?;
    assert_eq!(full["id"], json!(id));
    assert_eq!(full["walletAddress"], json!(owner.address().to_string()));
    assert_eq!(full["email"], json!("jane@acme.test"));
    assert!(full["digest"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_stranger_signed_read_is_unauthorized() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let id = app.create(create_body(&Wallet::new(3), None)).await?;

    let (time, signature) = Wallet::new(4).login_now();
    let (status, text) = app
        .get(&format!("/profile/{id}?{}", proof_query(&time, &signature, None)))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(text.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_partial_proof_is_unauthorized() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(5);
    let id = app.create(create_body(&owner, None)).await?;

    let (time, signature) = owner.login_now();
    let (status, _) = app.get(&format!("/profile/{id}?time={time}")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .get(&format!("/profile/{id}?signature={signature}"))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_stale_login_is_unauthorized() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(6);
    let id = app.create(create_body(&owner, None)).await?;

    let (time, signature) = owner.login_at(Utc::now() - Duration::hours(25));
    let (status, _) = app
        .get(&format!("/profile/{id}?{}", proof_query(&time, &signature, None)))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (time, signature) = owner.login_at(Utc::now() - Duration::hours(23));
    let (status, _) = app
        .get(&format!("/profile/{id}?{}", proof_query(&time, &signature, None)))
        .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_pool_manager_can_read_and_patch() -> Result<()> {
    let manager = Wallet::new(8);
    let pool = pool_address(0x51);
    let app = setup_app(FakeManagers::default().with(pool, manager.address()));
    let owner = Wallet::new(7);
    let id = app
        .create(create_body(&owner, Some(&pool.to_checksum())))
        .await?;

    let (time, signature) = manager.login_now();
    let query = proof_query(&time, &signature, Some(&pool));
    let (status, _) = app.get(&format!("/profile/{id}?{query}")).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, text) = app
        .send(
            Method::PATCH,
            &format!("/profile/{id}?{query}"),
            Some(json!({ "localDetail": local_detail() })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(text.is_empty());
    assert_eq!(app.managers.calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_stored_pool_takes_precedence_over_query() -> Result<()> {
    let real_manager = Wallet::new(10);
    let intruder = Wallet::new(11);
    let stored_pool = pool_address(0x61);
    let other_pool = pool_address(0x62);
    let app = setup_app(
        FakeManagers::default()
            .with(stored_pool, real_manager.address())
            .with(other_pool, intruder.address()),
    );
    let id = app
        .create(create_body(&Wallet::new(9), Some(&stored_pool.to_string())))
        .await?;

    let (time, signature) = intruder.login_now();
    let (status, _) = app
        .get(&format!(
            "/profile/{id}?{}",
            proof_query(&time, &signature, Some(&other_pool))
        ))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_manager_lookup_failure_is_server_error() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let pool = pool_address(0x71);
    let id = app
        .create(create_body(&Wallet::new(12), Some(&pool.to_string())))
        .await?;

    let (time, signature) = Wallet::new(13).login_now();
    let (status, text) = app
        .get(&format!(
            "/profile/{id}?{}",
            proof_query(&time, &signature, Some(&pool))
        ))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(text.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_patch_replaces_only_local_detail() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(14);
    let pool = pool_address(0x81);
    let id = app
        .create(create_body(&owner, Some(&pool.to_string())))
        .await?;
    let before = load_profile(app.store.as_ref(), &id).await.unwrap().unwrap();

    let (time, signature) = owner.login_now();
    let body = json!({
        "localDetail": local_detail(),
        "name": "Mallory",
        "walletAddress": Wallet::new(15).address().to_string(),
    });
    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/profile/{id}?{}", proof_query(&time, &signature, Some(&pool))),
            Some(body),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let after = load_profile(app.store.as_ref(), &id).await.unwrap().unwrap();
    assert_eq!(after.local_detail.local_currency_code.as_deref(), Some("KES"));
    assert_eq!(after.local_detail.fx_rate, Some(Amount::Number(129.5)));
    assert_eq!(
        Profile {
            local_detail: before.local_detail.clone(),
            ..after
        },
        before
    );
    Ok(())
}

#[tokio::test]
async fn test_patch_accepts_string_amounts() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(23);
    let pool = pool_address(0x82);
    let id = app.create(create_body(&owner, None)).await?;

    let (time, signature) = owner.login_now();
    let (status, text) = app
        .send(
            Method::PATCH,
            &format!("/profile/{id}?{}", proof_query(&time, &signature, Some(&pool))),
            Some(json!({
                "localDetail": {
                    "localLoanAmount": "1500",
                    "localCurrencyCode": "KES",
                    "fxRate": "129.5",
                    "localInstallmentAmount": "125",
                }
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{text}");

    let (_, text) = app.get(&format!("/profile/{id}")).await?;
    let public: Value = serde_json::from_str(&text)?;
    assert_eq!(public["localDetail"]["localLoanAmount"], json!("1500"));
    assert_eq!(public["localDetail"]["fxRate"], json!("129.5"));
    Ok(())
}

#[tokio::test]
async fn test_patch_requires_pool_address() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(16);
    let id = app.create(create_body(&owner, None)).await?;

    let (time, signature) = owner.login_now();
    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/profile/{id}?{}", proof_query(&time, &signature, None)),
            Some(json!({ "localDetail": local_detail() })),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/profile/{id}?time={time}&signature={signature}&poolAddress=0x1234"),
            Some(json!({ "localDetail": local_detail() })),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_patch_rejects_incomplete_local_detail() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(17);
    let pool = pool_address(0x91);
    let id = app.create(create_body(&owner, None)).await?;

    let mut detail = local_detail();
    detail["fxRate"] = json!(0);
    let (time, signature) = owner.login_now();
    let (status, text) = app
        .send(
            Method::PATCH,
            &format!("/profile/{id}?{}", proof_query(&time, &signature, Some(&pool))),
            Some(json!({ "localDetail": detail })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("fxRate"));

    let stored = load_profile(app.store.as_ref(), &id).await.unwrap().unwrap();
    assert_eq!(stored.local_detail, Default::default());
    Ok(())
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let (status, _) = app.get("/profile/does-not-exist").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (time, signature) = Wallet::new(18).login_now();
    let (status, _) = app
        .send(
            Method::PATCH,
            &format!(
                "/profile/missing?{}",
                proof_query(&time, &signature, Some(&pool_address(1)))
            ),
            Some(json!({ "localDetail": local_detail() })),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_edited_payload() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(19);

    let mut body = create_body(&owner, None);
    body["businessName"] = json!("Acme Holdings");
    let (status, _) = app.send(Method::POST, "/profile", Some(body)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut body = create_body(&Wallet::new(20), None);
    body["walletAddress"] = json!(owner.address().to_string());
    let (status, _) = app.send(Method::POST, "/profile", Some(body)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.len().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_create_validation_errors() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(21);

    let mut body = create_body(&owner, None);
    body.as_object_mut().unwrap().remove("email");
    let (status, text) = app.send(Method::POST, "/profile", Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Required body parameter is missing or invalid");

    let mut body = create_body(&owner, None);
    body["isLocalCurrencyLoan"] = json!(true);
    let (status, text) = app.send(Method::POST, "/profile", Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("localLoanAmount"));

    let mut body = create_body(&owner, None);
    body["isLocalCurrencyLoan"] = json!(true);
    body["localDetail"] = local_detail();
    let (status, _) = app.send(Method::POST, "/profile", Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn test_create_with_phone_only() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let owner = Wallet::new(22);
    let signature = owner.sign_store("Sam", "Sam's Shop", Some("+254700000000"), None);
    let id = app
        .create(json!({
            "walletAddress": owner.address().to_string(),
            "walletSignature": signature,
            "name": "Sam",
            "businessName": "Sam's Shop",
            "phone": "+254700000000",
        }))
        .await?;

    let stored = load_profile(app.store.as_ref(), &id).await.unwrap().unwrap();
    assert_eq!(stored.phone.as_deref(), Some("+254700000000"));
    assert_eq!(stored.email, None);
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let (status, text) = app
        .send(Method::POST, "/profile", Some(json!(["not", "an", "object"])))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!text.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_health_and_metrics() -> Result<()> {
    let app = setup_app(FakeManagers::default());
    let (status, text) = app.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&text)?;
    assert_eq!(health["status"], json!("ok"));
    assert_eq!(health["store"], json!("memory"));

    let (status, text) = app.get("/metrics").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("registry_requests_total"));
    Ok(())
}
