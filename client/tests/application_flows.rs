//! End-to-end application and service-request flows: the submission pipeline
//! drives the real HTTP gateway against an in-process platform double, so
//! these suites pin the exact wire payloads the platform receives.

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use std::sync::Arc;

use client::domain::ports::{AmountPrompt, PlatformGateway, SessionStore};
use client::domain::requests::{ServiceRequest, ServiceRequestKind};
use client::domain::submission::{SubmissionError, SubmissionPipeline};
use client::domain::{ApplicationDraft, ClientError, InvestmentOption, NairaAmount};
use client::inbound::cli::StdinAmountPrompt;
use rstest::rstest;
use serde_json::json;

use support::{PlatformWorld, sample_session, world};

/// Prompt double for flows where the applicant declines to name an amount.
struct DecliningPrompt;

impl AmountPrompt for DecliningPrompt {
    fn request_amount(&self, _option: InvestmentOption) -> Option<NairaAmount> {
        None
    }
}

fn financing_draft() -> ApplicationDraft {
    ApplicationDraft {
        full_name: "Ada Bello".to_owned(),
        national_id: "123-456-789-01".to_owned(),
        employment_status: "Employed".to_owned(),
        location: "Ibadan".to_owned(),
        investment_option: Some(InvestmentOption::Financing),
        credit_consent: true,
    }
}

fn outright_draft() -> ApplicationDraft {
    ApplicationDraft {
        investment_option: Some(InvestmentOption::Outright),
        credit_consent: false,
        ..financing_draft()
    }
}

#[rstest]
fn a_financing_application_reaches_the_platform_in_full(world: PlatformWorld) {
    let store = world.store();
    store
        .save(&sample_session("tok-1", "Ada Bello"))
        .expect("seed session");
    world.platform.respond(
        "POST",
        "/api/applications/submit",
        201,
        json!({
            "success": true,
            "application": { "id": 41, "reference": "APP-2024-041", "status": "pending" },
        }),
    );
    let pipeline = SubmissionPipeline::with_noop_listener(
        world.gateway(&store),
        Arc::new(StdinAmountPrompt::new(Some(NairaAmount::new(75_000)))),
    );

    let record = world
        .block_on(pipeline.submit(&financing_draft()))
        .expect("submission succeeds");

    assert_eq!(record.reference().as_deref(), Some("APP-2024-041"));
    let hit = world
        .platform
        .requests_to("/api/applications/submit")
        .first()
        .cloned()
        .expect("submit hit");
    assert_eq!(hit.bearer.as_deref(), Some("tok-1"));
    insta::assert_json_snapshot!(hit.body.expect("submit body"), @r#"
    {
      "credit_consent": true,
      "employment_status": "Employed",
      "full_name": "Ada Bello",
      "investment_amount": null,
      "investment_option": "financing",
      "location": "Ibadan",
      "monthly_repayment": 75000,
      "national_id": "12345678901"
    }
    "#);
}

#[rstest]
fn an_outright_application_defaults_to_the_minimum(world: PlatformWorld) {
    let store = world.store();
    store
        .save(&sample_session("tok-1", "Ada Bello"))
        .expect("seed session");
    world.platform.respond(
        "POST",
        "/api/applications/submit",
        201,
        json!({ "success": true, "application": { "id": 7 } }),
    );
    // The applicant declines to name an amount, so the pipeline falls back
    // to the option minimum.
    let pipeline =
        SubmissionPipeline::with_noop_listener(world.gateway(&store), Arc::new(DecliningPrompt));

    world
        .block_on(pipeline.submit(&outright_draft()))
        .expect("submission succeeds");

    let hit = world
        .platform
        .requests_to("/api/applications/submit")
        .first()
        .cloned()
        .expect("submit hit");
    assert_eq!(
        hit.body.expect("submit body"),
        json!({
            "full_name": "Ada Bello",
            "national_id": "12345678901",
            "employment_status": "Employed",
            "location": "Ibadan",
            "investment_option": "outright",
            "investment_amount": 500_000,
            "monthly_repayment": null,
            "credit_consent": false,
        })
    );
}

#[rstest]
fn validation_failures_stay_on_the_client(world: PlatformWorld) {
    let store = world.store();
    let draft = ApplicationDraft {
        full_name: "  ".to_owned(),
        national_id: "12345".to_owned(),
        employment_status: String::new(),
        location: String::new(),
        investment_option: None,
        credit_consent: false,
    };
    let pipeline =
        SubmissionPipeline::with_noop_listener(world.gateway(&store), Arc::new(DecliningPrompt));

    let error = world
        .block_on(pipeline.submit(&draft))
        .expect_err("draft is invalid");

    let report = match error {
        SubmissionError::Flow(ClientError::Validation(report)) => report,
        other => panic!("expected a validation failure, got {other}"),
    };
    assert_eq!(
        report.to_string(),
        "full name, national ID, employment status, location, investment option"
    );
    assert!(world.platform.hits().is_empty(), "nothing may reach the network");
}

#[rstest]
fn a_rejected_token_clears_the_session_once(world: PlatformWorld) {
    let store = world.store();
    store
        .save(&sample_session("tok-stale", "Ada Bello"))
        .expect("seed session");
    world.platform.respond(
        "POST",
        "/api/applications/submit",
        401,
        json!({ "success": false, "message": "jwt expired" }),
    );
    let pipeline = SubmissionPipeline::with_noop_listener(
        world.gateway(&store),
        Arc::new(StdinAmountPrompt::new(Some(NairaAmount::new(600_000)))),
    );

    let error = world
        .block_on(pipeline.submit(&outright_draft()))
        .expect_err("stale token must fail");

    assert!(
        matches!(error, SubmissionError::Flow(ClientError::AuthExpired)),
        "got {error}"
    );
    assert!(
        store.load().expect("readable store").is_none(),
        "rejected token must discard the session"
    );
    assert_eq!(world.platform.hits().len(), 1);
}

#[rstest]
fn platform_rejections_surface_the_server_message(world: PlatformWorld) {
    let store = world.store();
    store
        .save(&sample_session("tok-1", "Ada Bello"))
        .expect("seed session");
    world.platform.respond(
        "POST",
        "/api/applications/submit",
        400,
        json!({ "success": false, "message": "National ID already registered" }),
    );
    let pipeline = SubmissionPipeline::with_noop_listener(
        world.gateway(&store),
        Arc::new(StdinAmountPrompt::new(Some(NairaAmount::new(600_000)))),
    );

    let error = world
        .block_on(pipeline.submit(&outright_draft()))
        .expect_err("platform rejected the application");

    assert!(
        matches!(
            &error,
            SubmissionError::Flow(ClientError::Request { message })
                if message == "National ID already registered"
        ),
        "got {error}"
    );
    assert!(
        store.load().expect("readable store").is_some(),
        "a business rejection must not sign the investor out"
    );
}

#[rstest]
fn service_requests_post_their_type_and_description(world: PlatformWorld) {
    let store = world.store();
    store
        .save(&sample_session("tok-1", "Ada Bello"))
        .expect("seed session");
    world
        .platform
        .respond("POST", "/api/users/requests", 200, json!({ "success": true }));
    let gateway = world.gateway(&store);

    let request = ServiceRequest::new(
        ServiceRequestKind::AssetAllocation,
        "  Rebalance toward heifers  ",
    )
    .expect("request");
    world
        .block_on(gateway.submit_service_request(&request))
        .expect("request accepted");

    let hit = world
        .platform
        .requests_to("/api/users/requests")
        .first()
        .cloned()
        .expect("request hit");
    assert_eq!(hit.bearer.as_deref(), Some("tok-1"));
    assert_eq!(
        hit.body.expect("request body"),
        json!({
            "type": "Asset Allocation",
            "description": "Rebalance toward heifers",
        })
    );
}

#[rstest]
fn signed_out_requests_never_reach_the_network(world: PlatformWorld) {
    let store = world.store();
    let gateway = world.gateway(&store);

    let request =
        ServiceRequest::new(ServiceRequestKind::Withdrawal, "Close it out").expect("request");
    let error = world
        .block_on(gateway.submit_service_request(&request))
        .expect_err("no session means no call");

    assert!(
        matches!(error, client::domain::ports::GatewayError::AuthExpired),
        "got {error}"
    );
    assert!(world.platform.hits().is_empty());
}
