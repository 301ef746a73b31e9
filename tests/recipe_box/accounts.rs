use recipe_box::{ServiceError, Session};
use serde_json::json;

use crate::support::{create_recipe, open, service, sign_up};

#[test]
fn register_signs_the_session_in() {
    let service = service();
    let session = sign_up(&service, "alice");
    assert_eq!(session.user(), Some("alice"));
}

#[test]
fn duplicate_username_is_rejected() {
    let service = service();
    sign_up(&service, "alice");

    let mut other = Session::new();
    let result = service.dispatch(
        "account.register",
        json!({ "username": "alice", "password": "other" }),
        &mut other,
    );
    assert!(matches!(result, Err(ServiceError::Rejected(msg)) if msg == "user already exists"));
    assert_eq!(other.user(), None);
}

#[test]
fn username_length_is_checked() {
    let service = service();
    let mut session = Session::new();

    let short = service.dispatch(
        "account.register",
        json!({ "username": "al", "password": "pw" }),
        &mut session,
    );
    assert!(matches!(short, Err(ServiceError::Rejected(msg)) if msg == "name too short"));

    let long = service.dispatch(
        "account.register",
        json!({ "username": "alexandrina", "password": "pw" }),
        &mut session,
    );
    assert!(matches!(long, Err(ServiceError::Rejected(msg)) if msg == "name too long"));
}

#[test]
fn register_requires_both_fields() {
    let service = service();
    let result = service.dispatch(
        "account.register",
        json!({ "username": "alice" }),
        &mut Session::new(),
    );
    assert!(matches!(result, Err(ServiceError::GuardRejected(_))));
}

#[test]
fn sign_in_checks_credentials() {
    let service = service();
    sign_up(&service, "alice");

    let mut session = Session::new();
    let wrong = service.dispatch(
        "account.sign_in",
        json!({ "username": "alice", "password": "nope" }),
        &mut session,
    );
    assert!(matches!(wrong, Err(ServiceError::Unauthorized(msg)) if msg == "wrong username or password"));

    let unknown = service.dispatch(
        "account.sign_in",
        json!({ "username": "nobody", "password": "secret" }),
        &mut session,
    );
    assert!(matches!(unknown, Err(ServiceError::Unauthorized(_))));
    assert_eq!(session.user(), None);

    service
        .dispatch(
            "account.sign_in",
            json!({ "username": "alice", "password": "secret" }),
            &mut session,
        )
        .unwrap();
    assert_eq!(session.user(), Some("alice"));
}

#[test]
fn sign_out_clears_user_and_open_recipe() {
    let service = service();
    let mut session = sign_up(&service, "alice");
    let id = create_recipe(&service, &mut session, "pesto", "basil");
    open(&service, &mut session, &id);
    assert!(session.view().is_some());

    let result = service
        .dispatch("account.sign_out", json!({}), &mut session)
        .unwrap();
    assert_eq!(result["signed_out"], true);
    assert_eq!(session.user(), None);
    assert!(session.view().is_none());
}
