use recipe_box::{Service, ServiceError, Session};
use serde_json::{json, Value};

use crate::support::{create_recipe, open, service, sign_up, App};

fn vote(service: &Service<App>, session: &mut Session, command: &str) -> Value {
    service.dispatch(command, json!({}), session).unwrap()
}

fn voters(result: &Value, side: &str) -> Value {
    result["recipe"]["votes"][side].clone()
}

#[test]
fn alice_and_bob_scenario() {
    let service = service();
    let mut chef = sign_up(&service, "chef");
    let id = create_recipe(&service, &mut chef, "pesto", "basil");

    let mut alice = sign_up(&service, "alice");
    let mut bob = sign_up(&service, "bob");
    open(&service, &mut alice, &id);
    open(&service, &mut bob, &id);

    let r = vote(&service, &mut alice, "recipe.upvote");
    assert_eq!(r["changed"], true);
    assert_eq!(voters(&r, "upvoters"), json!(["alice"]));
    assert_eq!(r["recipe"]["votes"]["upvote_count"], 1);
    assert_eq!(r["your_vote"], "up");

    let r = vote(&service, &mut bob, "recipe.upvote");
    assert_eq!(voters(&r, "upvoters"), json!(["alice", "bob"]));
    assert_eq!(r["recipe"]["votes"]["upvote_count"], 2);

    let r = vote(&service, &mut alice, "recipe.downvote");
    assert_eq!(r["changed"], true);
    assert_eq!(voters(&r, "upvoters"), json!(["bob"]));
    assert_eq!(voters(&r, "downvoters"), json!(["alice"]));
    assert_eq!(r["recipe"]["votes"]["upvote_count"], 1);
    assert_eq!(r["recipe"]["votes"]["downvote_count"], 1);
    assert_eq!(r["your_vote"], "down");

    let again = vote(&service, &mut alice, "recipe.downvote");
    assert_eq!(again["changed"], false);
    assert_eq!(again["recipe"], r["recipe"]);
}

#[test]
fn open_reports_the_callers_vote() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let id = create_recipe(&service, &mut alice, "pesto", "basil");

    let opened = open(&service, &mut alice, &id);
    assert_eq!(opened["your_vote"], "none");

    vote(&service, &mut alice, "recipe.upvote");
    let reopened = open(&service, &mut alice, &id);
    assert_eq!(reopened["your_vote"], "up");

    let mut anonymous = Session::new();
    assert_eq!(open(&service, &mut anonymous, &id)["your_vote"], "none");
}

#[test]
fn prefix_usernames_are_distinct_voters() {
    let service = service();
    let mut ali = sign_up(&service, "ali");
    let id = create_recipe(&service, &mut ali, "pesto", "basil");
    let mut alice = sign_up(&service, "alice");

    open(&service, &mut ali, &id);
    vote(&service, &mut ali, "recipe.upvote");

    let opened = open(&service, &mut alice, &id);
    assert_eq!(opened["your_vote"], "none");

    let r = vote(&service, &mut alice, "recipe.downvote");
    assert_eq!(voters(&r, "upvoters"), json!(["ali"]));
    assert_eq!(voters(&r, "downvoters"), json!(["alice"]));
}

#[test]
fn vote_without_open_recipe_fails() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    create_recipe(&service, &mut alice, "pesto", "basil");

    let result = service.dispatch("recipe.upvote", json!({}), &mut alice);
    let err = result.unwrap_err();
    assert!(matches!(err, ServiceError::NoActiveRecipe));
    assert_eq!(err.to_string(), "no active recipe context");
}

#[test]
fn vote_requires_sign_in() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let id = create_recipe(&service, &mut alice, "pesto", "basil");

    let mut anonymous = Session::new();
    open(&service, &mut anonymous, &id);
    let result = service.dispatch("recipe.upvote", json!({}), &mut anonymous);
    assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
}

#[test]
fn vote_naming_another_recipe_is_stale() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let pesto = create_recipe(&service, &mut alice, "pesto", "basil");
    let soup = create_recipe(&service, &mut alice, "soup", "leek");

    open(&service, &mut alice, &pesto);
    let result = service.dispatch("recipe.upvote", json!({ "id": soup }), &mut alice);
    match result {
        Err(ServiceError::StaleContext { open: open_id, requested }) => {
            assert_eq!(open_id, pesto);
            assert_eq!(requested, soup);
        }
        other => panic!("expected stale context, got {other:?}"),
    }

    let ok = service
        .dispatch("recipe.upvote", json!({ "id": pesto }), &mut alice)
        .unwrap();
    assert_eq!(ok["changed"], true);
}

#[test]
fn vote_refreshes_the_view_context() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let id = create_recipe(&service, &mut alice, "pesto", "basil");
    open(&service, &mut alice, &id);

    vote(&service, &mut alice, "recipe.upvote");
    let view = alice.view().unwrap();
    assert_eq!(view.recipe_id(), id);
    assert_eq!(view.read_field("votes").unwrap()["upvote_count"], 1);
    assert_eq!(view.read_field("name"), Some(json!("pesto")));
}

#[test]
fn vote_reads_fresh_state_not_the_snapshot() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let id = create_recipe(&service, &mut alice, "pesto", "basil");
    let mut bob = sign_up(&service, "bob");

    open(&service, &mut alice, &id);
    open(&service, &mut bob, &id);
    vote(&service, &mut bob, "recipe.upvote");

    // alice's snapshot predates bob's vote; her vote must not drop it.
    let r = vote(&service, &mut alice, "recipe.upvote");
    assert_eq!(voters(&r, "upvoters"), json!(["alice", "bob"]));
    assert_eq!(r["recipe"]["votes"]["upvote_count"], 2);
}

#[test]
fn vote_on_deleted_recipe_is_not_found_and_closes_view() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let id = create_recipe(&service, &mut alice, "pesto", "basil");
    let mut bob = sign_up(&service, "bob");
    open(&service, &mut bob, &id);

    service
        .dispatch("recipe.delete", json!({ "id": id }), &mut alice)
        .unwrap();

    let result = service.dispatch("recipe.upvote", json!({}), &mut bob);
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert!(bob.view().is_none());
}
