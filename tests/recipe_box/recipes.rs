use std::sync::Arc;

use recipe_box::{ServiceError, Session};
use serde_json::json;

use crate::support::{
    create_recipe, open, recipe_input, service, service_with, sign_up, UnavailableObjectStore,
    IMAGE_BASE,
};

#[test]
fn create_requires_sign_in() {
    let service = service();
    let result = service.dispatch(
        "recipe.create",
        recipe_input("pesto", "basil"),
        &mut Session::new(),
    );
    assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
}

#[test]
fn create_stores_normalized_recipe_with_empty_votes() {
    let service = service();
    let mut session = sign_up(&service, "alice");

    let result = service
        .dispatch("recipe.create", recipe_input("Pesto Pasta", "Basil"), &mut session)
        .unwrap();
    let recipe = &result["recipe"];

    assert_eq!(recipe["creator"], "alice");
    assert_eq!(recipe["name"], "pesto pasta");
    assert_eq!(recipe["key_ingredient"], "basil");
    assert_eq!(recipe["serves"], "2");
    assert!(recipe["image"].as_str().unwrap().starts_with(IMAGE_BASE));
    assert_eq!(recipe["votes"]["upvote_count"], 0);
    assert_eq!(recipe["votes"]["downvote_count"], 0);
    assert_eq!(recipe["votes"]["upvoters"], json!([]));

    let stats = service
        .dispatch("ingredient.stats", json!({}), &mut session)
        .unwrap();
    assert_eq!(stats["ingredients"], json!(["basil"]));
    assert_eq!(stats["recipes_per_creator"]["alice"], 1);
}

#[test]
fn uploaded_image_is_retrievable() {
    let service = service();
    let mut session = sign_up(&service, "alice");
    let id = create_recipe(&service, &mut session, "pesto", "basil");

    let opened = open(&service, &mut session, &id);
    let url = opened["recipe"]["image"].as_str().unwrap();
    let key = url.strip_prefix(IMAGE_BASE).unwrap();

    let bytes = service.app().objects().fetch(key).unwrap().unwrap();
    assert_eq!(bytes, b"\x89PNG fake");
}

#[test]
fn upload_failure_blocks_creation() {
    let service = service_with(Arc::new(UnavailableObjectStore));
    let mut session = sign_up(&service, "alice");

    let result = service.dispatch("recipe.create", recipe_input("pesto", "basil"), &mut session);
    let err = result.unwrap_err();
    assert!(matches!(err, ServiceError::Upload(_)));
    assert_eq!(err.status_code(), 502);

    let listed = service
        .dispatch("recipe.list", json!({}), &mut session)
        .unwrap();
    assert_eq!(listed["recipes"], json!([]));
}

#[test]
fn invalid_image_data_is_rejected() {
    let service = service();
    let mut session = sign_up(&service, "alice");

    let mut input = recipe_input("pesto", "basil");
    input["image"]["data"] = json!("%%% not base64 %%%");
    let result = service.dispatch("recipe.create", input, &mut session);
    assert!(matches!(result, Err(ServiceError::Rejected(_))));
}

#[test]
fn create_without_image_is_guard_rejected() {
    let service = service();
    let mut session = sign_up(&service, "alice");
    let result = service.dispatch(
        "recipe.create",
        json!({ "name": "pesto", "key_ingredient": "basil" }),
        &mut session,
    );
    assert!(matches!(result, Err(ServiceError::GuardRejected(_))));
}

#[test]
fn list_mine_search_and_by_ingredient() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let mut bob = sign_up(&service, "bob");
    create_recipe(&service, &mut alice, "tomato soup", "tomato");
    create_recipe(&service, &mut alice, "pesto", "basil");
    create_recipe(&service, &mut bob, "bruschetta", "Tomato");

    let names = |value: &serde_json::Value| -> Vec<String> {
        value["recipes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect()
    };

    let all = service.dispatch("recipe.list", json!({}), &mut bob).unwrap();
    assert_eq!(names(&all), vec!["bruschetta", "pesto", "tomato soup"]);

    let mine = service.dispatch("recipe.mine", json!({}), &mut alice).unwrap();
    assert_eq!(names(&mine), vec!["pesto", "tomato soup"]);

    let found = service
        .dispatch("recipe.search", json!({ "query": "SOUP" }), &mut bob)
        .unwrap();
    assert_eq!(names(&found), vec!["tomato soup"]);

    let by_ingredient = service
        .dispatch("ingredient.recipes", json!({ "ingredient": "tomato" }), &mut bob)
        .unwrap();
    assert_eq!(names(&by_ingredient), vec!["bruschetta", "tomato soup"]);

    let stats = service.dispatch("ingredient.stats", json!({}), &mut bob).unwrap();
    assert_eq!(stats["ingredients"], json!(["basil", "tomato"]));
    assert_eq!(stats["recipes_per_ingredient"]["tomato"], 2);
    assert_eq!(stats["recipes_per_creator"]["bob"], 1);
}

#[test]
fn empty_search_is_rejected() {
    let service = service();
    let result = service.dispatch("recipe.search", json!({ "query": "  " }), &mut Session::new());
    assert!(matches!(result, Err(ServiceError::Rejected(_))));
}

#[test]
fn mine_requires_sign_in() {
    let service = service();
    let result = service.dispatch("recipe.mine", json!({}), &mut Session::new());
    assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
}

#[test]
fn open_unknown_recipe_is_not_found() {
    let service = service();
    let mut session = Session::new();
    let result = service.dispatch("recipe.open", json!({ "id": "missing" }), &mut session);
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert!(session.view().is_none());
}

#[test]
fn update_by_creator_keeps_votes() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let mut bob = sign_up(&service, "bob");
    let id = create_recipe(&service, &mut alice, "pesto", "basil");

    open(&service, &mut bob, &id);
    service.dispatch("recipe.upvote", json!({}), &mut bob).unwrap();

    open(&service, &mut alice, &id);
    let mut edit = recipe_input("Pesto Genovese", "basil");
    edit.as_object_mut().unwrap().remove("image");
    let result = service
        .dispatch("recipe.update", edit, &mut alice)
        .unwrap();

    assert_eq!(result["recipe"]["name"], "pesto genovese");
    assert_eq!(result["recipe"]["votes"]["upvote_count"], 1);
    assert_eq!(result["recipe"]["votes"]["upvoters"], json!(["bob"]));

    let view = alice.view().unwrap();
    assert_eq!(view.read_field("name"), Some(json!("pesto genovese")));
}

#[test]
fn update_by_someone_else_is_forbidden() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let mut bob = sign_up(&service, "bob");
    let id = create_recipe(&service, &mut alice, "pesto", "basil");

    open(&service, &mut bob, &id);
    let result = service.dispatch("recipe.update", recipe_input("mine now", "basil"), &mut bob);
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[test]
fn update_without_open_recipe_fails() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    create_recipe(&service, &mut alice, "pesto", "basil");

    let result = service.dispatch("recipe.update", recipe_input("pesto", "basil"), &mut alice);
    assert!(matches!(result, Err(ServiceError::NoActiveRecipe)));
}

#[test]
fn delete_is_creator_only_and_closes_the_view() {
    let service = service();
    let mut alice = sign_up(&service, "alice");
    let mut bob = sign_up(&service, "bob");
    let id = create_recipe(&service, &mut alice, "pesto", "basil");

    let denied = service.dispatch("recipe.delete", json!({ "id": id }), &mut bob);
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

    open(&service, &mut alice, &id);
    let result = service
        .dispatch("recipe.delete", json!({ "id": id }), &mut alice)
        .unwrap();
    assert_eq!(result["deleted"], true);
    assert!(alice.view().is_none());

    let list = service.dispatch("recipe.list", json!({}), &mut alice).unwrap();
    assert_eq!(list["recipes"], json!([]));
}
