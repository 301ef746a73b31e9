use std::sync::Arc;

use recipe_box::{
    handlers, ImageUpload, InMemoryDocumentStore, InMemoryObjectStore, ObjectStore, RecipeBox,
    Service, Session, UploadError,
};
use serde_json::{json, Value};

pub type App = RecipeBox<InMemoryDocumentStore>;

pub const IMAGE_BASE: &str = "http://img.test/";

pub fn service() -> Service<App> {
    service_with(Arc::new(InMemoryObjectStore::new(IMAGE_BASE)))
}

pub fn service_with(objects: Arc<dyn ObjectStore>) -> Service<App> {
    handlers::service(RecipeBox::new(InMemoryDocumentStore::new(), objects).with_bcrypt_cost(4))
}

/// Object store that is always down.
pub struct UnavailableObjectStore;

impl ObjectStore for UnavailableObjectStore {
    fn upload(&self, _bytes: &[u8], _filename: &str) -> Result<String, UploadError> {
        Err(UploadError::Unavailable("maintenance".into()))
    }

    fn fetch(&self, _key: &str) -> Result<Option<Vec<u8>>, UploadError> {
        Ok(None)
    }
}

/// Register `username` and return the signed-in session.
pub fn sign_up(service: &Service<App>, username: &str) -> Session {
    let mut session = Session::new();
    service
        .dispatch(
            "account.register",
            json!({ "username": username, "password": "secret" }),
            &mut session,
        )
        .unwrap();
    session
}

pub fn image() -> Value {
    serde_json::to_value(ImageUpload::encode("dish.png", b"\x89PNG fake")).unwrap()
}

pub fn recipe_input(name: &str, ingredient: &str) -> Value {
    json!({
        "name": name,
        "description": "good",
        "key_ingredient": ingredient,
        "calories": "420",
        "time": "30",
        "serves": "2",
        "substitute": "none",
        "image": image(),
    })
}

/// Create a recipe as the session's user and return its id.
pub fn create_recipe(service: &Service<App>, session: &mut Session, name: &str, ingredient: &str) -> String {
    let result = service
        .dispatch("recipe.create", recipe_input(name, ingredient), session)
        .unwrap();
    result["recipe"]["id"].as_str().unwrap().to_string()
}

pub fn open(service: &Service<App>, session: &mut Session, id: &str) -> Value {
    service
        .dispatch("recipe.open", json!({ "id": id }), session)
        .unwrap()
}
