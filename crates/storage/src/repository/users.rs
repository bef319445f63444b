use crate::error::Result;
use crate::models::User;
use crate::store::{self, Entity, Store};

pub struct UserRepository<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> UserRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn by_id(&self, id: i64) -> Result<User> {
        store::require(self.store, id).await
    }

    pub async fn create(&self, email: &str, username: &str, name: &str) -> Result<User> {
        let id = self.store.allocate_id(User::KIND).await?;
        let user = User {
            id,
            email: email.to_string(),
            username: username.to_string(),
            name: name.to_string(),
            score: 0,
            tournament_ids: Vec::new(),
        };
        store::persist(self.store, &user).await?;
        Ok(user)
    }

    pub async fn save(&self, user: &User) -> Result<()> {
        store::persist(self.store, user).await
    }
}
