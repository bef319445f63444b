use crate::error::Result;
use crate::models::{Team, User};
use crate::store::{self, Entity, Store};

pub struct TeamRepository<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> TeamRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn by_id(&self, id: i64) -> Result<Team> {
        store::require(self.store, id).await
    }

    pub async fn create(&self, name: &str, admin_id: i64) -> Result<Team> {
        let id = self.store.allocate_id(Team::KIND).await?;
        let team = Team {
            id,
            name: name.to_string(),
            admin_id,
            player_ids: Vec::new(),
            accuracies: Vec::new(),
        };
        store::persist(self.store, &team).await?;
        Ok(team)
    }

    pub async fn save(&self, team: &Team) -> Result<()> {
        store::persist(self.store, team).await
    }

    /// The team roster, dangling player ids skipped.
    pub async fn players(&self, team: &Team) -> Result<Vec<User>> {
        let mut players = Vec::with_capacity(team.player_ids.len());
        for player_id in &team.player_ids {
            match store::fetch::<S, User>(self.store, *player_id).await? {
                Some(user) => players.push(user),
                None => {
                    tracing::warn!(player_id, team_id = team.id, "player not found");
                }
            }
        }
        Ok(players)
    }
}
