// In-memory user storage shared across requests

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{
    error::UserError,
    model::{NewUser, User, UserPatch},
};
use crate::admin::{ModelSource, SourceFuture};

#[derive(Debug, Default)]
struct Users {
    rows: BTreeMap<u64, User>,
    last_id: u64,
}

impl Users {
    fn ensure_unique(&self, username: &str, except: Option<u64>) -> Result<(), UserError> {
        let taken: bool = self
            .rows
            .values()
            .any(|user: &User| user.username == username && Some(user.id) != except);

        if taken {
            Err(UserError::DuplicateUsername(username.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Users keyed by primary key. Ids start at 1 and are never reused.
#[derive(Clone, Debug, Default)]
pub struct UserStore {
    inner: Arc<RwLock<Users>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All users ordered by id
    pub async fn list(&self) -> Vec<User> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Result<User, UserError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(UserError::NotFound(id))
    }

    pub async fn create(&self, new: NewUser) -> Result<User, UserError> {
        new.validate()?;

        let mut users = self.inner.write().await;
        users.ensure_unique(&new.username, None)?;

        users.last_id += 1;
        let user: User = User {
            id: users.last_id,
            username: new.username,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            is_staff: new.is_staff,
            date_joined: Utc::now(),
        };

        users.rows.insert(user.id, user.clone());
        info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Full update; id and date_joined are kept
    pub async fn replace(&self, id: u64, new: NewUser) -> Result<User, UserError> {
        new.validate()?;

        let mut users = self.inner.write().await;
        if !users.rows.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }
        users.ensure_unique(&new.username, Some(id))?;

        let user: &mut User = users.rows.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.replace_with(new);
        debug!("Replaced user {}", id);
        Ok(user.clone())
    }

    /// Partial update, validated as a whole before it is stored
    pub async fn update(&self, id: u64, patch: UserPatch) -> Result<User, UserError> {
        let mut users = self.inner.write().await;

        let mut updated: User = users.rows.get(&id).cloned().ok_or(UserError::NotFound(id))?;
        updated.apply(patch);
        updated.validate()?;
        users.ensure_unique(&updated.username, Some(id))?;

        users.rows.insert(id, updated.clone());
        debug!("Updated user {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<User, UserError> {
        let removed: User = self
            .inner
            .write()
            .await
            .rows
            .remove(&id)
            .ok_or(UserError::NotFound(id))?;

        info!("Deleted user {} ({})", removed.id, removed.username);
        Ok(removed)
    }
}

impl ModelSource for UserStore {
    fn objects(&self) -> SourceFuture<'_, Vec<Value>> {
        Box::pin(async move {
            self.list()
                .await
                .into_iter()
                .filter_map(|user: User| serde_json::to_value(user).ok())
                .collect()
        })
    }

    fn object(&self, id: u64) -> SourceFuture<'_, Option<Value>> {
        Box::pin(async move {
            self.get(id)
                .await
                .ok()
                .and_then(|user: User| serde_json::to_value(user).ok())
        })
    }
}
