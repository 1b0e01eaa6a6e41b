use async_trait::async_trait;
use bson::doc;
use mongodb::{options::IndexOptions, IndexModel};
use tracing::{error, info};

use crate::model::user::User;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> RepositoryResult<Option<User>>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        let collection = db.collection::<User>("users");
        MongoUserRepository { collection }
    }

    /// Create the unique indexes on username and email. Duplicate writes
    /// that race past the service-level existence check fail here with
    /// E11000 and surface as AlreadyExists.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let unique = IndexOptions::builder().unique(true).build();
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(unique.clone())
                .build(),
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique)
                .build(),
        ];
        self.collection
            .create_indexes(indexes, None)
            .await
            .map_err(RepositoryError::from)?;
        info!("User indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(bson::oid::ObjectId::new());
        user.created_at = Some(chrono::Utc::now().to_rfc3339());
        let result = self.collection.insert_one(user.clone(), None).await;
        match result {
            Ok(_) => {
                info!("User inserted successfully");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))?;
        Ok(user)
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> RepositoryResult<Option<User>> {
        let filter = doc! { "$or": [ { "email": email }, { "username": username } ] };
        let user = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find user by email or username: {}", e))
        })?;
        Ok(user)
    }
}
