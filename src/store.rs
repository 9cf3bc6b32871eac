//! Data access for users and todos.

use entity::{prelude::*, todo, user};
use sea_orm::{
    sea_query::Table,
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Schema,
    TransactionTrait,
};

use crate::error::ServerError;

/// Repository over the database file. Cheap to clone; every clone shares the pool.
#[derive(Debug, Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Store { db }
    }

    /// Connect to the database at `url`, e.g. `sqlite:///path/data.db?mode=rwc`.
    pub async fn connect(url: &str) -> Result<Self, DbErr> {
        Ok(Store::new(Database::connect(url).await?))
    }

    /// Create both tables if they are missing, dropping them first when `drop` is set.
    pub async fn init_schema(&self, drop: bool) -> Result<(), DbErr> {
        let backend = self.db.get_database_backend();

        if drop {
            // sqlite drops one table per statement
            let drop_todo = Table::drop().table(Todo).if_exists().to_owned();
            let drop_user = Table::drop().table(User).if_exists().to_owned();
            self.db.execute(backend.build(&drop_todo)).await?;
            self.db.execute(backend.build(&drop_user)).await?;
            tracing::info!("dropped all tables");
        }

        let schema = Schema::new(backend);
        let mut create_user = schema.create_table_from_entity(User);
        let mut create_todo = schema.create_table_from_entity(Todo);
        create_user.if_not_exists();
        create_todo.if_not_exists();
        self.db.execute(backend.build(&create_user)).await?;
        self.db.execute(backend.build(&create_todo)).await?;
        Ok(())
    }

    pub async fn create_user(&self, name: &str) -> Result<i32, DbErr> {
        let user = user::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        };
        Ok(User::insert(user).exec(&self.db).await?.last_insert_id)
    }

    pub async fn create_todo(&self, title: &str, kind: &str) -> Result<i32, DbErr> {
        let todo = todo::ActiveModel {
            title: Set(title.to_owned()),
            kind: Set(kind.to_owned()),
            ..Default::default()
        };
        Ok(Todo::insert(todo).exec(&self.db).await?.last_insert_id)
    }

    /// All todos, oldest first.
    pub async fn list_todos(&self) -> Result<Vec<todo::Model>, DbErr> {
        Todo::find()
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await
    }

    /// The user whose name is shown on every page, if one was ever created.
    pub async fn first_user(&self) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .order_by_asc(user::Column::Id)
            .one(&self.db)
            .await
    }

    pub async fn get_todo_or_fail(&self, id: i32) -> Result<todo::Model, ServerError> {
        Todo::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServerError::NotFound)
    }

    pub async fn update_todo(&self, id: i32, title: &str, kind: &str) -> Result<(), DbErr> {
        todo::ActiveModel {
            id: Unchanged(id),
            title: Set(title.to_owned()),
            kind: Set(kind.to_owned()),
        }
        .update(&self.db)
        .await?;
        Ok(())
    }

    pub async fn delete_todo(&self, id: i32) -> Result<(), DbErr> {
        Todo::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Insert one user and a batch of todos, committed together.
    pub async fn seed(&self, name: &str, todos: &[(&str, &str)]) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        User::insert(user::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        })
        .exec(&txn)
        .await?;

        let todos = todos.iter().map(|(title, kind)| todo::ActiveModel {
            title: Set((*title).to_owned()),
            kind: Set((*kind).to_owned()),
            ..Default::default()
        });
        Todo::insert_many(todos).exec(&txn).await?;

        txn.commit().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::sqlite_url;
    use tempfile::TempDir;

    /// A fresh store backed by a file in a temporary directory.
    pub(crate) async fn temp_store() -> (Store, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::connect(&sqlite_url(&dir.path().join("test.db")))
            .await
            .unwrap();
        store.init_schema(false).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn first_user_is_absent_on_empty_database() {
        let (store, _dir) = temp_store().await;
        assert_eq!(store.first_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn first_user_is_the_oldest_one() {
        let (store, _dir) = temp_store().await;
        store.create_user("first").await.unwrap();
        store.create_user("second").await.unwrap();
        let user = store.first_user().await.unwrap().unwrap();
        assert_eq!(user.name, "first");
    }

    #[tokio::test]
    async fn todos_are_listed_in_insertion_order() {
        let (store, _dir) = temp_store().await;
        let a = store.create_todo("OSTEP", "OS").await.unwrap();
        let b = store.create_todo("SICP", "PL").await.unwrap();
        assert!(b > a);

        let titles: Vec<_> = store
            .list_todos()
            .await
            .unwrap()
            .into_iter()
            .map(|todo| todo.title)
            .collect();
        assert_eq!(titles, ["OSTEP", "SICP"]);
    }

    #[tokio::test]
    async fn update_touches_only_the_given_todo() {
        let (store, _dir) = temp_store().await;
        let a = store.create_todo("OSTEP", "OS").await.unwrap();
        let b = store.create_todo("SICP", "PL").await.unwrap();

        store.update_todo(a, "CSAPP", "Systems").await.unwrap();

        let updated = store.get_todo_or_fail(a).await.unwrap();
        assert_eq!((updated.title.as_str(), updated.kind.as_str()), ("CSAPP", "Systems"));
        let untouched = store.get_todo_or_fail(b).await.unwrap();
        assert_eq!((untouched.title.as_str(), untouched.kind.as_str()), ("SICP", "PL"));
    }

    #[tokio::test]
    async fn deleted_todo_is_not_found() {
        let (store, _dir) = temp_store().await;
        let id = store.create_todo("OSTEP", "OS").await.unwrap();
        store.delete_todo(id).await.unwrap();

        assert!(matches!(
            store.get_todo_or_fail(id).await,
            Err(ServerError::NotFound)
        ));
        assert!(store.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn init_schema_is_idempotent_and_drop_clears_data() {
        let (store, _dir) = temp_store().await;
        store.seed("xsj", &[("OSTEP", "OS")]).await.unwrap();

        store.init_schema(false).await.unwrap();
        assert_eq!(store.list_todos().await.unwrap().len(), 1);

        store.init_schema(true).await.unwrap();
        assert!(store.list_todos().await.unwrap().is_empty());
        assert_eq!(store.first_user().await.unwrap(), None);
    }
}
