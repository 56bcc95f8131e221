use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::LikeExpr,
};

use crate::{
    entities::{movie, user, user_favorite},
    error::{AppError, AppResult},
    models::{MovieFilter, NewMovie},
};

#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Movies matching every filter that is present, by ascending id.
    pub async fn find_movies(&self, filter: &MovieFilter) -> AppResult<Vec<movie::Model>> {
        let mut cond = Condition::all();
        if let Some(title) = filter.title() {
            cond = cond.add(movie::Column::Title.like(contains(title)));
        }
        if let Some(description) = filter.description() {
            cond = cond.add(movie::Column::Description.like(contains(description)));
        }
        if let Some(genre) = filter.genre() {
            cond = cond.add(movie::Column::Genre.eq(genre));
        }

        let movies = movie::Entity::find()
            .filter(cond)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        tracing::debug!(matches = movies.len(), "movie query");
        Ok(movies)
    }

    pub async fn find_user(&self, id: i32) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn favorites_of(&self, user_id: i32) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .inner_join(user_favorite::Entity)
            .filter(user_favorite::Column::UserId.eq(user_id))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn create_movie(&self, new: NewMovie) -> AppResult<i32> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            description: Set(new.description),
            genre: Set(new.genre),
        };

        let res = movie::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::storage("Error creating movie", e))?;

        tracing::info!(id = res.last_insert_id, "movie created");
        Ok(res.last_insert_id)
    }
}

/// `LIKE` pattern matching `needle` anywhere, with wildcards in `needle`
/// taken literally.
fn contains(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait, Value};

    use super::*;

    #[test]
    fn contains_escapes_wildcards() {
        let stmt = movie::Entity::find()
            .filter(movie::Column::Title.like(contains("50%_off\\")))
            .build(DbBackend::Sqlite);
        assert!(stmt.sql.contains("LIKE"), "{}", stmt.sql);
        assert!(stmt.sql.contains("ESCAPE"), "{}", stmt.sql);
        let values = stmt.values.expect("bound values").0;
        assert_eq!(values, vec![Value::from(r"%50\%\_off\\%")]);
    }

    #[test]
    fn favorites_join_on_movie_id() {
        let sql = movie::Entity::find()
            .inner_join(user_favorite::Entity)
            .filter(user_favorite::Column::UserId.eq(7))
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(
            sql.contains(r#"INNER JOIN "user_favorites" ON "movies"."id" = "user_favorites"."movie_id""#),
            "{sql}"
        );
        assert!(sql.contains(r#""user_favorites"."user_id" = 7"#), "{sql}");
    }
}
