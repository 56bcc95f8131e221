//! Table layouts for the movie catalog.
//!
//! Every statement carries `IF NOT EXISTS`, so applying the whole set to an
//! existing database is a no-op.

use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

/// Values accepted by the `movies.genre` CHECK constraint.
pub const GENRES: [&str; 4] = ["action", "comedy", "drama", "sci-fi"];

/// All table statements, parents before children.
pub fn create_statements() -> Vec<TableCreateStatement> {
    vec![create_users(), create_movies(), create_user_favorites()]
}

pub fn create_users() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(pk_auto(Users::Id))
        .col(string(Users::Name))
        .to_owned()
}

pub fn create_movies() -> TableCreateStatement {
    Table::create()
        .table(Movies::Table)
        .if_not_exists()
        .col(pk_auto(Movies::Id))
        .col(string(Movies::Title))
        .col(string_null(Movies::Description))
        .col(string(Movies::Genre).check(Expr::col(Movies::Genre).is_in(GENRES)))
        .to_owned()
}

pub fn create_user_favorites() -> TableCreateStatement {
    Table::create()
        .table(UserFavorites::Table)
        .if_not_exists()
        .col(integer(UserFavorites::UserId))
        .col(integer(UserFavorites::MovieId))
        .primary_key(Index::create().col(UserFavorites::UserId).col(UserFavorites::MovieId))
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_favorites_user")
                .from(UserFavorites::Table, UserFavorites::UserId)
                .to(Users::Table, Users::Id),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_favorites_movie")
                .from(UserFavorites::Table, UserFavorites::MovieId)
                .to(Movies::Table, Movies::Id),
        )
        .to_owned()
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Movies {
    Table,
    Id,
    Title,
    Description,
    Genre,
}

#[derive(DeriveIden)]
pub enum UserFavorites {
    Table,
    UserId,
    MovieId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_is_guarded() {
        for stmt in create_statements() {
            let sql = stmt.to_string(SqliteQueryBuilder);
            assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS"), "{sql}");
        }
    }

    #[test]
    fn genre_is_checked() {
        let sql = create_movies().to_string(SqliteQueryBuilder);
        assert!(sql.contains("CHECK"), "{sql}");
        for genre in GENRES {
            assert!(sql.contains(&format!("'{genre}'")), "{sql}");
        }
    }

    #[test]
    fn favorites_reference_both_parents() {
        let sql = create_user_favorites().to_string(SqliteQueryBuilder);
        assert!(sql.contains("PRIMARY KEY"), "{sql}");
        assert!(sql.contains("REFERENCES \"users\""), "{sql}");
        assert!(sql.contains("REFERENCES \"movies\""), "{sql}");
    }
}
