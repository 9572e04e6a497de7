use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::QueryResult;
use diesel_async::RunQueryDsl;
use poise::serenity_prelude::{GuildId, RoleId};

use crate::database::manager::DbManager;
use crate::database::models::{Color, NewColor};
use crate::database::schema::colors;

const CREATE_COLORS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS colors (
        id INTEGER NOT NULL UNIQUE PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        guild_id INTEGER NOT NULL,
        role_id INTEGER NOT NULL,
        r INTEGER NOT NULL,
        g INTEGER NOT NULL,
        b INTEGER NOT NULL
    )
";

/// Storage for color records, keyed by guild and name.
///
/// Nothing here enforces name uniqueness; callers check with [`ColorStore::get_color`] first.
#[async_trait]
pub trait ColorStore: Send + Sync {
    /// Creates the `colors` table if it does not exist yet.
    async fn ensure_schema(&self) -> QueryResult<()>;

    /// All colors of a guild in insertion order.
    async fn list_colors(&self, guild: GuildId) -> QueryResult<Vec<Color>>;

    async fn get_color(&self, guild: GuildId, color_name: &str) -> QueryResult<Option<Color>>;

    /// Appends a row and returns the id the database assigned to it.
    async fn insert_color(&self, color: NewColor) -> QueryResult<i64>;

    /// Removes the color if present. Missing colors are not an error.
    async fn delete_color(&self, guild: GuildId, color_name: &str) -> QueryResult<()>;

    /// Removes every color pointing at `role` and returns how many rows went away.
    async fn delete_colors_for_role(&self, guild: GuildId, role: RoleId) -> QueryResult<usize>;
}

#[async_trait]
impl ColorStore for DbManager {
    async fn ensure_schema(&self) -> QueryResult<()> {
        let mut conn = self.lock().await;
        diesel::sql_query(CREATE_COLORS_TABLE).execute(&mut *conn).await?;
        Ok(())
    }

    async fn list_colors(&self, guild: GuildId) -> QueryResult<Vec<Color>> {
        let mut conn = self.lock().await;
        colors::table
            .filter(colors::guild_id.eq(guild.get() as i64))
            .order(colors::id.asc())
            .select(Color::as_select())
            .load(&mut *conn)
            .await
    }

    async fn get_color(&self, guild: GuildId, color_name: &str) -> QueryResult<Option<Color>> {
        let mut conn = self.lock().await;
        colors::table
            .filter(colors::guild_id.eq(guild.get() as i64))
            .filter(colors::name.eq(color_name.to_owned()))
            .select(Color::as_select())
            .first(&mut *conn)
            .await
            .optional()
    }

    async fn insert_color(&self, color: NewColor) -> QueryResult<i64> {
        let mut conn = self.lock().await;
        diesel::insert_into(colors::table)
            .values(color)
            .returning(colors::id)
            .get_result(&mut *conn)
            .await
    }

    async fn delete_color(&self, guild: GuildId, color_name: &str) -> QueryResult<()> {
        let mut conn = self.lock().await;
        diesel::delete(
            colors::table
                .filter(colors::guild_id.eq(guild.get() as i64))
                .filter(colors::name.eq(color_name.to_owned())),
        )
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn delete_colors_for_role(&self, guild: GuildId, role: RoleId) -> QueryResult<usize> {
        let mut conn = self.lock().await;
        diesel::delete(
            colors::table
                .filter(colors::guild_id.eq(guild.get() as i64))
                .filter(colors::role_id.eq(role.get() as i64)),
        )
        .execute(&mut *conn)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::colors::input::Rgb;

    const GUILD: GuildId = GuildId::new(41);
    const OTHER_GUILD: GuildId = GuildId::new(42);

    async fn store() -> DbManager {
        let db = DbManager::new(":memory:").await.expect("in-memory database should open");
        db.ensure_schema().await.expect("schema should be created");
        db
    }

    fn new_color(name: &str, guild: GuildId, role: u64) -> NewColor {
        NewColor::new(name, guild, RoleId::new(role), Rgb::new(12, 34, 56))
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let db = store().await;
        db.insert_color(new_color("teal", GUILD, 1)).await.unwrap();

        db.ensure_schema().await.expect("second schema check should succeed");

        assert_eq!(db.list_colors(GUILD).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn inserted_color_reads_back_identically() {
        let db = store().await;
        let color = new_color("teal", GUILD, 7);

        let id = db.insert_color(color.clone()).await.unwrap();
        let stored = db.get_color(GUILD, "teal").await.unwrap();

        assert_eq!(stored, Some(color.into_color(id)));
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let db = store().await;
        let first = db.insert_color(new_color("first", GUILD, 1)).await.unwrap();
        db.delete_color(GUILD, "first").await.unwrap();
        let second = db.insert_color(new_color("second", GUILD, 2)).await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn get_color_requires_both_keys() {
        let db = store().await;
        db.insert_color(new_color("teal", GUILD, 1)).await.unwrap();

        assert!(db.get_color(OTHER_GUILD, "teal").await.unwrap().is_none());
        assert!(db.get_color(GUILD, "Teal").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_scoped_to_guild_in_insertion_order() {
        let db = store().await;
        db.insert_color(new_color("zeta", GUILD, 1)).await.unwrap();
        db.insert_color(new_color("other", OTHER_GUILD, 2)).await.unwrap();
        db.insert_color(new_color("alpha", GUILD, 3)).await.unwrap();

        let names: Vec<_> = db
            .list_colors(GUILD)
            .await
            .unwrap()
            .into_iter()
            .map(|color| color.name)
            .collect();

        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[tokio::test]
    async fn list_of_empty_guild_is_empty() {
        let db = store().await;
        assert!(db.list_colors(GUILD).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_color_is_a_no_op() {
        let db = store().await;
        db.insert_color(new_color("teal", GUILD, 1)).await.unwrap();

        db.delete_color(GUILD, "nothing").await.expect("missing color should not error");
        db.delete_color(OTHER_GUILD, "teal").await.unwrap();

        assert!(db.get_color(GUILD, "teal").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_removes_only_the_named_color() {
        let db = store().await;
        db.insert_color(new_color("teal", GUILD, 1)).await.unwrap();
        db.insert_color(new_color("coral", GUILD, 2)).await.unwrap();

        db.delete_color(GUILD, "teal").await.unwrap();

        let remaining = db.list_colors(GUILD).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "coral");
    }

    #[tokio::test]
    async fn delete_by_role_removes_matching_rows() {
        let db = store().await;
        db.insert_color(new_color("teal", GUILD, 5)).await.unwrap();
        db.insert_color(new_color("coral", GUILD, 6)).await.unwrap();

        assert_eq!(db.delete_colors_for_role(GUILD, RoleId::new(5)).await.unwrap(), 1);
        assert_eq!(db.delete_colors_for_role(GUILD, RoleId::new(5)).await.unwrap(), 0);
        assert_eq!(db.list_colors(GUILD).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_database_fails_to_open() {
        let result = DbManager::new("/nonexistent-directory/colors.db").await;
        assert!(result.is_err());
    }
}
