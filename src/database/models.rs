use diesel::prelude::*;
use poise::serenity_prelude::{GuildId, RoleId};

use crate::modules::colors::input::Rgb;

#[derive(Queryable, Selectable, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::database::schema::colors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Color {
    pub id: i64,
    pub name: String,
    pub guild_id: i64,
    pub role_id: i64,
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Color {
    pub fn guild(&self) -> GuildId {
        GuildId::new(self.guild_id as u64)
    }

    pub fn role(&self) -> RoleId {
        RoleId::new(self.role_id as u64)
    }

    /// Channel values are range-checked before insert, so clamping never changes a stored color.
    pub fn rgb(&self) -> Rgb {
        let channel = |value: i32| value.clamp(0, 255) as u8;
        Rgb::new(channel(self.r), channel(self.g), channel(self.b))
    }
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::database::schema::colors)]
pub struct NewColor {
    pub name: String,
    pub guild_id: i64,
    pub role_id: i64,
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl NewColor {
    pub fn new(name: impl Into<String>, guild: GuildId, role: RoleId, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            guild_id: guild.get() as i64,
            role_id: role.get() as i64,
            r: rgb.r.into(),
            g: rgb.g.into(),
            b: rgb.b.into(),
        }
    }

    pub fn into_color(self, id: i64) -> Color {
        Color {
            id,
            name: self.name,
            guild_id: self.guild_id,
            role_id: self.role_id,
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}
