use std::collections::HashSet;

use log::{info, warn};
use poise::serenity_prelude::{GuildId, RoleId, UserId};
use thiserror::Error;

use crate::BotError;
use crate::database::colors::ColorStore;
use crate::database::models::{Color, NewColor};
use crate::modules::colors::gateway::RoleGateway;
use crate::modules::colors::input::ColorDraft;

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("color values are not numbers")]
    InvalidFormat,
    #[error("color values must be between 0 and 255")]
    OutOfRange,
    #[error("color names must be 3 to 10 characters long, got {length}")]
    InvalidName { length: usize },
    #[error("color `{0}` already exists")]
    DuplicateName(String),
    #[error("color `{0}` does not exist")]
    NotFound(String),
    #[error("this server has no colors")]
    Empty,
    #[error("color store failed")]
    Store(#[from] diesel::result::Error),
    #[error("chat platform request failed")]
    Platform(#[source] BotError),
}

impl ColorError {
    /// Translation key of the notice shown to the user, or `None` for failures
    /// that belong to the error handler instead.
    pub fn notice_key(&self) -> Option<&'static str> {
        match self {
            ColorError::InvalidFormat => Some("colors.create.invalid_format"),
            ColorError::OutOfRange => Some("colors.create.out_of_range"),
            ColorError::InvalidName { .. } => Some("colors.create.invalid_name"),
            ColorError::DuplicateName(_) => Some("colors.create.duplicate"),
            ColorError::NotFound(_) => Some("colors.not_found"),
            ColorError::Empty => Some("colors.list.empty"),
            ColorError::Store(_) | ColorError::Platform(_) => None,
        }
    }
}

/// Keeps color records and their Discord roles in step.
pub struct ColorService<'a> {
    store: &'a dyn ColorStore,
    roles: &'a dyn RoleGateway,
}

impl<'a> ColorService<'a> {
    pub fn new(store: &'a dyn ColorStore, roles: &'a dyn RoleGateway) -> Self {
        Self { store, roles }
    }

    /// Creates the role first so a failed platform call never leaves a row behind.
    pub async fn create(&self, guild: GuildId, draft: &ColorDraft) -> Result<Color, ColorError> {
        let valid = draft.validate()?;

        if self.store.get_color(guild, &valid.name).await?.is_some() {
            return Err(ColorError::DuplicateName(valid.name));
        }

        let role = self
            .roles
            .create_role(guild, &role_name(&valid.name), valid.rgb.colour())
            .await
            .map_err(ColorError::Platform)?;

        let role_count = self.roles.role_count(guild).await.map_err(ColorError::Platform)?;
        let position = u16::try_from(role_count.saturating_sub(2)).unwrap_or(u16::MAX);
        self.roles
            .move_role(guild, role, position)
            .await
            .map_err(ColorError::Platform)?;

        let new_color = NewColor::new(valid.name, guild, role, valid.rgb);
        let id = self.store.insert_color(new_color.clone()).await?;
        let color = new_color.into_color(id);

        info!("Created color {} (role {}) in guild {}", color.name, role, guild);
        Ok(color)
    }

    /// Deletes the record, then the role if Discord still has it. Role cleanup is best-effort.
    pub async fn delete(&self, guild: GuildId, color_name: &str) -> Result<Color, ColorError> {
        let color = self.find(guild, color_name).await?;

        self.store.delete_color(guild, &color.name).await?;

        let role = color.role();
        match self.roles.role_exists(guild, role).await {
            Ok(true) => {
                if let Err(e) = self.roles.delete_role(guild, role).await {
                    warn!("Could not delete role {} of color {} in guild {}: {}", role, color.name, guild, e);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Could not look up role {} of color {} in guild {}: {}", role, color.name, guild, e),
        }

        info!("Deleted color {} in guild {}", color.name, guild);
        Ok(color)
    }

    /// Gives `user` the chosen color after taking away every other color role they hold.
    /// The first failing platform call aborts; roles removed before it stay removed.
    pub async fn choose(&self, guild: GuildId, user: UserId, color_name: &str) -> Result<Color, ColorError> {
        let color = self.find(guild, color_name).await?;

        let color_roles: HashSet<RoleId> = self
            .store
            .list_colors(guild)
            .await?
            .iter()
            .map(Color::role)
            .collect();

        let held = self.roles.member_roles(guild, user).await.map_err(ColorError::Platform)?;
        for role in held.into_iter().filter(|role| color_roles.contains(role)) {
            self.roles
                .remove_member_role(guild, user, role)
                .await
                .map_err(ColorError::Platform)?;
        }

        self.roles
            .add_member_role(guild, user, color.role())
            .await
            .map_err(ColorError::Platform)?;

        Ok(color)
    }

    pub async fn list(&self, guild: GuildId) -> Result<Vec<Color>, ColorError> {
        let colors = self.store.list_colors(guild).await?;
        if colors.is_empty() {
            return Err(ColorError::Empty);
        }
        Ok(colors)
    }

    /// Drops records whose role was deleted on Discord.
    pub async fn forget_role(&self, guild: GuildId, role: RoleId) -> Result<usize, ColorError> {
        let removed = self.store.delete_colors_for_role(guild, role).await?;
        if removed > 0 {
            info!("Removed {} color(s) of deleted role {} in guild {}", removed, role, guild);
        }
        Ok(removed)
    }

    async fn find(&self, guild: GuildId, color_name: &str) -> Result<Color, ColorError> {
        self.store
            .get_color(guild, color_name)
            .await?
            .ok_or_else(|| ColorError::NotFound(color_name.to_string()))
    }
}

fn role_name(color_name: &str) -> String {
    format!("Color: {color_name}")
}
