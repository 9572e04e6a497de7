use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude::{Colour, EditRole, GuildId, Http, RoleId, UserId};

use crate::BotError;

/// The role and membership calls the color commands need from the chat platform.
#[async_trait]
pub trait RoleGateway: Send + Sync {
    async fn create_role(&self, guild: GuildId, name: &str, colour: Colour) -> Result<RoleId, BotError>;

    async fn role_count(&self, guild: GuildId) -> Result<usize, BotError>;

    async fn move_role(&self, guild: GuildId, role: RoleId, position: u16) -> Result<(), BotError>;

    async fn role_exists(&self, guild: GuildId, role: RoleId) -> Result<bool, BotError>;

    async fn delete_role(&self, guild: GuildId, role: RoleId) -> Result<(), BotError>;

    async fn member_roles(&self, guild: GuildId, user: UserId) -> Result<Vec<RoleId>, BotError>;

    async fn add_member_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), BotError>;

    async fn remove_member_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), BotError>;
}

/// [`RoleGateway`] backed by the Discord REST API.
pub struct DiscordRoles {
    http: Arc<Http>,
}

impl DiscordRoles {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RoleGateway for DiscordRoles {
    async fn create_role(&self, guild: GuildId, name: &str, colour: Colour) -> Result<RoleId, BotError> {
        let role = guild
            .create_role(&*self.http, EditRole::new().name(name).colour(colour))
            .await?;
        Ok(role.id)
    }

    async fn role_count(&self, guild: GuildId) -> Result<usize, BotError> {
        Ok(guild.roles(&*self.http).await?.len())
    }

    async fn move_role(&self, guild: GuildId, role: RoleId, position: u16) -> Result<(), BotError> {
        guild.edit_role_position(&*self.http, role, position).await?;
        Ok(())
    }

    async fn role_exists(&self, guild: GuildId, role: RoleId) -> Result<bool, BotError> {
        Ok(guild.roles(&*self.http).await?.contains_key(&role))
    }

    async fn delete_role(&self, guild: GuildId, role: RoleId) -> Result<(), BotError> {
        guild.delete_role(&*self.http, role).await?;
        Ok(())
    }

    async fn member_roles(&self, guild: GuildId, user: UserId) -> Result<Vec<RoleId>, BotError> {
        Ok(guild.member(&*self.http, user).await?.roles)
    }

    async fn add_member_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), BotError> {
        self.http.add_member_role(guild, user, role, Some("Chosen color")).await?;
        Ok(())
    }

    async fn remove_member_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), BotError> {
        self.http.remove_member_role(guild, user, role, Some("Switched color")).await?;
        Ok(())
    }
}
