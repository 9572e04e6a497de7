use poise::serenity_prelude::{Context, GuildId, RoleId};
use crate::modules::colors::gateway::DiscordRoles;
use crate::modules::colors::service::ColorService;
use crate::{BotError, Data};

/// A color whose role was deleted by hand can never be chosen again, so its record goes too.
pub async fn handle(
    ctx: &Context,
    data: &Data,
    guild_id: GuildId,
    role_id: RoleId,
) -> Result<(), BotError> {
    let roles = DiscordRoles::new(ctx.http.clone());
    ColorService::new(&*data.db, &roles).forget_role(guild_id, role_id).await?;
    Ok(())
}
