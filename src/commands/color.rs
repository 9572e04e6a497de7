use poise::{CreateReply, command};
use poise::serenity_prelude::{CreateEmbed, GuildId};

use crate::modules::colors::gateway::DiscordRoles;
use crate::modules::colors::service::{ColorError, ColorService};
use crate::util::color::BotColors;
use crate::{BotError, Context};

mod create;
mod list;

pub use create::create;
pub use list::list;

/// Create, list and pick color roles
#[command(
    slash_command,
    guild_only,
    subcommands("create", "delete", "choose", "list", "edit"),
    subcommand_required
)]
pub async fn color(_: Context<'_>) -> Result<(), BotError> {
    Ok(())
}

/// Deletes a color
#[command(slash_command, guild_only)]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "Name of the color"] color: String,
) -> Result<(), BotError> {
    let guild = guild_id(ctx)?;
    let roles = discord_roles(ctx);

    match ColorService::new(&*ctx.data().db, &roles).delete(guild, &color).await {
        Ok(_) => reply_notice(ctx, "colors.delete.success", BotColors::Success).await,
        Err(e) => reply_failure(ctx, e).await,
    }
}

/// Lets you choose a color
#[command(slash_command, guild_only)]
pub async fn choose(
    ctx: Context<'_>,
    #[description = "Name of the color"] color: String,
) -> Result<(), BotError> {
    let guild = guild_id(ctx)?;
    let roles = discord_roles(ctx);

    match ColorService::new(&*ctx.data().db, &roles)
        .choose(guild, ctx.author().id, &color)
        .await
    {
        Ok(_) => reply_notice(ctx, "colors.choose.success", BotColors::Success).await,
        Err(e) => reply_failure(ctx, e).await,
    }
}

/// Lets you edit a color
#[command(slash_command, guild_only)]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Name of the color"]
    #[rename = "color"]
    _color: String,
) -> Result<(), BotError> {
    reply_notice(ctx, "colors.edit.coming_soon", BotColors::Default).await
}

pub(crate) fn guild_id(ctx: Context<'_>) -> Result<GuildId, BotError> {
    ctx.guild_id().ok_or_else(|| "guild-only command invoked outside a guild".into())
}

pub(crate) fn discord_roles(ctx: Context<'_>) -> DiscordRoles {
    DiscordRoles::new(ctx.serenity_context().http.clone())
}

pub(crate) async fn reply_notice(ctx: Context<'_>, key: &str, colour: BotColors) -> Result<(), BotError> {
    let embed = CreateEmbed::new()
        .title(ctx.data().locales.get(key, &[]))
        .color(colour.color());
    ctx.send(CreateReply::default().embed(embed).ephemeral(true)).await?;
    Ok(())
}

/// Tells the user about rejected input; anything else goes to the error handler.
pub(crate) async fn reply_failure(ctx: Context<'_>, error: ColorError) -> Result<(), BotError> {
    match error.notice_key() {
        Some(key) => reply_notice(ctx, key, BotColors::Error).await,
        None => Err(error.into()),
    }
}
