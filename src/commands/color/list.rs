use poise::serenity_prelude::CreateEmbed;

use crate::commands::color::{discord_roles, guild_id, reply_failure};
use crate::database::models::Color;
use crate::localization::manager::LocalizationManager;
use crate::modules::colors::service::ColorService;
use crate::util::pagination::{PAGE_SIZE, into_pages, paginate_embeds};
use crate::{BotError, Context};

/// Shows all colors
#[poise::command(slash_command, guild_only)]
pub async fn list(ctx: Context<'_>) -> Result<(), BotError> {
    let guild = guild_id(ctx)?;
    let roles = discord_roles(ctx);

    let colors = match ColorService::new(&*ctx.data().db, &roles).list(guild).await {
        Ok(colors) => colors,
        Err(e) => return reply_failure(ctx, e).await,
    };

    let locales = &ctx.data().locales;
    let embeds = colors.iter().map(|color| color_embed(color, locales)).collect();
    paginate_embeds(ctx, into_pages(embeds, PAGE_SIZE)).await
}

fn color_embed(color: &Color, locales: &LocalizationManager) -> CreateEmbed {
    let rgb = color.rgb();
    CreateEmbed::new()
        .title(&color.name)
        .color(rgb.colour())
        .field(locales.get("colors.list.red", &[]), rgb.r.to_string(), true)
        .field(locales.get("colors.list.green", &[]), rgb.g.to_string(), true)
        .field(locales.get("colors.list.blue", &[]), rgb.b.to_string(), true)
}
