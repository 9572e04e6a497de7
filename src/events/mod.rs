mod ready;
mod role_delete;

use poise::serenity_prelude as serenity;
use crate::Data;
use crate::BotError;

pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, Data, BotError>,
    data: &Data,
) -> Result<(), BotError> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            ready::handle(ctx, framework, data, data_about_bot).await
        },
        serenity::FullEvent::GuildRoleDelete { guild_id, removed_role_id, .. } => {
            role_delete::handle(ctx, data, *guild_id, *removed_role_id).await
        },
        _ => Ok(()),
    }
}
