use std::sync::atomic::Ordering;
use log::info;
use poise::serenity_prelude::{Context, Ready};
use crate::{BotError, Data};

pub async fn handle(
    ctx: &Context,
    framework: poise::FrameworkContext<'_, Data, BotError>,
    data: &Data,
    data_about_bot: &Ready,
) -> Result<(), BotError> {
    if data.has_started.swap(true, Ordering::Relaxed) {
        info!("Reconnected as {}", data_about_bot.user.name);
        return Ok(());
    }

    let commands = &framework.options.commands;
    poise::builtins::register_globally(ctx, commands).await?;
    info!("Successfully registered {} slash command(s)", commands.len());

    info!("Logged in as {} in {} guild(s)", data_about_bot.user.name, data_about_bot.guilds.len());
    Ok(())
}
