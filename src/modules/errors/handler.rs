use log::{error, warn};
use poise::{CreateReply, FrameworkError};
use poise::serenity_prelude::{
    CommandInteraction, Context as SerenityContext, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, Timestamp,
};

use crate::modules::errors::failure::{CommandFailure, truncate_report};
use crate::util::color::BotColors;
use crate::util::timestamp::{Format, TimestampExt};
use crate::{BotError, Context, Data};

pub async fn on_error(error: FrameworkError<'_, Data, BotError>) {
    let unclassified = match classify(error) {
        Ok((ctx, failure)) => return handle_failure(ctx, failure).await,
        Err(unclassified) => unclassified,
    };

    match unclassified {
        FrameworkError::Setup { error, .. } => error!("Failed to set up the framework: {}", error),
        FrameworkError::EventHandler { error, .. } => error!("Event handler failed: {}", error),
        FrameworkError::UnknownInteraction { ctx, framework, interaction, .. } => {
            let failure = CommandFailure::CommandNotFound(interaction.data.name.clone());
            if let Err(e) = answer_interaction(ctx, framework.user_data, interaction, &failure).await {
                warn!("Could not answer unknown interaction {}: {}", interaction.data.name, e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Sorts framework errors that happened inside a command invocation into a [`CommandFailure`].
/// Everything else is handed back.
fn classify(error: FrameworkError<'_, Data, BotError>) -> Result<(Context<'_>, CommandFailure), FrameworkError<'_, Data, BotError>> {
    let classified = match error {
        FrameworkError::Command { error, ctx, .. } => (ctx, CommandFailure::from_error(error)),
        FrameworkError::CommandCheckFailed { error, ctx, .. } => (
            ctx,
            error.map_or(CommandFailure::CheckFailed, CommandFailure::from_error),
        ),
        FrameworkError::CommandPanic { payload, ctx, .. } => (
            ctx,
            CommandFailure::Unexpected(payload.unwrap_or_else(|| "command panicked".to_string())),
        ),
        FrameworkError::ArgumentParse { input: None, ctx, .. } => (ctx, CommandFailure::MissingArgument),
        FrameworkError::ArgumentParse { error, input: Some(input), ctx, .. } => (
            ctx,
            CommandFailure::Unexpected(format!("could not parse argument `{input}`: {error}")),
        ),
        FrameworkError::SubcommandRequired { ctx, .. } => (ctx, CommandFailure::MissingArgument),
        FrameworkError::CommandStructureMismatch { description, ctx, .. } => (
            poise::Context::Application(ctx),
            CommandFailure::Unexpected(format!("command structure mismatch: {description}")),
        ),
        FrameworkError::CooldownHit { remaining_cooldown, ctx, .. } => (ctx, CommandFailure::Cooldown(remaining_cooldown)),
        FrameworkError::MissingBotPermissions { missing_permissions, ctx, .. } => {
            warn!("Missing bot permissions {} for /{}", missing_permissions, ctx.command().qualified_name);
            (ctx, CommandFailure::MissingPermissions)
        }
        FrameworkError::MissingUserPermissions { ctx, .. } => (ctx, CommandFailure::MissingPermissions),
        FrameworkError::NotAnOwner { ctx, .. } => (ctx, CommandFailure::NotOwner),
        FrameworkError::GuildOnly { ctx, .. } => (ctx, CommandFailure::GuildOnly),
        FrameworkError::DmOnly { ctx, .. } | FrameworkError::NsfwOnly { ctx, .. } => (ctx, CommandFailure::CheckFailed),
        other => return Err(other),
    };
    Ok(classified)
}

async fn handle_failure(ctx: Context<'_>, failure: CommandFailure) {
    let locales = &ctx.data().locales;
    let embed = failure.notice(locales).embed(ctx.author().id, locales);

    if let Err(e) = deliver(ctx, embed).await {
        error!("Could not deliver error notice for /{}: {}", ctx.command().qualified_name, e);
    }

    if let CommandFailure::Unexpected(detail) = &failure {
        error!("Unexpected error in /{}: {}", ctx.command().qualified_name, detail);
        if let Err(e) = report_to_owner(ctx, detail).await {
            error!("Could not report error to the owner: {}", e);
        }
    }
}

/// Replies privately; if the interaction can no longer be answered, posts in the channel instead.
async fn deliver(ctx: Context<'_>, embed: CreateEmbed) -> Result<(), BotError> {
    if let Err(e) = ctx.send(CreateReply::default().embed(embed.clone()).ephemeral(true)).await {
        warn!("Ephemeral reply failed, falling back to channel message: {}", e);
        ctx.channel_id().send_message(ctx.serenity_context(), CreateMessage::new().embed(embed)).await?;
    }
    Ok(())
}

async fn report_to_owner(ctx: Context<'_>, detail: &str) -> Result<(), BotError> {
    let data = ctx.data();
    let locales = &data.locales;
    let guild = ctx.guild_id().map_or_else(|| "DM".to_string(), |id| id.to_string());
    let channel = ctx.channel_id().to_string();

    let embed = CreateEmbed::new()
        .title(locales.get("errors.report.title", &[guild.as_str(), channel.as_str()]))
        .description(truncate_report(detail))
        .color(BotColors::Report.color())
        .field(locales.get("errors.report.command", &[]), format!("/{}", ctx.command().qualified_name), true)
        .field(
            locales.get("errors.report.time", &[]),
            Timestamp::now().to_discord_timestamp(Format::LongDateShortTime),
            true,
        );

    let dm = data.owner_id.create_dm_channel(ctx.serenity_context()).await?;
    dm.id.send_message(ctx.serenity_context(), CreateMessage::new().embed(embed)).await?;
    Ok(())
}

async fn answer_interaction(
    ctx: &SerenityContext,
    data: &Data,
    interaction: &CommandInteraction,
    failure: &CommandFailure,
) -> Result<(), BotError> {
    let embed = failure.notice(&data.locales).embed(interaction.user.id, &data.locales);
    interaction
        .create_response(
            ctx,
            CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(embed).ephemeral(true)),
        )
        .await?;
    Ok(())
}
