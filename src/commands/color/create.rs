use poise::Modal;

use crate::commands::color::{discord_roles, guild_id, reply_failure, reply_notice};
use crate::modules::colors::input::ColorDraft;
use crate::modules::colors::service::ColorService;
use crate::util::color::BotColors;
use crate::{ApplicationContext, BotError};

#[derive(Debug, Modal)]
#[name = "Create color"]
struct CreateColorModal {
    #[name = "Name"]
    #[min_length = 3]
    #[max_length = 10]
    name: String,
    #[name = "Red (0-255)"]
    #[min_length = 1]
    #[max_length = 3]
    red: String,
    #[name = "Green (0-255)"]
    #[min_length = 1]
    #[max_length = 3]
    green: String,
    #[name = "Blue (0-255)"]
    #[min_length = 1]
    #[max_length = 3]
    blue: String,
}

impl From<CreateColorModal> for ColorDraft {
    fn from(modal: CreateColorModal) -> Self {
        ColorDraft {
            name: modal.name,
            red: modal.red,
            green: modal.green,
            blue: modal.blue,
        }
    }
}

/// Creates a new color (details can be set in the popup)
#[poise::command(slash_command, guild_only)]
pub async fn create(ctx: ApplicationContext<'_>) -> Result<(), BotError> {
    let Some(modal) = CreateColorModal::execute(ctx).await? else {
        return Ok(());
    };

    let ctx = poise::Context::Application(ctx);
    let guild = guild_id(ctx)?;
    let roles = discord_roles(ctx);
    let draft = ColorDraft::from(modal);

    match ColorService::new(&*ctx.data().db, &roles).create(guild, &draft).await {
        Ok(_) => reply_notice(ctx, "colors.create.success", BotColors::Success).await,
        Err(e) => reply_failure(ctx, e).await,
    }
}
