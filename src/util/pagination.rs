use std::time::Duration;

use poise::CreateReply;
use poise::serenity_prelude::{
    ButtonStyle, ComponentInteractionCollector, CreateActionRow, CreateButton, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::{BotError, Context};

pub(crate) const INTERACTION_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Turn {
    Previous,
    Next,
}

/// Index of the page after `turn`, wrapping at both ends.
pub(crate) fn turn_page(current: usize, page_count: usize, turn: Turn) -> usize {
    if page_count == 0 {
        return 0;
    }
    match turn {
        Turn::Previous => current.checked_sub(1).unwrap_or(page_count - 1),
        Turn::Next => (current + 1) % page_count,
    }
}

pub(crate) fn into_pages<T>(items: Vec<T>, page_size: usize) -> Vec<Vec<T>> {
    let mut pages = Vec::new();
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        pages.push(items.by_ref().take(page_size).collect());
    }
    pages
}

fn page_buttons(prev_id: &str, next_id: &str, current: usize, page_count: usize) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(prev_id).emoji('◀').style(ButtonStyle::Secondary),
        CreateButton::new(format!("{next_id}-label"))
            .label(format!("{}/{}", current + 1, page_count))
            .style(ButtonStyle::Secondary)
            .disabled(true),
        CreateButton::new(next_id).emoji('▶').style(ButtonStyle::Secondary),
    ])
}

/// Sends `pages` of embeds and flips through them on button presses until nobody
/// presses anything for [`INTERACTION_TIMEOUT`].
pub(crate) async fn paginate_embeds(ctx: Context<'_>, pages: Vec<Vec<CreateEmbed>>) -> Result<(), BotError> {
    let Some(first) = pages.first() else {
        return Ok(());
    };

    let ctx_id = ctx.id();
    let prev_id = format!("{ctx_id}-prev");
    let next_id = format!("{ctx_id}-next");

    let mut reply = first.iter().cloned().fold(CreateReply::default(), CreateReply::embed);
    if pages.len() > 1 {
        reply = reply.components(vec![page_buttons(&prev_id, &next_id, 0, pages.len())]);
    }
    ctx.send(reply).await?;

    if pages.len() < 2 {
        return Ok(());
    }

    let mut current = 0;
    while let Some(press) = ComponentInteractionCollector::new(ctx.serenity_context())
        .author_id(ctx.author().id)
        .filter({
            let ctx_id = ctx_id.to_string();
            move |press| press.data.custom_id.starts_with(&ctx_id)
        })
        .timeout(INTERACTION_TIMEOUT)
        .await
    {
        let turn = if press.data.custom_id == next_id {
            Turn::Next
        } else if press.data.custom_id == prev_id {
            Turn::Previous
        } else {
            continue;
        };
        current = turn_page(current, pages.len(), turn);

        press
            .create_response(
                ctx.serenity_context(),
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embeds(pages[current].clone())
                        .components(vec![page_buttons(&prev_id, &next_id, current, pages.len())]),
                ),
            )
            .await?;
    }

    Ok(())
}
