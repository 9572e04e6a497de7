use std::error::Error as StdError;
use std::time::Duration;

use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, Timestamp, UserId};
use thiserror::Error;

use crate::BotError;
use crate::localization::manager::LocalizationManager;
use crate::util::color::BotColors;
use crate::util::timestamp::relative_from_now;

/// Longest failure detail forwarded to the owner before it gets cut off.
pub const REPORT_LIMIT: usize = 4050;

/// Every way a command can fail that the user gets told about.
///
/// Commands and checks may return one of these directly (for example [`CommandFailure::MissingRole`]);
/// the error handler unwraps it instead of treating it as unexpected.
#[derive(Debug, Error)]
pub enum CommandFailure {
    #[error("unknown command `{0}`")]
    CommandNotFound(String),
    #[error("missing permissions")]
    MissingPermissions,
    #[error("missing role `{0}`")]
    MissingRole(String),
    #[error("missing any of the required roles")]
    MissingAnyRole,
    #[error("command on cooldown for another {0:?}")]
    Cooldown(Duration),
    #[error("command is reserved for the bot owner")]
    NotOwner,
    #[error("missing required argument")]
    MissingArgument,
    #[error("command check failed")]
    CheckFailed,
    #[error("guild-only command used outside a guild")]
    GuildOnly,
    #[error("{0}")]
    Unexpected(String),
}

/// Title and description shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl CommandFailure {
    pub fn from_error(error: BotError) -> Self {
        match error.downcast::<CommandFailure>() {
            Ok(failure) => *failure,
            Err(error) => CommandFailure::Unexpected(describe_error(&*error)),
        }
    }

    fn key(&self) -> &'static str {
        match self {
            CommandFailure::CommandNotFound(_) => "errors.command_not_found",
            CommandFailure::MissingPermissions => "errors.missing_permissions",
            CommandFailure::MissingRole(_) => "errors.missing_role",
            CommandFailure::MissingAnyRole => "errors.missing_any_role",
            CommandFailure::Cooldown(_) => "errors.cooldown",
            CommandFailure::NotOwner => "errors.not_owner",
            CommandFailure::MissingArgument => "errors.missing_argument",
            CommandFailure::CheckFailed => "errors.check_failed",
            CommandFailure::GuildOnly => "errors.guild_only",
            CommandFailure::Unexpected(_) => "errors.unexpected",
        }
    }

    pub fn notice(&self, locales: &LocalizationManager) -> Notice {
        let key = self.key();
        let param = match self {
            CommandFailure::CommandNotFound(command) => Some(command.clone()),
            CommandFailure::MissingRole(role) => Some(role.clone()),
            CommandFailure::Cooldown(remaining) => Some(relative_from_now(*remaining)),
            _ => None,
        };
        let params: Vec<&str> = param.as_deref().into_iter().collect();

        Notice {
            title: locales.get(&format!("{key}.title"), &[]),
            description: locales.get(&format!("{key}.description"), &params),
        }
    }

    pub fn is_unexpected(&self) -> bool {
        matches!(self, CommandFailure::Unexpected(_))
    }
}

impl Notice {
    pub fn embed(&self, author: UserId, locales: &LocalizationManager) -> CreateEmbed {
        CreateEmbed::new()
            .title(&self.title)
            .description(&self.description)
            .color(BotColors::Error.color())
            .footer(CreateEmbedFooter::new(locales.get("errors.footer", &[author.to_string().as_str()])))
            .timestamp(Timestamp::now())
    }
}

/// The error followed by its whole source chain, one cause per line.
pub fn describe_error(error: &(dyn StdError + 'static)) -> String {
    let mut detail = format!("{error:?}");
    let mut source = error.source();
    while let Some(cause) = source {
        detail.push_str(&format!("\nCaused by: {cause}"));
        source = cause.source();
    }
    detail
}

pub fn truncate_report(detail: &str) -> String {
    match detail.char_indices().nth(REPORT_LIMIT) {
        Some((cut, _)) => format!("{}...", &detail[..cut]),
        None => detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::manager::Language;
    use crate::modules::colors::service::ColorError;
    use assert_matches::assert_matches;

    fn locales() -> LocalizationManager {
        LocalizationManager::new(Language::English).unwrap()
    }

    #[test]
    fn wrapped_failures_are_unwrapped() {
        let error: BotError = Box::new(CommandFailure::MissingRole("Moderator".into()));
        assert_matches!(CommandFailure::from_error(error), CommandFailure::MissingRole(role) if role == "Moderator");
    }

    #[test]
    fn foreign_errors_are_unexpected_with_their_causes() {
        let error: BotError = Box::new(ColorError::Platform("gateway closed".into()));
        let failure = CommandFailure::from_error(error);

        assert!(failure.is_unexpected());
        assert_matches!(failure, CommandFailure::Unexpected(detail) if detail.contains("Caused by: gateway closed"));
    }

    #[test]
    fn notices_carry_their_parameters() {
        let locales = locales();

        let notice = CommandFailure::CommandNotFound("paint".into()).notice(&locales);
        assert_eq!(notice.title, "Command not found");
        assert_eq!(notice.description, "The command `paint` does not exist.");

        let notice = CommandFailure::MissingRole("Artist".into()).notice(&locales);
        assert!(notice.description.contains("`Artist`"));

        let notice = CommandFailure::Cooldown(Duration::from_secs(30)).notice(&locales);
        assert!(notice.description.contains("<t:") && notice.description.contains(":R>"));
    }

    #[test]
    fn every_failure_has_a_translated_notice() {
        let locales = locales();
        let failures = [
            CommandFailure::CommandNotFound("x".into()),
            CommandFailure::MissingPermissions,
            CommandFailure::MissingRole("x".into()),
            CommandFailure::MissingAnyRole,
            CommandFailure::Cooldown(Duration::from_secs(1)),
            CommandFailure::NotOwner,
            CommandFailure::MissingArgument,
            CommandFailure::CheckFailed,
            CommandFailure::GuildOnly,
            CommandFailure::Unexpected("x".into()),
        ];
        for failure in failures {
            let notice = failure.notice(&locales);
            assert!(!notice.title.starts_with("errors."), "{failure:?} has no title");
            assert!(!notice.description.starts_with("errors."), "{failure:?} has no description");
        }
    }

    #[test]
    fn short_reports_are_kept_whole() {
        let detail = "x".repeat(REPORT_LIMIT);
        assert_eq!(truncate_report(&detail), detail);
    }

    #[test]
    fn long_reports_are_cut_at_the_limit() {
        let report = truncate_report(&"ä".repeat(REPORT_LIMIT + 10));
        assert!(report.ends_with("..."));
        assert_eq!(report.chars().count(), REPORT_LIMIT + 3);
    }
}
