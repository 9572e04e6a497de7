use std::fmt::Display;
use std::time::Duration;

use poise::serenity_prelude::Timestamp;

/// The format in which you want the timestamp to be generated.
#[allow(unused)]
pub enum Format {
    ShortTime,
    LongTime,

    ShortDate,
    LongDate,
    LongDateShortTime,
    LongDateDayAndShortTime,

    Relative,
}

#[allow(clippy::module_name_repetitions)]
pub trait TimestampExt {
    /// Converts a Serenity `Timestamp` into a Discord timestamp, e.g. `<t:1700000000:R>`.
    fn to_discord_timestamp(&self, format: Format) -> String;
}

impl TimestampExt for Timestamp {
    fn to_discord_timestamp(&self, format: Format) -> String {
        discord_timestamp(self.unix_timestamp(), format)
    }
}

pub fn discord_timestamp(epoch: i64, format: Format) -> String {
    format!("<t:{epoch}:{format}>")
}

/// A relative Discord timestamp pointing `delay` into the future, rendered by clients as "in 5 seconds".
pub fn relative_from_now(delay: Duration) -> String {
    let epoch = chrono::Utc::now().timestamp() + i64::try_from(delay.as_secs()).unwrap_or(i64::MAX / 2);
    discord_timestamp(epoch, Format::Relative)
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let format_string = match self {
            Format::ShortTime => "t",
            Format::LongTime => "T",
            Format::ShortDate => "d",
            Format::LongDate => "D",
            Format::LongDateShortTime => "f",
            Format::LongDateDayAndShortTime => "F",
            Format::Relative => "R",
        };
        write!(f, "{format_string}")
    }
}
