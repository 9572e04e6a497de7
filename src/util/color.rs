use poise::serenity_prelude::Colour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BotColors {
    Default,
    Success,
    Error,
    Report,
}

impl BotColors {
    pub(crate) fn color(&self) -> Colour {
        match self {
            BotColors::Default => Colour::new(0x4286f4),
            BotColors::Success => Colour::new(0x32ad32),
            BotColors::Error => Colour::new(0xdd5e53),
            BotColors::Report => Colour::new(0xff0000),
        }
    }
}
