use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use dotenvy::dotenv;
use log::info;
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::UserId;

use crate::config::Config;
use crate::database::colors::ColorStore;
use crate::database::manager::DbManager;
use crate::localization::manager::LocalizationManager;

pub mod database {
    pub mod schema;
    pub mod models;

    pub mod manager;
    pub mod colors;
}

pub mod util {
    pub mod color;
    pub mod pagination;
    pub mod timestamp;
}

pub mod modules {
    pub mod colors {
        pub mod gateway;
        pub mod input;
        pub mod service;
    }
    pub mod errors {
        pub mod failure;
        pub mod handler;
    }
}

pub mod localization {
    pub mod manager;
}

pub mod commands;
pub mod config;
pub mod events;



pub struct Data {
    pub has_started: AtomicBool,
    pub db: Arc<DbManager>,
    pub locales: Arc<LocalizationManager>,
    pub owner_id: UserId,
}
pub type BotError = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, BotError>;
pub type ApplicationContext<'a> = poise::ApplicationContext<'a, Data, BotError>;




#[tokio::main]
async fn main() -> Result<(), BotError> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load()?;
    let token = config.read_token()?;
    let owner_id = UserId::new(config.owner_id);

    let db = Arc::new(DbManager::new(&config.database_path).await?);
    db.ensure_schema().await?;
    info!("Using color database at {}", config.database_path);

    let locales = Arc::new(LocalizationManager::new(config.language)?);
    info!("Replying in {}", locales.lang().as_ref());

    let data = Data {
        has_started: AtomicBool::new(false),
        db,
        locales,
        owner_id,
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::color::color()],
            owners: HashSet::from([owner_id]),
            on_error: |error| Box::pin(modules::errors::handler::on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handle_event(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| Box::pin(async move { Ok(data) }))
        .build();

    let mut client = serenity::ClientBuilder::new(token, serenity::GatewayIntents::non_privileged())
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}
