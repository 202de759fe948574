use std::io::Write;

use askama::Template;
use chrono::Utc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::clipboard::CopyChain;
use crate::commands::{parse_line, Command, HELP};
use crate::controller::Controller;
use crate::envs::Settings;
use crate::view::PanelView;

mod clipboard;
mod commands;
mod controller;
mod envs;
mod events;
mod input;
mod languages;
mod notice;
mod pending;
mod session;
mod speech;
mod translate;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logs go to a file so they don't mix with the panel
    let file_appender = tracing_appender::rolling::daily(&*envs::LOG_DIR, "translate_panel.log");
    let (writer, _log_guard) = tracing_appender::non_blocking(file_appender);
    let level = envs::LOG_LEVEL.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // capabilities are picked once, here
    let settings = Settings::from_env();
    let translator = translate::MyMemoryTranslate::new(&envs::API_URL, envs::CONTACT_EMAIL.as_deref());
    let clipboard = CopyChain::detect();
    let speech = speech::detect(*envs::SPEECH_ENABLED);
    let mut controller = Controller::new(&settings, Box::new(translator), clipboard, speech);
    info!("Translation panel started, endpoint {}", *envs::API_URL);

    println!("{}", HELP);
    render(&controller)?;

    tokio::select! {
        res = run(&mut controller) => {
            res?;
            info!("Input closed");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    info!("Translation panel stopped");
    Ok(())
}

async fn run(controller: &mut Controller) -> anyhow::Result<()> {
    let mut lines = input::spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
    prompt()?;
    while let Some(line) = lines.recv().await {
        match parse_line(&line) {
            Command::Event(event) => {
                controller.handle(event).await;
                render(controller)?;
            }
            Command::Help => println!("{}", HELP),
            Command::Langs => println!("{}", languages::describe_catalogue()),
            Command::Invalid(message) => println!("{}", message),
            Command::Quit => return Ok(()),
        }
        prompt()?;
    }
    Ok(())
}

fn render(controller: &Controller) -> anyhow::Result<()> {
    let panel = PanelView::new(controller.session(), Utc::now()).render()?;
    println!("{}", panel);
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}
