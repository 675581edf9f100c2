use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use weather_core::{
    Config, Dashboard, OpenWeatherClient, Theme, ViewState, open_state, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and forecast for a city.
    Show {
        /// City name.
        city: String,

        /// Forecast day to expand (0 = first day); clamped to the available days.
        #[arg(long, default_value_t = 0)]
        day: usize,
    },

    /// List recent searches.
    History,

    /// Show or change the theme preference.
    Theme {
        /// "light", "dark" or "toggle"; omit to print the current theme.
        value: Option<String>,
    },

    /// Interactive dashboard session.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, day } => {
                let mut dash = open_dashboard()?;
                dash.search(&city).await;
                dash.select_day(day);
                print_dashboard(&dash);
                Ok(())
            }
            Command::History => {
                let (history, _) = open_state(&Config::data_dir()?);
                print!("{}", render::history(history.list()));
                Ok(())
            }
            Command::Theme { value } => {
                let (_, mut theme) = open_state(&Config::data_dir()?);
                match value.as_deref() {
                    None => {}
                    Some("toggle") => {
                        theme.toggle();
                    }
                    Some(other) => theme.set(other.parse::<Theme>()?),
                }
                println!("Theme: {}", theme.get());
                Ok(())
            }
            Command::Interactive => interactive(open_dashboard()?).await,
        }
    }
}

fn open_dashboard() -> anyhow::Result<Dashboard<OpenWeatherClient>> {
    let config = Config::load()?;
    let client = provider_from_config(&config)?;
    let (history, theme) = open_state(&Config::data_dir()?);
    Ok(Dashboard::new(client, history, theme))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.require_api_key()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_dashboard(dash: &Dashboard<OpenWeatherClient>) {
    print!(
        "{}",
        render::view(
            dash.state(),
            dash.forecast_days(),
            dash.selected_day_index(),
            dash.theme()
        )
    );
}

const SEARCH: &str = "Search";
const RECENT: &str = "Recent searches";
const REFRESH: &str = "Refresh";
const PICK_DAY: &str = "Pick forecast day";
const TOGGLE_THEME: &str = "Toggle theme";
const QUIT: &str = "Quit";

async fn interactive(mut dash: Dashboard<OpenWeatherClient>) -> anyhow::Result<()> {
    loop {
        let mut actions = vec![SEARCH];
        if !dash.history().is_empty() {
            actions.push(RECENT);
        }
        if matches!(dash.state(), ViewState::Success(_)) {
            actions.push(REFRESH);
            if dash.forecast_days().len() > 1 {
                actions.push(PICK_DAY);
            }
        }
        actions.push(TOGGLE_THEME);
        actions.push(QUIT);

        let action = Select::new(&format!("[{}]", dash.theme()), actions).prompt()?;

        match action {
            SEARCH => {
                let city = Text::new("City:").prompt()?;
                dash.search(&city).await;
            }
            RECENT => {
                let recent = dash.history().to_vec();
                let city = Select::new("Recent searches:", recent).prompt()?;
                dash.search(&city).await;
            }
            REFRESH => {
                dash.refresh().await;
            }
            PICK_DAY => {
                let labels: Vec<String> =
                    dash.forecast_days().iter().map(|d| d.tab_label()).collect();
                let choice = Select::new("Day:", labels).raw_prompt()?;
                dash.select_day(choice.index);
            }
            TOGGLE_THEME => {
                dash.toggle_theme();
                println!("Theme: {}", dash.theme());
                continue;
            }
            _ => return Ok(()),
        }

        print_dashboard(&dash);
    }
}
