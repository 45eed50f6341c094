// Interactive analyze loop

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::app::App;

use super::commands::{format_help, Command};

const PROMPT: &str = "analyze> ";

pub struct Repl<'a> {
    app: &'a App,
    token: Option<String>,
}

impl<'a> Repl<'a> {
    pub fn new(app: &'a App, token: Option<String>) -> Self {
        Self { app, token }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;
        println!(
            "{}",
            "Press Enter to classify a random review, /help for commands.".dark_grey()
        );

        loop {
            let line = match editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => return Err(e).context("Failed to read input"),
            };

            let Some(command) = Command::parse(&line) else {
                println!("Unknown command: {}", line.trim());
                continue;
            };

            match command {
                Command::Analyze => {
                    self.app.analyze(self.token.as_deref()).await;
                    println!("{}\n", self.app.display().await.render());
                }
                Command::Reload => {
                    if let Ok(count) = self.app.load_reviews().await {
                        println!("Loaded {} reviews", count);
                    } else {
                        println!("{}", self.app.display().await.render());
                    }
                }
                Command::Help => println!("{}", format_help()),
                Command::Quit => break,
            }
        }

        Ok(())
    }
}
