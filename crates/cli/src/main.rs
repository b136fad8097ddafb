use std::io::{self, Write};

use admissions_assistant::AdmissionsAssistant;
use admissions_core::{ChatInput, Grade};
use admissions_observability::init_tracing;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "admissions")]
#[command(about = "Admissions helpdesk assistant CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat; type 'exit' to quit.
    Chat,
    /// Answer a single message.
    Ask {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the course catalog.
    Courses,
    /// List the courses a grade qualifies for.
    Eligible { grade: String },
}

fn main() -> Result<()> {
    init_tracing("admissions_cli");
    let cli = Cli::parse();

    let assistant = AdmissionsAssistant::default();

    match cli.command {
        Command::Chat => run_chat(&assistant)?,
        Command::Ask { message, json } => {
            let reply = assistant.handle_chat(ChatInput::new(message.join(" ")));
            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                println!("{}", reply.reply);
            }
        }
        Command::Courses => {
            println!("{}", serde_json::to_string_pretty(assistant.catalog())?);
        }
        Command::Eligible { grade } => {
            let grade = grade.parse::<Grade>().context("invalid grade value")?;
            let report = assistant.eligibility(grade);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn run_chat(assistant: &AdmissionsAssistant) -> Result<()> {
    println!("Admissions assistant chat mode. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        let reply = assistant.handle_chat(ChatInput::new(message));
        println!("\n{}\n", reply.reply);
    }

    Ok(())
}
