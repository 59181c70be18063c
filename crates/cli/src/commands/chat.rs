//! `arise chat`: interactive or single-message chat in the terminal.
//!
//! Interactive mode reads one message per line. `/new`, `/summary` and
//! `/suggest` map to reset, summarize and suggest; `exit` quits.

use super::{CmdResult, load_config, session_from};
use arise_agent::{Session, prompts};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

/// What one line of input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Exit,
    NewChat,
    Summary,
    Suggest,
    Message(&'a str),
}

pub fn parse_line(line: &str) -> ReplCommand<'_> {
    match line.trim() {
        "exit" | "quit" => ReplCommand::Exit,
        "/new" => ReplCommand::NewChat,
        "/summary" => ReplCommand::Summary,
        "/suggest" => ReplCommand::Suggest,
        other => ReplCommand::Message(other),
    }
}

fn print_reply(text: &str) {
    println!();
    for line in text.lines() {
        println!("  A.R.I.S.E > {line}");
    }
    println!();
}

pub async fn run(config_path: Option<&Path>, message: Option<String>) -> CmdResult {
    let config = load_config(config_path)?;
    let mut session = session_from(&config).await?;

    if let Some(msg) = message {
        let answer = session.send(&msg).await?;
        println!("{}", answer.text);
        return Ok(());
    }

    println!();
    println!("  A.R.I.S.E - Interactive Mode");
    println!();
    println!("  Provider:  {}", session.backend().provider_name());
    println!("  Model:     {}", session.backend().model());
    println!("  Documents: {}", config.documents.dir.display());
    println!();
    println!("  Type your message and press Enter.");
    println!("  /new, /summary, /suggest; 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if !handle_line(&mut session, &line).await {
            break;
        }
    }

    println!();
    println!("  {}", prompts::FAREWELL_REPLY);
    println!();
    Ok(())
}

/// Handle one line; `false` ends the loop. Errors are printed, not fatal.
async fn handle_line(session: &mut Session, line: &str) -> bool {
    let outcome = match parse_line(line) {
        ReplCommand::Exit => return false,
        ReplCommand::Message("") => return true,
        ReplCommand::NewChat => session
            .reset()
            .await
            .map(|_| prompts::NEW_CHAT_MESSAGE.to_string()),
        ReplCommand::Summary => session.summarize().await,
        ReplCommand::Suggest => session.suggest_next().await,
        ReplCommand::Message(msg) => session.send(msg).await.map(|a| a.text),
    };

    match outcome {
        Ok(text) => print_reply(&text),
        Err(e) => {
            eprintln!("  [Error: {}] {e}", e.kind());
            println!();
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repl_commands() {
        assert_eq!(parse_line("exit"), ReplCommand::Exit);
        assert_eq!(parse_line("  quit \n"), ReplCommand::Exit);
        assert_eq!(parse_line("/new"), ReplCommand::NewChat);
        assert_eq!(parse_line("/summary"), ReplCommand::Summary);
        assert_eq!(parse_line("/suggest"), ReplCommand::Suggest);
        assert_eq!(parse_line(" what are his skills "), ReplCommand::Message("what are his skills"));
        assert_eq!(parse_line(""), ReplCommand::Message(""));
    }
}
