// Exam Coach terminal front-end
// Reads lines from stdin and prints the coach's replies.

use anyhow::Context;
use examcoach_core::{logging, CoachConfig, CoachHandle, Responder};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

const BANNER: &str = "🎓 EXAM STRESS COACH v3.1 - 95% MOTIVATION GUARANTEED";
const EMPTY_INPUT_REPLY: &str = "Ready to CRUSH studying! 💥";
const FAREWELL: &str = "DOMINATE THAT EXAM TOMORROW! 💪📚🚀";
const INTERRUPTED_FAREWELL: &str = "EXAM VICTORY AWAITS! 💪";

enum Command<'a> {
    Quit,
    Stats,
    Empty,
    Say(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "stats" => Command::Stats,
        "" => Command::Empty,
        _ => Command::Say(line),
    }
}

async fn print_summary(coach: &CoachHandle) -> anyhow::Result<()> {
    let summary = coach.summary().await?;
    println!("\n{}", summary);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CoachConfig::from_env().context("invalid configuration")?;
    logging::init(config.log_format)?;

    let responder = Responder::from_config(&config).context("failed to build responder")?;
    let coach = CoachHandle::spawn(responder);
    let mut progress = coach.subscribe_progress();
    info!("Coach ready");

    println!("{}", BANNER);
    println!("{}", "=".repeat(60));
    println!("✅ 'quit', 'exit' or 'stats' to see your session");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        stdout.write_all(b"\nYou: ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };

        let Some(line) = line else {
            // EOF or Ctrl-C
            print_summary(&coach).await?;
            println!("\nBot: {}", INTERRUPTED_FAREWELL);
            break;
        };

        match parse_command(&line) {
            Command::Quit => {
                print_summary(&coach).await?;
                println!("Bot: {}", FAREWELL);
                break;
            }
            Command::Stats => print_summary(&coach).await?,
            Command::Empty => println!("Bot: {}", EMPTY_INPUT_REPLY),
            Command::Say(text) => {
                let reply = coach.respond(text.to_string()).await?;
                println!("Bot: {}", reply);
            }
        }

        while let Ok(report) = progress.try_recv() {
            println!("\n{}", report);
        }
    }

    coach.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert!(matches!(parse_command("QUIT"), Command::Quit));
        assert!(matches!(parse_command(" q "), Command::Quit));
        assert!(matches!(parse_command("stats"), Command::Stats));
        assert!(matches!(parse_command("   "), Command::Empty));
        assert!(matches!(parse_command(" exam tomorrow "), Command::Say("exam tomorrow")));
    }
}
