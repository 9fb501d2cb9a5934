//! 问了吗? - curiosity pet terminal app.
//!
//! A line-oriented interface over the pet engine: type a question to feed
//! the pet, or use # commands to inspect its state.

mod inspiration;

use std::io::{self, BufRead, Write};
use wenle_core::{AskResponse, PetSession, SessionConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Check for API key
    if std::env::var("GEMINI_API_KEY").is_err() {
        eprintln!("Error: GEMINI_API_KEY environment variable not set.");
        eprintln!("Please set it in .env file or with: export GEMINI_API_KEY=your_key_here");
        std::process::exit(1);
    }

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let mut config = SessionConfig::default();
    if let Some(i) = args.iter().position(|a| a == "--data") {
        if let Some(path) = args.get(i + 1) {
            config = config.with_data_path(path);
        }
    }
    if let Some(i) = args.iter().position(|a| a == "--model") {
        if let Some(model) = args.get(i + 1) {
            config = config.with_model(model);
        }
    }

    let mut session = PetSession::open(config).await?;

    print_banner(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Handle commands
        if line.starts_with('#') {
            let parts: Vec<&str> = line[1..].split_whitespace().collect();
            match parts.first().copied() {
                Some("quit") | Some("exit") => {
                    println!("下次再问! 👋");
                    break;
                }
                Some("status") => print_status(&session),
                Some("history") => print_history(&session),
                Some("inspire") => {
                    println!("[灵感] 不知道问什么? 试试这些:");
                    for question in inspiration::sample(5) {
                        println!("  - {question}");
                    }
                }
                Some("help") => print_commands(),
                _ => {
                    println!("[ERROR] Unknown command. Type #help for help.");
                }
            }
            stdout.flush().ok();
            continue;
        }

        // Feed the question to the pet
        print!("AI 正在品鉴...");
        stdout.flush().ok();

        match session.ask(line).await {
            Ok(response) => {
                print!("\r                      \r");
                stdout.flush().ok();
                print_rating(&response);
            }
            Err(e) => {
                print!("\r                      \r");
                stdout.flush().ok();
                println!("[ERROR] {e}");
            }
        }
    }

    Ok(())
}

fn print_banner(session: &PetSession) {
    println!("=== 问了吗? ===");
    println!("好奇心是活着的证明");
    println!();
    print_status(session);
    println!();
    print_commands();
    println!();
    println!("输入你的问题 (one per line):");
    println!();
}

fn print_commands() {
    println!("Commands:");
    println!("  #quit     - Exit");
    println!("  #status   - Show the pet's state");
    println!("  #history  - Show past questions");
    println!("  #inspire  - Show example questions");
    println!("  #help     - Show this help");
}

fn print_status(session: &PetSession) {
    println!("[STATUS]");
    println!("  {}  Lv.{}", session.emoji(), session.level());
    println!("  Curiosity Health: {}%", session.health());
    println!("  Questions today: {}", session.questions_today());
}

fn print_history(session: &PetSession) {
    let history = session.history();
    if history.is_empty() {
        println!("还没有提问记录。");
        return;
    }

    println!("[提问时光机]");
    for record in history {
        println!(
            "  {}  {} pts • {}",
            record.time, record.score, record.comment
        );
        println!("      {}", record.question);
    }
}

fn print_rating(response: &AskResponse) {
    println!("[AI 评价] {} pts", response.rating.score);
    println!("\"{}\"", response.rating.comment);

    if let Some(ref answer) = response.rating.answer {
        println!();
        println!("AI 回答：");
        println!("{answer}");
    }

    println!();
    if response.leveled_up {
        println!("[LEVEL UP!] 你的宠物升到了 Lv.{}", response.level);
    }
    println!(
        "Health: {}%  •  今日 {} 问",
        response.health, response.questions_today
    );
    println!();
}

fn print_help() {
    println!("问了吗? - feed your curiosity pet by asking questions");
    println!();
    println!("Usage: wenle [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --data <path>    Backing file for the pet record (default: user_data.json)");
    println!("  --model <model>  Gemini model for the judge");
    println!("  -h, --help       Show this help");
    println!();
    println!("Requires GEMINI_API_KEY (environment or .env file).");
}
