mod api;
mod compose;

use std::env;
use std::io;

use api::{Api, Poll};
use colored::*;
use compose::Prompter;
use shared::{
    CreatePollInput, PollDraft,
    palette::{self, Rgb, UNSET},
};

const BACKEND_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let backend_url = env::var("BACKEND_URL").unwrap_or_else(|_| BACKEND_URL.to_string());
    let web_url = env::var("WEB_URL").ok();
    let initial_color = env::var("THEME_COLOR")
        .ok()
        .and_then(|raw| parse_theme_color(&raw))
        .unwrap_or(UNSET);

    println!("{}", "=".repeat(60).bright_cyan());
    println!(
        "{}",
        "    🗳️  INSTANTLY CREATE RANKED CHOICE POLLS".bright_yellow().bold()
    );
    println!("{}", "=".repeat(60).bright_cyan());
    println!();

    let api = Api::new(&backend_url);
    let mut draft = PollDraft::new(initial_color);
    let mut prompter = Prompter::new(io::stdin().lock());

    loop {
        prompter.compose(&mut draft)?;

        let Some(input) = draft.begin_submit() else {
            println!();
            println!(
                "{}",
                "A poll needs a question and at least one option. Let's try again.".red()
            );
            println!();
            continue;
        };

        let Some(id) = submit(&api, &mut draft, &input).await else {
            println!("{}", "Let's try again.".bright_black());
            println!();
            continue;
        };

        println!("{}", "✅ Poll created!".green().bold());
        show_poll(&api, &id, web_url.as_deref()).await?;
        return Ok(());
    }
}

/// Sends the draft and unlocks it again whatever the outcome, so a failed
/// request can be retried with the same answers.
async fn submit(api: &Api, draft: &mut PollDraft, input: &CreatePollInput) -> Option<String> {
    println!("Creating poll...");
    let created = api.create_poll(input).await;
    draft.finish_submit();

    created
        .map_err(|e| eprintln!("{} {}", "❌ Could not create poll:".red().bold(), e))
        .ok()
}

/// Reads `r,g,b`. Components go through the same lenient parse as typed input.
fn parse_theme_color(raw: &str) -> Option<Rgb> {
    let parts: Vec<&str> = raw.split(',').collect();
    let [r, g, b] = parts.as_slice() else {
        return None;
    };
    Some([r, g, b].map(|part| palette::parse_color_component(part)))
}

async fn show_poll(api: &Api, id: &str, web_url: Option<&str>) -> anyhow::Result<()> {
    let Some(poll) = api.poll(id).await? else {
        println!("{}", format!("Poll {id} was created but could not be loaded").yellow());
        return Ok(());
    };

    print_poll(&poll);

    if let Some(web_url) = web_url {
        let url = format!("{}/poll/{}", web_url.trim_end_matches('/'), poll.id);
        println!("{} {}", "Share:".bright_white().bold(), url.bright_blue().underline());

        if let Err(e) = webbrowser::open(&url) {
            eprintln!(
                "{} {}",
                "⚠️  Could not open browser automatically:".yellow(),
                e
            );
        }
    }

    Ok(())
}

fn print_poll(poll: &Poll) {
    let [r, g, b] = [0, 1, 2].map(|i| poll.color.get(i).copied().unwrap_or(0).clamp(0, 255) as u8);

    println!();
    println!("{}", "━".repeat(60).truecolor(r, g, b));
    println!("{} {}", format!("#{}", poll.id).bright_black(), poll.title.bright_white().bold());
    if let Some(description) = poll.description.as_deref().filter(|d| !d.is_empty()) {
        println!("{}", description);
    }
    println!();
    for (i, option) in poll.options.iter().enumerate() {
        println!("  {}. {}", (i + 1).to_string().bright_cyan(), option);
    }
    println!();
    println!(
        "{} {}  {} {}",
        "Randomized:".bright_black(),
        if poll.randomize { "yes" } else { "no" },
        "Protection:".bright_black(),
        poll.protection
    );
    println!("{}", "━".repeat(60).truecolor(r, g, b));
    println!();
}
