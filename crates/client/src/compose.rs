use std::io::{self, BufRead, Write};

use colored::*;
use shared::{PollDraft, Protection, palette::PALETTE};

/// One line typed while editing the option list.
#[derive(Debug, PartialEq, Eq)]
pub enum OptionCommand {
    /// Fill the first blank slot.
    Fill(String),
    /// Remove the n-th listed option (1-based).
    Remove(usize),
    /// Replace the n-th listed option.
    Edit(usize, String),
    Done,
}

impl OptionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return OptionCommand::Done;
        }

        if let Some(index) = line.strip_prefix('-').and_then(|n| n.trim().parse().ok()) {
            return OptionCommand::Remove(index);
        }

        if let Some((index, text)) = line
            .strip_prefix(':')
            .and_then(|rest| rest.split_once(' '))
            .and_then(|(n, text)| Some((n.parse().ok()?, text)))
        {
            return OptionCommand::Edit(index, text.to_string());
        }

        OptionCommand::Fill(line.to_string())
    }
}

/// Applies a command to the draft. Returns `false` once editing is done.
pub fn apply_option_command(draft: &mut PollDraft, command: OptionCommand) -> bool {
    let keys = draft.options.keys();
    let key_at = |n: usize| n.checked_sub(1).and_then(|i| keys.get(i).copied());

    match command {
        OptionCommand::Done => return false,
        OptionCommand::Fill(text) => {
            let key = draft.options.next_blank_key();
            draft.options.on_change(key, text);
        }
        OptionCommand::Edit(n, text) => match key_at(n) {
            Some(key) => {
                draft.options.on_change(key, text);
            }
            None => println!("{}", format!("No option #{n}").red()),
        },
        OptionCommand::Remove(n) => match key_at(n) {
            Some(key) if draft.options.is_last(key) => {
                println!("{}", "The last slot can't be removed".yellow());
            }
            Some(key) => {
                draft.options.on_cancel(key);
            }
            None => println!("{}", format!("No option #{n}").red()),
        },
    }
    true
}

pub fn parse_protection(input: &str) -> Option<Protection> {
    match input.trim().to_lowercase().as_str() {
        "" | "c" | "cookie" | "cookie_id" => Some(Protection::CookieId),
        "i" | "ip" => Some(Protection::Ip),
        "n" | "none" => Some(Protection::None),
        _ => None,
    }
}

pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn ask(&mut self, label: &str) -> io::Result<String> {
        print!("{} {}", label.bright_white().bold(), "> ".bright_green().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Walks the user through every field of the draft.
    pub fn compose(&mut self, draft: &mut PollDraft) -> io::Result<()> {
        let title = self.ask("Question:")?;
        draft.set_title(title);

        let description = self.ask("Details (optional):")?;
        draft.set_description(description);

        self.edit_options(draft)?;

        let randomize = self.ask("Randomize option order? Prevents position bias [Y/n]")?;
        draft.randomize = !randomize.trim().to_lowercase().starts_with('n');

        self.pick_color(draft)?;

        loop {
            let answer = self.ask("Protection against double votes [C]ookie / [I]p / [N]one")?;
            match parse_protection(&answer) {
                Some(protection) => {
                    draft.protection = protection;
                    break;
                }
                None => println!("{}", "Invalid choice. Please try again.".red()),
            }
        }

        Ok(())
    }

    fn edit_options(&mut self, draft: &mut PollDraft) -> io::Result<()> {
        println!(
            "{}",
            "Type an option and press enter. -N removes option N, :N text rewrites it, empty line finishes."
                .bright_black()
        );

        loop {
            print_options(draft);
            let line = self.ask("Option:")?;
            if !apply_option_command(draft, OptionCommand::parse(&line)) {
                return Ok(());
            }
        }
    }

    fn pick_color(&mut self, draft: &mut PollDraft) -> io::Result<()> {
        let names: Vec<&str> = PALETTE.iter().map(|(name, _)| *name).collect();
        println!("{} {}", "Colors:".bright_black(), names.join(", ").bright_black());

        let current = if draft.theme.is_custom() {
            "custom"
        } else {
            draft.theme.color_name()
        };
        let answer = self.ask(&format!("Color [{current}] (name or \"custom\")"))?;
        let answer = answer.trim();

        if answer.is_empty() {
            return Ok(());
        }

        if answer.eq_ignore_ascii_case("custom") {
            draft.set_custom_color(true);
            for (index, channel) in ["R", "G", "B"].into_iter().enumerate() {
                let value = self.ask(&format!("{channel} [{}]", draft.theme.color()[index]))?;
                if !value.trim().is_empty() {
                    draft.set_theme_color_component(index, &value);
                }
            }
            return Ok(());
        }

        draft.set_custom_color(false);
        if let Err(e) = draft.select_color(answer) {
            println!("{} {}", "⚠️ ".yellow(), e.to_string().yellow());
        }
        Ok(())
    }
}

pub fn print_options(draft: &PollDraft) {
    for (position, (_, value)) in draft.options.iter().enumerate() {
        let label = if value.is_empty() { "…".bright_black() } else { value.normal() };
        println!("  {}. {}", (position + 1).to_string().bright_cyan(), label);
    }
}
