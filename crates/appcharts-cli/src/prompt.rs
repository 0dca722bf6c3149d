//! Interactive resolution of a [`CollectRequest`].
//!
//! Only `main` calls into this module. The run flow in [`crate::run`] takes a
//! finished request and never reads stdin.

use std::io::{self, BufRead, Write};
use std::path::Path;

use appcharts_core::collect::{
    DEFAULT_APP_STORE_STEM, DEFAULT_COUNTRY, DEFAULT_FEED_LIMIT, DEFAULT_GOOGLE_PLAY_STEM,
    MAX_FEED_LIMIT,
};
use appcharts_core::{ChartType, CollectRequest, Marketplace, OutputFormat};

/// Source of answers for the interactive flow.
pub(crate) trait Prompter {
    /// Shows `question` and returns the trimmed answer, or `default` when the
    /// answer is empty.
    fn ask(&mut self, question: &str, default: &str) -> anyhow::Result<String>;

    /// Shows a line of text that needs no answer.
    fn say(&mut self, line: &str);
}

/// Prompts on stdout and reads answers from stdin.
pub(crate) struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str, default: &str) -> anyhow::Result<String> {
        let mut stdout = io::stdout().lock();
        if default.is_empty() {
            write!(stdout, "{question}: ")?;
        } else {
            write!(stdout, "{question} [default: {default}]: ")?;
        }
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(answer_or_default(&line, default))
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}

fn answer_or_default(answer: &str, default: &str) -> String {
    let answer = answer.trim();
    if answer.is_empty() {
        default.to_owned()
    } else {
        answer.to_owned()
    }
}

/// Walks the user through every choice a run needs.
///
/// Returns `Ok(None)` after telling the user, when the marketplace choice is
/// not one of the menu entries.
///
/// # Errors
///
/// Returns an error only if the prompter itself fails (e.g. stdin closed).
pub(crate) fn resolve_interactive(
    prompter: &mut dyn Prompter,
    export_dir: &Path,
) -> anyhow::Result<Option<CollectRequest>> {
    prompter.say("Select a marketplace:");
    prompter.say("  1. Apple App Store");
    prompter.say("  2. Google Play Store");
    prompter.say("  3. Both");
    let choice = prompter.ask("Enter 1/2/3", "")?;
    let Ok(marketplace) = choice.parse::<Marketplace>() else {
        prompter.say("invalid input; exiting");
        return Ok(None);
    };

    let mut request = CollectRequest::new(marketplace, export_dir);

    if marketplace.includes_app_store() {
        request.country = prompter
            .ask("App Store country code (e.g. kr, us, jp)", DEFAULT_COUNTRY)?
            .to_ascii_lowercase();

        let limit_default = DEFAULT_FEED_LIMIT.to_string();
        let limit = prompter.ask(
            &format!("Number of apps to collect (max {MAX_FEED_LIMIT})"),
            &limit_default,
        )?;
        request.limit = limit.parse::<u32>().unwrap_or_else(|_| {
            prompter.say(&format!("not a number; using {DEFAULT_FEED_LIMIT}"));
            DEFAULT_FEED_LIMIT
        });

        let chart = prompter.ask(
            "Chart (topfreeapplications, toppaidapplications, topgrossingapplications)",
            ChartType::default().feed_segment(),
        )?;
        request.chart = chart.parse::<ChartType>().unwrap_or_else(|_| {
            prompter.say(&format!(
                "unknown chart; using {}",
                ChartType::default().feed_segment()
            ));
            ChartType::default()
        });

        let enrich = prompter.ask("Fetch per-app details? (y/n)", "y")?;
        request.enrich = is_yes(&enrich);
    }

    let format = prompter.ask("Output format (csv/json)", OutputFormat::default().extension())?;
    request.format = format.parse::<OutputFormat>().unwrap_or_default();

    if marketplace.includes_app_store() {
        request.app_store_stem =
            prompter.ask("App Store file name (no extension)", DEFAULT_APP_STORE_STEM)?;
    }
    if marketplace.includes_google_play() {
        request.google_play_stem =
            prompter.ask("Google Play file name (no extension)", DEFAULT_GOOGLE_PLAY_STEM)?;
    }

    Ok(Some(request))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
