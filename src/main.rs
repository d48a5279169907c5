use anyhow::{Context, Result, bail};
use std::io;
use wordle_assistant::cli::{CliInterface, parse_cli, render_feedback_row};
use wordle_assistant::game_state::{MAX_ROUNDS, SessionConfig, SessionState, autoplay, game_loop};
use wordle_assistant::logging::{LogTarget, init_logger};
use wordle_assistant::tui::TuiInterface;
use wordle_assistant::word::Word;
use wordle_assistant::wordbank::{WordbankSource, resolve_wordbank};

fn main() -> Result<()> {
    let cli = parse_cli();

    // Log lines on stderr would tear through the full-screen UI.
    let log_target = match (&cli.log_file, cli.tui) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Discard,
        (None, false) => LogTarget::Stderr,
    };
    init_logger(cli.verbose, log_target).context("failed to open log file")?;

    let (words, source) = resolve_wordbank(cli.wordbank_path.as_deref())
        .with_context(|| format!("failed to load word bank {:?}", cli.wordbank_path))?;
    if words.is_empty() {
        bail!("the word bank has no five-letter words");
    }
    match &source {
        WordbankSource::File(path) | WordbankSource::UserConfig(path) => {
            log::info!("Loaded {} words from {}", words.len(), path.display());
        }
        WordbankSource::Embedded => log::info!("Loaded {} embedded words", words.len()),
    }

    let config = SessionConfig {
        suggestions: usize::from(cli.num_suggestions),
        strict: cli.strict,
        ..SessionConfig::default()
    };

    if let Some(target) = &cli.target {
        let target = Word::parse(target).context("invalid --target")?;
        let outcome = autoplay(&words, target, config, MAX_ROUNDS);
        for (round, feedback) in outcome.rounds.iter().enumerate() {
            println!("{}. {}", round + 1, render_feedback_row(feedback));
        }
        match outcome.state {
            SessionState::Solved => println!("Solved in {} rounds", outcome.rounds.len()),
            SessionState::Exhausted => println!("Ran out of candidates"),
            _ => println!("Not solved within {MAX_ROUNDS} rounds"),
        }
        return Ok(());
    }

    if cli.tui {
        let mut interface = TuiInterface::new().context("failed to set up the terminal")?;
        game_loop(&words, &config, &mut interface);
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock()).verbose(cli.verbose > 0);
        game_loop(&words, &config, &mut interface);
    }
    Ok(())
}
