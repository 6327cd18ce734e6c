use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use rent_core::config::AppConfig;
use rent_core::form::{Field, FormDraft};
use rent_core::report::load_report;
use rent_core::request::{RequestHandler, RequestState};
use rent_core::{logging, RentEngine};
use std::io::{stdin, stdout, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init(&config.log_filter);
    tracing::info!(dir = %config.artifact_dir.display(), "starting rent app");

    let mut input = stdin().lock();
    // Loaded the first time the prediction page is opened, then reused.
    let mut engine: Option<RentEngine> = None;

    loop {
        print_menu()?;
        let Some(choice) = read_line(&mut input)? else {
            break;
        };
        match choice.trim() {
            "1" => prediction_page(&config, &mut engine, &mut input)?,
            "2" => report_page(&config, &mut input)?,
            "q" | "exit" => break,
            _ => {}
        }
    }

    println!("\nBye.");
    Ok(())
}

fn clear_screen() -> std::io::Result<()> {
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))
}

fn print_menu() -> std::io::Result<()> {
    clear_screen()?;
    println!("{}", "Delhi Rent App".bold());
    println!("---------------------------------------------------------------");
    println!("  1  Rent Prediction");
    println!("  2  Analysis Report");
    println!("  q  Quit");
    print!("\n> ");
    stdout().flush()
}

fn footer() {
    println!("\n---------------------------------------------------------------");
    println!("{}", "Made by Vishal Rai".dim());
}

/// `None` on end of input.
fn read_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn wait_for_enter(input: &mut impl BufRead) -> std::io::Result<()> {
    print!("\nPress [Enter] to return to the menu.");
    stdout().flush()?;
    read_line(input).map(|_| ())
}

fn prediction_page(
    config: &AppConfig,
    engine: &mut Option<RentEngine>,
    input: &mut impl BufRead,
) -> anyhow::Result<()> {
    clear_screen()?;
    println!("{}", "Rent Prediction for Delhi".bold());
    println!("Fill in the property details below to predict monthly rent.");
    println!("Press [Enter] to keep the value in brackets.\n");

    if engine.is_none() {
        match RentEngine::load(&config.artifact_paths()) {
            Ok(loaded) => *engine = Some(loaded),
            Err(err) => {
                tracing::error!(%err, "artifacts unavailable");
                println!("{}", format!("Rent prediction is unavailable: {err}").red());
                footer();
                return Ok(wait_for_enter(input)?);
            }
        }
    }
    let Some(engine) = engine.as_ref() else {
        return Ok(());
    };

    let mut draft = FormDraft::default();
    for field in Field::ALL {
        loop {
            print!("{}: ", field.prompt());
            stdout().flush()?;
            let Some(answer) = read_line(input)? else {
                return Ok(());
            };
            match draft.answer(field, &answer) {
                Ok(()) => break,
                Err(err) => println!("{}", format!("  {err}").red()),
            }
        }
    }
    let Some(submission) = draft.finish() else {
        return Ok(());
    };

    let mut handler = RequestHandler::new(engine);
    let state = handler.submit(&submission);
    let message = state.message().unwrap_or_default();
    println!();
    match state {
        RequestState::Predicted { .. } => println!("{}", message.green().bold()),
        _ => println!("{}", message.red()),
    }

    footer();
    Ok(wait_for_enter(input)?)
}

fn report_page(config: &AppConfig, input: &mut impl BufRead) -> anyhow::Result<()> {
    clear_screen()?;
    println!("{}\n", "Delhi Rent Analysis Report".bold());

    match load_report(&config.report_path()) {
        Ok(report) => print!("{}", report.plain_text()),
        Err(err) => {
            tracing::warn!(%err, "report unavailable");
            println!("{}", err.to_string().red());
        }
    }

    footer();
    Ok(wait_for_enter(input)?)
}
