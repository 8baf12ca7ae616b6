use std::io::{self, BufRead, Write};

use quiz_core::model::{ResultReport, SessionKey};
use services::{QuestionView, QuizService, QuizServiceError, Step};

enum Input {
    Option(String),
    Skip,
    Back,
    Quit,
}

/// Interactive terminal quiz: select topics, answer, see results.
pub async fn run(
    service: &QuizService,
    preset_topics: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let key = SessionKey::generate();
    let mut preset = Some(preset_topics).filter(|t| !t.is_empty());

    'selection: loop {
        let topics = match preset.take() {
            Some(topics) => topics,
            None => match prompt_topics(service, &mut lines)? {
                Some(topics) => topics,
                None => return Ok(()),
            },
        };

        let mut index = match service.start(key, &topics).await {
            Ok(view) => view.index,
            Err(err) => {
                redirect(err)?;
                continue 'selection;
            }
        };

        loop {
            let view = match service.question(key, index).await {
                Ok(view) => view,
                Err(err) => {
                    redirect(err)?;
                    continue 'selection;
                }
            };
            show_question(&view);

            let selected = match read_answer(&view, &mut lines)? {
                Input::Quit => return Ok(()),
                Input::Back => {
                    index = index.saturating_sub(1);
                    continue;
                }
                Input::Skip => None,
                Input::Option(option) => Some(option),
            };

            match service.submit(key, index, selected.as_deref()).await {
                Ok(Step::Next(next)) => index = next,
                Ok(Step::Completed) => break,
                Err(err) => {
                    redirect(err)?;
                    continue 'selection;
                }
            }
        }

        match service.result(key).await {
            Ok(report) => {
                show_report(&report);
                return Ok(());
            }
            Err(err) => redirect(err)?,
        }
    }
}

/// Recoverable quiz errors send the user back to topic selection; storage failures
/// end the run.
fn redirect(err: QuizServiceError) -> Result<(), QuizServiceError> {
    match err {
        QuizServiceError::Quiz(quiz) if quiz.requires_reselection() => {
            println!("\n{}\n", quiz.user_message());
            Ok(())
        }
        other => Err(other),
    }
}

fn prompt_topics(
    service: &QuizService,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<Option<Vec<String>>> {
    let names: Vec<&str> = service.weights().names().collect();
    println!("Topics:");
    for (i, name) in names.iter().enumerate() {
        println!("  {:>2}. {name}", i + 1);
    }
    print!(
        "Select at least {} topics (comma-separated numbers, q to quit): ",
        service.settings().min_topics()
    );
    io::stdout().flush()?;

    let Some(line) = lines.next().transpose()? else {
        return Ok(None);
    };
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Ok(None);
    }

    // Unparseable entries are dropped; the selection rules reject what is left.
    let topics = line
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1).and_then(|i| names.get(i)))
        .map(|name| (*name).to_owned())
        .collect();
    Ok(Some(topics))
}

fn show_question(view: &QuestionView<'_>) {
    println!();
    println!(
        "Question {} of {}  [{}]",
        view.number(),
        view.total,
        view.question.main_topic()
    );
    println!("{}", view.question.text());
    for (i, option) in view.question.options().iter().enumerate() {
        println!("  {}. {option}", i + 1);
    }
}

fn read_answer(
    view: &QuestionView<'_>,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<Input> {
    let options = view.question.options();
    loop {
        print!("Answer (1-{}, enter to skip, b back, q quit): ", options.len());
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(Input::Quit);
        };
        match line.trim() {
            "" => return Ok(Input::Skip),
            "b" | "B" => return Ok(Input::Back),
            "q" | "Q" => return Ok(Input::Quit),
            raw => {
                if let Some(option) = raw
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| options.get(i))
                {
                    return Ok(Input::Option(option.clone()));
                }
                println!("Please enter a number between 1 and {}.", options.len());
            }
        }
    }
}

fn show_report(report: &ResultReport) {
    println!();
    println!("Score: {} / {}", report.score(), report.total());
    println!();
    for (i, outcome) in report.outcomes().iter().enumerate() {
        let mark = if outcome.is_correct { "correct" } else { "wrong" };
        println!("{}. [{mark}] {}", i + 1, outcome.question);
        println!("   Your answer: {}", outcome.selected);
        if !outcome.is_correct {
            println!("   Correct answer: {}", outcome.correct_answer);
        }
        println!("   Explanation: {}", outcome.explanation);
        println!("   Example: {}", outcome.example);
    }
    println!();
    for feedback in report.feedback() {
        println!(
            "{} ({}/{}, {})",
            feedback.message(),
            feedback.correct,
            feedback.total,
            feedback.band
        );
    }
}
