use std::io::Write;
use std::time::Duration;

use mindfulness_core::{Activity, ActivityKind, Pacer, PauseStyle};

use super::activity::{ask_duration, run_one};
use super::{Context, Options};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// The interactive loop. Activities live for the whole loop, so their prompt
/// bags keep cycling across runs.
pub fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::new(options)?;
    let mut activities = ActivityKind::ALL
        .iter()
        .map(|kind| ctx.build_activity(*kind))
        .collect::<Result<Vec<Box<dyn Activity>>, _>>()?;
    let mut out = std::io::stdout();

    loop {
        if !ctx.json {
            write!(out, "{CLEAR_SCREEN}")?;
        }
        writeln!(out, "Mindfulness Program")?;
        writeln!(out, "-------------------")?;
        writeln!(out, "Menu Options:")?;
        for (i, kind) in ActivityKind::ALL.iter().enumerate() {
            writeln!(out, "{}) {}", i + 1, kind.name())?;
        }
        writeln!(out, "{}) Exit", ActivityKind::ALL.len() + 1)?;
        write!(out, "\nChoose an option (1-{}): ", ActivityKind::ALL.len() + 1)?;
        out.flush()?;

        let Some(choice) = ctx.input.next_line() else {
            break;
        };
        let index = match choice.trim().parse::<usize>() {
            Ok(n) if (1..=activities.len()).contains(&n) => n - 1,
            Ok(n) if n == activities.len() + 1 => break,
            _ => {
                writeln!(out, "Please select a valid option (1-{}).", activities.len() + 1)?;
                ctx.pacer()
                    .pause(PauseStyle::Silent, Duration::from_millis(1200));
                continue;
            }
        };

        let duration = ask_duration(&ctx)?;
        if let Err(e) = run_one(&ctx, activities[index].as_mut(), duration) {
            writeln!(out, "\nerror: {e}")?;
        }
        write!(out, "\n\nReturning to menu... ")?;
        out.flush()?;
        ctx.pacer().pause(PauseStyle::Spinner, Duration::from_secs(2));
    }

    writeln!(out, "\nGoodbye. Remember to take time for yourself today!")?;
    Ok(())
}
