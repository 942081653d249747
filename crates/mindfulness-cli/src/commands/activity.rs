use std::io::Write;

use clap::Args;
use mindfulness_core::{run_session, Activity, ActivityKind, Completion, CoreError};

use super::{Context, Options};
use crate::terminal::render;

#[derive(Args)]
pub struct ActivityArgs {
    /// Duration in seconds (asked interactively when omitted)
    #[arg(short, long, allow_negative_numbers = true)]
    pub duration: Option<i64>,
}

pub fn run(
    kind: ActivityKind,
    args: ActivityArgs,
    options: &Options,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::new(options)?;
    let mut activity = ctx.build_activity(kind)?;
    let duration = match args.duration {
        Some(secs) => secs,
        None => ask_duration(&ctx)?,
    };
    let completion = run_one(&ctx, activity.as_mut(), duration)?;
    if ctx.json {
        println!("{}", serde_json::to_string(&completion)?);
    } else {
        println!();
    }
    Ok(())
}

/// Run one session, rendering its events.
pub fn run_one(
    ctx: &Context,
    activity: &mut dyn Activity,
    duration_secs: i64,
) -> Result<Completion, CoreError> {
    let json = ctx.json;
    run_session(
        activity,
        duration_secs,
        ctx.runtime(),
        &ctx.pacing(),
        &mut |event| render(&event, json),
    )
}

/// Prompt until a positive number of seconds is entered.
pub fn ask_duration(ctx: &Context) -> Result<i64, Box<dyn std::error::Error>> {
    let mut out = std::io::stdout();
    loop {
        write!(out, "Enter the duration of the activity in seconds: ")?;
        out.flush()?;
        let line = ctx
            .input
            .next_line()
            .ok_or("input closed before a duration was entered")?;
        match line.trim().parse::<i64>() {
            Ok(secs) if secs > 0 => return Ok(secs),
            _ => writeln!(out, "Please enter a positive integer for seconds.")?,
        }
    }
}
