use chrono::Weekday;
use clap::Subcommand;

use super::{CmdResult, Context};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Show minutes available per weekday
    Show,
    /// Set the minutes available on a weekday (0 = unavailable)
    Set {
        /// Weekday (e.g. "mon", "tuesday")
        weekday: Weekday,
        /// Minutes
        minutes: u32,
    },
}

pub fn run(action: RoutineAction, ctx: &Context) -> CmdResult {
    match action {
        RoutineAction::Show => {
            let config = ctx.load_config()?;
            for day in WEEK {
                println!("{day}: {} min", config.routine.minutes_for(day));
            }
            println!("total: {} min/week", config.routine.weekly_minutes());
        }
        RoutineAction::Set { weekday, minutes } => {
            let mut config = ctx.load_config()?;
            config.routine.set(weekday, minutes);
            ctx.save_config(&config)?;
            println!("{weekday}: {minutes} min");
        }
    }
    Ok(())
}
