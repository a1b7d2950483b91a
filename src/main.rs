/*!
 * Relay Race Simulator - Main Entry Point
 *
 * Runs one simulated relay race and prints the team results. The race
 * runs exactly once per invocation; a stalled runner stalls the whole
 * race by design.
 */

use relay_sim::{init_tracing, RaceConfig, RaceController, RaceError, RaceReport};
use tracing::info;

fn main() -> miette::Result<()> {
    init_tracing();

    let config = RaceConfig::from_env()?;
    info!(
        teams = config.teams,
        members = config.members,
        drop_probability = config.drop_probability,
        "relay race starting"
    );

    println!("Re-run of the women's 4x100 meter relay at the Tokyo 2020 Olympics.\n");

    let report = RaceController::from_config(config)?.run()?;
    print_report(&report)?;

    Ok(())
}

fn print_report(report: &RaceReport) -> Result<(), RaceError> {
    let as_json = std::env::var("RELAY_REPORT_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nTEAM RESULTS");
    for team in &report.teams {
        if team.disqualified {
            println!("Team {} has been disqualified.", team.name);
        } else {
            println!("Team {} = {:.3} s", team.name, team.total_time.as_secs_f64());
        }
    }
    if let Some(champion) = &report.champion {
        println!("\nTeam {champion} is the WINNER!");
    } else {
        println!("\nNo team finished clean; the title stays vacant.");
    }

    Ok(())
}
