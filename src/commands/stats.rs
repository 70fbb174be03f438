use crate::{
    db::{
        db::Db,
        problems::Problems,
        statistics::{ProblemStatistics, Statistics, StatisticsSummary},
    },
    libs::{
        messages::Message,
        problem::{Problem, ProblemFilter},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use serde::Serialize;

/// Problems shown under "most urgent" on the dashboard.
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Dashboard {
    summary: StatisticsSummary,
    #[serde(flatten)]
    statistics: ProblemStatistics,
    recent: Vec<Problem>,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let db = Db::new()?;
    let statistics = Statistics::new(&db).compute()?;
    let mut recent = Problems::new(&db).find(&ProblemFilter::all())?;
    recent.truncate(RECENT_LIMIT);

    if args.json {
        let dashboard = Dashboard {
            summary: statistics.summary(),
            statistics,
            recent,
        };
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    msg_print!(Message::StatisticsHeader, true);
    View::summary(&statistics);

    msg_print!(Message::StatusDistributionHeader, true);
    View::status_distribution(&statistics);

    msg_print!(Message::PriorityDistributionHeader, true);
    View::priority_distribution(&statistics);

    msg_print!(Message::RecentIssuesHeader, true);
    if recent.is_empty() {
        msg_info!(Message::NoProblemsFound);
    } else {
        View::problems(&recent);
    }
    Ok(())
}
