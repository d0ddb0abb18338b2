//! FILENAME: app/chart-cli/src/main.rs
// PURPOSE: Command-line entry point with unified logging on stderr.
// FORMAT: seq|level|category|message

fn main() -> anyhow::Result<()> {
    chart_cli_lib::run()
}
