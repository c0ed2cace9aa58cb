use std::collections::HashMap;
use std::error::Error;

use ojboard::runner::{Options, Runner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        group_id: 11,
        token: std::env::var("OJ_TOKEN")?,
        problems: vec![714, 715],
        problem_names: HashMap::from([(714, "A".to_string()), (715, "B".to_string())]),
        ..Options::default()
    })?;
    let result = runner.run().await?;

    let report = runner.report(&result);
    std::fs::write("scoreboard.html", ojboard::output::render_html(&report))?;
    println!("Wrote scoreboard.html");

    Ok(())
}
