use std::error::Error;

use ojboard::runner::{Options, Runner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        group_id: 11,
        token: std::env::var("OJ_TOKEN")?,
        problems: vec![714, 715, 716],
        rate: 5,
        concurrency: 2,
        timeout_seconds: 5,
        ..Options::default()
    })?;
    let result = runner.run().await?;

    println!("Contestants: {}", result.rows.len());
    println!("Submissions: {}", result.submissions_counted);
    for row in result.rows.iter() {
        println!("{} solved {} in {} attempts", row.name, row.solved, row.attempts);
    }

    Ok(())
}
