use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.problems.as_deref() {
        crate::utils::parse_u64_list_csv(raw)
            .map_err(|e| format!("invalid --problems '{raw}': {e}"))?;
    }
    for raw in args.problem_name.iter() {
        crate::utils::parse_problem_name_spec(raw)
            .map_err(|e| format!("invalid --problem-name '{raw}': {e}"))?;
    }
    if let Some(raw) = args.name_filter.as_deref() {
        regex::Regex::new(raw).map_err(|e| format!("invalid --name-filter '{raw}': {e}"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json or html"
            ));
        }
    }
    if args.rate == Some(0) {
        return Err("invalid --rate, expected positive integer".to_string());
    }
    if args.concurrency == Some(0) {
        return Err("invalid --concurrency, expected positive integer".to_string());
    }
    if args.count == Some(0) {
        return Err("invalid --count, expected positive integer".to_string());
    }
    if args.workers == Some(0) {
        return Err("invalid --workers, expected positive integer".to_string());
    }
    Ok(())
}
