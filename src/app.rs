use std::collections::HashMap;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::client;
use crate::config::{self, ConfigFile};
use crate::runner::{self, Options, Runner};

fn print_banner() {
    const BANNER: &str = r#"
          _ _                         _
     ___ (_) |__   ___   __ _ _ __ __| |
    / _ \| | '_ \ / _ \ / _` | '__/ _` |
   | (_) | | |_) | (_) | (_| | | | (_| |
    \___// |_.__/ \___/ \__,_|_|  \__,_|
        |__/
       v0.4.2 - Formosa OJ scoreboard generator
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_opt_value<'a>(v: Option<&'a str>, default: &'a str) -> &'a str {
    match v {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    group_id: u64,
    token: String,
    problems: Vec<u64>,
    problem_names: HashMap<u64, String>,
    api_base: String,
    web_base: String,
    count: u32,
    name_filter: Option<String>,
    rate: u32,
    concurrency: u32,
    timeout: usize,
    workers: usize,
    output: Option<String>,
    output_format: Option<String>,
    proxy: Option<String>,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let group_id = args
        .group
        .or(cfg.group_id)
        .ok_or_else(|| "group id is required (--group or config group_id)".to_string())?;

    let token = args.token.or(cfg.token).unwrap_or_default();
    if token.trim().is_empty() {
        return Err("token is required (--token or config token)".to_string());
    }

    let problems = match args.problems.as_deref() {
        Some(raw) => crate::utils::parse_u64_list_csv(raw)
            .map_err(|e| format!("invalid --problems '{raw}': {e}"))?,
        None => cfg.problems.unwrap_or_default(),
    };
    if problems.is_empty() {
        return Err("problems list is required (--problems or config problems)".to_string());
    }

    let mut problem_names = cfg.problem_names.unwrap_or_default();
    for raw in args.problem_name.iter() {
        let (id, name) = crate::utils::parse_problem_name_spec(raw)
            .map_err(|e| format!("invalid --problem-name '{raw}': {e}"))?;
        problem_names.insert(id, name);
    }

    let api_base = args
        .api_base
        .or(cfg.api_base)
        .unwrap_or_else(|| client::DEFAULT_API_BASE.to_string());
    let web_base = args
        .web_base
        .or(cfg.web_base)
        .unwrap_or_else(|| client::DEFAULT_WEB_BASE.to_string());

    let count = args
        .count
        .or(cfg.count)
        .unwrap_or(client::DEFAULT_FETCH_COUNT);

    // empty filter string turns the roster filter off
    let name_filter = args
        .name_filter
        .or(cfg.name_filter)
        .unwrap_or_else(|| runner::DEFAULT_NAME_FILTER.to_string());
    let name_filter = if name_filter.trim().is_empty() {
        None
    } else {
        Some(name_filter)
    };

    let rate = args.rate.or(cfg.rate).unwrap_or(10);
    let concurrency = args.concurrency.or(cfg.concurrency).unwrap_or(4);
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    let workers = args.workers.or(cfg.workers).unwrap_or(4);

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);
    let proxy = args.proxy.or(cfg.proxy);

    Ok(RunConfig {
        group_id,
        token,
        problems,
        problem_names,
        api_base,
        web_base,
        count,
        name_filter,
        rate,
        concurrency,
        timeout,
        workers,
        output,
        output_format,
        proxy,
        no_color,
    })
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();

    format_kv_line(
        "Target",
        &format!(
            "group={} api={} web={}",
            run.group_id, run.api_base, run.web_base
        ),
    );
    format_kv_line(
        "Scoreboard",
        &format!(
            "problems={} count={} filter={}",
            run.problems.len(),
            run.count,
            format_opt_value(run.name_filter.as_deref(), "none"),
        ),
    );
    format_kv_line(
        "HTTP",
        &format!(
            "rate={} conc={} workers={} timeout={}s proxy={}",
            run.rate,
            run.concurrency,
            run.workers,
            run.timeout,
            if run.proxy.as_deref().unwrap_or_default().is_empty() {
                "off"
            } else {
                "on"
            }
        ),
    );
    println!();

    let runner = Runner::new(Options {
        group_id: run.group_id,
        token: run.token.clone(),
        problems: run.problems.clone(),
        problem_names: run.problem_names.clone(),
        api_base: run.api_base.clone(),
        web_base: run.web_base.clone(),
        count: run.count,
        name_filter: run.name_filter.clone(),
        rate: run.rate,
        concurrency: run.concurrency,
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
    })
    .map_err(|e| e.to_string())?;

    let pb = ProgressBar::new(run.problems.len().max(1) as u64);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(
        ProgressStyle::with_template(
            ":: Progress: [{pos}/{len}] :: {per_sec} :: Duration: [{elapsed_precise}] :: {msg}",
        )
        .map_err(|e| format!("failed to build progress bar style: {e}"))?
        .progress_chars(r#"#>-"#),
    );
    pb.set_message("fetching submissions");

    let result = runner
        .run_with_progress(pb.clone())
        .await
        .map_err(|e| e.to_string())?;
    pb.finish_and_clear();

    let report = runner.report(&result);

    if let Some(outfile_path) = run.output.as_ref() {
        let output_format = run
            .output_format
            .as_deref()
            .and_then(crate::output::OutputFormat::parse)
            .or_else(|| crate::output::infer_format_from_path(outfile_path))
            .unwrap_or(crate::output::OutputFormat::Text);

        let rendered = match output_format {
            crate::output::OutputFormat::Text => crate::output::render_text(&report),
            crate::output::OutputFormat::Json => crate::output::render_json(&report),
            crate::output::OutputFormat::Html => crate::output::render_html(&report),
        };

        let mut outfile = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(outfile_path)
            .await
            .map_err(|e| format!("failed to open output file: {e}"))?;
        outfile
            .write_all(&rendered)
            .await
            .map_err(|_| "failed to write output file".to_string())?;
        println!(":: Wrote {} ::", outfile_path);
    } else {
        print!(
            "{}",
            String::from_utf8_lossy(&crate::output::render_text(&report))
        );
    }

    if let Some(top) = report.rows.first() {
        println!(
            "\n{} {} {} {}",
            "::".bold().white(),
            "Leader".bold().green(),
            top.name.bold().white(),
            format!("({} solved)", top.solved).cyan(),
        );
    }

    println!();
    println!(
        ":: Completed :: {} contestants :: {} submissions :: took {}s ::",
        report.rows.len(),
        result.submissions_counted,
        result.elapsed.as_secs()
    );

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = CliArgs::parse();

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));

    if args.init_config {
        let path = user_config_path
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not resolve a config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!(":: Wrote config template to {} ::", path.display());
        return Ok(());
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(run.workers)
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
