use std::collections::HashMap;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use governor::{Quota, RateLimiter};
use indicatif::ProgressBar;
use regex::Regex;
use thiserror::Error;
use tokio::time::Instant;

use crate::client::{self, ClientError, ClientOptions, OnlineJudge, Submission};
use crate::output::BoardReport;
use crate::scoreboard::{Scoreboard, ScoreboardRow};

pub const DEFAULT_NAME_FILTER: &str = r"^\d{7}$";

#[derive(Clone, Debug)]
pub struct Options {
    pub group_id: u64,
    pub token: String,
    pub problems: Vec<u64>,
    pub problem_names: HashMap<u64, String>,
    pub api_base: String,
    pub web_base: String,
    pub count: u32,
    pub name_filter: Option<String>,
    pub rate: u32,
    pub concurrency: u32,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            group_id: 0,
            token: String::new(),
            problems: Vec::new(),
            problem_names: HashMap::new(),
            api_base: client::DEFAULT_API_BASE.to_string(),
            web_base: client::DEFAULT_WEB_BASE.to_string(),
            count: client::DEFAULT_FETCH_COUNT,
            name_filter: Some(DEFAULT_NAME_FILTER.to_string()),
            rate: 10,
            concurrency: 4,
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("group id is required")]
    MissingGroup,

    #[error("token is required to access the submission API")]
    MissingToken,

    #[error("problems list is empty")]
    EmptyProblems,

    #[error("invalid name filter '{pattern}': {source}")]
    InvalidNameFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Clone, Debug)]
pub struct BoardResult {
    pub elapsed: Duration,
    pub roster_size: usize,
    pub submissions_counted: usize,
    pub problems: Vec<u64>,
    pub rows: Vec<ScoreboardRow>,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if options.group_id == 0 {
            return Err(RunnerError::MissingGroup);
        }
        if options.token.trim().is_empty() {
            return Err(RunnerError::MissingToken);
        }
        if options.problems.is_empty() {
            return Err(RunnerError::EmptyProblems);
        }
        if let Some(pattern) = options.name_filter.as_deref() {
            Regex::new(pattern).map_err(|e| RunnerError::InvalidNameFilter {
                pattern: pattern.to_string(),
                source: e,
            })?;
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub async fn run(&self) -> Result<BoardResult, RunnerError> {
        self.run_with_progress(ProgressBar::hidden()).await
    }

    /// Fetch the roster and every problem's submission history, then fold
    /// them into scoreboard rows. The bar ticks once per fetched problem.
    pub async fn run_with_progress(&self, pb: ProgressBar) -> Result<BoardResult, RunnerError> {
        let started = Instant::now();

        let name_filter = match self.options.name_filter.as_deref() {
            Some(pattern) => {
                Some(
                    Regex::new(pattern).map_err(|e| RunnerError::InvalidNameFilter {
                        pattern: pattern.to_string(),
                        source: e,
                    })?,
                )
            }
            None => None,
        };

        let oj = OnlineJudge::new(&ClientOptions {
            api_base: self.options.api_base.clone(),
            token: self.options.token.clone(),
            timeout_seconds: self.options.timeout_seconds,
            proxy: self.options.proxy.clone(),
        })?;

        let group_id = self.options.group_id;
        let users = oj.group_users(group_id).await?;
        let roster = client::roster(&users, name_filter.as_ref());

        let lim = RateLimiter::direct(Quota::per_second(
            std::num::NonZeroU32::new(self.options.rate.max(1)).unwrap(),
        ));
        let count = self.options.count;
        let concurrency = self.options.concurrency.max(1) as usize;

        // Fetches complete in any order; pages are re-sorted so aggregation
        // stays deterministic in column order.
        let mut pages: Vec<(usize, u64, Result<Vec<Submission>, ClientError>)> =
            stream::iter(self.options.problems.iter().copied().enumerate())
                .map(|(idx, problem_id)| {
                    let oj = &oj;
                    let lim = &lim;
                    let pb = pb.clone();
                    async move {
                        lim.until_ready().await;
                        let result = oj.submissions(group_id, problem_id, count).await;
                        pb.inc(1);
                        (idx, problem_id, result)
                    }
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;
        pages.sort_by_key(|(idx, _, _)| *idx);

        let mut board = Scoreboard::new(&self.options.problems);
        let mut submissions_counted = 0;
        for (_, problem_id, result) in pages {
            submissions_counted += board.apply(problem_id, &result?, &roster);
        }

        Ok(BoardResult {
            elapsed: started.elapsed(),
            roster_size: roster.len(),
            submissions_counted,
            problems: board.problems().to_vec(),
            rows: board.rows(),
        })
    }

    pub fn report(&self, result: &BoardResult) -> BoardReport {
        crate::output::build_report(
            &result.rows,
            &result.problems,
            &self.options.problem_names,
            &self.options.web_base,
            self.options.group_id,
        )
    }
}
