use std::collections::HashMap;

use crate::client::Submission;
use crate::verdict::{self, Verdict};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ProblemState {
    verdict: Option<Verdict>,
    attempts: u32,
}

/// One rendered scoreboard row: contestant name followed by one status-code
/// cell per problem, in header column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreboardRow {
    pub name: String,
    pub solved: u32,
    pub attempts: u32,
    pub cells: Vec<String>,
}

/// Replays submission history into per-(contestant, problem) state.
///
/// Rows are created lazily on a contestant's first counted submission, the
/// way the hosted scoreboard built its table.
#[derive(Clone, Debug)]
pub struct Scoreboard {
    problems: Vec<u64>,
    columns: HashMap<u64, usize>,
    rows: HashMap<String, Vec<ProblemState>>,
    first_blood: HashMap<u64, String>,
}

impl Scoreboard {
    pub fn new(problems: &[u64]) -> Self {
        let mut ordered: Vec<u64> = Vec::with_capacity(problems.len());
        let mut columns = HashMap::new();
        for &problem_id in problems {
            if columns.contains_key(&problem_id) {
                continue;
            }
            columns.insert(problem_id, ordered.len());
            ordered.push(problem_id);
        }
        Self {
            problems: ordered,
            columns,
            rows: HashMap::new(),
            first_blood: HashMap::new(),
        }
    }

    pub fn problems(&self) -> &[u64] {
        &self.problems
    }

    /// Fold one submission into the board. Submissions must arrive oldest
    /// first per problem; anything after the problem is accepted is ignored,
    /// and the accepting submission itself still counts as an attempt.
    pub fn record(&mut self, problem_id: u64, name: &str, verdict: Verdict) {
        let Some(&col) = self.columns.get(&problem_id) else {
            return;
        };
        let width = self.problems.len();
        let row = self
            .rows
            .entry(name.to_string())
            .or_insert_with(|| vec![ProblemState::default(); width]);
        let state = &mut row[col];
        if state.verdict == Some(Verdict::Accepted) {
            return;
        }
        state.attempts += 1;
        state.verdict = Some(state.verdict.map_or(verdict, |v| v.max(verdict)));
        if verdict.is_accepted() {
            self.first_blood
                .entry(problem_id)
                .or_insert_with(|| name.to_string());
        }
    }

    /// Replay a problem's submission page against the roster. Unknown users
    /// and verdict ids outside the counted window are skipped. Returns how
    /// many submissions were folded in.
    pub fn apply(
        &mut self,
        problem_id: u64,
        submissions: &[Submission],
        roster: &HashMap<u64, String>,
    ) -> usize {
        let mut counted = 0;
        for submission in submissions {
            let Some(name) = roster.get(&submission.user_id) else {
                continue;
            };
            let Some(verdict) = Verdict::from_id(submission.verdict_id) else {
                continue;
            };
            self.record(problem_id, name, verdict);
            counted += 1;
        }
        counted
    }

    fn cell_code(&self, problem_id: u64, name: &str, state: ProblemState) -> String {
        match state.verdict {
            Some(Verdict::Accepted) => {
                if self.first_blood.get(&problem_id).map(String::as_str) == Some(name) {
                    verdict::CODE_FIRST_BLOOD.to_string()
                } else {
                    verdict::CODE_ACCEPTED.to_string()
                }
            }
            Some(v) => format!("{}{}", v.code_letter(), state.attempts),
            None => format!("{}{}", verdict::UNTOUCHED_LETTER, state.attempts),
        }
    }

    /// Materialize rows, ordered by solved count descending then name
    /// ascending.
    pub fn rows(&self) -> Vec<ScoreboardRow> {
        let mut out: Vec<ScoreboardRow> = Vec::with_capacity(self.rows.len());
        for (name, states) in self.rows.iter() {
            let mut solved = 0;
            let mut attempts = 0;
            let mut cells = Vec::with_capacity(self.problems.len());
            for (col, &problem_id) in self.problems.iter().enumerate() {
                let state = states[col];
                if state.verdict == Some(Verdict::Accepted) {
                    solved += 1;
                }
                attempts += state.attempts;
                cells.push(self.cell_code(problem_id, name, state));
            }
            out.push(ScoreboardRow {
                name: name.clone(),
                solved,
                attempts,
                cells,
            });
        }
        out.sort_by(|a, b| b.solved.cmp(&a.solved).then(a.name.cmp(&b.name)));
        out
    }
}
