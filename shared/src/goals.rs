use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use validator::{Validate, ValidationError};

use crate::dates::days_until;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallGoal {
    pub id: i64,
    pub title: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub small_goals: Vec<SmallGoal>,
}

fn ratio(done: usize, total: usize, completed: bool) -> f64 {
    if total == 0 {
        if completed { 1.0 } else { 0.0 }
    } else {
        done as f64 / total as f64
    }
}

impl SmallGoal {
    pub fn task_counts(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.completed).count();
        (done, self.tasks.len())
    }

    pub fn progress(&self) -> f64 {
        let (done, total) = self.task_counts();
        ratio(done, total, self.completed)
    }
}

impl Goal {
    /// Completed and total tasks over every small goal.
    pub fn task_counts(&self) -> (usize, usize) {
        self.small_goals
            .iter()
            .map(SmallGoal::task_counts)
            .fold((0, 0), |(d, t), (done, total)| (d + done, t + total))
    }

    pub fn progress(&self) -> f64 {
        let (done, total) = self.task_counts();
        ratio(done, total, self.completed)
    }

    pub fn progress_percent(&self) -> u8 {
        (self.progress() * 100.0).round() as u8
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && days_until(self.deadline, today) < 0
    }

    fn small_goal_mut(&mut self, small_goal_id: i64) -> Option<&mut SmallGoal> {
        self.small_goals.iter_mut().find(|sg| sg.id == small_goal_id)
    }
}

/// New goal as typed into the goal form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GoalDraft {
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub title: String,
    #[validate(length(max = 1000))]
    pub content: String,
    pub deadline: NaiveDate,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl GoalDraft {
    pub fn deadline_in_past(&self, today: NaiveDate) -> bool {
        days_until(self.deadline, today) < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOrder {
    /// Nearest deadline first.
    Deadline,
    /// Most progressed first.
    Progress,
    Title,
}

pub fn sort_goals(goals: &mut [Goal], order: GoalOrder) {
    match order {
        GoalOrder::Deadline => goals.sort_by(|a, b| a.deadline.cmp(&b.deadline).then(a.id.cmp(&b.id))),
        GoalOrder::Progress => goals.sort_by(|a, b| {
            b.progress()
                .partial_cmp(&a.progress())
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        }),
        GoalOrder::Title => goals.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then(a.id.cmp(&b.id))
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub overdue_goals: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Open goal with the nearest deadline.
    pub next_deadline: Option<(i64, NaiveDate)>,
}

impl DashboardSummary {
    pub fn from_goals(goals: &[Goal], today: NaiveDate) -> Self {
        let mut summary = Self {
            total_goals: goals.len(),
            ..Self::default()
        };

        for goal in goals {
            let (done, total) = goal.task_counts();
            summary.completed_tasks += done;
            summary.total_tasks += total;

            if goal.completed {
                summary.completed_goals += 1;
                continue;
            }
            if goal.is_overdue(today) {
                summary.overdue_goals += 1;
            }
            let is_nearer = summary
                .next_deadline
                .map_or(true, |(_, nearest)| goal.deadline < nearest);
            if is_nearer {
                summary.next_deadline = Some((goal.id, goal.deadline));
            }
        }

        summary
    }

    pub fn task_completion_percent(&self) -> u8 {
        (ratio(self.completed_tasks, self.total_tasks, false) * 100.0).round() as u8
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GoalsAction {
    Loaded(Vec<Goal>),
    Added(Goal),
    Updated(Goal),
    Removed(i64),
    TaskToggled {
        goal_id: i64,
        small_goal_id: i64,
        task_id: i64,
    },
}

/// The user's goal list, updated only through `GoalsAction`s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoalsState {
    pub goals: Vec<Goal>,
}

impl GoalsState {
    pub fn apply(&mut self, action: GoalsAction) {
        match action {
            GoalsAction::Loaded(goals) => self.goals = goals,
            GoalsAction::Added(goal) => {
                self.goals.retain(|g| g.id != goal.id);
                self.goals.push(goal);
            }
            GoalsAction::Updated(goal) => {
                if let Some(existing) = self.goals.iter_mut().find(|g| g.id == goal.id) {
                    *existing = goal;
                } else {
                    log::warn!("Ignoring update for unknown goal {}", goal.id);
                }
            }
            GoalsAction::Removed(id) => self.goals.retain(|g| g.id != id),
            GoalsAction::TaskToggled { goal_id, small_goal_id, task_id } => {
                let task = self
                    .goals
                    .iter_mut()
                    .find(|g| g.id == goal_id)
                    .and_then(|g| g.small_goal_mut(small_goal_id))
                    .and_then(|sg| sg.tasks.iter_mut().find(|t| t.id == task_id));
                match task {
                    Some(task) => task.completed = !task.completed,
                    None => log::warn!(
                        "Task {} not found in goal {}/{}",
                        task_id,
                        goal_id,
                        small_goal_id
                    ),
                }
            }
        }
    }

    pub fn find(&self, id: i64) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: i64, completed: bool) -> Task {
        Task { id, content: format!("task {}", id), completed }
    }

    fn goal(id: i64, title: &str, deadline: NaiveDate, tasks: Vec<Task>) -> Goal {
        Goal {
            id,
            title: title.to_string(),
            content: String::new(),
            deadline,
            completed: false,
            small_goals: vec![SmallGoal {
                id: id * 10,
                title: format!("{} step", title),
                deadline,
                difficulty: "normal".to_string(),
                completed: false,
                tasks,
            }],
        }
    }

    #[test]
    fn progress_counts_tasks_across_small_goals() {
        let mut g = goal(1, "Run", date(2024, 5, 1), vec![task(1, true), task(2, false)]);
        g.small_goals.push(SmallGoal {
            id: 11,
            title: "Stretch".into(),
            deadline: date(2024, 5, 1),
            difficulty: String::new(),
            completed: false,
            tasks: vec![task(3, true), task(4, true)],
        });
        assert_eq!(g.task_counts(), (3, 4));
        assert_eq!(g.progress_percent(), 75);
    }

    #[test]
    fn empty_goal_progress_follows_completed_flag() {
        let mut g = goal(1, "Read", date(2024, 5, 1), vec![]);
        assert_eq!(g.progress(), 0.0);
        g.completed = true;
        assert_eq!(g.progress(), 1.0);
    }

    #[test]
    fn summary_aggregates_and_finds_next_deadline() {
        let today = date(2024, 4, 10);
        let mut done = goal(3, "Done", date(2024, 4, 1), vec![task(5, true)]);
        done.completed = true;
        let goals = vec![
            goal(1, "Later", date(2024, 6, 1), vec![task(1, true), task(2, false)]),
            goal(2, "Late", date(2024, 4, 5), vec![task(3, false)]),
            done,
        ];

        let summary = DashboardSummary::from_goals(&goals, today);
        assert_eq!(summary.total_goals, 3);
        assert_eq!(summary.completed_goals, 1);
        assert_eq!(summary.overdue_goals, 1);
        assert_eq!((summary.completed_tasks, summary.total_tasks), (2, 4));
        assert_eq!(summary.task_completion_percent(), 50);
        assert_eq!(summary.next_deadline, Some((2, date(2024, 4, 5))));
    }

    #[test]
    fn sorts_by_each_order() {
        let mut goals = vec![
            goal(1, "beta", date(2024, 6, 1), vec![task(1, true)]),
            goal(2, "Alpha", date(2024, 5, 1), vec![task(2, false)]),
            goal(3, "gamma", date(2024, 7, 1), vec![task(3, true), task(4, false)]),
        ];

        sort_goals(&mut goals, GoalOrder::Deadline);
        assert_eq!(goals.iter().map(|g| g.id).collect::<Vec<_>>(), vec![2, 1, 3]);

        sort_goals(&mut goals, GoalOrder::Progress);
        assert_eq!(goals.iter().map(|g| g.id).collect::<Vec<_>>(), vec![1, 3, 2]);

        sort_goals(&mut goals, GoalOrder::Title);
        assert_eq!(goals.iter().map(|g| g.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn reducer_handles_crud_and_task_toggle() {
        let mut state = GoalsState::default();
        state.apply(GoalsAction::Loaded(vec![goal(1, "Run", date(2024, 5, 1), vec![task(7, false)])]));
        state.apply(GoalsAction::Added(goal(2, "Swim", date(2024, 5, 2), vec![])));
        assert_eq!(state.goals.len(), 2);

        state.apply(GoalsAction::TaskToggled { goal_id: 1, small_goal_id: 10, task_id: 7 });
        assert_eq!(state.find(1).unwrap().progress(), 1.0);

        let mut renamed = state.find(2).unwrap().clone();
        renamed.title = "Swim daily".into();
        state.apply(GoalsAction::Updated(renamed));
        assert_eq!(state.find(2).unwrap().title, "Swim daily");

        state.apply(GoalsAction::Removed(1));
        assert!(state.find(1).is_none());

        // unknown ids leave the state untouched
        let before = state.clone();
        state.apply(GoalsAction::TaskToggled { goal_id: 9, small_goal_id: 9, task_id: 9 });
        assert_eq!(state, before);
    }

    #[test]
    fn draft_validation() {
        let ok = GoalDraft {
            title: "Learn Rust".into(),
            content: "Every day".into(),
            deadline: date(2024, 12, 31),
        };
        assert!(ok.validate().is_ok());
        assert!(ok.deadline_in_past(date(2025, 1, 1)));

        let blank = GoalDraft { title: "   ".into(), ..ok.clone() };
        assert!(blank.validate().is_err());

        let long = GoalDraft { title: "x".repeat(51), ..ok };
        assert!(long.validate().is_err());
    }

    #[test]
    fn goal_json_defaults_missing_collections() {
        let g: Goal = serde_json::from_str(
            r#"{"id": 4, "title": "Write", "deadline": "2024-08-01"}"#,
        )
        .unwrap();
        assert!(g.small_goals.is_empty());
        assert!(!g.completed);
    }
}
