//! Routine and step data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of product applied in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    Cleanser,
    Toner,
    Serum,
    Moisturizer,
    Sunscreen,
    Treatment,
    Mask,
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Cleanser => "Cleanser",
            Self::Toner => "Toner",
            Self::Serum => "Serum",
            Self::Moisturizer => "Moisturizer",
            Self::Sunscreen => "Sunscreen",
            Self::Treatment => "Treatment",
            Self::Mask => "Mask",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Evening,
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "Morning"),
            Self::Evening => write!(f, "Evening"),
        }
    }
}

/// One product application within a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineStep {
    pub id: Uuid,
    pub product_type: ProductType,
    pub product_name: String,
    pub instructions: String,
    #[serde(default)]
    pub is_completed: bool,
    /// 1-based position within the routine.
    pub order: u32,
    /// Countdown length in seconds, for steps meant to be timed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_duration: Option<u32>,
}

impl RoutineStep {
    /// Create an untimed, not-yet-completed step.
    pub fn new(
        product_type: ProductType,
        product_name: impl Into<String>,
        instructions: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_type,
            product_name: product_name.into(),
            instructions: instructions.into(),
            is_completed: false,
            order,
            timer_duration: None,
        }
    }

    /// Builder: attach a countdown duration in seconds.
    pub fn with_timer(mut self, seconds: u32) -> Self {
        self.timer_duration = Some(seconds);
        self
    }
}

/// An ordered set of steps for one time of day.
///
/// The collection is stored as JSON under [`crate::store::keys::ROUTINES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: Uuid,
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub steps: Vec<RoutineStep>,
    #[serde(default)]
    pub is_completed: bool,
    pub scheduled_date: DateTime<Utc>,
}

impl Routine {
    pub fn new(
        time_of_day: TimeOfDay,
        steps: Vec<RoutineStep>,
        scheduled_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            time_of_day,
            steps,
            is_completed: false,
            scheduled_date,
        }
    }

    pub fn step(&self, step_id: Uuid) -> Option<&RoutineStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_completed).count()
    }

    /// Fraction of steps completed, in `[0, 1]`. A routine with no steps reports 0.
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.completed_steps() as f64 / self.steps.len() as f64
    }
}

/// Replace the routine with the same id, or append it if absent.
pub fn upsert_routine(routines: &mut Vec<Routine>, routine: &Routine) {
    match routines.iter_mut().find(|r| r.id == routine.id) {
        Some(existing) => *existing = routine.clone(),
        None => routines.push(routine.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> Vec<RoutineStep> {
        vec![
            RoutineStep::new(ProductType::Cleanser, "Cleanser", "wash", 1),
            RoutineStep::new(ProductType::Toner, "Toner", "pat", 2),
            RoutineStep::new(ProductType::Mask, "Mask", "rinse", 3).with_timer(600),
        ]
    }

    #[test]
    fn progress_counts_completed_steps() {
        let mut routine = Routine::new(TimeOfDay::Evening, three_steps(), Utc::now());
        assert_eq!(routine.progress(), 0.0);
        routine.steps[0].is_completed = true;
        assert!((routine.progress() - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_of_empty_routine_is_zero() {
        let routine = Routine::new(TimeOfDay::Morning, Vec::new(), Utc::now());
        assert_eq!(routine.progress(), 0.0);
    }

    #[test]
    fn upsert_replaces_by_id() {
        let first = Routine::new(TimeOfDay::Morning, three_steps(), Utc::now());
        let mut routines = vec![first.clone()];

        let mut edited = first.clone();
        edited.is_completed = true;
        upsert_routine(&mut routines, &edited);
        assert_eq!(routines.len(), 1);
        assert!(routines[0].is_completed);

        let other = Routine::new(TimeOfDay::Evening, Vec::new(), Utc::now());
        upsert_routine(&mut routines, &other);
        assert_eq!(routines.len(), 2);
    }

    #[test]
    fn step_timer_is_optional_in_json() {
        let step = RoutineStep::new(ProductType::Toner, "Toner", "pat", 2);
        let json = serde_json::to_value(&step).unwrap();
        assert!(json.get("timer_duration").is_none());
        assert_eq!(json["product_type"], "Toner");
    }
}
