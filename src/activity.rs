use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an activity is drawn and what it represents on the network diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Consumes time and resources; drawn as a timed bar.
    #[default]
    Real,
    /// Logic-only link, drawn as a dependency rather than a bar.
    Virtual,
    /// Zero-width point event.
    Milestone,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Real => "real",
            ActivityKind::Virtual => "virtual",
            ActivityKind::Milestone => "milestone",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "real" => Ok(ActivityKind::Real),
            "virtual" | "dummy" => Ok(ActivityKind::Virtual),
            "milestone" => Ok(ActivityKind::Milestone),
            other => Err(format!("unknown activity kind '{other}'")),
        }
    }
}

/// A scheduling unit as supplied by the editing or import layer.
///
/// Timing fields are never read from here; the solver derives them and returns
/// them separately in [`CpmTiming`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Day count. Zero is valid for logic-only links and milestones.
    pub duration: f64,
    #[serde(default)]
    pub predecessors: Vec<String>,
    #[serde(default)]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Activity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            predecessors: Vec::new(),
            kind: ActivityKind::Real,
            zone: None,
        }
    }

    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = predecessors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_kind(mut self, kind: ActivityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Zone label with blanks collapsed to `None`.
    pub fn zone_label(&self) -> Option<&str> {
        self.zone
            .as_deref()
            .map(str::trim)
            .filter(|zone| !zone.is_empty())
    }

    /// Predecessor ids in first-seen order with repeats removed.
    pub fn distinct_predecessors(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.predecessors.len());
        for pred in &self.predecessors {
            if !seen.contains(&pred.as_str()) {
                seen.push(pred.as_str());
            }
        }
        seen
    }
}

/// Solver-owned timing for a single activity, in days from project start.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CpmTiming {
    pub early_start: f64,
    pub early_finish: f64,
    pub late_start: f64,
    pub late_finish: f64,
    pub total_float: f64,
    pub is_critical: bool,
}

/// An input activity paired with the timing the solver computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedActivity {
    #[serde(flatten)]
    pub activity: Activity,
    #[serde(flatten)]
    pub timing: CpmTiming,
}

impl SolvedActivity {
    pub fn id(&self) -> &str {
        &self.activity.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_zone_is_treated_as_unset() {
        let activity = Activity::new("A", "Excavate", 3.0).with_zone("   ");
        assert_eq!(activity.zone_label(), None);
        let activity = Activity::new("A", "Excavate", 3.0).with_zone(" North ");
        assert_eq!(activity.zone_label(), Some("North"));
    }

    #[test]
    fn distinct_predecessors_keeps_first_occurrence_order() {
        let activity = Activity::new("D", "Roof", 5.0).with_predecessors(["B", "C", "B"]);
        assert_eq!(activity.distinct_predecessors(), vec!["B", "C"]);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Virtual".parse::<ActivityKind>(), Ok(ActivityKind::Virtual));
        assert_eq!("".parse::<ActivityKind>(), Ok(ActivityKind::Real));
        assert!("bar".parse::<ActivityKind>().is_err());
    }
}
