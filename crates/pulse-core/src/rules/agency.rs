//! Agency rules: project timelines and deliverable deadlines

use chrono::{DateTime, Duration, Utc};

use crate::domain::Domain;
use crate::engine::{Rule, RuleContext};
use crate::recommendation::{Priority, Recommendation};
use crate::snapshot::{parse_timestamp, Deliverable, Project};
use crate::{Error, Result};

use super::FnRule;

/// Projects ending within this many days are at risk when under half done
const TIMELINE_HORIZON_DAYS: i64 = 14;

/// Deliverables due within this many days are upcoming
const DEADLINE_WINDOW_DAYS: i64 = 3;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        FnRule::boxed("agency.timeline", Domain::Agency, timeline),
        FnRule::boxed("agency.deadlines", Domain::Agency, deadlines),
    ]
}

/// Whole days until `due`, rounded up; negative once the date has passed
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (due - now).num_milliseconds() as f64;
    (millis / Duration::days(1).num_milliseconds() as f64).ceil() as i64
}

fn timeline(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let projects: Vec<Project> = ctx.snapshot.list(Domain::Agency, "projects")?;
    if projects.is_empty() {
        return Ok(vec![]);
    }

    let horizon = ctx
        .now
        .checked_add_signed(Duration::days(TIMELINE_HORIZON_DAYS))
        .ok_or_else(|| {
            Error::InvalidDate(format!(
                "{} + {} days is out of range",
                ctx.now.to_rfc3339(),
                TIMELINE_HORIZON_DAYS
            ))
        })?;

    let mut behind = 0;
    for project in &projects {
        let (Some(progress), Some(end_date)) = (project.progress, project.end_date.as_deref())
        else {
            continue;
        };
        if progress < 50.0 && parse_timestamp(end_date)? < horizon {
            behind += 1;
        }
    }

    if behind == 0 {
        return Ok(vec![]);
    }

    let rec = Recommendation::new(
        "Project Timeline Alert",
        format!(
            "{} project(s) are under 50% complete and due within {} days.",
            behind, TIMELINE_HORIZON_DAYS
        ),
        Priority::High,
        Domain::Agency,
    )
    .with_modules(&[Domain::Agency, Domain::Executive]);

    Ok(vec![rec])
}

fn deadlines(ctx: &RuleContext<'_>) -> Result<Vec<Recommendation>> {
    let deliverables: Vec<Deliverable> = ctx.snapshot.list(Domain::Agency, "deliverables")?;

    let mut upcoming = 0;
    for deliverable in &deliverables {
        let Some(due_date) = deliverable.due_date.as_deref() else {
            continue;
        };
        let days = days_until(parse_timestamp(due_date)?, ctx.now);
        if (0..=DEADLINE_WINDOW_DAYS).contains(&days) {
            upcoming += 1;
        }
    }

    if upcoming == 0 {
        return Ok(vec![]);
    }

    let rec = Recommendation::new(
        "Upcoming Deadlines",
        format!(
            "{} deliverable(s) are due in the next {} days.",
            upcoming, DEADLINE_WINDOW_DAYS
        ),
        Priority::High,
        Domain::Agency,
    )
    .with_modules(&[Domain::Agency, Domain::Executive]);

    Ok(vec![rec])
}
