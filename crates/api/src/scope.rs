//! Role-based report visibility resolution.
//!
//! Officers see exactly the reports they are assigned to, plus reports
//! whose school matches one of their active subscriptions. Senior officers
//! and admins see everything.
//!
//! The result distinguishes two cases that callers MUST keep apart:
//!
//! - `None` -- no filtering at all (elevated role).
//! - `Some(set)` -- restrict to exactly these ids. An EMPTY set means
//!   "explicitly zero reports visible" and must short-circuit to an empty
//!   result; it must never fall through to an unfiltered query.
//!
//! The scope is recomputed on every request (subscriptions can change
//! between calls); nothing here is cached across requests.

use std::collections::HashSet;

use edualert_core::roles::has_full_visibility;
use edualert_core::types::DbId;
use edualert_db::repositories::{AssignmentRepo, SubscriptionRepo};
use edualert_db::DbPool;

/// Resolved visibility scope for one request.
#[derive(Debug, Clone)]
pub enum ReportScope {
    /// Elevated role: no filtering.
    All,
    /// Officer: restricted to exactly these report ids (possibly empty).
    Restricted(Vec<DbId>),
}

impl ReportScope {
    /// Whether the scope is a restriction to zero reports.
    pub fn is_empty_restriction(&self) -> bool {
        matches!(self, ReportScope::Restricted(ids) if ids.is_empty())
    }

    /// The id slice to pass to repository filters: `None` for unrestricted
    /// access, `Some` for officers.
    pub fn visible_ids(&self) -> Option<&[DbId]> {
        match self {
            ReportScope::All => None,
            ReportScope::Restricted(ids) => Some(ids),
        }
    }

    /// Whether a specific report id is within scope.
    pub fn contains(&self, id: DbId) -> bool {
        match self {
            ReportScope::All => true,
            ReportScope::Restricted(ids) => ids.contains(&id),
        }
    }
}

/// Compute the set of report ids visible to a user.
///
/// For officers, the result is the union of assignment-derived and
/// subscription-derived ids, deduplicated.
pub async fn resolve_report_scope(
    pool: &DbPool,
    user_id: DbId,
    role: &str,
) -> Result<ReportScope, sqlx::Error> {
    if has_full_visibility(role) {
        return Ok(ReportScope::All);
    }

    let assigned = AssignmentRepo::report_ids_for_officer(pool, user_id).await?;
    let subscribed = SubscriptionRepo::subscribed_report_ids(pool, user_id).await?;

    let mut ids: HashSet<DbId> = HashSet::with_capacity(assigned.len() + subscribed.len());
    ids.extend(assigned);
    ids.extend(subscribed);

    let mut ids: Vec<DbId> = ids.into_iter().collect();
    ids.sort_unstable();
    Ok(ReportScope::Restricted(ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_scope_has_no_id_filter() {
        let scope = ReportScope::All;
        assert!(scope.visible_ids().is_none());
        assert!(!scope.is_empty_restriction());
        assert!(scope.contains(1));
    }

    #[test]
    fn empty_restriction_is_not_unrestricted() {
        // The load-bearing distinction: an empty set means "no reports",
        // not "all reports".
        let scope = ReportScope::Restricted(vec![]);
        assert!(scope.is_empty_restriction());
        assert_eq!(scope.visible_ids(), Some(&[][..]));
        assert!(!scope.contains(1));
    }

    #[test]
    fn restricted_scope_filters_by_id() {
        let scope = ReportScope::Restricted(vec![3, 7]);
        assert!(scope.contains(3));
        assert!(!scope.contains(4));
        assert_eq!(scope.visible_ids(), Some(&[3, 7][..]));
    }
}
