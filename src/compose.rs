//! Query composition policy.
//!
//! Every search query is assembled in the same order: the `type:pr` prefix,
//! the default filter set, the organisation, the target authors, then any
//! caller overrides. Predicates are independent, so an override never
//! removes a default; if both render a token for the same facet, both
//! appear in the query.

use std::collections::BTreeMap;

use tracing::debug;

use crate::filter::{Facet, FilterError, Predicate, PredicateSet, build_query};

/// Predicates placed ahead of the caller's own filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultFilters {
    predicates: Vec<Predicate>,
}

impl DefaultFilters {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// Open, non-draft pull requests in unarchived repositories.
    pub fn standard() -> Self {
        Self::new(vec![
            Predicate::include_draft(false),
            Predicate::is_open(),
            Predicate::archived(false),
        ])
    }

    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}

impl Default for DefaultFilters {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lays out the full predicate sequence for a search without evaluating it.
pub fn compose_predicates(
    defaults: &DefaultFilters,
    org: &str,
    logins: &[String],
    overrides: &[Predicate],
) -> Vec<Predicate> {
    let mut set = PredicateSet::new();
    set.is_pull_request()
        .extend(defaults.predicates.iter().cloned())
        .org(org)
        .authors(logins.iter().cloned())
        .extend(overrides.iter().cloned());
    set.into_vec()
}

/// Builds the search query for `logins` within `org`.
pub fn compose_query(
    defaults: &DefaultFilters,
    org: &str,
    logins: &[String],
    overrides: &[Predicate],
) -> Result<String, FilterError> {
    let predicates = compose_predicates(defaults, org, logins, overrides);
    let query = build_query(&predicates)?;

    let conflicts = conflicting_facets(&predicates);
    if !conflicts.is_empty() {
        let names: Vec<&str> = conflicts.iter().map(Facet::as_str).collect();
        debug!(
            facets = %names.join(","),
            "query has more than one token for the same facet"
        );
    }

    Ok(query)
}

/// Facets that receive a token from more than one predicate.
///
/// Author is additive and never reported. Predicates that render nothing,
/// or fail to render, do not count.
pub fn conflicting_facets(predicates: &[Predicate]) -> Vec<Facet> {
    let mut counts: BTreeMap<Facet, usize> = BTreeMap::new();
    for predicate in predicates {
        let facet = predicate.facet();
        if facet == Facet::Author {
            continue;
        }
        if predicate.evaluate().is_ok_and(|fragment| !fragment.is_empty()) {
            *counts.entry(facet).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(facet, _)| facet)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logins(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_compose_order() {
        let query = compose_query(
            &DefaultFilters::standard(),
            "TestOrg",
            &logins(&["cuotos", "danyo"]),
            &[Predicate::review_required(true)],
        )
        .unwrap();

        assert_eq!(
            query,
            "type:pr draft:false is:open archived:false org:TestOrg author:cuotos author:danyo review:required"
        );
    }

    #[test]
    fn test_compose_without_logins() {
        let query = compose_query(
            &DefaultFilters::standard(),
            "TestOrg",
            &[],
            &[Predicate::include_approved(true)],
        )
        .unwrap();

        assert_eq!(query, "type:pr draft:false is:open archived:false org:TestOrg");
    }

    #[test]
    fn test_compose_token_sets() {
        let cases: Vec<(&str, Vec<&str>, bool, Vec<&str>)> = vec![
            (
                "TestOrg",
                vec![],
                false,
                vec!["org:TestOrg", "is:open", "review:required", "draft:false", "type:pr", "archived:false"],
            ),
            (
                "SecondOrg",
                vec!["cuotos"],
                false,
                vec![
                    "org:SecondOrg",
                    "is:open",
                    "review:required",
                    "draft:false",
                    "author:cuotos",
                    "type:pr",
                    "archived:false",
                ],
            ),
            (
                "TestOrg",
                vec![],
                true,
                vec!["org:TestOrg", "is:open", "draft:false", "type:pr", "archived:false"],
            ),
        ];

        for (org, users, include_approved, expected) in cases {
            let query = compose_query(
                &DefaultFilters::standard(),
                org,
                &logins(&users),
                &[Predicate::review_required(!include_approved)],
            )
            .unwrap();

            let mut actual: Vec<&str> = query.split_whitespace().collect();
            let mut expected = expected;
            actual.sort_unstable();
            expected.sort_unstable();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_override_does_not_replace_default() {
        let overrides = [Predicate::include_draft(true)];
        let query =
            compose_query(&DefaultFilters::standard(), "acme", &[], &overrides).unwrap();

        assert!(query.contains("draft:false"));
        assert!(query.contains("draft:true"));

        let predicates = compose_predicates(&DefaultFilters::standard(), "acme", &[], &overrides);
        assert_eq!(conflicting_facets(&predicates), vec![Facet::Draft]);
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = DefaultFilters::new(vec![Predicate::is_closed()]);
        let query = compose_query(&defaults, "acme", &logins(&["dan"]), &[]).unwrap();
        assert_eq!(query, "type:pr is:closed org:acme author:dan");

        let query = compose_query(&DefaultFilters::none(), "acme", &[], &[]).unwrap();
        assert_eq!(query, "type:pr org:acme");
    }

    #[test]
    fn test_compose_rejects_empty_org() {
        let err = compose_query(&DefaultFilters::standard(), "", &[], &[]).unwrap_err();
        assert_eq!(err, FilterError::InvalidArgument { field: "org" });
    }

    #[test]
    fn test_compose_rejects_empty_login() {
        let err =
            compose_query(&DefaultFilters::standard(), "acme", &logins(&["dan", ""]), &[])
                .unwrap_err();
        assert_eq!(err.to_string(), "author cannot be empty");
    }

    #[test]
    fn test_conflicting_facets_ignores_silent_predicates() {
        let predicates = [
            Predicate::review_required(true),
            Predicate::include_approved(true),
            Predicate::authors(["a"]),
            Predicate::authors(["b"]),
        ];
        assert!(conflicting_facets(&predicates).is_empty());

        let predicates = [Predicate::is_open(), Predicate::is_closed()];
        assert_eq!(conflicting_facets(&predicates), vec![Facet::State]);
    }
}
