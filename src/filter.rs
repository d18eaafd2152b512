//! GitHub search filter predicates and the query assembler.
//!
//! A [`Predicate`] is a deferred search condition: constructing one never
//! fails, and validation happens when it is evaluated. [`build_query`]
//! evaluates an ordered sequence of predicates and joins their fragments
//! into a single GitHub search string, stopping at the first invalid
//! predicate.

use thiserror::Error;

/// Validation failures raised while evaluating a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("{field} cannot be empty")]
    InvalidArgument { field: &'static str },
}

/// The search dimension a predicate constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Type,
    State,
    Review,
    Draft,
    Archived,
    Org,
    Author,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Type => "type",
            Facet::State => "state",
            Facet::Review => "review",
            Facet::Draft => "draft",
            Facet::Archived => "archived",
            Facet::Org => "org",
            Facet::Author => "author",
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search condition contributing zero or one fragment to a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Authors(Vec<String>),
    Org(String),
    IsOpen,
    IsClosed,
    IsPullRequest,
    ReviewRequired(bool),
    IncludeApproved(bool),
    IncludeDraft(bool),
    Archived(bool),
}

impl Predicate {
    /// `author:<name>` for each name, in the order given.
    pub fn authors<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::Authors(names.into_iter().map(Into::into).collect())
    }

    pub fn org(name: impl Into<String>) -> Self {
        Predicate::Org(name.into())
    }

    pub const fn is_open() -> Self {
        Predicate::IsOpen
    }

    pub const fn is_closed() -> Self {
        Predicate::IsClosed
    }

    pub const fn is_pull_request() -> Self {
        Predicate::IsPullRequest
    }

    /// Adds `review:required`; the opposite of [`Predicate::include_approved`].
    pub const fn review_required(required: bool) -> Self {
        Predicate::ReviewRequired(required)
    }

    /// Leaves out `review:required` when approved PRs are wanted; the
    /// opposite of [`Predicate::review_required`].
    pub const fn include_approved(approved: bool) -> Self {
        Predicate::IncludeApproved(approved)
    }

    pub const fn include_draft(draft: bool) -> Self {
        Predicate::IncludeDraft(draft)
    }

    pub const fn archived(archived: bool) -> Self {
        Predicate::Archived(archived)
    }

    pub fn facet(&self) -> Facet {
        match self {
            Predicate::Authors(_) => Facet::Author,
            Predicate::Org(_) => Facet::Org,
            Predicate::IsOpen | Predicate::IsClosed => Facet::State,
            Predicate::IsPullRequest => Facet::Type,
            Predicate::ReviewRequired(_) | Predicate::IncludeApproved(_) => Facet::Review,
            Predicate::IncludeDraft(_) => Facet::Draft,
            Predicate::Archived(_) => Facet::Archived,
        }
    }

    /// Renders the predicate's search fragment. An empty string means the
    /// predicate contributes nothing.
    pub fn evaluate(&self) -> Result<String, FilterError> {
        let fragment = match self {
            Predicate::Authors(names) => {
                let mut terms = Vec::with_capacity(names.len());
                for name in names {
                    if name.is_empty() {
                        return Err(FilterError::InvalidArgument { field: "author" });
                    }
                    terms.push(format!("author:{}", name));
                }
                terms.join(" ")
            }
            Predicate::Org(name) => {
                if name.is_empty() {
                    return Err(FilterError::InvalidArgument { field: "org" });
                }
                format!("org:{}", name)
            }
            Predicate::IsOpen => "is:open".to_string(),
            Predicate::IsClosed => "is:closed".to_string(),
            Predicate::IsPullRequest => "type:pr".to_string(),
            Predicate::ReviewRequired(required) => review_fragment(*required),
            Predicate::IncludeApproved(approved) => review_fragment(!approved),
            Predicate::IncludeDraft(draft) => format!("draft:{}", draft),
            Predicate::Archived(archived) => format!("archived:{}", archived),
        };
        Ok(fragment)
    }
}

fn review_fragment(required: bool) -> String {
    if required {
        "review:required".to_string()
    } else {
        String::new()
    }
}

/// Evaluates predicates in order and joins their fragments with single
/// spaces.
///
/// Fails with the first predicate error; no partial query is returned.
/// Predicates that render to nothing leave no separator behind.
pub fn build_query(predicates: &[Predicate]) -> Result<String, FilterError> {
    let mut fragments = Vec::with_capacity(predicates.len());
    for predicate in predicates {
        let fragment = predicate.evaluate()?;
        if !fragment.is_empty() {
            fragments.push(fragment);
        }
    }
    Ok(fragments.join(" "))
}

/// Ordered collection of predicates with chaining helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    pub fn extend<I>(&mut self, predicates: I) -> &mut Self
    where
        I: IntoIterator<Item = Predicate>,
    {
        self.predicates.extend(predicates);
        self
    }

    pub fn authors<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Predicate::authors(names))
    }

    pub fn org(&mut self, name: impl Into<String>) -> &mut Self {
        self.push(Predicate::org(name))
    }

    pub fn is_open(&mut self) -> &mut Self {
        self.push(Predicate::IsOpen)
    }

    pub fn is_pull_request(&mut self) -> &mut Self {
        self.push(Predicate::IsPullRequest)
    }

    pub fn review_required(&mut self, required: bool) -> &mut Self {
        self.push(Predicate::ReviewRequired(required))
    }

    pub fn include_draft(&mut self, draft: bool) -> &mut Self {
        self.push(Predicate::IncludeDraft(draft))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn build(&self) -> Result<String, FilterError> {
        build_query(&self.predicates)
    }

    pub fn into_vec(self) -> Vec<Predicate> {
        self.predicates
    }
}
