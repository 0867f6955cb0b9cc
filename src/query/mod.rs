//! # Query Translation & Validation Engine
//!
//! Two entry points produce a bounded, canonical search request:
//! - text translation: GraphQL-flavoured query text with an embedded
//!   `filter: { ... }` clause and `limit:` / `offset:` directives
//! - structured validation: a caller-supplied `filterGroups` body
//!
//! Both share the same limit rules. Results are remapped with a synthetic
//! cost budget attached.

pub mod collection;
pub mod cost;
pub mod errors;
pub mod extractor;
pub mod limits;
pub mod operator;
pub mod pagination;
pub mod predicate;
pub mod translator;
pub mod validator;

pub use collection::{Collection, CollectionCategory};
pub use cost::{CostAccountant, CostBudget, RequestKind, MAX_COST};
pub use errors::{QueryError, QueryResult};
pub use extractor::extract;
pub use limits::LimitInfo;
pub use operator::{resolve, Operator, ValueShape};
pub use pagination::{extract_pagination, Pagination, DEFAULT_LIMIT};
pub use predicate::{Condition, FilterGroup, Predicate, SearchRequest};
pub use translator::{run, translate, TranslatedQuery, Translation};
pub use validator::{assemble, validate, SearchRequestInput, ValidatedSearch};
