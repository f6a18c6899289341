//! Field-completeness validation of the tracked registry
//!
//! Every preview entry must eventually carry `added_in_version` and
//! `expected_stable_version`; every deprecated entry must carry
//! `deprecated_in_version` and `expected_remove_version`. Validation
//! only reports; remediation is the caller's decision.

use crate::models::{ApiCategory, ApiEntry, Problem, Registry};
use crate::version::VersionField;

const DEPRECATED_FIELDS: [VersionField; 2] =
    [VersionField::DeprecatedIn, VersionField::ExpectedRemove];
const PREVIEW_FIELDS: [VersionField; 2] = [VersionField::AddedIn, VersionField::ExpectedStable];

/// One problem per missing required lifecycle field, across every
/// package and entry
pub fn validate(registry: &Registry) -> Vec<Problem> {
    let mut problems = Vec::new();
    for (pkg, record) in &registry.packages {
        check_list(
            pkg,
            record.list(ApiCategory::Deprecated),
            &DEPRECATED_FIELDS,
            &mut problems,
        );
        check_list(
            pkg,
            record.list(ApiCategory::Preview),
            &PREVIEW_FIELDS,
            &mut problems,
        );
    }
    problems
}

fn check_list(
    pkg: &str,
    entries: Option<&Vec<ApiEntry>>,
    fields: &[VersionField],
    problems: &mut Vec<Problem>,
) {
    for entry in entries.map_or(&[][..], Vec::as_slice) {
        for field in fields {
            if entry.is_unset(*field) {
                problems.push(Problem::MissingVersionField {
                    package: pkg.to_string(),
                    name: entry.name.clone(),
                    field: *field,
                });
            }
        }
    }
}
