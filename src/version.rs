//! Release version policy
//!
//! Concrete versions are release strings of the shape `v<major>.<minor>.<patch>`.
//! A lifecycle field whose value starts with `$` carries a placeholder token
//! instead (e.g. `$NEXT_RELEASE`) and must be rewritten to a concrete version
//! by a later `fix-versions` pass before the entry is release-ready.

use std::fmt;

/// Placeholder for the next release, whatever it turns out to be
pub const NEXT_RELEASE: &str = "$NEXT_RELEASE";
/// Placeholder for the release where a preview API is expected to stabilize
pub const NEXT_RELEASE_STABLE: &str = "$NEXT_RELEASE_STABLE";

/// Errors raised while deriving or resolving version values
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("unexpected tag: {0} (expected v<major>.<minor>.<patch>)")]
    MalformedTag(String),

    #[error("missing {field} in supplied values: required to resolve {package}:{name}")]
    MissingValue {
        field: VersionField,
        package: String,
        name: String,
    },
}

/// The four lifecycle fields that hold version values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionField {
    AddedIn,
    ExpectedStable,
    DeprecatedIn,
    ExpectedRemove,
}

impl VersionField {
    /// JSON field name on an API entry
    pub fn key(&self) -> &'static str {
        match self {
            VersionField::AddedIn => "added_in_version",
            VersionField::ExpectedStable => "expected_stable_version",
            VersionField::DeprecatedIn => "deprecated_in_version",
            VersionField::ExpectedRemove => "expected_remove_version",
        }
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// True when a field value defers to a later resolution pass
pub fn is_placeholder(value: &str) -> bool {
    value.starts_with('$')
}

/// Version values for one run, from caller overrides plus tag or
/// placeholder policy. `None` means the caller left the value unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionSet {
    pub added_in: Option<String>,
    pub stable_in: Option<String>,
    pub deprecated_in: Option<String>,
    pub remove_in: Option<String>,
}

impl VersionSet {
    /// Concrete value available for a lifecycle field, if any
    pub fn get(&self, field: VersionField) -> Option<&str> {
        match field {
            VersionField::AddedIn => self.added_in.as_deref(),
            VersionField::ExpectedStable => self.stable_in.as_deref(),
            VersionField::DeprecatedIn => self.deprecated_in.as_deref(),
            VersionField::ExpectedRemove => self.remove_in.as_deref(),
        }
    }

    /// Fill unset values from the current release tag `vX.Y.Z`.
    ///
    /// Policy: new APIs land in `vX.(Y+1).Z`, deprecations take effect in
    /// `vX.(Y+1).Z`, preview APIs stabilize in `vX.(Y+3).Z`. Explicit
    /// caller-supplied values always win over the derived ones.
    pub fn apply_tag(&mut self, tag: &str) -> Result<(), VersionError> {
        let (x, y, z) = parse_tag(tag)?;
        if self.added_in.is_none() {
            self.added_in = Some(vfmt(x, y + 1, z));
        }
        if self.stable_in.is_none() {
            self.stable_in = Some(vfmt(x, y + 3, z));
        }
        if self.deprecated_in.is_none() {
            self.deprecated_in = Some(vfmt(x, y + 1, z));
        }
        Ok(())
    }

    /// Fill unset values with placeholder tokens, for runs where the next
    /// release version is not known yet.
    pub fn apply_placeholders(&mut self) {
        if self.added_in.is_none() {
            self.added_in = Some(NEXT_RELEASE.to_string());
        }
        if self.stable_in.is_none() {
            self.stable_in = Some(NEXT_RELEASE_STABLE.to_string());
        }
        if self.deprecated_in.is_none() {
            self.deprecated_in = Some(NEXT_RELEASE.to_string());
        }
    }
}

fn parse_tag(tag: &str) -> Result<(u64, u64, u64), VersionError> {
    let malformed = || VersionError::MalformedTag(tag.to_string());
    let numbers = tag.strip_prefix('v').ok_or_else(malformed)?;
    let mut parts = numbers.split('.');
    let mut next = || -> Result<u64, VersionError> {
        parts
            .next()
            .ok_or_else(malformed)?
            .parse()
            .map_err(|_| malformed())
    };
    let triplet = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(triplet)
}

fn vfmt(x: u64, y: u64, z: u64) -> String {
    format!("v{}.{}.{}", x, y, z)
}
