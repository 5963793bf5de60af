use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Severity;
use crate::catalog::{Catalog, SlotId};
use crate::Id;

/// Identifier assigned to every stored constraint record.
pub type RecordId = Id;

/// One stakeholder's request that an item avoid some slots.
///
/// Records are created by the store on a successful submission and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintRecord {
    id: RecordId,
    submitter: String,
    forbidden: BTreeSet<SlotId>,
    reason: Option<String>,
    severity: Severity,
}

impl ConstraintRecord {
    pub(crate) fn new(
        submitter: String,
        forbidden: BTreeSet<SlotId>,
        reason: Option<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: crate::generate_id(),
            submitter,
            forbidden,
            reason,
            severity,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn submitter(&self) -> &str {
        &self.submitter
    }

    /// Forbidden slots in chronological order. Never empty.
    pub fn forbidden_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.forbidden.iter().copied()
    }

    pub fn forbids(&self, slot: SlotId) -> bool {
        self.forbidden.contains(&slot)
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Renders the record with slot labels resolved against `catalog`.
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> RecordDisplay<'a> {
        RecordDisplay {
            record: self,
            catalog,
        }
    }
}

/// `Display` adapter returned by [`ConstraintRecord::display`].
///
/// Formats as `Asha - Unavailable: 6–7 PM, 7–8 PM (High: flight lands late)`.
pub struct RecordDisplay<'a> {
    record: &'a ConstraintRecord,
    catalog: &'a Catalog,
}

impl fmt::Display for RecordDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Unavailable: ", self.record.submitter)?;
        for (i, slot) in self.record.forbidden.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.catalog.slot(*slot) {
                Some(s) => write!(f, "{}", s)?,
                None => write!(f, "#{}", slot.index())?,
            }
        }
        write!(
            f,
            " ({}: {})",
            self.record.severity,
            self.record.reason.as_deref().unwrap_or("")
        )
    }
}

/// A constraint as submitted by a caller, before validation.
///
/// Items and slots are named by their catalog labels.
///
/// ```
/// use runthrough::constraints::{Severity, Submission};
///
/// let submission = Submission::new("Take On Me", "Asha")
///     .forbid("6–7 PM")
///     .forbid("7–8 PM")
///     .with_reason("flight lands late")
///     .with_severity(Severity::High);
/// assert_eq!(submission.forbidden().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Submission {
    item: String,
    submitter: String,
    #[cfg_attr(feature = "serde", serde(default))]
    forbidden: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    reason: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    severity: Severity,
}

impl Submission {
    pub fn new(item: impl Into<String>, submitter: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            submitter: submitter.into(),
            ..Self::default()
        }
    }

    /// Adds a slot the item must avoid.
    pub fn forbid(mut self, slot: impl Into<String>) -> Self {
        self.forbidden.push(slot.into());
        self
    }

    pub fn forbid_all<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden.extend(slots.into_iter().map(Into::into));
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn submitter(&self) -> &str {
        &self.submitter
    }

    pub fn forbidden(&self) -> &[String] {
        &self.forbidden
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}
