//! The KPI payload from the latest successful upload.
//!
//! The dashboard view owns a single `Option<KpiSnapshot>` slot. A new upload
//! replaces it wholesale; the payload inside is never mutated. Clones share
//! the same allocation, and equality is identity, so child components only
//! re-render when a different upload lands.

use std::ops::Deref;
use std::rc::Rc;

use api::kpi::KpiResponse;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct KpiSnapshot {
    kpi: Rc<KpiResponse>,
    received_at: OffsetDateTime,
}

impl KpiSnapshot {
    pub fn new(kpi: KpiResponse) -> Self {
        Self::received_at(kpi, OffsetDateTime::now_utc())
    }

    pub fn received_at(kpi: KpiResponse, received_at: OffsetDateTime) -> Self {
        Self {
            kpi: Rc::new(kpi),
            received_at,
        }
    }

    pub fn kpi(&self) -> &KpiResponse {
        &self.kpi
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.received_at
    }
}

impl PartialEq for KpiSnapshot {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.kpi, &other.kpi)
    }
}

impl Deref for KpiSnapshot {
    type Target = KpiResponse;

    fn deref(&self) -> &KpiResponse {
        &self.kpi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::kpi::WorkforceEntry;

    #[test]
    fn equality_is_identity_not_contents() {
        let first = KpiSnapshot::new(KpiResponse::default());
        let same = first.clone();
        let other = KpiSnapshot::new(KpiResponse::default());

        assert_eq!(first, same);
        assert_ne!(first, other);
    }

    #[test]
    fn derefs_to_payload() {
        let snapshot = KpiSnapshot::new(KpiResponse {
            workforce_by_gender: Some(vec![WorkforceEntry::new("Male", 4)]),
            ..KpiResponse::default()
        });
        assert_eq!(snapshot.workforce_entries().len(), 1);
    }
}
