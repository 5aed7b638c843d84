//! Master-list classification for scanned IDs.
//!
//! The authorized-ID master list is a soft whitelist: it gates the operator
//! form, not the write path. An ID can exist in the Inventory Table without
//! being listed (manual registrations) and vice versa (listed but never
//! scanned).

use crate::asset::Asset;
use crate::ident::PanelId;

// ---------------------------------------------------------------------------
// IdLookup
// ---------------------------------------------------------------------------

/// Result of classifying a scanned ID against the inventory and the
/// authorized-ID master list.
#[derive(Debug, Clone, PartialEq)]
pub enum IdLookup {
    /// Present in the Inventory Table: current state is known.
    Known(Asset),
    /// Absent from inventory but on the master list: eligible for one-click
    /// registration.
    Registrable,
    /// Absent from both: not an authorized ID.
    Unlisted,
}

/// Classify a canonical ID.
///
/// `authorized` entries are expected in canonical form (the store normalizes
/// them on load).
pub fn classify(id: &PanelId, inventory: &[Asset], authorized: &[String]) -> IdLookup {
    if let Some(asset) = inventory.iter().find(|asset| asset.id == *id) {
        return IdLookup::Known(asset.clone());
    }
    if authorized.iter().any(|entry| entry == id.as_str()) {
        return IdLookup::Registrable;
    }
    IdLookup::Unlisted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetStatus;
    use chrono::Utc;

    fn asset(id: &str) -> Asset {
        Asset {
            id: PanelId::new(id).unwrap(),
            status: AssetStatus::Storage,
            sub_status: None,
            location: "Storage".to_string(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn id_in_inventory_is_known() {
        let inventory = vec![asset("54R15564")];
        let id = PanelId::new("54r15564").unwrap();
        match classify(&id, &inventory, &[]) {
            IdLookup::Known(found) => assert_eq!(found.id, id),
            other => panic!("expected Known, got {other:?}"),
        }
    }

    #[test]
    fn inventory_wins_over_master_list() {
        let inventory = vec![asset("54R15564")];
        let authorized = vec!["54R15564".to_string()];
        let id = PanelId::new("54R15564").unwrap();
        assert!(matches!(
            classify(&id, &inventory, &authorized),
            IdLookup::Known(_)
        ));
    }

    #[test]
    fn listed_but_unscanned_id_is_registrable() {
        let authorized = vec!["54R15564".to_string()];
        let id = PanelId::new("54R15564").unwrap();
        assert_eq!(classify(&id, &[], &authorized), IdLookup::Registrable);
    }

    #[test]
    fn id_absent_everywhere_is_unlisted() {
        let id = PanelId::new("UNSEEN-1").unwrap();
        assert_eq!(classify(&id, &[], &[]), IdLookup::Unlisted);
    }
}
