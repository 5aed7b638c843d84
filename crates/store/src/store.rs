//! [`LedgerStore`]: the single I/O boundary over the backing files.
//!
//! Every operation reloads the affected tables from disk, applies its change
//! in memory, and rewrites the files before returning. That mirrors the
//! per-interaction workflow of the spreadsheet system this replaces and
//! deliberately keeps its last-writer-wins behaviour across processes.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use jigtrack_core::asset::{locations, Asset, AssetStatus};
use jigtrack_core::error::CoreError;
use jigtrack_core::ident::PanelId;
use jigtrack_core::lookup::{classify, IdLookup};
use jigtrack_core::transaction::{
    compose_comment, derive_outcome, ActionRequest, TransactionInput, TransactionRecord,
};

use crate::error::StoreError;
use crate::paths::StorePaths;
use crate::{history, inventory, masters, schema};

// ---------------------------------------------------------------------------
// Snapshot / AppliedTransaction
// ---------------------------------------------------------------------------

/// In-memory view of both tables at a point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub inventory: Vec<Asset>,
    pub history: Vec<TransactionRecord>,
}

/// Result of a committed transaction: the new asset state and the history
/// row that was appended.
#[derive(Debug, Clone)]
pub struct AppliedTransaction {
    pub asset: Asset,
    pub record: TransactionRecord,
}

// ---------------------------------------------------------------------------
// LedgerStore
// ---------------------------------------------------------------------------

/// Handle to a store data directory.
///
/// Holds no table state: tables are reloaded per interaction (see module
/// docs). Cheap to clone and share.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    paths: StorePaths,
}

impl LedgerStore {
    /// Open (and if needed initialize) a store at `data_dir`.
    ///
    /// Creates the directory and missing master-list files, then runs the
    /// versioned schema upgrade on the inventory file. Missing table files
    /// are left absent; they appear on the first commit.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let paths = StorePaths::new(data_dir);
        fs::create_dir_all(paths.data_dir())?;

        masters::load_technicians(&paths.technicians())?;
        masters::load_authorized_ids(&paths.authorized_ids())?;
        schema::upgrade_inventory_file(&paths.inventory())?;

        tracing::info!(data_dir = %paths.data_dir().display(), "Ledger store opened");
        Ok(LedgerStore { paths })
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Load both tables wholesale.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot {
            inventory: inventory::load(&self.paths.inventory())?,
            history: history::load(&self.paths.history())?,
        })
    }

    pub fn technicians(&self) -> Result<Vec<String>, StoreError> {
        masters::load_technicians(&self.paths.technicians())
    }

    pub fn authorized_ids(&self) -> Result<Vec<String>, StoreError> {
        masters::load_authorized_ids(&self.paths.authorized_ids())
    }

    /// Classify a scanned ID against the inventory and the master list.
    pub fn lookup(&self, id: &PanelId) -> Result<IdLookup, StoreError> {
        let inventory = inventory::load(&self.paths.inventory())?;
        let authorized = self.authorized_ids()?;
        Ok(classify(id, &inventory, &authorized))
    }

    /// Render the history log as a CSV string for the one-way export.
    pub fn export_history_csv(&self) -> Result<String, StoreError> {
        let records = history::load(&self.paths.history())?;
        history::to_csv_string(&records)
    }

    // -----------------------------------------------------------------------
    // Ledger operations
    // -----------------------------------------------------------------------

    /// Apply a transaction: derive the outcome, upsert the inventory row,
    /// append exactly one history row, persist both tables.
    ///
    /// A rejected derivation (the empty-'Other'-explanation rule) returns
    /// before any file is touched, so both tables stay unchanged.
    pub fn commit_transaction(
        &self,
        input: &TransactionInput,
    ) -> Result<AppliedTransaction, StoreError> {
        let outcome = derive_outcome(&input.request)?;

        let mut inventory = inventory::load(&self.paths.inventory())?;
        let mut records = history::load(&self.paths.history())?;

        let now = Utc::now();
        let asset = inventory::apply_outcome(&mut inventory, &input.id, &outcome, now);

        let other_detail = match &input.request {
            ActionRequest::Remove(details) => details.other_detail.trim(),
            ActionRequest::Install { .. } => "",
        };
        let record = TransactionRecord {
            timestamp: now,
            panel_id: input.id.to_string(),
            action: input.request.action(),
            user: input.technician.clone(),
            category: input.request.category_str().to_string(),
            sub_status: outcome.sub_status,
            comments: compose_comment(input.request.category_str(), other_detail, &input.notes),
        };
        records.push(record.clone());

        inventory::save(&self.paths.inventory(), &inventory)?;
        history::save(&self.paths.history(), &records)?;

        tracing::info!(
            panel_id = %input.id,
            action = record.action.as_str(),
            status = asset.status.as_str(),
            user = %record.user,
            "Transaction committed",
        );
        Ok(AppliedTransaction { asset, record })
    }

    /// Explicitly register a panel: create its inventory row in Storage and
    /// add the ID to the authorized list if it is not there yet.
    ///
    /// Registration creates no history row; the log records transactions
    /// only.
    pub fn register(&self, id: &PanelId) -> Result<Asset, StoreError> {
        let mut assets = inventory::load(&self.paths.inventory())?;
        if assets.iter().any(|asset| asset.id == *id) {
            return Err(CoreError::Conflict(format!(
                "panel {id} is already registered"
            ))
            .into());
        }

        let asset = Asset {
            id: id.clone(),
            status: AssetStatus::Storage,
            sub_status: None,
            location: locations::STORAGE.to_string(),
            last_updated: Utc::now(),
        };
        assets.push(asset.clone());
        inventory::save(&self.paths.inventory(), &assets)?;

        let newly_listed = masters::append_authorized_id(&self.paths.authorized_ids(), id)?;
        tracing::info!(panel_id = %id, newly_listed, "Panel registered");
        Ok(asset)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use jigtrack_core::asset::RepairStage;
    use jigtrack_core::transaction::{
        FailureCategory, RemovalDetails, RemovalReason, TransactionAction,
    };

    fn open_store(dir: &tempfile::TempDir) -> LedgerStore {
        LedgerStore::open(dir.path()).unwrap()
    }

    fn panel(id: &str) -> PanelId {
        PanelId::new(id).unwrap()
    }

    fn install(id: &str, machine: &str, technician: &str) -> TransactionInput {
        TransactionInput {
            id: panel(id),
            technician: technician.to_string(),
            request: ActionRequest::Install {
                machine: machine.to_string(),
            },
            notes: String::new(),
        }
    }

    fn remove_for_repair(id: &str, stage: RepairStage) -> TransactionInput {
        TransactionInput {
            id: panel(id),
            technician: "Anand".to_string(),
            request: ActionRequest::Remove(RemovalDetails {
                reason: RemovalReason::Repair,
                stage: Some(stage),
                category: FailureCategory::Css,
                other_detail: String::new(),
            }),
            notes: "worn edge".to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // Store open
    // -----------------------------------------------------------------------

    #[test]
    fn open_creates_master_lists_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        assert_eq!(store.technicians().unwrap(), vec!["Admin", "Anand"]);
        assert_eq!(store.authorized_ids().unwrap(), vec!["SAMPLE-PANEL-ID"]);
        // Table files only appear on first commit.
        assert!(!store.paths().inventory().exists());
    }

    #[test]
    fn open_upgrades_legacy_inventory_schema() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("inventory.csv"),
            "Panel_ID,Status,Location,Last_Updated\n\
             54R15564,In Use,ECP101,2024-03-01 10:00\n",
        )
        .unwrap();

        let store = open_store(&dir);
        let snapshot = store.load().unwrap();

        assert_eq!(snapshot.inventory.len(), 1);
        assert_eq!(snapshot.inventory[0].sub_status, None);
        let content = std::fs::read_to_string(store.paths().inventory()).unwrap();
        assert!(content.contains("Sub_Status"));
    }

    // -----------------------------------------------------------------------
    // The example scenario: install, then remove for repair
    // -----------------------------------------------------------------------

    #[test]
    fn install_then_remove_walks_the_expected_states() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        // Install to Machine 1.
        let applied = store
            .commit_transaction(&install("54R15564", "Machine 1", "Anand"))
            .unwrap();
        assert_eq!(applied.asset.status, AssetStatus::InUse);
        assert_eq!(applied.asset.location, "Machine 1");

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.inventory.len(), 1);
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.history[0].action, TransactionAction::Install);
        assert_eq!(snapshot.history[0].user, "Anand");

        let first_history_row = snapshot.history[0].clone();

        // Remove for repair, waiting on parts.
        let applied = store
            .commit_transaction(&remove_for_repair("54R15564", RepairStage::WaitingParts))
            .unwrap();
        assert_eq!(applied.asset.status, AssetStatus::UnderRepair);
        assert_eq!(applied.asset.sub_status, Some(RepairStage::WaitingParts));
        assert_eq!(applied.asset.location, "Workshop");

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.inventory.len(), 1);
        assert_eq!(snapshot.history.len(), 2);
        // The first row is untouched by the second commit.
        assert_eq!(snapshot.history[0], first_history_row);
    }

    #[test]
    fn repeated_transactions_keep_one_inventory_row_and_grow_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        for round in 0..5 {
            let machine = format!("ECP10{round}");
            store
                .commit_transaction(&install("54R15564", &machine, "Admin"))
                .unwrap();
        }

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.inventory.len(), 1);
        assert_eq!(snapshot.inventory[0].location, "ECP104");
        assert_eq!(snapshot.history.len(), 5);
        assert!(snapshot
            .history
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }

    #[test]
    fn transaction_ids_are_normalized_before_upsert() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        store
            .commit_transaction(&install("  54r15564 ", "ECP101", "Anand"))
            .unwrap();
        store
            .commit_transaction(&install("54R15564", "ECP102", "Anand"))
            .unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.inventory.len(), 1);
        assert_eq!(snapshot.inventory[0].id.as_str(), "54R15564");
    }

    // -----------------------------------------------------------------------
    // Rejected transactions
    // -----------------------------------------------------------------------

    #[test]
    fn rejected_other_category_leaves_both_tables_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store
            .commit_transaction(&install("54R15564", "ECP101", "Anand"))
            .unwrap();
        let before = store.load().unwrap();

        let rejected = TransactionInput {
            id: panel("54R15564"),
            technician: "Anand".to_string(),
            request: ActionRequest::Remove(RemovalDetails {
                reason: RemovalReason::Repair,
                stage: None,
                category: FailureCategory::Other,
                other_detail: "  ".to_string(),
            }),
            notes: "notes do not satisfy the explanation rule".to_string(),
        };
        let err = store.commit_transaction(&rejected);
        assert!(matches!(
            err,
            Err(StoreError::Core(CoreError::Validation(_)))
        ));

        let after = store.load().unwrap();
        assert_eq!(after.inventory, before.inventory);
        assert_eq!(after.history, before.history);
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    #[test]
    fn register_creates_storage_row_and_lists_the_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let id = panel("54R15564");

        let asset = store.register(&id).unwrap();

        assert_eq!(asset.status, AssetStatus::Storage);
        assert_eq!(asset.location, "Storage");
        assert!(store
            .authorized_ids()
            .unwrap()
            .contains(&"54R15564".to_string()));
        // Registration writes no history row.
        assert!(store.load().unwrap().history.is_empty());
    }

    #[test]
    fn registering_a_known_panel_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let id = panel("54R15564");
        store.register(&id).unwrap();

        let err = store.register(&id);
        assert!(matches!(
            err,
            Err(StoreError::Core(CoreError::Conflict(_)))
        ));
        assert_eq!(store.load().unwrap().inventory.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    #[test]
    fn lookup_walks_inventory_then_master_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        std::fs::write(
            store.paths().authorized_ids(),
            "54R15564\n54R15565\n",
        )
        .unwrap();
        store
            .commit_transaction(&install("54R15564", "ECP101", "Anand"))
            .unwrap();

        assert!(matches!(
            store.lookup(&panel("54R15564")).unwrap(),
            IdLookup::Known(_)
        ));
        assert_eq!(
            store.lookup(&panel("54R15565")).unwrap(),
            IdLookup::Registrable
        );
        assert_eq!(
            store.lookup(&panel("NOT-LISTED")).unwrap(),
            IdLookup::Unlisted
        );
    }

    // -----------------------------------------------------------------------
    // Round trip
    // -----------------------------------------------------------------------

    #[test]
    fn reopening_the_store_preserves_logical_rows() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = open_store(&dir);
            store
                .commit_transaction(&install("54R15564", "ECP101", "Anand"))
                .unwrap();
            store
                .commit_transaction(&remove_for_repair("54R15564", RepairStage::ToCheck))
                .unwrap();
        }

        let reopened = open_store(&dir);
        let snapshot = reopened.load().unwrap();

        assert_eq!(snapshot.inventory.len(), 1);
        assert_eq!(snapshot.inventory[0].status, AssetStatus::UnderRepair);
        assert_eq!(snapshot.inventory[0].sub_status, Some(RepairStage::ToCheck));
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.history[0].action, TransactionAction::Install);
        assert_eq!(snapshot.history[1].action, TransactionAction::Remove);
    }

    #[test]
    fn export_matches_persisted_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store
            .commit_transaction(&install("54R15564", "ECP101", "Anand"))
            .unwrap();

        let exported = store.export_history_csv().unwrap();
        let on_disk = std::fs::read_to_string(store.paths().history()).unwrap();
        assert_eq!(exported, on_disk);
    }
}
