//! Read-side aggregation over the two tables.
//!
//! Everything here is recomputed from the in-memory tables on every view.
//! There are no stored aggregates, and empty inputs yield empty results
//! rather than errors.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::asset::{Asset, AssetStatus, RepairStage};
use crate::transaction::{TransactionAction, TransactionRecord};

// ---------------------------------------------------------------------------
// Status counts (KPI bar)
// ---------------------------------------------------------------------------

/// Per-status asset counts for the KPI counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub in_use: usize,
    pub under_repair: usize,
    pub under_pm: usize,
    pub damaged: usize,
    pub storage: usize,
    pub unknown: usize,
    pub other: usize,
}

pub fn status_counts(inventory: &[Asset]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for asset in inventory {
        match asset.status {
            AssetStatus::InUse => counts.in_use += 1,
            AssetStatus::UnderRepair => counts.under_repair += 1,
            AssetStatus::UnderPm => counts.under_pm += 1,
            AssetStatus::Damaged => counts.damaged += 1,
            AssetStatus::Storage => counts.storage += 1,
            AssetStatus::Unknown => counts.unknown += 1,
            AssetStatus::Other => counts.other += 1,
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Repair pipeline
// ---------------------------------------------------------------------------

/// Under-Repair assets counted per pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairPipeline {
    pub to_check: usize,
    pub waiting_parts: usize,
    pub ready_to_install: usize,
}

pub fn repair_pipeline(inventory: &[Asset]) -> RepairPipeline {
    let mut pipeline = RepairPipeline::default();
    for asset in inventory {
        if asset.status != AssetStatus::UnderRepair {
            continue;
        }
        // Under-Repair rows without a stage came from hand-edited files;
        // they count as the pipeline entry stage.
        match asset.sub_status.unwrap_or(RepairStage::ToCheck) {
            RepairStage::ToCheck => pipeline.to_check += 1,
            RepairStage::WaitingParts => pipeline.waiting_parts += 1,
            RepairStage::ReadyToInstall => pipeline.ready_to_install += 1,
        }
    }
    pipeline
}

// ---------------------------------------------------------------------------
// Removal trend
// ---------------------------------------------------------------------------

/// One point of the removal trend: number of removals on `date` in
/// `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub category: String,
    pub count: u64,
}

/// Per-day Remove counts grouped by category, ordered by date then category.
pub fn removal_trend(history: &[TransactionRecord]) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<(NaiveDate, &str), u64> = BTreeMap::new();
    for record in history {
        if record.action != TransactionAction::Remove {
            continue;
        }
        let date = record.timestamp.date_naive();
        *buckets.entry((date, record.category.as_str())).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|((date, category), count)| TrendPoint {
            date,
            category: category.to_string(),
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Audit listing
// ---------------------------------------------------------------------------

/// History rows newest-first for the audit view.
///
/// Stored timestamps are minute-resolution, so ties are common; walking the
/// log back-to-front before the stable sort breaks them by recency of
/// append.
pub fn audit_listing(history: &[TransactionRecord]) -> Vec<TransactionRecord> {
    let mut rows: Vec<TransactionRecord> = history.iter().rev().cloned().collect();
    rows.sort_by_key(|record| std::cmp::Reverse(record.timestamp));
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
