//! Perso Core Library
//!
//! Review pipeline for pending bank transactions:
//! - Label normalization (bank noise removal)
//! - Smart grouping, with cheque and manual-ungroup handling
//! - Per-group statistics
//! - Group ranking with selectable strategies
//! - Boundary validation and CSV import of pending transactions
//! - Review configuration with embedded defaults

pub mod config;
pub mod error;
pub mod format;
pub mod grouping;
pub mod import;
pub mod models;
pub mod normalize;
pub mod ranking;
pub mod review;
pub mod validate;

pub use config::{load_config, ReviewConfig};
pub use error::{Error, Result};
pub use grouping::{aggregate, assign_groups, group_key_for, group_transactions, is_cheque_label};
pub use import::{parse_pending_csv, CsvOptions};
pub use models::{GroupKey, GroupStats, GroupedTransaction, SortStrategy, Transaction};
pub use normalize::{extract_card_member, normalize_label, CardMap};
pub use ranking::{rank_groups, rank_groups_by_name, sort_options, DEFAULT_MAX_GROUPS};
pub use review::{build_review_queue, ReviewGroup, ReviewOptions, ReviewQueue};
pub use validate::{validate_all, validate_transaction};
