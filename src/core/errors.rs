use crate::core::models::money::Money;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Coarse classification callers use to decide how to surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The snapshot contradicts itself; most likely an upstream bug.
    DataConsistency,
    /// The request was rejected before anything was computed.
    InvalidInput,
    NotFound,
    Infrastructure,
}

#[derive(Error, Debug, Serialize, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Expense payer is not in the supplied member set
    #[error("Expense {expense_id} is paid by unknown member {member_id}")]
    UnknownPayer { expense_id: String, member_id: String },

    /// Expense participant is not in the supplied member set
    #[error("Expense {expense_id} references unknown participant {member_id}")]
    UnknownParticipant { expense_id: String, member_id: String },

    /// Recorded payment names a party outside the member set
    #[error("Settlement {settlement_id} references unknown member {member_id}")]
    UnknownSettlementParty { settlement_id: String, member_id: String },

    /// Balances do not sum to zero
    #[error("Balances sum to {total} (tolerance {tolerance})")]
    UnbalancedLedger { total: Money, tolerance: Money },

    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// An amount or running total left the representable range
    #[error("Amount overflow in {0}")]
    AmountOverflow(String),

    #[error("Member set is empty")]
    EmptyMemberSet,

    #[error("Member {0} appears more than once")]
    DuplicateMember(String),

    #[error("Cannot record a payment from {0} to themselves")]
    SelfSettlement(String),

    /// Participant shares cannot be reconciled with the expense
    #[error("Invalid split for expense {0}: {1}")]
    InvalidSplit(String, String),

    #[error("Expense titled `{0}` already exists in the group")]
    DuplicateExpenseTitle(String),

    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Member {0} is not a group member")]
    NotGroupMember(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::UnknownPayer { .. }
            | LedgerError::UnknownParticipant { .. }
            | LedgerError::UnknownSettlementParty { .. }
            | LedgerError::UnbalancedLedger { .. } => ErrorKind::DataConsistency,
            LedgerError::InvalidInput(..)
            | LedgerError::AmountOverflow(_)
            | LedgerError::EmptyMemberSet
            | LedgerError::DuplicateMember(_)
            | LedgerError::SelfSettlement(_)
            | LedgerError::InvalidSplit(..)
            | LedgerError::DuplicateExpenseTitle(_) => ErrorKind::InvalidInput,
            LedgerError::GroupNotFound(_) | LedgerError::ExpenseNotFound(_) | LedgerError::NotGroupMember(_) => {
                ErrorKind::NotFound
            }
            LedgerError::StorageError(_) | LedgerError::LoggingError(_) | LedgerError::CacheError(_) => {
                ErrorKind::Infrastructure
            }
        }
    }

    pub fn is_data_consistency(&self) -> bool {
        self.kind() == ErrorKind::DataConsistency
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
