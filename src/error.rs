use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("Cannot simulate. Total allocation must be {required}%. Current: {actual}%.")]
    InvalidAllocationTotal { required: u32, actual: u32 },
}
