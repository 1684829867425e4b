pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSE_UPDATED: &str = "EXPENSE_UPDATED";
pub const EXPENSES_QUERIED: &str = "EXPENSES_QUERIED";
pub const PAYMENT_RECORDED: &str = "PAYMENT_RECORDED";
pub const BALANCES_QUERIED: &str = "BALANCES_QUERIED";
pub const SETTLEMENTS_SUGGESTED: &str = "SETTLEMENTS_SUGGESTED";
pub const HISTORY_QUERIED: &str = "HISTORY_QUERIED";

pub const MAX_TITLE_LENGTH: usize = 50;
