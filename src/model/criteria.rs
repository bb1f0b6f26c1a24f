use chrono::NaiveDateTime;

use super::{AccountId, ValidationError};

/// Account and half-open date window `[from, to)` for a balance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCriteria {
    account_id: AccountId,
    from: NaiveDateTime,
    to: NaiveDateTime,
}

impl QueryCriteria {
    pub fn new(
        account_id: AccountId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        if to < from {
            return Err(ValidationError::InvalidDateRange { from, to });
        }
        Ok(Self {
            account_id,
            from,
            to,
        })
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Inclusive start of the window
    pub fn from(&self) -> NaiveDateTime {
        self.from
    }

    /// Exclusive end of the window
    pub fn to(&self) -> NaiveDateTime {
        self.to
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.from <= timestamp && timestamp < self.to
    }
}
