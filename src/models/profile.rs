//! Budget profile model
//!
//! The user's declared monthly income and the part of it they want to keep
//! away from discretionary spending.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Income assumed when no profile could be fetched and the caller opts in
pub const DEFAULT_FALLBACK_INCOME: Money = Money::from_major_units(2000);

/// Validation errors for profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    NegativeIncome,
    NegativeSavingsGoal,
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeIncome => write!(f, "Monthly income cannot be negative"),
            Self::NegativeSavingsGoal => write!(f, "Savings goal cannot be negative"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Income and savings goal for the current month
///
/// No ordering is enforced between the two: a goal above the income simply
/// yields a negative spendable capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub monthly_income: Money,
    pub savings_goal: Money,
}

impl Profile {
    /// Create a profile
    pub fn new(monthly_income: Money, savings_goal: Money) -> Self {
        Self {
            monthly_income,
            savings_goal,
        }
    }

    /// The explicit stand-in used when the real profile is unavailable
    pub fn fallback(monthly_income: Money) -> Self {
        Self::new(monthly_income, Money::zero())
    }

    /// Income minus the savings goal
    pub fn spendable_capacity(&self) -> Money {
        self.monthly_income - self.savings_goal
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.monthly_income.is_negative() {
            return Err(ProfileValidationError::NegativeIncome);
        }
        if self.savings_goal.is_negative() {
            return Err(ProfileValidationError::NegativeSavingsGoal);
        }
        Ok(())
    }
}

/// Where the profile behind a computation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    /// Fetched from the persistence layer
    Fetched,
    /// Caller-supplied fallback; results are provisional
    Fallback,
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetched => write!(f, "fetched"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spendable_capacity() {
        let profile = Profile::new(Money::from_major_units(50000), Money::from_major_units(10000));
        assert_eq!(profile.spendable_capacity(), Money::from_major_units(40000));
    }

    #[test]
    fn test_goal_above_income_is_allowed() {
        let profile = Profile::new(Money::from_major_units(1000), Money::from_major_units(1500));
        assert!(profile.validate().is_ok());
        assert_eq!(profile.spendable_capacity(), Money::from_major_units(-500));
    }

    #[test]
    fn test_fallback() {
        let profile = Profile::fallback(DEFAULT_FALLBACK_INCOME);
        assert_eq!(profile.monthly_income, Money::from_major_units(2000));
        assert!(profile.savings_goal.is_zero());
    }

    #[test]
    fn test_validation_negative_amounts() {
        let profile = Profile::new(Money::from_minor(-1), Money::zero());
        assert_eq!(profile.validate(), Err(ProfileValidationError::NegativeIncome));

        let profile = Profile::new(Money::zero(), Money::from_minor(-1));
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::NegativeSavingsGoal)
        );
    }
}
