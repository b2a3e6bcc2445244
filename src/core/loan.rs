//! Fixed-rate annuity loan calculations.

use crate::core::error::{Error, Result};

const MUST_BE_POSITIVE: &str = "must be greater than 0";
const MUST_BE_FINITE: &str = "must be a finite number";
const OUT_OF_RANGE: &str = "is outside the range a payment can be computed for";

/// Validated loan parameters. Principal is in RUB, the rate is an annual
/// nominal percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loan {
    principal: f64,
    months: u32,
    annual_rate_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// One installment of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal_part: f64,
    pub interest_part: f64,
    pub remaining_balance: f64,
}

impl Loan {
    /// Checks principal, months and rate in that order; the first failing field is reported.
    pub fn new(principal: f64, months: u32, annual_rate_percent: f64) -> Result<Self> {
        ensure_positive("principal", principal)?;
        if months == 0 {
            return Err(Error::invalid_input("months", MUST_BE_POSITIVE));
        }
        ensure_positive("annual rate", annual_rate_percent)?;

        let loan = Self {
            principal,
            months,
            annual_rate_percent,
        };
        // Rates near f64::MIN_POSITIVE underflow to a zero monthly rate.
        let summary = loan.summary();
        if loan.monthly_rate() == 0.0
            || !summary.monthly_payment.is_finite()
            || !summary.total_payment.is_finite()
        {
            return Err(Error::invalid_input("annual rate", OUT_OF_RANGE));
        }
        Ok(loan)
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Annuity payment `P * r / (1 - (1 + r)^-n)`.
    ///
    /// The denominator is evaluated as `-expm1(-n * ln1p(r))`, which is the same
    /// quantity but keeps its precision when `r` is very small.
    pub fn monthly_payment(&self) -> f64 {
        let r = self.monthly_rate();
        let n = f64::from(self.months);
        let discount = -(-n * r.ln_1p()).exp_m1();
        self.principal * r / discount
    }

    pub fn summary(&self) -> LoanSummary {
        let monthly_payment = self.monthly_payment();
        let total_payment = monthly_payment * f64::from(self.months);
        LoanSummary {
            monthly_payment,
            total_payment,
            total_interest: total_payment - self.principal,
        }
    }

    /// Month-by-month split of each payment into interest and principal.
    /// Rows are produced lazily; the last installment absorbs rounding drift
    /// so the balance ends at zero.
    pub fn schedule(&self) -> Schedule {
        Schedule {
            rate: self.monthly_rate(),
            payment: self.monthly_payment(),
            balance: self.principal,
            month: 0,
            months: self.months,
        }
    }
}

/// Iterator over the installments of a [`Loan`].
#[derive(Debug, Clone)]
pub struct Schedule {
    rate: f64,
    payment: f64,
    balance: f64,
    month: u32,
    months: u32,
}

impl Iterator for Schedule {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<AmortizationRow> {
        if self.month >= self.months {
            return None;
        }
        self.month += 1;

        let interest_part = self.balance * self.rate;
        let (payment, principal_part) = if self.month == self.months {
            (self.balance + interest_part, self.balance)
        } else {
            (self.payment, self.payment - interest_part)
        };
        self.balance -= principal_part;

        Some(AmortizationRow {
            month: self.month,
            payment,
            principal_part,
            interest_part,
            remaining_balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.months - self.month) as usize;
        (left, Some(left))
    }
}

/// Validates the inputs and computes the payment summary in one step.
pub fn calculate(principal: f64, months: u32, annual_rate_percent: f64) -> Result<LoanSummary> {
    Ok(Loan::new(principal, months, annual_rate_percent)?.summary())
}

fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid_input(field, MUST_BE_FINITE));
    }
    if value <= 0.0 {
        return Err(Error::invalid_input(field, MUST_BE_POSITIVE));
    }
    Ok(())
}
