/// Billing month length used for every monthly figure.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Monthly income from a daily credit. Input is not validated: NaN and
/// infinities pass through and negative credits compute like any other.
pub fn monthly_income(daily_credit: f64) -> f64 {
    round2(daily_credit * DAYS_PER_MONTH)
}

/// Monthly income plus team reward and level income, rounded once after
/// summation.
pub fn total_monthly_income(daily_credit: f64, team_reward: f64, level_income: f64) -> f64 {
    round2(monthly_income(daily_credit) + team_reward + level_income)
}

/// Builder form of [`total_monthly_income`] where the bonus components
/// default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IncomeBreakdown {
    pub daily_credit: f64,
    pub team_reward: f64,
    pub level_income: f64,
}

impl IncomeBreakdown {
    pub fn new(daily_credit: f64) -> Self {
        IncomeBreakdown {
            daily_credit,
            ..Default::default()
        }
    }

    pub fn team_reward(mut self, amount: f64) -> Self {
        self.team_reward = amount;
        self
    }

    pub fn level_income(mut self, amount: f64) -> Self {
        self.level_income = amount;
        self
    }

    pub fn monthly(&self) -> f64 {
        monthly_income(self.daily_credit)
    }

    pub fn total(&self) -> f64 {
        total_monthly_income(self.daily_credit, self.team_reward, self.level_income)
    }
}
