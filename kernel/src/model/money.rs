use std::{fmt, ops::Mul};

use rust_decimal::Decimal;

/// 金額。小数点以下 2 桁の固定小数点で扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    const SCALE: u32 = 2;

    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, Self::SCALE))
    }

    pub fn from_units(units: i64) -> Self {
        Self::from_cents(units * 100)
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    // 保存はセント単位の整数で行う。3 桁目以降は銀行丸めで落とす
    pub fn cents(self) -> i64 {
        let mut scaled = self.0.round_dp(Self::SCALE);
        scaled.rescale(Self::SCALE);
        scaled.mantissa() as i64
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Self::Output {
        Money(self.0 * Decimal::from(rhs))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
