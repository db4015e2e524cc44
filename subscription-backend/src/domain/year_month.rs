// src/domain/year_month.rs
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 外部表現 "YYYY-MM" の正規表現
static YEAR_MONTH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("Invalid year-month regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month date '{0}': expected format YYYY-MM")]
pub struct YearMonthParseError(pub String);

/// 日を持たない月単位の日付
///
/// 保存時は月初日の `DATE` として扱い、日の部分は読み込み時に切り捨てる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthParseError> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(YearMonthParseError(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 月初日の `NaiveDate` に変換
    pub fn first_day(&self) -> NaiveDate {
        // new() で範囲を検証済みなので常に有効な日付になる
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// `self` から `other` までの月数（符号付き）
    pub fn months_until(&self, other: &YearMonth) -> i64 {
        other.ordinal() - self.ordinal()
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl From<YearMonth> for NaiveDate {
    fn from(value: YearMonth) -> Self {
        value.first_day()
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = YEAR_MONTH_REGEX
            .captures(s)
            .ok_or_else(|| YearMonthParseError(s.to_string()))?;

        let year = captures[1]
            .parse::<i32>()
            .map_err(|_| YearMonthParseError(s.to_string()))?;
        let month = captures[2]
            .parse::<u32>()
            .map_err(|_| YearMonthParseError(s.to_string()))?;

        Self::new(year, month).map_err(|_| YearMonthParseError(s.to_string()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
