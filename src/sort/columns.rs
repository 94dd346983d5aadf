//! Table columns of the screening dashboard.

use std::fmt;
use std::str::FromStr;

use super::field::FieldPath;
use crate::ScreenerError;

/// A sortable column of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Symbol,
    Price,
    Score,
    PFcf,
    Peg,
    Roe,
    DebtToEquity,
    HistoricalVolatility,
    IvShort,
    IvRank,
    IvRatio,
    Insider,
    Target,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 13] = [
        Column::Symbol,
        Column::Price,
        Column::Score,
        Column::PFcf,
        Column::Peg,
        Column::Roe,
        Column::DebtToEquity,
        Column::HistoricalVolatility,
        Column::IvShort,
        Column::IvRank,
        Column::IvRatio,
        Column::Insider,
        Column::Target,
    ];

    /// Header text.
    pub fn label(self) -> &'static str {
        match self {
            Column::Symbol => "Symbol",
            Column::Price => "Price",
            Column::Score => "Score",
            Column::PFcf => "P/FCF",
            Column::Peg => "PEG",
            Column::Roe => "ROE",
            Column::DebtToEquity => "Debt/Eq",
            Column::HistoricalVolatility => "HV",
            Column::IvShort => "IV (S)",
            Column::IvRank => "IV Rank",
            Column::IvRatio => "IV Ratio",
            Column::Insider => "Insider",
            Column::Target => "Target (L, M, H)",
        }
    }

    /// Field the column sorts on. Target sorts on the mean target.
    pub fn field_path(self) -> FieldPath {
        match self {
            Column::Symbol => FieldPath::top("symbol"),
            Column::Price => FieldPath::top("current_price"),
            Column::Score => FieldPath::metric("score"),
            Column::PFcf => FieldPath::metric("p_fcf"),
            Column::Peg => FieldPath::top("peg_ratio"),
            Column::Roe => FieldPath::top("return_on_equity"),
            Column::DebtToEquity => FieldPath::top("debt_to_equity"),
            Column::HistoricalVolatility => FieldPath::top("historical_volatility"),
            Column::IvShort => FieldPath::top("iv_short"),
            Column::IvRank => FieldPath::metric("iv_rank"),
            Column::IvRatio => FieldPath::top("iv_term_structure_ratio"),
            Column::Insider => FieldPath::top("insider_net_shares"),
            Column::Target => FieldPath::top("target_mean"),
        }
    }

    /// Short names accepted on the command line.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Symbol => &["symbol", "ticker"],
            Column::Price => &["price", "current_price"],
            Column::Score => &["score"],
            Column::PFcf => &["pfcf", "p/fcf", "p_fcf"],
            Column::Peg => &["peg", "peg_ratio"],
            Column::Roe => &["roe", "return_on_equity"],
            Column::DebtToEquity => &["de", "debt/eq", "debt_to_equity"],
            Column::HistoricalVolatility => &["hv", "historical_volatility"],
            Column::IvShort => &["iv", "iv (s)", "iv_short"],
            Column::IvRank => &["ivrank", "iv rank", "iv_rank"],
            Column::IvRatio => &["ivratio", "iv ratio", "iv_term_structure_ratio"],
            Column::Insider => &["insider", "insider_net_shares"],
            Column::Target => &["target", "target_mean"],
        }
    }

    /// The column that sorts on `path`, if any.
    pub fn for_field(path: &FieldPath) -> Option<Column> {
        Column::ALL.into_iter().find(|c| &c.field_path() == path)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Column {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Column::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == needle || c.aliases().contains(&needle.as_str()))
            .ok_or_else(|| ScreenerError::config(format!("unknown column '{}'", s.trim())))
    }
}
