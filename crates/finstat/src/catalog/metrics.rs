//! Slots of frequently used metrics.
//!
//! Values are 1-based and can be passed to [`super::metric_column`] or
//! [`finstat_format::DecodedRow::metric`].

/// Basic earnings per share.
pub const BASIC_EPS: usize = 1;
/// Earnings per share excluding non-recurring items.
pub const EPS_EXCLUDING_NONRECURRING: usize = 2;
/// Undistributed profit per share.
pub const UNDISTRIBUTED_PROFIT_PER_SHARE: usize = 3;
/// Net assets per share.
pub const BOOK_VALUE_PER_SHARE: usize = 4;
/// Capital reserve per share.
pub const CAPITAL_RESERVE_PER_SHARE: usize = 5;
/// Return on equity.
pub const RETURN_ON_EQUITY: usize = 6;
/// Operating cash flow per share.
pub const OPERATING_CASH_FLOW_PER_SHARE: usize = 7;

/// Cash and cash equivalents.
pub const CASH: usize = 8;
/// Accounts receivable.
pub const ACCOUNTS_RECEIVABLE: usize = 11;
/// Inventories.
pub const INVENTORIES: usize = 17;
/// Total current assets.
pub const TOTAL_CURRENT_ASSETS: usize = 21;
/// Goodwill.
pub const GOODWILL: usize = 35;
/// Total assets.
pub const TOTAL_ASSETS: usize = 40;
/// Short-term borrowings.
pub const SHORT_TERM_BORROWINGS: usize = 41;
/// Total current liabilities.
pub const TOTAL_CURRENT_LIABILITIES: usize = 54;
/// Long-term borrowings.
pub const LONG_TERM_BORROWINGS: usize = 55;
/// Total liabilities.
pub const TOTAL_LIABILITIES: usize = 63;
/// Paid-in capital.
pub const SHARE_CAPITAL: usize = 64;
/// Total shareholders' equity.
pub const TOTAL_EQUITY: usize = 72;

/// Operating revenue.
pub const OPERATING_REVENUE: usize = 74;
/// Operating costs.
pub const OPERATING_COSTS: usize = 75;
/// Operating profit.
pub const OPERATING_PROFIT: usize = 86;
/// Total profit before tax.
pub const TOTAL_PROFIT: usize = 92;
/// Income tax.
pub const INCOME_TAX: usize = 93;
/// Net profit.
pub const NET_PROFIT: usize = 95;
/// Net profit attributable to owners of the parent.
pub const NET_PROFIT_TO_PARENT: usize = 96;

/// Net cash flow from operating activities.
pub const OPERATING_CASH_FLOW: usize = 107;
/// Net cash flow from investing activities.
pub const INVESTING_CASH_FLOW: usize = 119;
/// Net cash flow from financing activities.
pub const FINANCING_CASH_FLOW: usize = 128;
/// Cash and equivalents at end of period.
pub const ENDING_CASH: usize = 133;

/// Current ratio.
pub const CURRENT_RATIO: usize = 159;
/// Quick ratio.
pub const QUICK_RATIO: usize = 160;
/// Total asset turnover.
pub const ASSET_TURNOVER: usize = 175;
/// Operating revenue growth.
pub const REVENUE_GROWTH: usize = 183;
/// Net profit growth.
pub const NET_PROFIT_GROWTH: usize = 184;
/// Gross margin.
pub const GROSS_MARGIN: usize = 202;
/// EBIT.
pub const EBIT: usize = 207;
/// EBITDA.
pub const EBITDA: usize = 208;
/// Debt to assets ratio.
pub const DEBT_TO_ASSETS: usize = 210;

/// Total shares outstanding.
pub const TOTAL_SHARES: usize = 238;
/// Listed tradable A shares.
pub const FLOAT_A_SHARES: usize = 239;
/// Number of shareholders.
pub const SHAREHOLDER_COUNT: usize = 242;
/// Number of holding institutions.
pub const INSTITUTION_COUNT: usize = 246;
/// Shares held by institutions.
pub const INSTITUTIONAL_SHARES: usize = 247;
