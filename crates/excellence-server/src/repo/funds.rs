//! Which column of each raw-data table holds the fund name.

const FUND_COLUMN_MAPPINGS: &[(&str, &str)] = &[
    ("CITCO_ALLOC", "fs_desc"),
    ("CITCO_CAPACT", "CODE"),
    ("CITCO_PCAM_AEXBONDACCR", "FUND"),
    ("CITCO_PCAM_DEBT_COUPON_PAYMENTS_SUMMARY", "FUND"),
    ("CITCO_PCAM_DETAIL_TB", "FUND"),
    ("CITCO_PCAM_DIV", "FUND"),
    ("CITCO_PCAM_FX_CURVAL", "FUND"),
    ("CITCO_PCAM_GL", "FUND"),
    ("CITCO_PCAM_MONTHLYTB", "FUND"),
    ("CITCO_PCAM_PORTFHOLD", "FUND"),
    ("CITCO_PCAM_REALIZED_UNREALIZED_0", "FUND_ABBREV"),
    ("CITCO_PCAM_UNSETTLED", "FUND"),
    ("CITCO_PCAM_YETB", "FUND"),
    ("CITCO_NAV", "FUND_ABBREV"),
    ("CITCO_CAR", "FS_DESC"),
    ("CITCO_SPOS_PCAM", "SUBFUND"),
    ("CITCO_SECUR", "CLIENT_NAME"),
    ("HAAS_DI_SUMMARY", "FUND_NAME"),
    ("HAAS_DIRECT_TRANSACTIONS", "FUND_NAME"),
    ("HAAS_FI_SUMMARY", "FUND_NAME"),
    ("HAAS_FI_TRANSACTIONS", "FUND_NAME"),
    ("HAAS_FUND_PRICE", "FUND_NAME"),
    ("HAAS_GL_TRANSACTIONS", "FUND_NAME"),
    ("HAAS_INVESTOR_DATA", "FUND_NAME"),
    ("HAAS_INVESTOR_OPERATIONS", "FUND_NAME"),
    ("HAAS_TRIAL_BALANCE", "FUND_NAME"),
];

/// Fund column of a catalog, if the catalog can be filtered by fund
pub fn fund_column(catalog: &str) -> Option<&'static str> {
    FUND_COLUMN_MAPPINGS
        .iter()
        .find(|(table, _)| *table == catalog)
        .map(|(_, column)| *column)
}

pub fn has_fund_filtering(catalog: &str) -> bool {
    fund_column(catalog).is_some()
}
