//! FINRA Margin Statistics Source
//!
//! FINRA publishes margin-account debit balances as an HTML table on its
//! margin-statistics page. This client extracts the table, locates the
//! "Debit Balances" column and parses the month labels (`Jan-24` style).

use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{Html, Selector};

use macro_watchdog::error::{Result, WatchdogError};
use macro_watchdog::feeds::{HistoryPoint, MarginDebtSource};
use macro_watchdog::observation::MarginDebtObservation;

const MARGIN_STATISTICS_URL: &str =
    "https://www.finra.org/rules-guidance/key-topics/margin-accounts/margin-statistics";

/// FINRA margin statistics client
pub struct FinraClient {
    client: reqwest::Client,
    url: String,
}

impl Default for FinraClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FinraClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; macro-watchdog/0.1)")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url: MARGIN_STATISTICS_URL.into(),
        }
    }

    /// Override the statistics page URL (for tests)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Fetch and parse the statistics table, newest month first
    async fn monthly_rows(&self) -> Result<Vec<(NaiveDate, i64)>> {
        let html = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_margin_table(&html)
            .ok_or_else(|| WatchdogError::Feed("margin statistics table not found".into()))
    }
}

/// Extract (month, debit balance) rows from the statistics page.
///
/// The page carries several tables; the relevant one is identified by a
/// header cell containing "Debit Balances". Rows that fail date or amount
/// parsing are skipped. Returns rows sorted newest first, or `None` when no
/// table matches.
fn parse_margin_table(html: &str) -> Option<Vec<(NaiveDate, i64)>> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").ok()?;
    let row_sel = Selector::parse("tr").ok()?;
    let cell_sel = Selector::parse("th, td").ok()?;

    for table in document.select(&table_sel) {
        let rows: Vec<Vec<String>> = table
            .select(&row_sel)
            .map(|row| {
                row.select(&cell_sel)
                    .map(|cell| cell.text().collect::<String>().trim().to_string())
                    .collect()
            })
            .collect();

        let Some(header) = rows.first() else {
            continue;
        };

        let Some(debit_col) = header.iter().position(|h| h.contains("Debit Balances")) else {
            continue;
        };
        let date_col = header
            .iter()
            .position(|h| h.contains("Month") || h.contains("Year"))
            .unwrap_or(0);

        let mut parsed: Vec<(NaiveDate, i64)> = rows[1..]
            .iter()
            .filter_map(|row| {
                let date = parse_month(row.get(date_col)?)?;
                let amount = parse_amount(row.get(debit_col)?)?;
                Some((date, amount))
            })
            .collect();

        if !parsed.is_empty() {
            parsed.sort_by(|a, b| b.0.cmp(&a.0));
            return Some(parsed);
        }
    }

    None
}

/// FINRA month labels come as `Jan-24`; older pages spell the year out.
fn parse_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(&format!("01-{raw}"), "%d-%b-%y")
        .or_else(|_| NaiveDate::parse_from_str(&format!("01-{raw}"), "%d-%b-%Y"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("01 {raw}"), "%d %B %Y"))
        .ok()
}

fn parse_amount(raw: &str) -> Option<i64> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[async_trait]
impl MarginDebtSource for FinraClient {
    async fn latest(&self) -> Result<MarginDebtObservation> {
        let rows = self.monthly_rows().await?;
        let (date, value) = rows
            .first()
            .copied()
            .ok_or_else(|| WatchdogError::NoData("margin statistics".into()))?;

        Ok(MarginDebtObservation {
            indicator: "FINRA Margin Debt".into(),
            value,
            date: date.format("%Y-%m-%d").to_string(),
            note: "Value in Millions".into(),
        })
    }

    async fn history(&self, limit: usize) -> Result<Vec<HistoryPoint>> {
        let mut rows = self.monthly_rows().await?;
        rows.reverse(); // oldest first for charting

        let skip = rows.len().saturating_sub(limit);
        Ok(rows
            .into_iter()
            .skip(skip)
            .map(|(date, value)| HistoryPoint::new(date.format("%Y-%m-%d").to_string(), value as f64))
            .collect())
    }

    fn name(&self) -> &str {
        "FINRA"
    }
}
