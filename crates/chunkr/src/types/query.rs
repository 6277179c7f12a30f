use chrono::{DateTime, SecondsFormat, Utc};

/// Query parameters for `GET /task/{id}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetJobOptions {
    /// Populate `output` when the job has succeeded (`include_chunks`).
    pub include_result: Option<bool>,
    /// Return presigned asset URLs as base64 (`base64_urls`).
    pub base64_urls: Option<bool>,
}

impl GetJobOptions {
    pub fn with_result() -> Self {
        Self {
            include_result: Some(true),
            base64_urls: None,
        }
    }

    pub fn status_only() -> Self {
        Self {
            include_result: Some(false),
            base64_urls: None,
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_bool(&mut params, "include_chunks", self.include_result);
        push_bool(&mut params, "base64_urls", self.base64_urls);
        params
    }
}

/// Filtering and pagination for `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListJobsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub include_chunks: Option<bool>,
    pub base64_urls: Option<bool>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ListJobsQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        push_bool(&mut params, "include_chunks", self.include_chunks);
        push_bool(&mut params, "base64_urls", self.base64_urls);
        if let Some(start) = self.start {
            params.push(("start".to_string(), iso_timestamp(start)));
        }
        if let Some(end) = self.end {
            params.push(("end".to_string(), iso_timestamp(end)));
        }
        params
    }
}

fn push_bool(params: &mut Vec<(String, String)>, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        params.push((key.to_string(), value.to_string()));
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_get_job_options_only_sends_set_flags() {
        assert!(GetJobOptions::default().to_query_pairs().is_empty());
        assert_eq!(
            GetJobOptions::status_only().to_query_pairs(),
            pairs(&[("include_chunks", "false")])
        );
        assert_eq!(
            GetJobOptions {
                include_result: Some(true),
                base64_urls: Some(false),
            }
            .to_query_pairs(),
            pairs(&[("include_chunks", "true"), ("base64_urls", "false")])
        );
    }

    #[test]
    fn test_list_query_order_and_format() {
        let query = ListJobsQuery {
            page: Some(2),
            limit: Some(25),
            include_chunks: Some(false),
            base64_urls: None,
            start: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2024, 5, 8, 12, 30, 0).unwrap()),
        };

        assert_eq!(
            query.to_query_pairs(),
            pairs(&[
                ("page", "2"),
                ("limit", "25"),
                ("include_chunks", "false"),
                ("start", "2024-05-01T00:00:00.000Z"),
                ("end", "2024-05-08T12:30:00.000Z"),
            ])
        );
    }

    #[test]
    fn test_empty_list_query() {
        assert!(ListJobsQuery::default().to_query_pairs().is_empty());
    }
}
