use std::time::Instant;
use tracing::{info, warn};

use crate::domain::extract_domain;
use crate::stats::AggregationResult;

/// Drains `emails` and counts how often each domain shows up.
///
/// Emails without a valid domain only bump `invalid_count`. Nothing is returned
/// until the stream is exhausted.
pub fn aggregate<I>(emails: I) -> AggregationResult
where
    I: IntoIterator<Item = String>,
{
    let start_time = Instant::now();
    info!(action = "start", component = "aggregator", "Counting email domains");

    let mut result = AggregationResult::default();

    for email in emails {
        match extract_domain(&email) {
            Ok(domain) => {
                if let Some(count) = result.domain_counts.get_mut(domain) {
                    *count += 1;
                } else {
                    result.domain_counts.insert(domain.to_string(), 1);
                }
            }
            Err(e) => {
                warn!(
                    action = "skip",
                    component = "aggregator",
                    email = %email,
                    error = %e,
                    "Skipping invalid email"
                );
                result.invalid_count += 1;
            }
        }
    }

    info!(
        action = "complete",
        component = "aggregator",
        unique_domains = result.unique_domains(),
        invalid_emails = result.invalid_count,
        duration_ms = start_time.elapsed().as_millis(),
        "Domain counting completed"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{stream_reader, SourceOptions};
    use std::io::Cursor;

    fn emails(list: &[&str]) -> Vec<String> {
        list.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn counts_domains_and_invalid_emails() {
        let result = aggregate(emails(&[
            "user1@example.com",
            "user2@example.com",
            "user3@test.com",
            "invalid-email.com",
            "user4@test.com",
        ]));

        assert_eq!(result.domain_counts.len(), 2);
        assert_eq!(result.domain_counts["example.com"], 2);
        assert_eq!(result.domain_counts["test.com"], 2);
        assert_eq!(result.invalid_count, 1);
    }

    #[test]
    fn invalid_only_input_records_no_domains() {
        let result = aggregate(emails(&["invalid-email.com"]));
        assert!(result.domain_counts.is_empty());
        assert_eq!(result.invalid_count, 1);
    }

    #[test]
    fn empty_stream_gives_empty_result() {
        let result = aggregate(Vec::new());
        assert_eq!(result, AggregationResult::default());
    }

    #[test]
    fn domains_are_case_sensitive() {
        let result = aggregate(emails(&["a@Example.com", "b@example.com"]));
        assert_eq!(result.domain_counts.len(), 2);
    }

    #[test]
    fn counts_add_up_to_emitted_rows() {
        let input = "id,name,email\n\
                     1,A,a@one.com\n\
                     2,B\n\
                     3,C,not-an-email\n\
                     4,D,d@one.com\n\
                     5,E,e@two.com\n\
                     6,F,\n";
        let reader = Cursor::new(input.as_bytes().to_vec());
        let mut stream = stream_reader(reader, SourceOptions::default());
        let result = aggregate(&mut stream);
        let stats = stream.finish().unwrap();

        assert_eq!(result.valid_count() + result.invalid_count, stats.emitted);
        assert_eq!(stats.data_rows(), 6);
        assert_eq!(stats.short_rows, 1);
        assert_eq!(result.invalid_count, 2);
        assert_eq!(result.domain_counts["one.com"], 2);
    }

    #[test]
    fn scenario_header_and_two_rows() {
        let input = "first,last,email\nOmer,K,omer@example.com\nAli,V,ali@test.com\n";
        let reader = Cursor::new(input.as_bytes().to_vec());
        let mut stream = stream_reader(reader, SourceOptions::default());
        let result = aggregate(&mut stream);
        stream.finish().unwrap();

        assert_eq!(result.domain_counts.len(), 2);
        assert_eq!(result.domain_counts["example.com"], 1);
        assert_eq!(result.domain_counts["test.com"], 1);
        assert_eq!(result.invalid_count, 0);
    }

    #[test]
    fn scenario_short_row_is_not_invalid() {
        let input = "id,name,email\n1,Omer\n2,Ali,ali@test.com\n";
        let reader = Cursor::new(input.as_bytes().to_vec());
        let mut stream = stream_reader(reader, SourceOptions::default());
        let result = aggregate(&mut stream);
        stream.finish().unwrap();

        assert_eq!(result.domain_counts.len(), 1);
        assert_eq!(result.domain_counts["test.com"], 1);
        assert_eq!(result.invalid_count, 0);
    }
}
