//! Integration tests for rss2org
//!
//! These run the whole fetch-summarize-write workflow against mocked feed
//! and completion endpoints.

mod common {
    use rss2org::config::{Config, SectionConfig};
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::ResponseTemplate;

    pub fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    /// Config pointing every feed and the completion API at `base`.
    pub fn create_config(base: &str, out: &TempDir, sections: &[(&str, &[&str])]) -> Config {
        let mut config = Config {
            output_dir: out.path().display().to_string(),
            sections: sections
                .iter()
                .map(|(name, paths)| SectionConfig {
                    name: name.to_string(),
                    feeds: paths.iter().map(|p| format!("{}{}", base, p)).collect(),
                })
                .collect(),
            ..Config::default()
        };
        config.llm.base_url = format!("{}/v1", base);
        config.request_timeout_secs = 5;
        config
    }

    pub fn rss(title: &str, items: &[(&str, &str)]) -> String {
        let items: String = items
            .iter()
            .map(|(t, link)| {
                format!(
                    "<item><title>{t}</title><link>{link}</link>\
                     <description>&lt;p&gt;About {t}&lt;/p&gt;</description></item>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>{title}</title>{items}</channel></rss>"#
        )
    }

    pub fn xml_response(body: String) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body, "application/rss+xml")
    }

    pub fn completion(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": text}}]
        }))
    }
}

#[cfg(test)]
mod config_integration_tests {
    use rss2org::config::Config;

    #[test]
    fn test_load_shipped_feeds_config() {
        let config = Config::load("feeds.toml");
        assert!(config.is_ok(), "Failed to load feeds.toml: {:?}", config.err());

        // The shipped file mirrors the built-in registry
        assert_eq!(config.unwrap(), Config::default());
    }
}

#[cfg(test)]
mod fetcher_integration_tests {
    use super::common::*;
    use reqwest::Client;
    use rss2org::error::FetchError;
    use rss2org::fetcher::{FeedSource, HttpFeedSource};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_parses_served_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss"))
            .respond_with(xml_response(rss(
                "Tech News",
                &[("One", "https://x.example.com/1"), ("Two", "https://x.example.com/2")],
            )))
            .mount(&server)
            .await;

        let source = HttpFeedSource::with_client(Client::new());
        let feed = source.fetch(&format!("{}/rss", server.uri())).await;

        assert_eq!(feed.title, "Tech News");
        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.entries[1].link, "https://x.example.com/2");
        assert_eq!(feed.entries[0].raw_summary, "<p>About One</p>");
    }

    #[tokio::test]
    async fn test_error_status_yields_empty_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/gone", server.uri());
        let source = HttpFeedSource::with_client(Client::new());

        let err = source.try_fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 404));

        let feed = source.fetch(&url).await;
        assert_eq!(feed.title, url);
        assert!(feed.entries.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_feed_yields_empty_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let url = format!("{}/html", server.uri());
        let feed = HttpFeedSource::with_client(Client::new()).fetch(&url).await;

        assert_eq!(feed.title, url);
        assert!(feed.entries.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty_feed() {
        // Nothing listens on port 9 (discard) in the test environment
        let url = "http://127.0.0.1:9/rss";
        let feed = HttpFeedSource::with_client(Client::new()).fetch(url).await;

        assert_eq!(feed.title, url);
        assert!(feed.entries.is_empty());
    }
}

#[cfg(test)]
mod end_to_end_tests {
    use super::common::*;
    use chrono::NaiveDate;
    use rss2org::context::Context;
    use rss2org::fetcher::HttpFeedSource;
    use rss2org::pipeline::{self, EntryOutcome, SkipReason};
    use rss2org::summarizer::OpenAiSummarizer;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 9).unwrap()
    }

    #[tokio::test]
    async fn test_full_run_writes_org_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/journal"))
            .respond_with(xml_response(rss(
                "Hydro Journal",
                &[
                    ("Recharge Study", "https://j.example.com/1"),
                    ("Pumping Test", "https://j.example.com/2"),
                    ("Third Paper", "https://j.example.com/3"),
                    ("Fourth Paper", "https://j.example.com/4"),
                ],
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/releases"))
            .respond_with(xml_response(rss(
                "Releases",
                &[("Recharge Study", "https://r.example.com/dup"), ("v1.0", "https://r.example.com/1")],
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Pumping Test"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(completion("  - takeaway\nWhy this matters: it does.  "))
            .expect(3)
            .mount(&server)
            .await;

        let out = create_temp_dir();
        let config = create_config(
            &server.uri(),
            &out,
            &[("Academic Journals", &["/journal"]), ("Tools", &["/releases"])],
        );
        let ctx = Context::new(config, Some("sk-test".to_string())).unwrap();
        let source = HttpFeedSource::new(&ctx);
        let summarizer = OpenAiSummarizer::new(&ctx);

        let report = pipeline::run(&ctx, &source, &summarizer, date()).await.unwrap();

        assert_eq!(report.path, out.path().join("2024-12-09-rss-summaries.org"));
        let written = std::fs::read_to_string(&report.path).unwrap();

        let expected_head = [
            "#+TITLE: RSS Summaries 2024-12-09",
            "#+DATE: 2024-12-09",
            "#+FILETAGS: :rss:research:hydro:modelling:",
            "",
            "* Academic Journals",
            "** Feed: Hydro Journal",
            "*** Recharge Study",
            "[[https://j.example.com/1][Link to original article]]",
            "",
            "Summary from feed: *Hydro Journal*",
            "",
            "- takeaway\nWhy this matters: it does.",
            "",
            "*** Third Paper",
        ]
        .join("\n");
        assert!(written.starts_with(&expected_head), "unexpected output:\n{written}");

        // failed summary leaves no trace, fourth entry never considered
        assert!(!written.contains("Pumping Test"));
        assert!(!written.contains("Fourth Paper"));

        // duplicate title from the second feed is skipped
        assert!(written.contains("* Tools\n** Feed: Releases\n*** v1.0"));
        assert!(!written.contains("https://r.example.com/dup"));

        let outcomes = &report.digest.outcomes;
        assert_eq!(outcomes.len(), 5);
        assert!(matches!(
            &outcomes[1],
            EntryOutcome::Skipped { reason: SkipReason::SummaryFailed(msg), .. } if msg.contains("500")
        ));
        assert!(matches!(
            &outcomes[3],
            EntryOutcome::Skipped { reason: SkipReason::Duplicate { .. }, .. }
        ));
        assert_eq!(report.digest.summarized(), 3);
    }

    #[tokio::test]
    async fn test_run_with_unreachable_feed_still_writes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(completion("S"))
            .expect(0)
            .mount(&server)
            .await;

        let out = create_temp_dir();
        let config = create_config(&server.uri(), &out, &[("Only", &["/down"])]);
        let feed_url = config.sections[0].feeds[0].clone();
        let ctx = Context::new(config, Some("sk-test".to_string())).unwrap();

        let report = pipeline::run(
            &ctx,
            &HttpFeedSource::new(&ctx),
            &OpenAiSummarizer::new(&ctx),
            date(),
        )
        .await
        .unwrap();

        let written = std::fs::read_to_string(report.path).unwrap();
        assert!(written.ends_with(&format!("* Only\n** Feed: {}", feed_url)));
    }

    #[tokio::test]
    async fn test_null_completion_content_skips_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss"))
            .respond_with(xml_response(rss(
                "F",
                &[("Refused", "https://x.example.com/1"), ("Answered", "https://x.example.com/2")],
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Refused"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(completion("S"))
            .mount(&server)
            .await;

        let out = create_temp_dir();
        let config = create_config(&server.uri(), &out, &[("Only", &["/rss"])]);
        let ctx = Context::new(config, Some("sk-test".to_string())).unwrap();

        let report = pipeline::run(
            &ctx,
            &HttpFeedSource::new(&ctx),
            &OpenAiSummarizer::new(&ctx),
            date(),
        )
        .await
        .unwrap();

        let written = std::fs::read_to_string(&report.path).unwrap();
        assert!(!written.contains("*** Refused"));
        assert!(!written.contains("https://x.example.com/1"));
        assert!(written.contains("*** Answered"));
        assert!(matches!(
            &report.digest.outcomes[0],
            EntryOutcome::Skipped { reason: SkipReason::SummaryFailed(_), .. }
        ));
    }
}
