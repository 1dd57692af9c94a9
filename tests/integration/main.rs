//! Integration tests against a mock YouTube Data API

mod crawl_tests;
