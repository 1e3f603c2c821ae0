//! Integration tests for the Dropbox adapter
//!
//! All tests run against a wiremock-based mock of the Dropbox API
//! (both the RPC and content hosts point at the same mock server).

mod common;
mod test_auth;
mod test_download;
mod test_list;
