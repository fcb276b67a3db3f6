//! # Quill (Blogging Backend API)
//!
//! `quill` is a blogging backend: account registration and login, stateless
//! cookie sessions, and authoring of posts.
//!
//! ## Sessions
//!
//! Login issues a compact HMAC-signed token (see [`token`]) carried in an
//! `HttpOnly` cookie. The server keeps no session table; a token stays valid
//! until the client discards it or its embedded expiry elapses.
//!
//! ## Ownership
//!
//! Every post records its author at creation time and only that author may
//! change its content. Reads (list and fetch) are public.

pub mod api;
pub mod cli;
pub mod token;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
