//! Shared constants used across pastebin crates.

/// Default API port for the pastebin server.
pub const DEFAULT_PORT: u16 = 38520;

/// Default maximum request body accepted by the API layer.
///
/// Content is capped at [`MAX_CONTENT_CHARS`] characters, which can take up to
/// four bytes each once JSON-encoded.
pub const DEFAULT_MAX_BODY_SIZE: usize = 4 * 1024 * 1024;

/// Default base URL for CLI/API clients.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://localhost:38520";

/// Header carrying the authenticated user id, set by the upstream auth provider.
pub const USER_HEADER: &str = "x-pastebin-user";

/// Length of generated paste identifiers.
pub const PASTE_ID_LENGTH: usize = 10;

/// Fixed page size for public listing and search.
pub const PAGE_SIZE: usize = 20;

/// Maximum paste title length, in characters.
pub const MAX_TITLE_CHARS: usize = 100;
/// Maximum paste content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 500_000;
/// Maximum display-name length for provisioned users.
pub const MAX_USER_NAME_CHARS: usize = 50;
