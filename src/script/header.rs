use regex::{NoExpand, Regex};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_USER: &str = "SYSDBA";
pub const DEFAULT_PASSWORD: &str = "masterkey";
pub const DEFAULT_PAGE_SIZE: u32 = 8192;
pub const DEFAULT_CHARSET: &str = "NONE";

/// Creation parameters pattern-matched out of a header script.
///
/// Every fact falls back to the engine's conventional default when the script
/// does not declare it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFacts {
    pub user: String,
    pub password: String,
    pub page_size: u32,
    pub charset: String,
}

fn user_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)USER\s+'?(\w+)'?").expect("valid pattern"))
}

fn password_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)PASSWORD\s+'?(\w+)'?").expect("valid pattern"))
}

fn page_size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)PAGE_SIZE\s+(\d+)").expect("valid pattern"))
}

fn charset_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)CHARACTER\s+SET\s+(\w+)").expect("valid pattern"))
}

fn create_database_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)CREATE\s+DATABASE\s+'.+?'").expect("valid pattern"))
}

/// Extract user, password, page size and character set from a header script.
pub fn parse_header_facts(script: &str) -> HeaderFacts {
    let capture = |re: &Regex| {
        re.captures(script)
            .map(|caps| caps[1].to_string())
    };

    let page_size = page_size_re()
        .captures(script)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);

    HeaderFacts {
        user: capture(user_re()).unwrap_or_else(|| DEFAULT_USER.to_string()),
        password: capture(password_re()).unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        page_size,
        charset: capture(charset_re()).unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
    }
}

/// Replace the path argument of the header's `CREATE DATABASE` statement with
/// the actual target database file path.
pub fn rewrite_database_path(script: &str, db_path: &Path) -> String {
    let replacement = format!("CREATE DATABASE '{}'", db_path.display());
    create_database_re()
        .replace(script, NoExpand(&replacement))
        .into_owned()
}
